//! Typed publish/subscribe with automatic listener lifecycle

use super::listener::{AnyFn, Callback, EventFn, Registration};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::hash::Hash;

/// Key in the listener registry.
///
/// `Any` is the reserved catch-all slot. It is a dedicated variant rather
/// than a magic event value, so no user-supplied `E` can collide with it,
/// and since [`EventEmitter::emit`] only accepts an `E` the catch-all pass
/// can never re-trigger itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKey<E> {
    Named(E),
    Any,
}

/// A single-threaded typed event dispatcher.
///
/// Maps event names to ordered listener registrations. Listeners are
/// invoked synchronously, in registration order, over a snapshot taken when
/// the dispatch starts: callbacks may freely add or remove listeners (or
/// emit again) mid-dispatch without corrupting the iteration, and such
/// mutations take effect for subsequent emissions.
///
/// Listener identity is `Rc` pointer identity, so removal requires the same
/// `Rc` the caller registered; a callback the type system would reject
/// cannot be registered in the first place.
///
/// ```
/// use std::rc::Rc;
/// use keystate::emitter::{EventEmitter, EventFn};
///
/// let emitter: EventEmitter<&str, bool> = EventEmitter::new();
/// let on_jump: EventFn<bool> = Rc::new(|grounded| println!("jump ({grounded})"));
/// emitter.on("jump", Rc::clone(&on_jump));
/// assert_eq!(emitter.emit("jump", true), 1);
/// emitter.remove_listener(&"jump", &on_jump);
/// assert_eq!(emitter.emit("jump", true), 0);
/// ```
pub struct EventEmitter<E, P> {
    events: RefCell<HashMap<EventKey<E>, Vec<Registration<E, P>>>>,
    next_id: Cell<u64>,
}

impl<E, P> EventEmitter<E, P>
where
    E: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            events: RefCell::new(HashMap::new()),
            next_id: Cell::new(0),
        }
    }

    /// Register `callback` for `event`.
    ///
    /// `count == 0` means fire without limit; any other value fires that
    /// many times and then self-removes. Returns the number of listeners now
    /// registered for the event.
    pub fn add_listener(&self, event: E, callback: EventFn<P>, count: u32) -> usize {
        self.insert(EventKey::Named(event), Callback::Named(callback), count)
    }

    /// Register an unbounded listener. Returns `self` for chaining.
    pub fn on(&self, event: E, callback: EventFn<P>) -> &Self {
        self.add_listener(event, callback, 0);
        self
    }

    /// Register a one-shot listener. Returns `self` for chaining.
    pub fn once(&self, event: E, callback: EventFn<P>) -> &Self {
        self.add_listener(event, callback, 1);
        self
    }

    /// Register a catch-all observer that sees every emission, after the
    /// event's own listeners have run, as `(event, payload)`.
    pub fn any(&self, callback: AnyFn<E, P>) -> &Self {
        self.insert(EventKey::Any, Callback::Any(callback), 0);
        self
    }

    /// Remove every registration of `callback` for `event`.
    ///
    /// Returns whether the event had any listeners at all. Removing a
    /// callback that was never added leaves the registry unchanged.
    pub fn remove_listener(&self, event: &E, callback: &EventFn<P>) -> bool {
        let key = EventKey::Named(event.clone());
        let mut events = self.events.borrow_mut();
        let Some(registrations) = events.get_mut(&key) else {
            return false;
        };
        registrations.retain(|reg| !reg.callback.is_named(callback));
        if registrations.is_empty() {
            events.remove(&key);
        }
        true
    }

    /// Remove every catch-all registration of `callback`.
    pub fn remove_any_listener(&self, callback: &AnyFn<E, P>) -> bool {
        let mut events = self.events.borrow_mut();
        let Some(registrations) = events.get_mut(&EventKey::Any) else {
            return false;
        };
        registrations.retain(|reg| !reg.callback.is_any(callback));
        if registrations.is_empty() {
            events.remove(&EventKey::Any);
        }
        true
    }

    /// Drop every listener for one event.
    pub fn off(&self, event: &E) {
        self.events
            .borrow_mut()
            .remove(&EventKey::Named(event.clone()));
    }

    /// Drop every catch-all observer.
    pub fn off_any(&self) {
        self.events.borrow_mut().remove(&EventKey::Any);
    }

    /// Empty the whole registry.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Invoke every listener currently registered for `event`, in
    /// registration order, then run the catch-all observers.
    ///
    /// Counters advance after each call and registrations that exhaust their
    /// quota are dropped in the same pass. Returns the number of named
    /// listeners notified; `0` simply means nobody was listening.
    pub fn emit(&self, event: E, payload: P) -> usize {
        let notified = self.dispatch(&EventKey::Named(event.clone()), &event, &payload);
        self.dispatch(&EventKey::Any, &event, &payload);
        notified
    }

    fn dispatch(&self, key: &EventKey<E>, event: &E, payload: &P) -> usize {
        // Snapshot ids and callbacks up front; the registry borrow must not
        // be held while callbacks run.
        let snapshot: Vec<(u64, Callback<E, P>)> = match self.events.borrow().get(key) {
            Some(registrations) => registrations
                .iter()
                .map(|reg| (reg.id, reg.callback.clone()))
                .collect(),
            None => return 0,
        };

        for (id, callback) in &snapshot {
            match callback {
                Callback::Named(f) => f(payload),
                Callback::Any(f) => f(event, payload),
            }
            self.record_call(key, *id);
        }
        snapshot.len()
    }

    /// Advance the live counter for registration `id`, dropping it if the
    /// call just exhausted its quota. The registration may already be gone
    /// if an earlier callback in the same pass removed it.
    fn record_call(&self, key: &EventKey<E>, id: u64) {
        let mut events = self.events.borrow_mut();
        let Some(registrations) = events.get_mut(key) else {
            return;
        };
        if let Some(pos) = registrations.iter().position(|reg| reg.id == id) {
            registrations[pos].record_call();
            if registrations[pos].exhausted() {
                registrations.remove(pos);
            }
        }
        if registrations.is_empty() {
            events.remove(key);
        }
    }

    fn insert(&self, key: EventKey<E>, callback: Callback<E, P>, count: u32) -> usize {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let mut events = self.events.borrow_mut();
        let registrations = events.entry(key).or_default();
        registrations.push(Registration::new(id, callback, count));
        registrations.len()
    }

    /// Number of registry entries, the catch-all slot included.
    pub fn event_count(&self) -> usize {
        self.events.borrow().len()
    }

    /// Number of not-yet-exhausted listeners for one event.
    pub fn listener_count(&self, event: &E) -> usize {
        self.events
            .borrow()
            .get(&EventKey::Named(event.clone()))
            .map_or(0, Vec::len)
    }

    /// Number of catch-all observers.
    pub fn any_listener_count(&self) -> usize {
        self.events.borrow().get(&EventKey::Any).map_or(0, Vec::len)
    }

    /// Accumulated counter for a specific `(event, callback)` pair, summed
    /// over its registrations: negative is calls remaining, non-negative is
    /// calls elapsed. Zero if the pair is not registered.
    pub fn call_count(&self, event: &E, callback: &EventFn<P>) -> i64 {
        self.events
            .borrow()
            .get(&EventKey::Named(event.clone()))
            .map_or(0, |registrations| {
                registrations
                    .iter()
                    .filter(|reg| reg.callback.is_named(callback))
                    .map(|reg| reg.calls)
                    .sum()
            })
    }

    /// Snapshot of the callbacks registered for one event. Mutating the
    /// returned vector does not touch the registry.
    pub fn listeners(&self, event: &E) -> Vec<EventFn<P>> {
        self.events
            .borrow()
            .get(&EventKey::Named(event.clone()))
            .map_or_else(Vec::new, |registrations| {
                registrations
                    .iter()
                    .filter_map(|reg| match &reg.callback {
                        Callback::Named(f) => Some(std::rc::Rc::clone(f)),
                        Callback::Any(_) => None,
                    })
                    .collect()
            })
    }

    /// Snapshot of the named events with at least one listener.
    pub fn event_names(&self) -> Vec<E> {
        self.events
            .borrow()
            .keys()
            .filter_map(|key| match key {
                EventKey::Named(event) => Some(event.clone()),
                EventKey::Any => None,
            })
            .collect()
    }
}

impl<E, P> Default for EventEmitter<E, P>
where
    E: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
