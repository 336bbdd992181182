//! Keyboard event types and the input-source seam

use super::KeyCode;
use std::cell::RefCell;
use std::rc::Rc;

/// Direction of a key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTransition {
    /// Key was pressed down
    Down,
    /// Key was released
    Up,
}

/// Modifier flags as reported by the platform alongside every key event.
///
/// These are carried on the event itself rather than derived from the key
/// set, because the platform's view of modifier state is more reliable than
/// tracking the raw modifier key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub fn new(shift: bool, ctrl: bool, alt: bool) -> Self {
        Self { shift, ctrl, alt }
    }

    /// True if any modifier flag is set.
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt
    }
}

/// A key transition notification delivered by a [`KeySource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The physical key that transitioned
    pub code: KeyCode,
    /// Down or up
    pub transition: KeyTransition,
    /// Modifier flags at the time of the event
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, transition: KeyTransition, modifiers: Modifiers) -> Self {
        Self {
            code,
            transition,
            modifiers,
        }
    }

    /// A down transition with no modifiers set.
    pub fn down(code: KeyCode) -> Self {
        Self::new(code, KeyTransition::Down, Modifiers::NONE)
    }

    /// An up transition with no modifiers set.
    pub fn up(code: KeyCode) -> Self {
        Self::new(code, KeyTransition::Up, Modifiers::NONE)
    }

    /// Same event with the given modifier flags.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Callback registered on a [`KeySource`].
///
/// Callbacks are `Rc`-identified: unregistering requires the same `Rc` that
/// was registered, mirroring how listener identity works everywhere else in
/// this crate.
pub type KeyCallback = Rc<dyn Fn(&KeyEvent)>;

/// Anything capable of delivering key down / key up notifications.
///
/// A source only has to support listener registration and identity-based
/// removal; how and when it produces events is its own business. Trackers
/// register the same callback for both transitions and remove both on
/// disconnect.
pub trait KeySource {
    /// Register `callback` for events with the given transition.
    fn add_listener(&self, transition: KeyTransition, callback: KeyCallback);

    /// Remove every registration of `callback` for the given transition.
    ///
    /// Returns whether anything was removed. Removing a callback that was
    /// never added is a no-op.
    fn remove_listener(&self, transition: KeyTransition, callback: &KeyCallback) -> bool;
}

/// An in-process [`KeySource`] that callers feed by hand.
///
/// Push-style producers (and tests) construct events and [`dispatch`] them;
/// every callback registered for the event's transition runs synchronously,
/// in registration order, against a snapshot taken at dispatch start.
///
/// [`dispatch`]: KeyEventBus::dispatch
#[derive(Default)]
pub struct KeyEventBus {
    down: RefCell<Vec<KeyCallback>>,
    up: RefCell<Vec<KeyCallback>>,
}

impl KeyEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, transition: KeyTransition) -> &RefCell<Vec<KeyCallback>> {
        match transition {
            KeyTransition::Down => &self.down,
            KeyTransition::Up => &self.up,
        }
    }

    /// Deliver an event to every listener registered for its transition.
    ///
    /// Returns the number of callbacks notified. Listeners added or removed
    /// by a callback take effect for subsequent dispatches, not this one.
    pub fn dispatch(&self, event: &KeyEvent) -> usize {
        let snapshot: Vec<KeyCallback> = self.slot(event.transition).borrow().clone();
        for callback in &snapshot {
            callback(event);
        }
        snapshot.len()
    }

    /// Number of registered callbacks for one transition.
    pub fn listener_count(&self, transition: KeyTransition) -> usize {
        self.slot(transition).borrow().len()
    }
}

impl KeySource for KeyEventBus {
    fn add_listener(&self, transition: KeyTransition, callback: KeyCallback) {
        self.slot(transition).borrow_mut().push(callback);
    }

    fn remove_listener(&self, transition: KeyTransition, callback: &KeyCallback) -> bool {
        let mut listeners = self.slot(transition).borrow_mut();
        let before = listeners.len();
        listeners.retain(|cb| !Rc::ptr_eq(cb, callback));
        listeners.len() != before
    }
}
