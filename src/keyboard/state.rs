//! Pressed-key tracking with an explicit connect/disconnect lifecycle

use super::{KeyCallback, KeyCode, KeyEvent, KeySource, KeyTransition, Modifiers};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// The mutable state shared between the tracker and its registered callback.
#[derive(Default)]
struct Tracked {
    /// Codes whose most recent transition was Down
    codes: HashSet<KeyCode>,
    /// Modifier flags from the most recent event, whichever key caused it
    modifiers: Modifiers,
}

impl Tracked {
    fn apply(&mut self, event: &KeyEvent) {
        match event.transition {
            // Repeated Down is a set-insert no-op; there is no per-key count.
            KeyTransition::Down => {
                self.codes.insert(event.code);
            }
            KeyTransition::Up => {
                self.codes.remove(&event.code);
            }
        }
        self.modifiers = event.modifiers;
    }

    fn clear(&mut self) {
        self.codes.clear();
        self.modifiers = Modifiers::NONE;
    }
}

/// A polling-friendly snapshot of keyboard state.
///
/// Bridges an event-driven [`KeySource`] into state the rest of an
/// application can sample on demand, typically once per tick, instead of
/// reacting to each discrete event. Construction wires nothing up;
/// subscription happens in [`connect`] and is released by [`disconnect`]
/// (or by dropping the tracker).
///
/// Queries never fail: an unknown alias, or any query against a detached
/// tracker, reads as "not pressed".
///
/// ```no_run
/// use std::rc::Rc;
/// use keystate::keyboard::{KeyEventBus, KeyboardState};
///
/// let bus = Rc::new(KeyEventBus::new());
/// let mut keyboard = KeyboardState::new(bus.clone());
/// keyboard.connect();
/// if keyboard.pressed(&["Shift", "W"]) {
///     // run forward
/// }
/// ```
///
/// [`connect`]: KeyboardState::connect
/// [`disconnect`]: KeyboardState::disconnect
pub struct KeyboardState {
    source: Rc<dyn KeySource>,
    tracked: Rc<RefCell<Tracked>>,
    /// The exact callback registered on the source, kept so disconnect
    /// removes the same `Rc` it added.
    listener: Option<KeyCallback>,
}

impl KeyboardState {
    /// Create a tracker over `source` without registering anything.
    pub fn new(source: Rc<dyn KeySource>) -> Self {
        Self {
            source,
            tracked: Rc::new(RefCell::new(Tracked::default())),
            listener: None,
        }
    }

    /// Subscribe to down and up notifications on the source.
    ///
    /// Clears any stale state first. Reconnecting an already-connected
    /// tracker re-registers from scratch.
    pub fn connect(&mut self) -> &mut Self {
        self.disconnect();

        let tracked = Rc::clone(&self.tracked);
        let callback: KeyCallback = Rc::new(move |event| tracked.borrow_mut().apply(event));

        self.source
            .add_listener(KeyTransition::Down, Rc::clone(&callback));
        self.source
            .add_listener(KeyTransition::Up, Rc::clone(&callback));
        self.listener = Some(callback);
        log::debug!("keyboard tracker connected");
        self
    }

    /// Unregister from the source and clear the key set.
    ///
    /// Idempotent: safe without a prior connect and safe to call repeatedly.
    /// Afterwards the tracker is inert until the next [`connect`].
    ///
    /// [`connect`]: KeyboardState::connect
    pub fn disconnect(&mut self) {
        if let Some(callback) = self.listener.take() {
            self.source.remove_listener(KeyTransition::Down, &callback);
            self.source.remove_listener(KeyTransition::Up, &callback);
            log::debug!("keyboard tracker disconnected");
        }
        self.tracked.borrow_mut().clear();
    }

    /// Whether the tracker currently holds a registration on its source.
    pub fn is_connected(&self) -> bool {
        self.listener.is_some()
    }

    /// True iff every named key is currently considered active.
    ///
    /// Aliases resolve through the keymap before lookup; the `Shift`,
    /// `Control` and `Alt` aliases consult the modifier flags instead of the
    /// key set. An empty query is vacuously true.
    pub fn pressed(&self, keys: &[&str]) -> bool {
        keys.iter().all(|key| self.has_code(key))
    }

    /// Single-alias form of [`pressed`].
    ///
    /// [`pressed`]: KeyboardState::pressed
    pub fn has_code(&self, key: &str) -> bool {
        match KeyCode::resolve(key) {
            Some(code) => self.has(code),
            None => false,
        }
    }

    /// Typed lookup by canonical code.
    pub fn has(&self, code: KeyCode) -> bool {
        let tracked = self.tracked.borrow();
        match code {
            KeyCode::Shift => tracked.modifiers.shift,
            KeyCode::Control => tracked.modifiers.ctrl,
            KeyCode::Alt => tracked.modifiers.alt,
            _ => tracked.codes.contains(&code),
        }
    }

    pub fn shift(&self) -> bool {
        self.tracked.borrow().modifiers.shift
    }

    pub fn ctrl(&self) -> bool {
        self.tracked.borrow().modifiers.ctrl
    }

    pub fn alt(&self) -> bool {
        self.tracked.borrow().modifiers.alt
    }

    /// Modifier flags from the most recent event.
    pub fn modifiers(&self) -> Modifiers {
        self.tracked.borrow().modifiers
    }

    /// Snapshot of the currently-down codes, sorted by canonical name for
    /// stable display.
    pub fn pressed_codes(&self) -> Vec<KeyCode> {
        let mut codes: Vec<KeyCode> = self.tracked.borrow().codes.iter().copied().collect();
        codes.sort_by_key(|code| code.name());
        codes
    }
}

impl Drop for KeyboardState {
    fn drop(&mut self) {
        self.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::KeyEventBus;

    fn connected() -> (Rc<KeyEventBus>, KeyboardState) {
        let bus = Rc::new(KeyEventBus::new());
        let mut keyboard = KeyboardState::new(bus.clone() as Rc<dyn KeySource>);
        keyboard.connect();
        (bus, keyboard)
    }

    #[test]
    fn down_then_up_tracks_the_key() {
        let (bus, keyboard) = connected();

        bus.dispatch(&KeyEvent::down(KeyCode::KeyW));
        assert!(keyboard.pressed(&["W"]));
        assert!(keyboard.has_code("KeyW"));

        bus.dispatch(&KeyEvent::up(KeyCode::KeyW));
        assert!(!keyboard.pressed(&["W"]));
    }

    #[test]
    fn modifier_flags_follow_events_not_the_key_set() {
        let (bus, keyboard) = connected();

        // W down with shift not held
        bus.dispatch(&KeyEvent::down(KeyCode::KeyW));
        assert!(keyboard.pressed(&["W"]));
        assert!(!keyboard.pressed(&["Shift"]));

        // ShiftLeft down, platform reports shift=true
        bus.dispatch(
            &KeyEvent::down(KeyCode::ShiftLeft).with_modifiers(Modifiers::new(true, false, false)),
        );
        assert!(keyboard.pressed(&["Shift"]));
        assert!(keyboard.pressed(&["W"]));
        assert!(keyboard.pressed(&["Shift", "W"]));

        // Releasing W while shift is physically held keeps Shift true
        bus.dispatch(
            &KeyEvent::up(KeyCode::KeyW).with_modifiers(Modifiers::new(true, false, false)),
        );
        assert!(!keyboard.pressed(&["W"]));
        assert!(keyboard.pressed(&["Shift"]));
    }

    #[test]
    fn any_event_reporting_modifier_false_flips_it_false() {
        let (bus, keyboard) = connected();

        bus.dispatch(
            &KeyEvent::down(KeyCode::ShiftLeft).with_modifiers(Modifiers::new(true, false, false)),
        );
        assert!(keyboard.shift());

        bus.dispatch(&KeyEvent::down(KeyCode::KeyA));
        assert!(!keyboard.shift());
    }

    #[test]
    fn repeated_down_is_a_set_insert_noop() {
        let (bus, keyboard) = connected();

        bus.dispatch(&KeyEvent::down(KeyCode::KeyD));
        bus.dispatch(&KeyEvent::down(KeyCode::KeyD));
        bus.dispatch(&KeyEvent::down(KeyCode::KeyD));
        assert_eq!(keyboard.pressed_codes(), vec![KeyCode::KeyD]);

        // A single up releases it, no matter how many downs arrived
        bus.dispatch(&KeyEvent::up(KeyCode::KeyD));
        assert!(keyboard.pressed_codes().is_empty());
    }

    #[test]
    fn unknown_alias_reads_as_not_pressed() {
        let (bus, keyboard) = connected();
        bus.dispatch(&KeyEvent::down(KeyCode::KeyW));

        assert!(!keyboard.has_code("NoSuchKey"));
        assert!(!keyboard.pressed(&["W", "NoSuchKey"]));
    }

    #[test]
    fn empty_query_is_vacuously_true() {
        let (_bus, keyboard) = connected();
        assert!(keyboard.pressed(&[]));
    }

    #[test]
    fn disconnect_clears_state_and_stops_updates() {
        let (bus, mut keyboard) = connected();

        bus.dispatch(&KeyEvent::down(KeyCode::KeyW));
        bus.dispatch(
            &KeyEvent::down(KeyCode::ShiftLeft).with_modifiers(Modifiers::new(true, false, false)),
        );
        assert!(keyboard.pressed(&["W"]));

        keyboard.disconnect();
        assert!(!keyboard.pressed(&["W"]));
        assert!(!keyboard.shift());
        assert!(!keyboard.is_connected());

        // Further dispatches no longer reach the tracker
        bus.dispatch(&KeyEvent::down(KeyCode::KeyW));
        assert!(!keyboard.pressed(&["W"]));
    }

    #[test]
    fn disconnect_is_idempotent() {
        let bus = Rc::new(KeyEventBus::new());
        let mut keyboard = KeyboardState::new(bus.clone() as Rc<dyn KeySource>);

        // Without a prior connect
        keyboard.disconnect();
        keyboard.disconnect();

        keyboard.connect();
        keyboard.disconnect();
        keyboard.disconnect();
        assert_eq!(bus.listener_count(KeyTransition::Down), 0);
        assert_eq!(bus.listener_count(KeyTransition::Up), 0);
    }

    #[test]
    fn construction_registers_nothing() {
        let bus = Rc::new(KeyEventBus::new());
        let _keyboard = KeyboardState::new(bus.clone() as Rc<dyn KeySource>);
        assert_eq!(bus.listener_count(KeyTransition::Down), 0);
        assert_eq!(bus.listener_count(KeyTransition::Up), 0);
    }

    #[test]
    fn reconnect_clears_stale_state_without_duplicate_registrations() {
        let (bus, mut keyboard) = connected();

        bus.dispatch(&KeyEvent::down(KeyCode::KeyW));
        keyboard.connect();

        assert!(!keyboard.pressed(&["W"]));
        assert_eq!(bus.listener_count(KeyTransition::Down), 1);
        assert_eq!(bus.listener_count(KeyTransition::Up), 1);

        bus.dispatch(&KeyEvent::down(KeyCode::KeyS));
        assert!(keyboard.pressed(&["S"]));
    }

    #[test]
    fn drop_removes_the_registration() {
        let bus = Rc::new(KeyEventBus::new());
        {
            let mut keyboard = KeyboardState::new(bus.clone() as Rc<dyn KeySource>);
            keyboard.connect();
            assert_eq!(bus.listener_count(KeyTransition::Down), 1);
        }
        assert_eq!(bus.listener_count(KeyTransition::Down), 0);
        assert_eq!(bus.listener_count(KeyTransition::Up), 0);
    }
}
