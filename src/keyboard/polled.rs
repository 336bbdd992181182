//! OS-level key source that polls for state changes

use super::{KeyCallback, KeyCode, KeyEvent, KeyEventBus, KeySource, KeyTransition, Modifiers};
use device_query::{DeviceQuery, DeviceState, Keycode};
use std::cell::RefCell;

/// A [`KeySource`] backed by OS-wide key state polling.
///
/// Each [`poll`] diffs the currently-down keys against the previous poll and
/// synthesizes Down/Up events for the differences, with modifier flags
/// computed from the current snapshot. Callers drive `poll` from their own
/// tick loop; between polls the source is completely idle.
///
/// [`poll`]: PolledKeySource::poll
pub struct PolledKeySource {
    device_state: RefCell<DeviceState>,
    last_keys: RefCell<Vec<Keycode>>,
    bus: KeyEventBus,
}

impl PolledKeySource {
    pub fn new() -> Self {
        Self {
            device_state: RefCell::new(DeviceState::new()),
            last_keys: RefCell::new(Vec::new()),
            bus: KeyEventBus::new(),
        }
    }

    /// Poll the OS key state and dispatch one event per transition.
    ///
    /// Returns the number of events dispatched.
    pub fn poll(&self) -> usize {
        let current_keys = self.device_state.borrow().get_keys();
        let modifiers = modifiers_of(&current_keys);
        let mut events = Vec::new();

        // Diff against the previous poll; no internal borrow may be held
        // while listeners run.
        {
            let last_keys = self.last_keys.borrow();

            // Newly pressed keys
            for key in &current_keys {
                if !last_keys.contains(key) {
                    events.push(KeyEvent::new(
                        KeyCode::from(*key),
                        KeyTransition::Down,
                        modifiers,
                    ));
                }
            }

            // Released keys
            for key in last_keys.iter() {
                if !current_keys.contains(key) {
                    events.push(KeyEvent::new(
                        KeyCode::from(*key),
                        KeyTransition::Up,
                        modifiers,
                    ));
                }
            }
        }
        *self.last_keys.borrow_mut() = current_keys;

        for event in &events {
            self.bus.dispatch(event);
        }
        events.len()
    }
}

impl Default for PolledKeySource {
    fn default() -> Self {
        Self::new()
    }
}

impl KeySource for PolledKeySource {
    fn add_listener(&self, transition: KeyTransition, callback: KeyCallback) {
        self.bus.add_listener(transition, callback);
    }

    fn remove_listener(&self, transition: KeyTransition, callback: &KeyCallback) -> bool {
        self.bus.remove_listener(transition, callback)
    }
}

fn modifiers_of(keys: &[Keycode]) -> Modifiers {
    Modifiers::new(
        keys.contains(&Keycode::LShift) || keys.contains(&Keycode::RShift),
        keys.contains(&Keycode::LControl) || keys.contains(&Keycode::RControl),
        keys.contains(&Keycode::LAlt) || keys.contains(&Keycode::RAlt),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_of_reads_either_side() {
        let none = modifiers_of(&[Keycode::W]);
        assert!(!none.any());

        let left = modifiers_of(&[Keycode::LShift, Keycode::W]);
        assert!(left.shift && !left.ctrl && !left.alt);

        let right = modifiers_of(&[Keycode::RControl, Keycode::RAlt]);
        assert!(!right.shift && right.ctrl && right.alt);
    }
}
