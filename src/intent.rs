//! Movement intents sampled from keyboard state
//!
//! The demo's per-tick logic: resolve configurable key bindings against the
//! tracker's current snapshot and publish each active intent through an
//! [`EventEmitter`], so observers (the intent log, the logger) stay decoupled
//! from the sampling loop.

use crate::emitter::EventEmitter;
use crate::keyboard::{KeyCode, KeyboardState};
use serde::{Deserialize, Serialize};
use std::cell::Cell;

/// A movement intent derived from the pressed-key snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    MoveForward,
    MoveBack,
    TurnLeft,
    TurnRight,
    Jump,
    Run,
}

impl Intent {
    /// Human-readable label, as logged by the demo.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MoveForward => "move forward",
            Self::MoveBack => "go back",
            Self::TurnLeft => "turn left",
            Self::TurnRight => "turn right",
            Self::Jump => "jump",
            Self::Run => "run",
        }
    }

    pub fn all() -> &'static [Intent] {
        &[
            Self::MoveForward,
            Self::MoveBack,
            Self::TurnLeft,
            Self::TurnRight,
            Self::Jump,
            Self::Run,
        ]
    }
}

/// Key bindings per intent.
///
/// Each intent maps to a list of alternative chords; a chord matches when
/// every alias in it is active at once. Aliases that do not resolve through
/// the keymap never match and are reported once at startup, not treated as
/// errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bindings {
    pub forward: Vec<Vec<String>>,
    pub back: Vec<Vec<String>>,
    pub left: Vec<Vec<String>>,
    pub right: Vec<Vec<String>>,
    pub jump: Vec<Vec<String>>,
    pub run: Vec<Vec<String>>,
}

fn chord(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            forward: vec![chord(&["W"]), chord(&["ArrowUp"])],
            back: vec![chord(&["S"]), chord(&["ArrowDown"])],
            left: vec![chord(&["A"]), chord(&["ArrowLeft"])],
            right: vec![chord(&["D"]), chord(&["ArrowRight"])],
            jump: vec![chord(&["Space"])],
            run: vec![chord(&["Shift", "W"])],
        }
    }
}

impl Bindings {
    pub fn chords(&self, intent: Intent) -> &[Vec<String>] {
        match intent {
            Intent::MoveForward => &self.forward,
            Intent::MoveBack => &self.back,
            Intent::TurnLeft => &self.left,
            Intent::TurnRight => &self.right,
            Intent::Jump => &self.jump,
            Intent::Run => &self.run,
        }
    }

    /// Warn once about aliases that will never match.
    pub fn log_unresolved(&self) {
        for &intent in Intent::all() {
            for chord in self.chords(intent) {
                for alias in chord {
                    if KeyCode::resolve(alias).is_none() {
                        log::warn!(
                            "binding {:?} for {:?} does not resolve and will never match",
                            alias,
                            intent
                        );
                    }
                }
            }
        }
    }
}

/// Samples a [`KeyboardState`] once per tick and publishes active intents.
///
/// The emitter payload is the sample's frame number, so observers can tell
/// consecutive ticks apart.
pub struct IntentSampler {
    bindings: Bindings,
    emitter: EventEmitter<Intent, u64>,
    frame: Cell<u64>,
}

impl IntentSampler {
    pub fn new(bindings: Bindings) -> Self {
        bindings.log_unresolved();
        Self {
            bindings,
            emitter: EventEmitter::new(),
            frame: Cell::new(0),
        }
    }

    /// The emitter intents are published on; subscribe observers here.
    pub fn emitter(&self) -> &EventEmitter<Intent, u64> {
        &self.emitter
    }

    /// Number of samples taken so far.
    pub fn frame(&self) -> u64 {
        self.frame.get()
    }

    /// Take one sample: returns the active intents in declaration order and
    /// emits each one with the current frame number.
    pub fn sample(&self, keyboard: &KeyboardState) -> Vec<Intent> {
        let frame = self.frame.get();
        self.frame.set(frame + 1);

        let mut active = Vec::new();
        for &intent in Intent::all() {
            let matched = self.bindings.chords(intent).iter().any(|chord| {
                !chord.is_empty() && chord.iter().all(|alias| keyboard.has_code(alias))
            });
            if matched {
                active.push(intent);
                self.emitter.emit(intent, frame);
            }
        }
        active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::{KeyEvent, KeyEventBus, KeySource, Modifiers};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn keyboard() -> (Rc<KeyEventBus>, KeyboardState) {
        let bus = Rc::new(KeyEventBus::new());
        let mut keyboard = KeyboardState::new(bus.clone() as Rc<dyn KeySource>);
        keyboard.connect();
        (bus, keyboard)
    }

    #[test]
    fn idle_keyboard_yields_no_intents() {
        let (_bus, keyboard) = keyboard();
        let sampler = IntentSampler::new(Bindings::default());
        assert!(sampler.sample(&keyboard).is_empty());
    }

    #[test]
    fn either_binding_alternative_matches() {
        let (bus, keyboard) = keyboard();
        let sampler = IntentSampler::new(Bindings::default());

        bus.dispatch(&KeyEvent::down(KeyCode::KeyW));
        assert_eq!(sampler.sample(&keyboard), vec![Intent::MoveForward]);

        bus.dispatch(&KeyEvent::up(KeyCode::KeyW));
        bus.dispatch(&KeyEvent::down(KeyCode::ArrowUp));
        assert_eq!(sampler.sample(&keyboard), vec![Intent::MoveForward]);
    }

    #[test]
    fn run_needs_the_whole_chord() {
        let (bus, keyboard) = keyboard();
        let sampler = IntentSampler::new(Bindings::default());

        bus.dispatch(
            &KeyEvent::down(KeyCode::ShiftLeft).with_modifiers(Modifiers::new(true, false, false)),
        );
        assert!(sampler.sample(&keyboard).is_empty());

        bus.dispatch(
            &KeyEvent::down(KeyCode::KeyW).with_modifiers(Modifiers::new(true, false, false)),
        );
        assert_eq!(
            sampler.sample(&keyboard),
            vec![Intent::MoveForward, Intent::Run]
        );
    }

    #[test]
    fn active_intents_reach_emitter_observers() {
        let (bus, keyboard) = keyboard();
        let sampler = IntentSampler::new(Bindings::default());

        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        sampler.emitter().any(Rc::new(move |intent: &Intent, &frame: &u64| {
            s.borrow_mut().push((*intent, frame));
        }));

        bus.dispatch(&KeyEvent::down(KeyCode::Space));
        sampler.sample(&keyboard);
        sampler.sample(&keyboard);

        assert_eq!(*seen.borrow(), vec![(Intent::Jump, 0), (Intent::Jump, 1)]);
    }

    #[test]
    fn unresolvable_binding_never_matches() {
        let (bus, keyboard) = keyboard();
        let mut bindings = Bindings::default();
        bindings.jump = vec![vec!["NoSuchKey".to_string()]];
        let sampler = IntentSampler::new(bindings);

        bus.dispatch(&KeyEvent::down(KeyCode::Space));
        assert!(sampler.sample(&keyboard).is_empty());
    }

    #[test]
    fn frame_counter_advances_per_sample() {
        let (_bus, keyboard) = keyboard();
        let sampler = IntentSampler::new(Bindings::default());
        assert_eq!(sampler.frame(), 0);
        sampler.sample(&keyboard);
        sampler.sample(&keyboard);
        assert_eq!(sampler.frame(), 2);
    }
}
