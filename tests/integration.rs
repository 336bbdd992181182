//! Integration tests for keystate
//!
//! These exercise the full demo pipeline: a hand-fed key source feeding the
//! tracker, intent sampling over the tracker's snapshots, and emitter
//! observers watching the published intents.

use keystate::config::Config;
use keystate::emitter::{EventEmitter, EventFn};
use keystate::intent::{Bindings, Intent, IntentSampler};
use keystate::keyboard::{
    KeyCode, KeyEvent, KeyEventBus, KeySource, KeyboardState, Modifiers,
};
use keystate::ui::{App, AppState};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn pipeline() -> (Rc<KeyEventBus>, KeyboardState, IntentSampler) {
    let bus = Rc::new(KeyEventBus::new());
    let mut keyboard = KeyboardState::new(bus.clone() as Rc<dyn KeySource>);
    keyboard.connect();
    let sampler = IntentSampler::new(Bindings::default());
    (bus, keyboard, sampler)
}

fn press(bus: &KeyEventBus, code: KeyCode, modifiers: Modifiers) {
    bus.dispatch(&KeyEvent::down(code).with_modifiers(modifiers));
}

fn release(bus: &KeyEventBus, code: KeyCode, modifiers: Modifiers) {
    bus.dispatch(&KeyEvent::up(code).with_modifiers(modifiers));
}

// ---------------------------------------------------------------------------
// Tracker scenarios
// ---------------------------------------------------------------------------

#[test]
fn modifier_state_survives_releasing_other_keys() {
    let (bus, keyboard, _sampler) = pipeline();

    press(&bus, KeyCode::KeyW, Modifiers::NONE);
    assert!(keyboard.pressed(&["W"]));
    assert!(!keyboard.pressed(&["Shift"]));

    press(&bus, KeyCode::ShiftLeft, Modifiers::new(true, false, false));
    assert!(keyboard.pressed(&["Shift"]));
    assert!(keyboard.pressed(&["W"]));

    release(&bus, KeyCode::KeyW, Modifiers::new(true, false, false));
    assert!(!keyboard.pressed(&["W"]));
    assert!(keyboard.pressed(&["Shift"]));
}

#[test]
fn teardown_leaves_the_tracker_inert() {
    let (bus, mut keyboard, sampler) = pipeline();

    press(&bus, KeyCode::KeyW, Modifiers::NONE);
    assert_eq!(sampler.sample(&keyboard), vec![Intent::MoveForward]);

    keyboard.disconnect();
    assert!(!keyboard.pressed(&["W"]));
    assert!(sampler.sample(&keyboard).is_empty());

    // events delivered after teardown never reach the tracker
    press(&bus, KeyCode::Space, Modifiers::NONE);
    assert!(sampler.sample(&keyboard).is_empty());
}

// ---------------------------------------------------------------------------
// Sampling pipeline
// ---------------------------------------------------------------------------

#[test]
fn held_chord_produces_intents_every_sample() {
    let (bus, keyboard, sampler) = pipeline();

    press(&bus, KeyCode::ShiftLeft, Modifiers::new(true, false, false));
    press(&bus, KeyCode::KeyW, Modifiers::new(true, false, false));

    for _ in 0..3 {
        assert_eq!(
            sampler.sample(&keyboard),
            vec![Intent::MoveForward, Intent::Run]
        );
    }

    release(&bus, KeyCode::ShiftLeft, Modifiers::NONE);
    assert_eq!(sampler.sample(&keyboard), vec![Intent::MoveForward]);
}

#[test]
fn observers_see_published_intents_in_order() {
    let (bus, keyboard, sampler) = pipeline();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = Rc::clone(&seen);
    sampler
        .emitter()
        .any(Rc::new(move |intent: &Intent, _frame: &u64| {
            s.borrow_mut().push(intent.label());
        }));

    press(&bus, KeyCode::KeyW, Modifiers::NONE);
    press(&bus, KeyCode::Space, Modifiers::NONE);
    sampler.sample(&keyboard);

    assert_eq!(*seen.borrow(), vec!["move forward", "jump"]);
}

#[test]
fn once_observer_fires_for_a_single_sample_of_a_held_key() {
    let (bus, keyboard, sampler) = pipeline();

    let jumps = Rc::new(Cell::new(0));
    let j = Rc::clone(&jumps);
    sampler
        .emitter()
        .once(Intent::Jump, Rc::new(move |_frame: &u64| j.set(j.get() + 1)));

    press(&bus, KeyCode::Space, Modifiers::NONE);
    sampler.sample(&keyboard);
    sampler.sample(&keyboard);
    sampler.sample(&keyboard);

    assert_eq!(jumps.get(), 1);
    assert_eq!(sampler.emitter().listener_count(&Intent::Jump), 0);
}

// ---------------------------------------------------------------------------
// App state over the pipeline
// ---------------------------------------------------------------------------

#[test]
fn app_records_samples_and_pauses_cleanly() {
    let (bus, keyboard, sampler) = pipeline();
    let mut app = App::new(Config::default());

    press(&bus, KeyCode::Space, Modifiers::NONE);
    app.record(&sampler.sample(&keyboard));
    assert_eq!(app.total_intents, 1);
    assert_eq!(app.total_for(Intent::Jump), 1);

    app.toggle_pause();
    assert_eq!(app.state, AppState::Paused);
    app.record(&sampler.sample(&keyboard));
    assert_eq!(app.total_intents, 1); // unchanged while paused

    app.toggle_pause();
    app.record(&sampler.sample(&keyboard));
    assert_eq!(app.total_intents, 2);
}

// ---------------------------------------------------------------------------
// Emitter contract, end to end
// ---------------------------------------------------------------------------

#[test]
fn unlimited_listener_sees_three_jump_emissions() {
    let emitter: EventEmitter<&str, bool> = EventEmitter::new();
    let payloads = Rc::new(RefCell::new(Vec::new()));
    let p = Rc::clone(&payloads);
    let listener: EventFn<bool> = Rc::new(move |&value| p.borrow_mut().push(value));

    emitter.on("jump", listener);
    for _ in 0..3 {
        emitter.emit("jump", true);
    }

    assert_eq!(*payloads.borrow(), vec![true, true, true]);
}

#[test]
fn once_listener_exhausts_after_the_first_score() {
    let emitter: EventEmitter<&str, u32> = EventEmitter::new();
    let calls = Rc::new(Cell::new(0));
    let c = Rc::clone(&calls);
    emitter.once("score", Rc::new(move |_| c.set(c.get() + 1)));

    assert_eq!(emitter.emit("score", 100), 1);
    assert_eq!(emitter.emit("score", 200), 0);
    assert_eq!(calls.get(), 1);
}

#[test]
fn registry_is_empty_after_clear() {
    let emitter: EventEmitter<&str, ()> = EventEmitter::new();
    emitter.on("a", Rc::new(|_| {}));
    emitter.on("b", Rc::new(|_| {}));
    emitter.any(Rc::new(|_, _| {}));

    emitter.clear();
    assert!(emitter.event_names().is_empty());
    assert_eq!(emitter.event_count(), 0);
    assert_eq!(emitter.emit("a", ()), 0);
}
