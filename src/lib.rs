//! keystate - keyboard state tracking and typed event dispatch
//!
//! Two independent leaf utilities plus the demo that composes them: a
//! generic single-threaded [`EventEmitter`](emitter::EventEmitter) and a
//! polling-friendly [`KeyboardState`](keyboard::KeyboardState) tracker fed
//! by pluggable key-event sources.

pub mod config;
pub mod emitter;
pub mod intent;
pub mod keyboard;
pub mod ui;

pub use config::Config;
