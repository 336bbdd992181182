//! Keyboard event types, sources, and pressed-key tracking

mod event;
pub mod keymap;
mod polled;
mod state;

pub use event::{KeyCallback, KeyEvent, KeyEventBus, KeySource, KeyTransition, Modifiers};
pub use keymap::KeyCode;
pub use polled::PolledKeySource;
pub use state::KeyboardState;
