//! Terminal dashboard for the demo driver

mod app;
pub mod theme;
mod widgets;

pub use app::{App, AppState, IntentEntry};
pub use theme::ThemeColors;
pub use widgets::{IntentLog, KeyPanel, StatusBar};
