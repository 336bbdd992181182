//! Theme color definitions for the dashboard

use crate::config::Theme;
use ratatui::style::Color;

/// Complete color palette for the UI
#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    /// Main background
    pub bg: Color,
    /// Primary foreground text
    pub fg: Color,
    /// Dimmed/secondary text
    pub dim: Color,
    /// Accent color (headings, borders)
    pub accent: Color,
    /// Active state (pressed keys, live intents)
    pub active: Color,
    /// Transient status messages
    pub warn: Color,
    /// Key chip background when pressed
    pub key_on: Color,
    /// Key chip background when idle
    pub key_off: Color,
    /// Key chip label (idle)
    pub key_text: Color,
    /// Key chip label (pressed)
    pub key_text_on: Color,
}

impl ThemeColors {
    /// Create a color palette for the given theme variant
    pub fn from_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(22, 22, 30),
            fg: Color::Rgb(200, 200, 210),
            dim: Color::Rgb(90, 90, 110),
            accent: Color::Rgb(80, 200, 220),
            active: Color::Rgb(80, 200, 120),
            warn: Color::Rgb(240, 180, 80),
            key_on: Color::Rgb(80, 200, 120),
            key_off: Color::Rgb(40, 40, 50),
            key_text: Color::Rgb(180, 180, 190),
            key_text_on: Color::Rgb(20, 20, 25),
        }
    }

    /// High contrast for bright terminals
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(245, 245, 248),
            fg: Color::Rgb(30, 30, 40),
            dim: Color::Rgb(130, 130, 150),
            accent: Color::Rgb(0, 130, 160),
            active: Color::Rgb(30, 150, 70),
            warn: Color::Rgb(180, 120, 0),
            key_on: Color::Rgb(30, 150, 70),
            key_off: Color::Rgb(220, 220, 228),
            key_text: Color::Rgb(50, 50, 60),
            key_text_on: Color::Rgb(255, 255, 255),
        }
    }
}
