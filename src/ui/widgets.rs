//! Custom TUI widgets for the demo dashboard

use super::app::IntentEntry;
use super::theme::ThemeColors;
use crate::keyboard::KeyboardState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};

/// Shows the currently pressed keys as chips plus the modifier flags.
pub struct KeyPanel<'a> {
    keyboard: &'a KeyboardState,
    colors: ThemeColors,
}

impl<'a> KeyPanel<'a> {
    pub fn new(keyboard: &'a KeyboardState, colors: ThemeColors) -> Self {
        Self { keyboard, colors }
    }

    fn render_flag(&self, buf: &mut Buffer, x: u16, y: u16, label: &str, on: bool) -> u16 {
        let (bg, fg) = if on {
            (self.colors.key_on, self.colors.key_text_on)
        } else {
            (self.colors.key_off, self.colors.key_text)
        };
        let chip = format!(" {} ", label);
        buf.set_string(x, y, &chip, Style::default().fg(fg).bg(bg));
        x + chip.len() as u16 + 1
    }
}

impl<'a> Widget for KeyPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Keys ")
            .title_style(Style::default().fg(self.colors.accent))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.colors.dim));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        // Modifier flags on the first row
        let mut x = inner.x;
        x = self.render_flag(buf, x, inner.y, "Shift", self.keyboard.shift());
        x = self.render_flag(buf, x, inner.y, "Ctrl", self.keyboard.ctrl());
        self.render_flag(buf, x, inner.y, "Alt", self.keyboard.alt());

        // Pressed key chips below, wrapping within the panel
        let mut x = inner.x;
        let mut y = inner.y + 2;
        for code in self.keyboard.pressed_codes() {
            let chip = format!(" {} ", code.name());
            let width = chip.len() as u16;
            if x + width > inner.x + inner.width {
                x = inner.x;
                y += 1;
            }
            if y >= inner.y + inner.height {
                break;
            }
            buf.set_string(
                x,
                y,
                &chip,
                Style::default()
                    .fg(self.colors.key_text_on)
                    .bg(self.colors.key_on)
                    .add_modifier(Modifier::BOLD),
            );
            x += width + 1;
        }
    }
}

/// Scrolling list of coalesced intent activations.
pub struct IntentLog<'a> {
    entries: &'a [IntentEntry],
    colors: ThemeColors,
}

impl<'a> IntentLog<'a> {
    pub fn new(entries: &'a [IntentEntry], colors: ThemeColors) -> Self {
        Self { entries, colors }
    }
}

impl<'a> Widget for IntentLog<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Intents ")
            .title_style(Style::default().fg(self.colors.accent))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.colors.dim));
        let inner = block.inner(area);
        block.render(area, buf);

        let visible = inner.height as usize;
        let skip = self.entries.len().saturating_sub(visible);

        for (i, entry) in self.entries.iter().skip(skip).enumerate() {
            let y = inner.y + i as u16;
            let timestamp = entry.first_seen.format("%H:%M:%S");
            let line = if entry.ticks > 1 {
                format!("{}  {} x{}", timestamp, entry.intent.label(), entry.ticks)
            } else {
                format!("{}  {}", timestamp, entry.intent.label())
            };
            let style = if i == self.entries.len().saturating_sub(skip).saturating_sub(1) {
                Style::default()
                    .fg(self.colors.active)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.colors.fg)
            };
            buf.set_string(inner.x, y, &line, style);
        }
    }
}

/// Status bar: run state, elapsed time, counters, transient message.
pub struct StatusBar<'a> {
    state: &'a str,
    elapsed: &'a str,
    samples: u64,
    intents: u64,
    message: Option<&'a str>,
    colors: ThemeColors,
}

impl<'a> StatusBar<'a> {
    pub fn new(
        state: &'a str,
        elapsed: &'a str,
        samples: u64,
        intents: u64,
        colors: ThemeColors,
    ) -> Self {
        Self {
            state,
            elapsed,
            samples,
            intents,
            message: None,
            colors,
        }
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bg_style = Style::default().bg(self.colors.key_off).fg(self.colors.fg);
        for x in area.x..area.x + area.width {
            buf.set_string(x, area.y, " ", bg_style);
        }

        let left = format!(" {} | q quit | space pause | r reset ", self.state);
        buf.set_string(area.x, area.y, &left, bg_style.add_modifier(Modifier::BOLD));

        if let Some(message) = self.message {
            let style = bg_style.fg(self.colors.warn);
            let x = area.x + (area.width / 2).saturating_sub(message.len() as u16 / 2);
            buf.set_string(x, area.y, message, style);
        }

        let right = format!(
            " {} | samples: {} | intents: {} ",
            self.elapsed, self.samples, self.intents
        );
        let x = area.x + area.width.saturating_sub(right.len() as u16);
        buf.set_string(x, area.y, &right, bg_style);
    }
}
