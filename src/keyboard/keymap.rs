//! Key code definitions and the symbolic alias table

use std::collections::HashMap;
use std::sync::LazyLock;

/// A canonical physical key code.
///
/// Naming follows the physical-key scheme used by browser `code` values:
/// `KeyW` is the key at the W position regardless of layout, `Digit1` the
/// number-row 1, and so on. The three side-less codes `Shift`, `Control` and
/// `Alt` stand for "either side" of their modifier and are resolved against
/// the tracker's modifier flags rather than the pressed-key set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Letter keys
    KeyA,
    KeyB,
    KeyC,
    KeyD,
    KeyE,
    KeyF,
    KeyG,
    KeyH,
    KeyI,
    KeyJ,
    KeyK,
    KeyL,
    KeyM,
    KeyN,
    KeyO,
    KeyP,
    KeyQ,
    KeyR,
    KeyS,
    KeyT,
    KeyU,
    KeyV,
    KeyW,
    KeyX,
    KeyY,
    KeyZ,

    // Function row
    Escape,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    // Number row
    Backquote,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    Digit0,
    Minus,
    Equal,
    Backspace,

    Tab,
    CapsLock,
    Enter,
    Space,

    // Punctuation
    BracketLeft,
    BracketRight,
    Backslash,
    Semicolon,
    Quote,
    Comma,
    Period,
    Slash,

    // Modifiers
    Shift,
    ShiftLeft,
    ShiftRight,
    Control,
    ControlLeft,
    ControlRight,
    Alt,
    AltLeft,
    AltRight,
    MetaLeft,
    MetaRight,

    // Navigation cluster
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Pause,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Numpad
    NumLock,
    Numpad0,
    Numpad1,
    Numpad2,
    Numpad3,
    Numpad4,
    Numpad5,
    Numpad6,
    Numpad7,
    Numpad8,
    Numpad9,
    NumpadDecimal,
    NumpadAdd,
    NumpadSubtract,
    NumpadMultiply,
    NumpadDivide,

    /// Fallback for keys the platform reports but this table does not name.
    Unidentified,
}

impl KeyCode {
    /// Every code in the table, in declaration order.
    pub const ALL: &'static [KeyCode] = &[
        Self::KeyA,
        Self::KeyB,
        Self::KeyC,
        Self::KeyD,
        Self::KeyE,
        Self::KeyF,
        Self::KeyG,
        Self::KeyH,
        Self::KeyI,
        Self::KeyJ,
        Self::KeyK,
        Self::KeyL,
        Self::KeyM,
        Self::KeyN,
        Self::KeyO,
        Self::KeyP,
        Self::KeyQ,
        Self::KeyR,
        Self::KeyS,
        Self::KeyT,
        Self::KeyU,
        Self::KeyV,
        Self::KeyW,
        Self::KeyX,
        Self::KeyY,
        Self::KeyZ,
        Self::Escape,
        Self::F1,
        Self::F2,
        Self::F3,
        Self::F4,
        Self::F5,
        Self::F6,
        Self::F7,
        Self::F8,
        Self::F9,
        Self::F10,
        Self::F11,
        Self::F12,
        Self::Backquote,
        Self::Digit1,
        Self::Digit2,
        Self::Digit3,
        Self::Digit4,
        Self::Digit5,
        Self::Digit6,
        Self::Digit7,
        Self::Digit8,
        Self::Digit9,
        Self::Digit0,
        Self::Minus,
        Self::Equal,
        Self::Backspace,
        Self::Tab,
        Self::CapsLock,
        Self::Enter,
        Self::Space,
        Self::BracketLeft,
        Self::BracketRight,
        Self::Backslash,
        Self::Semicolon,
        Self::Quote,
        Self::Comma,
        Self::Period,
        Self::Slash,
        Self::Shift,
        Self::ShiftLeft,
        Self::ShiftRight,
        Self::Control,
        Self::ControlLeft,
        Self::ControlRight,
        Self::Alt,
        Self::AltLeft,
        Self::AltRight,
        Self::MetaLeft,
        Self::MetaRight,
        Self::Insert,
        Self::Delete,
        Self::Home,
        Self::End,
        Self::PageUp,
        Self::PageDown,
        Self::Pause,
        Self::ArrowUp,
        Self::ArrowDown,
        Self::ArrowLeft,
        Self::ArrowRight,
        Self::NumLock,
        Self::Numpad0,
        Self::Numpad1,
        Self::Numpad2,
        Self::Numpad3,
        Self::Numpad4,
        Self::Numpad5,
        Self::Numpad6,
        Self::Numpad7,
        Self::Numpad8,
        Self::Numpad9,
        Self::NumpadDecimal,
        Self::NumpadAdd,
        Self::NumpadSubtract,
        Self::NumpadMultiply,
        Self::NumpadDivide,
        Self::Unidentified,
    ];

    /// Canonical name of this code.
    pub const fn name(self) -> &'static str {
        match self {
            Self::KeyA => "KeyA",
            Self::KeyB => "KeyB",
            Self::KeyC => "KeyC",
            Self::KeyD => "KeyD",
            Self::KeyE => "KeyE",
            Self::KeyF => "KeyF",
            Self::KeyG => "KeyG",
            Self::KeyH => "KeyH",
            Self::KeyI => "KeyI",
            Self::KeyJ => "KeyJ",
            Self::KeyK => "KeyK",
            Self::KeyL => "KeyL",
            Self::KeyM => "KeyM",
            Self::KeyN => "KeyN",
            Self::KeyO => "KeyO",
            Self::KeyP => "KeyP",
            Self::KeyQ => "KeyQ",
            Self::KeyR => "KeyR",
            Self::KeyS => "KeyS",
            Self::KeyT => "KeyT",
            Self::KeyU => "KeyU",
            Self::KeyV => "KeyV",
            Self::KeyW => "KeyW",
            Self::KeyX => "KeyX",
            Self::KeyY => "KeyY",
            Self::KeyZ => "KeyZ",
            Self::Escape => "Escape",
            Self::F1 => "F1",
            Self::F2 => "F2",
            Self::F3 => "F3",
            Self::F4 => "F4",
            Self::F5 => "F5",
            Self::F6 => "F6",
            Self::F7 => "F7",
            Self::F8 => "F8",
            Self::F9 => "F9",
            Self::F10 => "F10",
            Self::F11 => "F11",
            Self::F12 => "F12",
            Self::Backquote => "Backquote",
            Self::Digit1 => "Digit1",
            Self::Digit2 => "Digit2",
            Self::Digit3 => "Digit3",
            Self::Digit4 => "Digit4",
            Self::Digit5 => "Digit5",
            Self::Digit6 => "Digit6",
            Self::Digit7 => "Digit7",
            Self::Digit8 => "Digit8",
            Self::Digit9 => "Digit9",
            Self::Digit0 => "Digit0",
            Self::Minus => "Minus",
            Self::Equal => "Equal",
            Self::Backspace => "Backspace",
            Self::Tab => "Tab",
            Self::CapsLock => "CapsLock",
            Self::Enter => "Enter",
            Self::Space => "Space",
            Self::BracketLeft => "BracketLeft",
            Self::BracketRight => "BracketRight",
            Self::Backslash => "Backslash",
            Self::Semicolon => "Semicolon",
            Self::Quote => "Quote",
            Self::Comma => "Comma",
            Self::Period => "Period",
            Self::Slash => "Slash",
            Self::Shift => "Shift",
            Self::ShiftLeft => "ShiftLeft",
            Self::ShiftRight => "ShiftRight",
            Self::Control => "Control",
            Self::ControlLeft => "ControlLeft",
            Self::ControlRight => "ControlRight",
            Self::Alt => "Alt",
            Self::AltLeft => "AltLeft",
            Self::AltRight => "AltRight",
            Self::MetaLeft => "MetaLeft",
            Self::MetaRight => "MetaRight",
            Self::Insert => "Insert",
            Self::Delete => "Delete",
            Self::Home => "Home",
            Self::End => "End",
            Self::PageUp => "PageUp",
            Self::PageDown => "PageDown",
            Self::Pause => "Pause",
            Self::ArrowUp => "ArrowUp",
            Self::ArrowDown => "ArrowDown",
            Self::ArrowLeft => "ArrowLeft",
            Self::ArrowRight => "ArrowRight",
            Self::NumLock => "NumLock",
            Self::Numpad0 => "Numpad0",
            Self::Numpad1 => "Numpad1",
            Self::Numpad2 => "Numpad2",
            Self::Numpad3 => "Numpad3",
            Self::Numpad4 => "Numpad4",
            Self::Numpad5 => "Numpad5",
            Self::Numpad6 => "Numpad6",
            Self::Numpad7 => "Numpad7",
            Self::Numpad8 => "Numpad8",
            Self::Numpad9 => "Numpad9",
            Self::NumpadDecimal => "NumpadDecimal",
            Self::NumpadAdd => "NumpadAdd",
            Self::NumpadSubtract => "NumpadSubtract",
            Self::NumpadMultiply => "NumpadMultiply",
            Self::NumpadDivide => "NumpadDivide",
            Self::Unidentified => "Unidentified",
        }
    }

    /// Resolve a symbolic alias to its canonical code.
    ///
    /// Every canonical name resolves to itself, and the bare letters
    /// `"A"`..`"Z"` resolve to their `KeyX` codes. Unknown names return
    /// `None`; callers treat that as "not pressed".
    pub fn resolve(alias: &str) -> Option<KeyCode> {
        ALIASES.get(alias).copied()
    }
}

impl std::fmt::Display for KeyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Static alias table: canonical names plus the single-letter aliases.
///
/// Total over `KeyCode::ALL`, and aliases never change meaning. Lookups are
/// case-sensitive like the platform's own code strings.
static ALIASES: LazyLock<HashMap<&'static str, KeyCode>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for &code in KeyCode::ALL {
        let name = code.name();
        map.insert(name, code);
        // "KeyW" also answers to "W"
        if let Some(letter) = name.strip_prefix("Key") {
            if letter.len() == 1 {
                map.insert(letter, code);
            }
        }
    }
    map
});

impl From<device_query::Keycode> for KeyCode {
    fn from(keycode: device_query::Keycode) -> Self {
        use device_query::Keycode as DK;
        match keycode {
            DK::Escape => Self::Escape,
            DK::Key1 => Self::Digit1,
            DK::Key2 => Self::Digit2,
            DK::Key3 => Self::Digit3,
            DK::Key4 => Self::Digit4,
            DK::Key5 => Self::Digit5,
            DK::Key6 => Self::Digit6,
            DK::Key7 => Self::Digit7,
            DK::Key8 => Self::Digit8,
            DK::Key9 => Self::Digit9,
            DK::Key0 => Self::Digit0,
            DK::Minus => Self::Minus,
            DK::Equal => Self::Equal,
            DK::Backspace => Self::Backspace,
            DK::Tab => Self::Tab,
            DK::Q => Self::KeyQ,
            DK::W => Self::KeyW,
            DK::E => Self::KeyE,
            DK::R => Self::KeyR,
            DK::T => Self::KeyT,
            DK::Y => Self::KeyY,
            DK::U => Self::KeyU,
            DK::I => Self::KeyI,
            DK::O => Self::KeyO,
            DK::P => Self::KeyP,
            DK::LeftBracket => Self::BracketLeft,
            DK::RightBracket => Self::BracketRight,
            DK::Enter => Self::Enter,
            DK::LControl => Self::ControlLeft,
            DK::A => Self::KeyA,
            DK::S => Self::KeyS,
            DK::D => Self::KeyD,
            DK::F => Self::KeyF,
            DK::G => Self::KeyG,
            DK::H => Self::KeyH,
            DK::J => Self::KeyJ,
            DK::K => Self::KeyK,
            DK::L => Self::KeyL,
            DK::Semicolon => Self::Semicolon,
            DK::Apostrophe => Self::Quote,
            DK::Grave => Self::Backquote,
            DK::LShift => Self::ShiftLeft,
            DK::BackSlash => Self::Backslash,
            DK::Z => Self::KeyZ,
            DK::X => Self::KeyX,
            DK::C => Self::KeyC,
            DK::V => Self::KeyV,
            DK::B => Self::KeyB,
            DK::N => Self::KeyN,
            DK::M => Self::KeyM,
            DK::Comma => Self::Comma,
            DK::Dot => Self::Period,
            DK::Slash => Self::Slash,
            DK::RShift => Self::ShiftRight,
            DK::LAlt => Self::AltLeft,
            DK::Space => Self::Space,
            DK::CapsLock => Self::CapsLock,
            DK::F1 => Self::F1,
            DK::F2 => Self::F2,
            DK::F3 => Self::F3,
            DK::F4 => Self::F4,
            DK::F5 => Self::F5,
            DK::F6 => Self::F6,
            DK::F7 => Self::F7,
            DK::F8 => Self::F8,
            DK::F9 => Self::F9,
            DK::F10 => Self::F10,
            DK::F11 => Self::F11,
            DK::F12 => Self::F12,
            DK::RControl => Self::ControlRight,
            DK::RAlt => Self::AltRight,
            DK::Home => Self::Home,
            DK::Up => Self::ArrowUp,
            DK::PageUp => Self::PageUp,
            DK::Left => Self::ArrowLeft,
            DK::Right => Self::ArrowRight,
            DK::End => Self::End,
            DK::Down => Self::ArrowDown,
            DK::PageDown => Self::PageDown,
            DK::Insert => Self::Insert,
            DK::Delete => Self::Delete,
            DK::LMeta => Self::MetaLeft,
            DK::RMeta => Self::MetaRight,
            DK::Numpad0 => Self::Numpad0,
            DK::Numpad1 => Self::Numpad1,
            DK::Numpad2 => Self::Numpad2,
            DK::Numpad3 => Self::Numpad3,
            DK::Numpad4 => Self::Numpad4,
            DK::Numpad5 => Self::Numpad5,
            DK::Numpad6 => Self::Numpad6,
            DK::Numpad7 => Self::Numpad7,
            DK::Numpad8 => Self::Numpad8,
            DK::Numpad9 => Self::Numpad9,
            DK::NumpadSubtract => Self::NumpadSubtract,
            DK::NumpadAdd => Self::NumpadAdd,
            DK::NumpadDivide => Self::NumpadDivide,
            DK::NumpadMultiply => Self::NumpadMultiply,
            _ => Self::Unidentified,
        }
    }
}
