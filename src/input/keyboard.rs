//! Keyboard event types.

use bitflags::bitflags;

bitflags! {
    /// Keyboard modifier flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        /// Shift key.
        const SHIFT = 0b0000_0001;
        /// Alt/Option key.
        const ALT = 0b0000_0010;
        /// Control key.
        const CTRL = 0b0000_0100;
    }
}

/// A key code representing a keyboard key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Backspace key.
    Backspace,
    /// Enter/Return key.
    Enter,
    /// Tab key.
    Tab,
    /// Escape key.
    Esc,
    /// A character key (includes space).
    Char(char),
    /// Null (Ctrl+Space or Ctrl+@).
    Null,
}

impl KeyCode {
    /// Check if this is a character key.
    #[must_use]
    pub fn is_char(&self) -> bool {
        matches!(self, Self::Char(_))
    }

    /// Get the character if this is a character key.
    #[must_use]
    pub fn char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            _ => None,
        }
    }
}

/// A keyboard event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code.
    pub code: KeyCode,
    /// Modifier keys held.
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    /// Create a new key event.
    #[must_use]
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a key event with no modifiers.
    #[must_use]
    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    /// Create a character key event.
    #[must_use]
    pub fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c))
    }

    /// Create a Ctrl+key event.
    #[must_use]
    pub fn with_ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CTRL)
    }

    /// Decode one character read from a raw-mode terminal.
    ///
    /// Carriage return and line feed are Enter, `0x7f` and `0x08` are
    /// Backspace, and the remaining C0 controls become Ctrl plus the key
    /// that produces them.
    #[must_use]
    pub fn from_char(c: char) -> Self {
        match c {
            '\r' | '\n' => Self::key(KeyCode::Enter),
            '\t' => Self::key(KeyCode::Tab),
            '\x1b' => Self::key(KeyCode::Esc),
            '\x7f' | '\x08' => Self::key(KeyCode::Backspace),
            '\0' => Self::key(KeyCode::Null),
            '\x01'..='\x1a' => {
                let letter = char::from(c as u8 - 1 + b'a');
                Self::with_ctrl(KeyCode::Char(letter))
            }
            '\x1c'..='\x1f' => Self::with_ctrl(KeyCode::Char(char::from(c as u8 + 0x40))),
            _ => Self::char(c),
        }
    }

    /// Check if Ctrl is held.
    #[must_use]
    pub fn ctrl(&self) -> bool {
        self.modifiers.contains(KeyModifiers::CTRL)
    }

    /// Check if this matches a specific key with optional modifiers.
    #[must_use]
    pub fn matches(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.code == code && self.modifiers == modifiers
    }

    /// A plain character that can go into the document.
    #[must_use]
    pub fn printable(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if self.modifiers.is_empty() && !c.is_control() => Some(c),
            _ => None,
        }
    }
}

impl From<char> for KeyEvent {
    fn from(c: char) -> Self {
        Self::from_char(c)
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::key(code)
    }
}
