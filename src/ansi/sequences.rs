//! Constant ANSI escape sequences.

/// Reset all attributes to default.
pub const RESET: &str = "\x1b[0m";

/// Clear entire screen.
pub const CLEAR_SCREEN: &str = "\x1b[2J";

/// Clear entire line.
pub const CLEAR_LINE: &str = "\x1b[2K";

/// Hide cursor.
pub const CURSOR_HIDE: &str = "\x1b[?25l";

/// Show cursor.
pub const CURSOR_SHOW: &str = "\x1b[?25h";

/// Move cursor to home position.
pub const CURSOR_HOME: &str = "\x1b[H";

/// Enter alternate screen buffer.
pub const ALT_SCREEN_ON: &str = "\x1b[?1049h";

/// Leave alternate screen buffer.
pub const ALT_SCREEN_OFF: &str = "\x1b[?1049l";

/// Reverse video, used for the status line.
pub const INVERSE: &str = "\x1b[7m";

/// Synchronized output (DEC mode 2026).
pub mod sync {
    /// Begin synchronized update.
    pub const BEGIN: &str = "\x1b[?2026h";
    /// End synchronized update.
    pub const END: &str = "\x1b[?2026l";
}
