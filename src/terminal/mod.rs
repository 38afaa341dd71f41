//! Terminal context: raw mode, alternate screen, size and cursor state.
//!
//! A single [`Terminal`] is built at startup and handed to everything that
//! writes to the screen. Dropping it puts the terminal back the way it was.

mod cursor;
mod raw;

pub use cursor::CursorState;
pub use raw::{
    DEFAULT_SIZE, RawModeGuard, enable_raw_mode, is_tty, terminal_size, terminal_size_or_default,
};

use crate::ansi::sequences;
use std::io::{self, Write};
use std::os::unix::io::AsRawFd;

/// Terminal state manager.
pub struct Terminal<W: Write> {
    writer: W,
    size: (u16, u16),
    cursor: CursorState,
    alt_screen: bool,
    raw_mode_guard: Option<RawModeGuard>,
}

impl<W: Write> Terminal<W> {
    /// Create a terminal writing to `writer` with a `(columns, rows)` size.
    pub fn new(writer: W, size: (u16, u16)) -> Self {
        Self {
            writer,
            size,
            cursor: CursorState::default(),
            alt_screen: false,
            raw_mode_guard: None,
        }
    }

    /// Check if terminal is in raw mode.
    #[must_use]
    pub fn is_raw_mode(&self) -> bool {
        self.raw_mode_guard.is_some()
    }

    /// Put the terminal behind `fd` into raw mode.
    ///
    /// Calling this again while raw mode is active does nothing.
    pub fn enter_raw_mode<F: AsRawFd>(&mut self, fd: &F) -> io::Result<()> {
        if self.raw_mode_guard.is_none() {
            self.raw_mode_guard = Some(RawModeGuard::new(fd)?);
        }
        Ok(())
    }

    /// Restore the line discipline saved by [`Terminal::enter_raw_mode`].
    pub fn exit_raw_mode(&mut self) {
        self.raw_mode_guard = None;
    }

    #[must_use]
    pub fn is_alt_screen(&self) -> bool {
        self.alt_screen
    }

    /// Enter alternate screen buffer.
    pub fn enter_alt_screen(&mut self) -> io::Result<()> {
        if !self.alt_screen {
            self.writer.write_all(sequences::ALT_SCREEN_ON.as_bytes())?;
            self.alt_screen = true;
        }
        Ok(())
    }

    /// Leave alternate screen buffer.
    pub fn leave_alt_screen(&mut self) -> io::Result<()> {
        if self.alt_screen {
            self.writer
                .write_all(sequences::ALT_SCREEN_OFF.as_bytes())?;
            self.alt_screen = false;
        }
        Ok(())
    }

    /// Screen size as `(columns, rows)`.
    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    /// Record a new screen size and pull the cursor back inside it.
    pub fn set_size(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        let (x, y) = self.cursor.position();
        self.cursor
            .move_abs(i32::from(x), i32::from(y), width, height);
    }

    #[must_use]
    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut CursorState {
        &mut self.cursor
    }

    /// Hide cursor.
    pub fn hide_cursor(&mut self) -> io::Result<()> {
        if self.cursor.visible {
            self.writer.write_all(sequences::CURSOR_HIDE.as_bytes())?;
            self.cursor.visible = false;
        }
        Ok(())
    }

    /// Show cursor.
    pub fn show_cursor(&mut self) -> io::Result<()> {
        if !self.cursor.visible {
            self.writer.write_all(sequences::CURSOR_SHOW.as_bytes())?;
            self.cursor.visible = true;
        }
        Ok(())
    }

    /// Clear the screen and home the cursor.
    pub fn clear(&mut self) -> io::Result<()> {
        self.writer.write_all(sequences::CLEAR_SCREEN.as_bytes())?;
        self.writer.write_all(sequences::CURSOR_HOME.as_bytes())?;
        self.cursor.move_abs(1, 1, self.size.0, self.size.1);
        Ok(())
    }

    /// Direct access to the underlying writer.
    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Flush the output.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Put the terminal back in the state it was found in.
    pub fn restore(&mut self) -> io::Result<()> {
        self.show_cursor()?;
        self.leave_alt_screen()?;
        self.exit_raw_mode();
        self.writer.write_all(sequences::RESET.as_bytes())?;
        self.flush()
    }
}

impl<W: Write> Drop for Terminal<W> {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
