//! Render sink abstraction and its terminal implementation.
//!
//! The editor draws through [`RenderSink`] so it can be driven against an
//! in-memory screen in tests. [`Screen`] buffers every escape sequence of a
//! frame and hands the bytes to the terminal in one write on
//! [`RenderSink::flush`].

use std::io::{self, Write};

use crate::ansi::{self, sequences};
use crate::terminal::Terminal;
use crate::unicode::clip_to_width;

/// Something the editor can draw a frame into.
///
/// Cursor coordinates are 1-based and every move is clamped into
/// `[1, width] × [1, height]`.
pub trait RenderSink {
    /// Screen size as `(columns, rows)`.
    fn size(&self) -> (u16, u16);

    /// Draw text rows from the top of the screen and `status` on the last row.
    ///
    /// Rows without a line are cleared. Lines wider than the screen are
    /// clipped.
    fn draw_lines(&mut self, lines: &[&str], status: &str) -> io::Result<()>;

    /// Place the cursor at column `x`, row `y`.
    fn move_cursor_abs(&mut self, x: i32, y: i32) -> io::Result<()>;

    /// Move the cursor by `(dx, dy)`.
    fn move_cursor_rel(&mut self, dx: i32, dy: i32) -> io::Result<()>;

    /// Current cursor position as `(x, y)`.
    fn cursor(&self) -> (u16, u16);

    /// Send the buffered frame to the output.
    fn flush(&mut self) -> io::Result<()>;
}

/// [`RenderSink`] over a [`Terminal`].
pub struct Screen<W: Write> {
    terminal: Terminal<W>,
    scratch_buffer: Vec<u8>,
    in_frame: bool,
}

impl<W: Write> Screen<W> {
    #[must_use]
    pub fn new(terminal: Terminal<W>) -> Self {
        Self {
            terminal,
            scratch_buffer: Vec::with_capacity(4096),
            in_frame: false,
        }
    }

    #[must_use]
    pub fn terminal(&self) -> &Terminal<W> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<W> {
        &mut self.terminal
    }

    /// Bytes queued since the last flush.
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.scratch_buffer
    }

    fn begin_frame(&mut self) {
        if !self.in_frame {
            self.scratch_buffer
                .extend_from_slice(sequences::sync::BEGIN.as_bytes());
            self.scratch_buffer
                .extend_from_slice(sequences::CURSOR_HIDE.as_bytes());
            self.in_frame = true;
        }
    }

    fn write_row(&mut self, row: u16, text: &str, width: u16) -> io::Result<()> {
        ansi::write_cursor_position(&mut self.scratch_buffer, 1, u32::from(row))?;
        self.scratch_buffer
            .extend_from_slice(sequences::CLEAR_LINE.as_bytes());
        self.scratch_buffer
            .extend_from_slice(clip_to_width(text, usize::from(width)).as_bytes());
        Ok(())
    }
}

impl<W: Write> RenderSink for Screen<W> {
    fn size(&self) -> (u16, u16) {
        self.terminal.size()
    }

    fn draw_lines(&mut self, lines: &[&str], status: &str) -> io::Result<()> {
        let (width, height) = self.size();
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.begin_frame();

        let text_rows = height - 1;
        for row in 0..text_rows {
            let line = lines.get(usize::from(row)).copied().unwrap_or("");
            self.write_row(row + 1, line, width)?;
        }

        self.scratch_buffer
            .extend_from_slice(sequences::INVERSE.as_bytes());
        self.write_row(height, status, width)?;
        self.scratch_buffer
            .extend_from_slice(sequences::RESET.as_bytes());
        Ok(())
    }

    fn move_cursor_abs(&mut self, x: i32, y: i32) -> io::Result<()> {
        let (width, height) = self.size();
        let cursor = self.terminal.cursor_mut();
        cursor.move_abs(x, y, width, height);
        let (x, y) = cursor.position();
        ansi::write_cursor_position(&mut self.scratch_buffer, u32::from(x), u32::from(y))
    }

    fn move_cursor_rel(&mut self, dx: i32, dy: i32) -> io::Result<()> {
        let (width, height) = self.size();
        let cursor = self.terminal.cursor_mut();
        let before = cursor.position();
        cursor.move_rel(dx, dy, width, height);
        let after = cursor.position();
        ansi::write_cursor_move(
            &mut self.scratch_buffer,
            i32::from(after.0) - i32::from(before.0),
            i32::from(after.1) - i32::from(before.1),
        )
    }

    fn cursor(&self) -> (u16, u16) {
        self.terminal.cursor().position()
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.in_frame {
            let (x, y) = self.terminal.cursor().position();
            ansi::write_cursor_position(&mut self.scratch_buffer, u32::from(x), u32::from(y))?;
            self.scratch_buffer
                .extend_from_slice(sequences::CURSOR_SHOW.as_bytes());
            self.scratch_buffer
                .extend_from_slice(sequences::sync::END.as_bytes());
            self.in_frame = false;
            self.terminal.cursor_mut().visible = true;
        }
        self.terminal.writer_mut().write_all(&self.scratch_buffer)?;
        self.scratch_buffer.clear();
        self.terminal.flush()
    }
}
