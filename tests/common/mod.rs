//! Shared helpers for integration tests.
//!
//! - `RecordingSink`: an in-memory [`RenderSink`] that keeps the last frame
//! - `init_logging`: routes the crate's log callback into `tracing`

#![allow(dead_code)] // Shared test helper; not every integration test uses every utility
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry

use std::io;
use std::sync::Once;

use red::{LogLevel, RenderSink, set_log_callback};
use red::terminal::CursorState;

/// In-memory render sink holding the most recent frame.
#[derive(Debug)]
pub struct RecordingSink {
    width: u16,
    height: u16,
    cursor: CursorState,
    pub lines: Vec<String>,
    pub status: String,
    pub flushes: usize,
}

impl RecordingSink {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cursor: CursorState::new(),
            lines: Vec::new(),
            status: String::new(),
            flushes: 0,
        }
    }

    /// Text rows of the last frame, joined with newlines.
    pub fn screen_text(&self) -> String {
        self.lines.join("\n")
    }
}

impl RenderSink for RecordingSink {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn draw_lines(&mut self, lines: &[&str], status: &str) -> io::Result<()> {
        self.lines = lines.iter().map(|l| (*l).to_string()).collect();
        self.status = status.to_string();
        Ok(())
    }

    fn move_cursor_abs(&mut self, x: i32, y: i32) -> io::Result<()> {
        self.cursor.move_abs(x, y, self.width, self.height);
        Ok(())
    }

    fn move_cursor_rel(&mut self, dx: i32, dy: i32) -> io::Result<()> {
        self.cursor.move_rel(dx, dy, self.width, self.height);
        Ok(())
    }

    fn cursor(&self) -> (u16, u16) {
        self.cursor.position()
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

/// Install a `tracing` subscriber and forward crate log lines into it.
pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_test_writer()
            .try_init();
        set_log_callback(|level, msg| match level {
            LogLevel::Debug => tracing::debug!(target: "red", "{msg}"),
            LogLevel::Info => tracing::info!(target: "red", "{msg}"),
            LogLevel::Warn => tracing::warn!(target: "red", "{msg}"),
            LogLevel::Error => tracing::error!(target: "red", "{msg}"),
        });
    });
}
