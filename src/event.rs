//! Log and document-event callbacks.
//!
//! Nothing in the crate writes diagnostics to the terminal directly: while the
//! editor owns the screen in raw mode, stray output would corrupt it. Instead,
//! log lines and document events are routed to optional process-wide
//! callbacks that the host installs (the `red` binary sends logs to the file
//! named by `--log`).

use std::fmt;
use std::sync::{Mutex, OnceLock};

use crate::text::SpliceShape;

/// Log level for debug callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// Something that happened to a document's edit history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentEvent {
    /// A span of `len` bytes was spliced in at `pos`.
    Inserted {
        pos: usize,
        len: usize,
        shape: SpliceShape,
    },
    /// An insert was refused and the document left unchanged.
    InsertRejected { pos: usize, len: usize },
    /// The most recent insert was reverted.
    Undone { shape: SpliceShape },
    /// Undo was requested with an empty edit log.
    UndoEmpty,
}

type LogCallback = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;
type DocumentCallback = Box<dyn Fn(&DocumentEvent) + Send + Sync + 'static>;

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

fn document_callback() -> &'static Mutex<Option<DocumentCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<DocumentCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global log callback.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    if let Ok(mut guard) = log_callback().lock() {
        *guard = Some(Box::new(callback));
    }
}

/// Remove the global log callback.
pub fn clear_log_callback() {
    if let Ok(mut guard) = log_callback().lock() {
        *guard = None;
    }
}

/// Emit a log line to the registered callback, if any.
pub fn emit_log(level: LogLevel, message: &str) {
    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, message);
        }
    }
}

/// Set the global document-event callback.
pub fn set_document_callback<F>(callback: F)
where
    F: Fn(&DocumentEvent) + Send + Sync + 'static,
{
    if let Ok(mut guard) = document_callback().lock() {
        *guard = Some(Box::new(callback));
    }
}

/// Remove the global document-event callback.
pub fn clear_document_callback() {
    if let Ok(mut guard) = document_callback().lock() {
        *guard = None;
    }
}

/// Emit a document event to the registered callback, if any.
pub fn emit_document_event(event: &DocumentEvent) {
    if let Ok(guard) = document_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(event);
        }
    }
}
