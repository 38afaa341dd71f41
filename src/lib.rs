//! `red` - a small modal terminal text editor built on a piece table
//!
//! Documents are stored as an immutable original buffer, an append-only
//! buffer and a sequence of pieces that reference spans of both. Every
//! insert records enough to undo it exactly.
//!
//! ```
//! use red::Document;
//!
//! let mut doc = Document::new("hello world");
//! doc.insert(5, ",")?;
//! assert_eq!(doc.text(), "hello, world");
//! assert!(doc.undo());
//! assert_eq!(doc.text(), "hello world");
//! # Ok::<(), red::Error>(())
//! ```

// Crate-level lint configuration
#![warn(unsafe_code)] // Unsafe code needs justification (required for termios FFI)
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::cast_sign_loss)] // Intentional coordinate conversions
#![allow(clippy::cast_possible_wrap)] // Intentional coordinate conversions
#![allow(clippy::module_name_repetitions)] // Allow KeyEvent in input etc
#![allow(clippy::missing_errors_doc)] // Error variants are documented on `Error`
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference

pub mod ansi;
pub mod config;
pub mod editor;
pub mod error;
pub mod event;
pub mod input;
pub mod screen;
pub mod terminal;
pub mod text;
pub mod unicode;

// Re-export core types at crate root
pub use error::{Error, Result};
pub use event::{
    DocumentEvent, LogLevel, emit_log, set_document_callback, set_log_callback,
};
pub use text::{Document, DumpOptions, Piece, SpliceShape};

// Re-export editor surfaces
pub use config::{Config, ParseResult};
pub use editor::{Command, Dispatcher, Flow, Mode, Session};
pub use input::{KeyCode, KeyEvent, KeyListener, KeyModifiers};
pub use screen::{RenderSink, Screen};
pub use terminal::{RawModeGuard, Terminal, is_tty, terminal_size};
