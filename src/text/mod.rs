//! Piece-table text storage.
//!
//! A document is an immutable original buffer, an append-only buffer and a
//! sequence of pieces referencing spans of either. Editing splices pieces
//! instead of copying text, and every splice records the state needed to
//! undo it.
//!
//! Key types:
//!
//! - [`Document`]: buffers, sequence and edit log with insert/undo/text
//! - [`Sequence`]: arena-backed circular piece list with a sentinel slot
//! - [`Piece`]: a `(buffer, start, len)` span reference
//! - [`Op`] / [`EditLog`]: reversible edit records in LIFO order
//! - [`Dump`]: explicit pretty-printer for diagnostics
//!
//! # Examples
//!
//! ```
//! use red::text::{Document, Piece};
//!
//! let mut doc = Document::new("ABCDEF");
//! doc.insert(2, "X")?;
//! doc.insert(5, "Y")?;
//! assert_eq!(doc.text(), "ABXCDYEF");
//! assert_eq!(doc.piece_count(), 5);
//! assert_eq!(doc.snapshot()[3], Piece::appended(1, 1));
//!
//! doc.undo();
//! doc.undo();
//! assert_eq!(doc.snapshot(), vec![Piece::original(0, 6)]);
//! # Ok::<(), red::Error>(())
//! ```

mod document;
mod dump;
mod history;
mod piece;
mod sequence;

pub use document::Document;
pub use dump::{Dump, DumpOptions};
pub use history::{EditLog, Op, SpliceShape};
pub use piece::{BufferKind, Piece, PieceId};
pub use sequence::{PieceEntry, Pieces, Sequence};
