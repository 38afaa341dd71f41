//! A single editable document over a piece sequence.
//!
//! # Examples
//!
//! ```
//! use red::Document;
//!
//! let mut doc = Document::new("ABCDEF");
//! doc.insert(4, "X")?;
//! assert_eq!(doc.text(), "ABCDXEF");
//!
//! doc.undo();
//! assert_eq!(doc.text(), "ABCDEF");
//! # Ok::<(), red::Error>(())
//! ```

use super::history::EditLog;
use super::piece::{BufferKind, Piece};
use super::sequence::{Pieces, Sequence};
use crate::error::{Error, Result};
use crate::event::{DocumentEvent, LogLevel, emit_document_event, emit_log};

/// Original text, append buffer, piece sequence and edit log of one session.
///
/// The original text is never modified. Inserted text only ever grows the
/// append buffer; bytes a piece refers to are never rewritten.
#[derive(Clone, Debug)]
pub struct Document {
    original: String,
    appended: String,
    sequence: Sequence,
    log: EditLog,
}

impl Default for Document {
    fn default() -> Self {
        Self::new("")
    }
}

impl Document {
    /// Create a document whose sequence is a single piece over `original`.
    #[must_use]
    pub fn new(original: impl Into<String>) -> Self {
        let original = original.into();
        let sequence = Sequence::new(original.len());
        Self {
            original,
            appended: String::new(),
            sequence,
            log: EditLog::new(),
        }
    }

    /// Insert `text` at byte position `pos` (valid range `0..=len()`).
    ///
    /// On failure nothing changes: the sequence, the edit log and the append
    /// buffer are exactly as they were. An empty `text` is validated and then
    /// ignored.
    pub fn insert(&mut self, pos: usize, text: &str) -> Result<()> {
        if let Err(err) = self.check_position(pos) {
            self.reject(pos, text.len(), &err);
            return Err(err);
        }
        if text.is_empty() {
            return Ok(());
        }

        let append_offset = self.appended.len();
        self.appended.push_str(text);
        match self.sequence.insert(pos, text.len(), append_offset) {
            Ok(op) => {
                emit_document_event(&DocumentEvent::Inserted {
                    pos,
                    len: text.len(),
                    shape: op.shape(),
                });
                self.log.push(op);
                Ok(())
            }
            Err(err) => {
                self.appended.truncate(append_offset);
                self.reject(pos, text.len(), &err);
                Err(err)
            }
        }
    }

    /// Revert the most recent insert.
    ///
    /// Returns `false` and does nothing when the edit log is empty.
    pub fn undo(&mut self) -> bool {
        let Some(op) = self.log.pop() else {
            emit_document_event(&DocumentEvent::UndoEmpty);
            return false;
        };
        self.sequence.revert(&op);
        emit_document_event(&DocumentEvent::Undone { shape: op.shape() });
        true
    }

    /// Current document content, rebuilt from the pieces.
    #[must_use]
    pub fn text(&self) -> String {
        self.sequence.materialize(&self.original, &self.appended)
    }

    /// Document length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.sequence.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// The text the document was created with.
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Every byte ever inserted, in insertion order.
    #[must_use]
    pub fn appended(&self) -> &str {
        &self.appended
    }

    /// Traverse the piece sequence.
    #[must_use]
    pub fn pieces(&self) -> Pieces<'_> {
        self.sequence.pieces()
    }

    /// Link-free copies of the current pieces, in order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Piece> {
        self.sequence.snapshot()
    }

    #[must_use]
    pub const fn piece_count(&self) -> usize {
        self.sequence.piece_count()
    }

    #[must_use]
    pub const fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    #[must_use]
    pub const fn log(&self) -> &EditLog {
        &self.log
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.log.is_empty()
    }

    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.log.depth()
    }

    /// Text referenced by `piece`.
    #[must_use]
    pub fn piece_text(&self, piece: &Piece) -> &str {
        let buffer = match piece.buffer {
            BufferKind::Original => &self.original,
            BufferKind::Appended => &self.appended,
        };
        &buffer[piece.range()]
    }

    /// Reject positions past the end or inside a multi-byte character.
    fn check_position(&self, pos: usize) -> Result<()> {
        if pos > self.len() {
            return Err(Error::PositionNotFound {
                pos,
                len: self.len(),
            });
        }
        match self.sequence.locate(pos) {
            Some((piece, within)) => {
                let buffer = match piece.buffer {
                    BufferKind::Original => &self.original,
                    BufferKind::Appended => &self.appended,
                };
                if buffer.is_char_boundary(piece.start + within) {
                    Ok(())
                } else {
                    Err(Error::NotCharBoundary { pos })
                }
            }
            None => Ok(()),
        }
    }

    fn reject(&self, pos: usize, len: usize, err: &Error) {
        emit_log(LogLevel::Warn, &format!("insert of {len} bytes at {pos} rejected: {err}"));
        emit_document_event(&DocumentEvent::InsertRejected { pos, len });
    }
}
