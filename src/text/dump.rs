//! Indented, field-ordered diagnostic dumps of a document.
//!
//! ```
//! use red::{Document, DumpOptions};
//!
//! let mut doc = Document::new("ABC");
//! doc.insert(1, "X")?;
//! let dump = doc.dump(DumpOptions::default()).to_string();
//! assert!(dump.starts_with("Original: \"ABC\"\nAppended: \"X\"\n"));
//! # Ok::<(), red::Error>(())
//! ```

use std::fmt::{self, Write};

use super::document::Document;
use super::history::Op;
use super::piece::Piece;

/// Which sections to print, and how far to indent them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DumpOptions {
    /// Print the piece sequence.
    pub show_sequence: bool,
    /// Print the edit log.
    pub show_log: bool,
    /// Leading spaces for top-level lines.
    pub indent: usize,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            show_sequence: true,
            show_log: false,
            indent: 0,
        }
    }
}

impl DumpOptions {
    /// Every section.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            show_sequence: true,
            show_log: true,
            indent: 0,
        }
    }

    /// Buffers only.
    #[must_use]
    pub const fn buffers() -> Self {
        Self {
            show_sequence: false,
            show_log: false,
            indent: 0,
        }
    }
}

/// Displayable dump of a [`Document`]; see [`Document::dump`].
#[derive(Clone, Copy, Debug)]
pub struct Dump<'a> {
    document: &'a Document,
    options: DumpOptions,
}

impl Document {
    /// Build a printable dump of this document.
    #[must_use]
    pub const fn dump(&self, options: DumpOptions) -> Dump<'_> {
        Dump {
            document: self,
            options,
        }
    }
}

fn write_piece(f: &mut impl Write, indent: usize, piece: &Piece) -> fmt::Result {
    writeln!(f, "{:indent$}Buffer: {}", "", piece.buffer)?;
    writeln!(f, "{:indent$}Start: {}", "", piece.start)?;
    writeln!(f, "{:indent$}Len: {}", "", piece.len)
}

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.options.indent;
        let doc = self.document;

        writeln!(f, "{:w$}Original: {:?}", "", doc.original())?;
        writeln!(f, "{:w$}Appended: {:?}", "", doc.appended())?;

        if self.options.show_sequence {
            writeln!(f, "{:w$}Sequence:", "")?;
            writeln!(f, "{:w$}  Len: {}", "", doc.len())?;
            for entry in doc.pieces() {
                writeln!(f, "{:w$}  Piece[{}]:", "", entry.index)?;
                write_piece(f, w + 4, entry.piece)?;
                writeln!(f, "{:w$}    Offset: {}", "", entry.offset)?;
            }
        }

        if self.options.show_log {
            writeln!(f, "{:w$}Ops:", "")?;
            for op in doc.log().iter() {
                match op {
                    Op::Insert { pre, shape, .. } => {
                        writeln!(f, "{:w$}  Insert:", "")?;
                        writeln!(f, "{:w$}    Pre:", "")?;
                        write_piece(f, w + 6, pre)?;
                        writeln!(f, "{:w$}    Shape: {shape}", "")?;
                    }
                }
            }
        }

        Ok(())
    }
}
