//! Piece descriptors and arena handles.

use std::fmt;
use std::ops::Range;

/// Which of the document's two buffers a piece points into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BufferKind {
    /// The immutable text the document was created with.
    Original,
    /// The append-only buffer holding every inserted span.
    Appended,
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original => f.write_str("Original"),
            Self::Appended => f.write_str("Appended"),
        }
    }
}

/// Handle of a piece slot inside a [`Sequence`](super::Sequence) arena.
///
/// Handle 0 is the sentinel and never names real text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PieceId(pub(crate) usize);

impl PieceId {
    /// The permanent sentinel slot.
    pub const SENTINEL: Self = Self(0);

    /// Check whether this handle is the sentinel.
    #[must_use]
    pub const fn is_sentinel(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0
    }
}

/// A reference to `len` bytes of one buffer starting at `start`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub buffer: BufferKind,
    pub start: usize,
    pub len: usize,
}

impl Piece {
    /// Piece over a span of the original buffer.
    #[must_use]
    pub const fn original(start: usize, len: usize) -> Self {
        Self {
            buffer: BufferKind::Original,
            start,
            len,
        }
    }

    /// Piece over a span of the append buffer.
    #[must_use]
    pub const fn appended(start: usize, len: usize) -> Self {
        Self {
            buffer: BufferKind::Appended,
            start,
            len,
        }
    }

    /// Byte range referenced within the owning buffer.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.buffer, self.start, self.len)
    }
}
