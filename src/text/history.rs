//! Reversible edit records and the LIFO edit log.

use std::fmt;

use super::piece::{Piece, PieceId};

/// How an inserted piece was spliced into the sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpliceShape {
    /// Linked directly before the matched piece.
    AttachLeft,
    /// The matched piece was split and the new piece linked between the halves.
    SplitMid,
    /// Linked directly after the matched piece (tail only).
    AttachRight,
}

impl fmt::Display for SpliceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AttachLeft => "AttachLeft",
            Self::SplitMid => "SplitMid",
            Self::AttachRight => "AttachRight",
        };
        f.write_str(name)
    }
}

/// A reversible edit.
///
/// Each variant carries exactly what its inverse needs. Ops are only valid
/// against the sequence that produced them and must be reverted in LIFO
/// order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Insert {
        /// The matched piece as it was before the splice.
        pre: Piece,
        shape: SpliceShape,
        /// Slot of the matched piece.
        target: PieceId,
        /// Slot of the newly inserted piece.
        inserted: PieceId,
        /// Slot of the right remainder, for [`SpliceShape::SplitMid`] only.
        right: Option<PieceId>,
    },
}

impl Op {
    /// Splice shape recorded by this op.
    #[must_use]
    pub const fn shape(&self) -> SpliceShape {
        match self {
            Self::Insert { shape, .. } => *shape,
        }
    }

    /// Snapshot of the piece the op split or attached to.
    #[must_use]
    pub const fn pre(&self) -> Piece {
        match self {
            Self::Insert { pre, .. } => *pre,
        }
    }
}

/// Stack of ops, most recent last. No redo.
#[derive(Clone, Debug, Default)]
pub struct EditLog {
    ops: Vec<Op>,
}

impl EditLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    pub fn pop(&mut self) -> Option<Op> {
        self.ops.pop()
    }

    /// Number of ops that can still be undone.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.ops.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Ops from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Op> {
        self.ops.iter()
    }
}
