//! Arena-backed piece sequence.
//!
//! Pieces live in a densely indexed arena and form a circular doubly linked
//! list through [`PieceId`] handles. Slot 0 holds the sentinel, which closes
//! the ring: `next(SENTINEL)` is the first piece and `prev(SENTINEL)` the last.
//!
//! # Invariants
//!
//! - `next(prev(id)) == id` and `prev(next(id)) == id` for every linked slot
//! - the sum of piece lengths equals [`Sequence::len`]
//! - pieces only ever shrink in place; the bytes they reference never change
//! - slot 0 is never handed out for real data

use super::history::{Op, SpliceShape};
use super::piece::{BufferKind, Piece, PieceId};
use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug)]
struct Node {
    piece: Piece,
    prev: PieceId,
    next: PieceId,
}

/// Ordered collection of pieces whose concatenation is the document text.
///
/// Outside the crate a sequence is read-only. Splicing and reverting go
/// through [`Document`](super::Document), which owns the edit log and so
/// only ever reverts the latest op of its own sequence:
///
/// ```compile_fail
/// let mut sequence = red::text::Sequence::new(6);
/// let op = sequence.insert(3, 1, 0).unwrap();
/// sequence.revert(&op);
/// ```
///
/// ```
/// let mut doc = red::Document::new("ABCDEF");
/// doc.insert(3, "X")?;
/// assert!(doc.undo());
/// assert!(!doc.undo());
/// assert!(doc.sequence().is_well_linked());
/// assert_eq!(doc.sequence().piece_count(), 1);
/// # Ok::<(), red::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Sequence {
    /// Index 0 is the sentinel.
    nodes: Vec<Node>,
    /// Slots released by undo, reused before the arena grows.
    free_list: Vec<usize>,
    len: usize,
    count: usize,
}

/// One step of [`Sequence::pieces`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PieceEntry<'a> {
    pub id: PieceId,
    pub piece: &'a Piece,
    /// Document position where this piece starts.
    pub offset: usize,
    /// Zero-based position of the piece in the list.
    pub index: usize,
}

impl PieceEntry<'_> {
    /// Document position just past this piece.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset + self.piece.len
    }
}

/// Forward traversal over real pieces, sentinel excluded.
#[derive(Clone, Debug)]
pub struct Pieces<'a> {
    sequence: &'a Sequence,
    cursor: PieceId,
    offset: usize,
    index: usize,
}

impl<'a> Iterator for Pieces<'a> {
    type Item = PieceEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.is_sentinel() {
            return None;
        }
        let node = &self.sequence.nodes[self.cursor.index()];
        let entry = PieceEntry {
            id: self.cursor,
            piece: &node.piece,
            offset: self.offset,
            index: self.index,
        };
        self.cursor = node.next;
        self.offset += node.piece.len;
        self.index += 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.sequence.count.saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Pieces<'_> {}

impl Sequence {
    /// Create a sequence seeded with one original-buffer piece of
    /// `original_len` bytes. The seed piece exists even when the length is 0.
    #[must_use]
    pub fn new(original_len: usize) -> Self {
        let seed = PieceId(1);
        let sentinel = Node {
            piece: Piece::original(0, 0),
            prev: seed,
            next: seed,
        };
        let first = Node {
            piece: Piece::original(0, original_len),
            prev: PieceId::SENTINEL,
            next: PieceId::SENTINEL,
        };
        Self {
            nodes: vec![sentinel, first],
            free_list: Vec::new(),
            len: original_len,
            count: 1,
        }
    }

    /// Document length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of real pieces.
    #[must_use]
    pub const fn piece_count(&self) -> usize {
        self.count
    }

    /// Walk the pieces in document order.
    ///
    /// This is the only traversal in the crate; searching, materializing and
    /// printing are all built on it. Stop early with the usual iterator
    /// adapters (`find`, `take_while`, `break`).
    #[must_use]
    pub fn pieces(&self) -> Pieces<'_> {
        Pieces {
            sequence: self,
            cursor: self.next(PieceId::SENTINEL),
            offset: 0,
            index: 0,
        }
    }

    /// Link-free copies of every piece, in order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Piece> {
        self.pieces().map(|entry| *entry.piece).collect()
    }

    /// Piece holding the byte at `pos`, with the offset of `pos` inside it.
    ///
    /// Returns `None` for `pos >= len()`.
    #[must_use]
    pub fn locate(&self, pos: usize) -> Option<(Piece, usize)> {
        self.pieces()
            .find(|entry| entry.offset <= pos && pos < entry.end())
            .map(|entry| (*entry.piece, pos - entry.offset))
    }

    /// Splice a new appended-buffer piece of `len` bytes starting at
    /// `append_offset` into the document at `pos`.
    ///
    /// A position on the boundary between two pieces binds to the start of
    /// the following piece; attaching after a piece only happens at the tail.
    pub(crate) fn insert(&mut self, pos: usize, len: usize, append_offset: usize) -> Result<Op> {
        let found = self
            .pieces()
            .find(|entry| self.binds(entry, pos))
            .map(|entry| (entry.id, entry.offset, *entry.piece));
        let Some((target, off, pre)) = found else {
            return Err(Error::PositionNotFound { pos, len: self.len });
        };

        let new_piece = Piece::appended(append_offset, len);
        let op = if pos == off {
            let prev = self.prev(target);
            let inserted = self.alloc(new_piece, prev, target);
            Op::Insert {
                pre,
                shape: SpliceShape::AttachLeft,
                target,
                inserted,
                right: None,
            }
        } else if pos == off + pre.len {
            let next = self.next(target);
            let inserted = self.alloc(new_piece, target, next);
            Op::Insert {
                pre,
                shape: SpliceShape::AttachRight,
                target,
                inserted,
                right: None,
            }
        } else {
            let split = pos - off;
            let next = self.next(target);
            let rhs = Piece {
                buffer: pre.buffer,
                start: pre.start + split,
                len: pre.len - split,
            };
            self.nodes[target.index()].piece.len = split;
            let right = self.alloc(rhs, target, next);
            let inserted = self.alloc(new_piece, target, right);
            Op::Insert {
                pre,
                shape: SpliceShape::SplitMid,
                target,
                inserted,
                right: Some(right),
            }
        };

        self.len += len;
        Ok(op)
    }

    /// Apply the inverse of `op`.
    ///
    /// `op` must be the most recent op produced by this sequence that has not
    /// yet been reverted.
    pub(crate) fn revert(&mut self, op: &Op) {
        match *op {
            Op::Insert {
                pre,
                shape,
                target,
                inserted,
                right,
            } => {
                let inserted_len = self.nodes[inserted.index()].piece.len;
                match shape {
                    SpliceShape::SplitMid => {
                        debug_assert_eq!(self.next(target), inserted);
                        debug_assert_eq!(right.map(|id| self.prev(id)), Some(inserted));
                        self.release(inserted);
                        if let Some(right) = right {
                            self.release(right);
                        }
                        self.nodes[target.index()].piece = pre;
                    }
                    SpliceShape::AttachLeft => {
                        debug_assert_eq!(self.next(inserted), target);
                        self.release(inserted);
                    }
                    SpliceShape::AttachRight => {
                        debug_assert_eq!(self.prev(inserted), target);
                        self.release(inserted);
                    }
                }
                self.len -= inserted_len;
            }
        }
    }

    /// Concatenate every piece's span from the buffer it points into.
    #[must_use]
    pub fn materialize(&self, original: &str, appended: &str) -> String {
        let mut text = String::with_capacity(self.len);
        for entry in self.pieces() {
            let buffer = match entry.piece.buffer {
                BufferKind::Original => original,
                BufferKind::Appended => appended,
            };
            text.push_str(&buffer[entry.piece.range()]);
        }
        text
    }

    /// Check link symmetry, piece count and length bookkeeping.
    #[must_use]
    pub fn is_well_linked(&self) -> bool {
        let mut id = PieceId::SENTINEL;
        let mut seen = 0;
        let mut total = 0;
        loop {
            let next = self.next(id);
            if self.prev(next) != id {
                return false;
            }
            if next.is_sentinel() {
                break;
            }
            seen += 1;
            total += self.nodes[next.index()].piece.len;
            if seen > self.count {
                return false;
            }
            id = next;
        }
        seen == self.count && total == self.len
    }

    /// Does `pos` bind to `entry` under the splice priority rules?
    fn binds(&self, entry: &PieceEntry<'_>, pos: usize) -> bool {
        let end = entry.end();
        pos == entry.offset
            || (entry.offset < pos
                && (pos < end || (pos == end && self.next(entry.id).is_sentinel())))
    }

    #[inline]
    fn next(&self, id: PieceId) -> PieceId {
        self.nodes[id.index()].next
    }

    #[inline]
    fn prev(&self, id: PieceId) -> PieceId {
        self.nodes[id.index()].prev
    }

    /// Store `piece` in a free slot and link it between `prev` and `next`.
    fn alloc(&mut self, piece: Piece, prev: PieceId, next: PieceId) -> PieceId {
        let node = Node { piece, prev, next };
        let id = if let Some(slot) = self.free_list.pop() {
            self.nodes[slot] = node;
            PieceId(slot)
        } else {
            self.nodes.push(node);
            PieceId(self.nodes.len() - 1)
        };
        self.nodes[prev.index()].next = id;
        self.nodes[next.index()].prev = id;
        self.count += 1;
        id
    }

    /// Unlink `id`, join its neighbours and recycle the slot.
    fn release(&mut self, id: PieceId) {
        debug_assert!(!id.is_sentinel());
        let Node { prev, next, .. } = self.nodes[id.index()];
        self.nodes[prev.index()].next = next;
        self.nodes[next.index()].prev = prev;
        self.free_list.push(id.index());
        self.count -= 1;
    }

    /// Number of arena slots, including the sentinel and recycled ones.
    #[cfg(test)]
    fn slot_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORG: &str = "ABCDEF";

    fn insert(seq: &mut Sequence, appended: &mut String, pos: usize, s: &str) -> Op {
        let op = seq
            .insert(pos, s.len(), appended.len())
            .expect("insert should succeed");
        appended.push_str(s);
        op
    }

    #[test]
    fn test_new_seeds_single_piece() {
        let seq = Sequence::new(ORG.len());
        assert_eq!(seq.snapshot(), vec![Piece::original(0, 6)]);
        assert_eq!(seq.len(), 6);
        assert_eq!(seq.piece_count(), 1);
        assert!(seq.is_well_linked());
        assert_eq!(seq.materialize(ORG, ""), ORG);
    }

    #[test]
    fn test_new_empty_keeps_zero_length_seed() {
        let seq = Sequence::new(0);
        assert_eq!(seq.snapshot(), vec![Piece::original(0, 0)]);
        assert!(seq.is_empty());
        assert_eq!(seq.materialize("", ""), "");
    }

    #[test]
    fn test_pieces_reports_offsets_and_indices() {
        let mut seq = Sequence::new(ORG.len());
        let mut add = String::new();
        insert(&mut seq, &mut add, 2, "XY");

        let entries: Vec<_> = seq
            .pieces()
            .map(|e| (e.index, e.offset, *e.piece))
            .collect();
        assert_eq!(
            entries,
            vec![
                (0, 0, Piece::original(0, 2)),
                (1, 2, Piece::appended(0, 2)),
                (2, 4, Piece::original(2, 4)),
            ]
        );
        assert_eq!(seq.pieces().len(), 3);
    }

    #[test]
    fn test_pieces_early_termination() {
        let mut seq = Sequence::new(ORG.len());
        let mut add = String::new();
        insert(&mut seq, &mut add, 3, "X");
        let visited = seq.pieces().take_while(|e| e.piece.buffer == BufferKind::Original).count();
        assert_eq!(visited, 1);
    }

    #[test]
    fn test_insert_split_mid() {
        let mut seq = Sequence::new(ORG.len());
        let mut add = String::new();
        let op = insert(&mut seq, &mut add, 4, "X");

        assert_eq!(op.shape(), SpliceShape::SplitMid);
        assert_eq!(op.pre(), Piece::original(0, 6));
        assert_eq!(
            seq.snapshot(),
            vec![
                Piece::original(0, 4),
                Piece::appended(0, 1),
                Piece::original(4, 2)
            ]
        );
        assert_eq!(seq.materialize(ORG, &add), "ABCDXEF");
        assert!(seq.is_well_linked());
    }

    #[test]
    fn test_insert_boundary_binds_to_following_piece() {
        let mut seq = Sequence::new(ORG.len());
        let mut add = String::new();
        insert(&mut seq, &mut add, 2, "X");
        // 3 is both the end of "X" and the start of "CDEF".
        let op = insert(&mut seq, &mut add, 3, "Y");

        assert_eq!(op.shape(), SpliceShape::AttachLeft);
        assert_eq!(op.pre(), Piece::original(2, 4));
        assert_eq!(seq.materialize(ORG, &add), "ABXYCDEF");
    }

    #[test]
    fn test_insert_attach_right_only_at_tail() {
        let mut seq = Sequence::new(ORG.len());
        let mut add = String::new();
        let op = insert(&mut seq, &mut add, 6, "X");
        assert_eq!(op.shape(), SpliceShape::AttachRight);

        let op = insert(&mut seq, &mut add, 7, "Y");
        assert_eq!(op.shape(), SpliceShape::AttachRight);
        assert_eq!(op.pre(), Piece::appended(0, 1));
        assert_eq!(seq.materialize(ORG, &add), "ABCDEFXY");
    }

    #[test]
    fn test_insert_into_empty_seed() {
        let mut seq = Sequence::new(0);
        let mut add = String::new();
        let op = insert(&mut seq, &mut add, 0, "hi");
        assert_eq!(op.shape(), SpliceShape::AttachLeft);
        assert_eq!(
            seq.snapshot(),
            vec![Piece::appended(0, 2), Piece::original(0, 0)]
        );
        assert_eq!(seq.materialize("", &add), "hi");
    }

    #[test]
    fn test_insert_past_end_fails_untouched() {
        let mut seq = Sequence::new(ORG.len());
        let before = seq.snapshot();
        let err = seq.insert(7, 1, 0).unwrap_err();
        assert!(matches!(err, Error::PositionNotFound { pos: 7, len: 6 }));
        assert_eq!(seq.snapshot(), before);
        assert_eq!(seq.len(), 6);
        assert!(seq.is_well_linked());
    }

    #[test]
    fn test_revert_each_shape() {
        for pos in [0, 3, 6] {
            let mut seq = Sequence::new(ORG.len());
            let mut add = String::new();
            let op = insert(&mut seq, &mut add, pos, "XYZ");
            seq.revert(&op);
            assert_eq!(seq.snapshot(), vec![Piece::original(0, 6)], "pos {pos}");
            assert_eq!(seq.len(), 6);
            assert!(seq.is_well_linked());
        }
    }

    #[test]
    fn test_revert_reuses_slots() {
        let mut seq = Sequence::new(ORG.len());
        let mut add = String::new();
        let op = insert(&mut seq, &mut add, 3, "X");
        assert_eq!(seq.slot_count(), 4);
        seq.revert(&op);

        let op = insert(&mut seq, &mut add, 1, "Y");
        assert_eq!(seq.slot_count(), 4);
        match op {
            Op::Insert {
                inserted, right, ..
            } => {
                assert!(!inserted.is_sentinel());
                assert!(right.is_some_and(|id| !id.is_sentinel()));
            }
        }
        assert_eq!(seq.materialize(ORG, &add), "AYBCDEF");
    }

    #[test]
    fn test_locate() {
        let mut seq = Sequence::new(ORG.len());
        let mut add = String::new();
        insert(&mut seq, &mut add, 2, "XY");
        assert_eq!(seq.locate(0), Some((Piece::original(0, 2), 0)));
        assert_eq!(seq.locate(3), Some((Piece::appended(0, 2), 1)));
        assert_eq!(seq.locate(4), Some((Piece::original(2, 4), 0)));
        assert_eq!(seq.locate(8), None);
    }
}
