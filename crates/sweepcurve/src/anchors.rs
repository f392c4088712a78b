//! The ordered anchor sequence a sweep is fitted through.

use std::ops::Deref;

use smallvec::SmallVec;

use crate::point::BlockPos;

/// Ordered anchors clicked by the user.
///
/// Insertion order is significant. Pushing the same position twice in a row
/// is rejected, since a repeated activation at the last anchor means
/// "confirm", not "add".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnchorSequence(SmallVec<[BlockPos; 8]>);

impl AnchorSequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `pos` unless it repeats the last anchor.
    ///
    /// Returns `true` when the anchor was accepted.
    pub fn push(&mut self, pos: BlockPos) -> bool {
        if self.0.last() == Some(&pos) {
            return false;
        }
        self.0.push(pos);
        true
    }

    /// The most recently accepted anchor.
    pub fn last(&self) -> Option<BlockPos> {
        self.0.last().copied()
    }

    /// Remove every anchor.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Anchors as a slice, in insertion order.
    pub fn as_slice(&self) -> &[BlockPos] {
        &self.0
    }
}

impl Deref for AnchorSequence {
    type Target = [BlockPos];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<BlockPos> for AnchorSequence {
    fn from_iter<I: IntoIterator<Item = BlockPos>>(iter: I) -> Self {
        let mut seq = Self::new();
        for pos in iter {
            seq.push(pos);
        }
        seq
    }
}
