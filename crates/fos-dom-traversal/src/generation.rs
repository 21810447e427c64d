//! Child-list generations
//!
//! Every node carries a stamp for its child list. The tree advances it on
//! each structural mutation of that list and on nothing else, so anything
//! derived from the children can remember the stamp it was computed at and
//! compare for equality on the next read.

/// Child-list version stamp.
///
/// 64 bits wide: a node would need 2^64 mutations between two reads of a
/// cached view before a stale stamp could compare equal again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Generation(u64);

impl Generation {
    /// Stamp of a child list that was never mutated
    pub const INITIAL: Self = Generation(0);

    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Stamp after one more mutation
    #[inline]
    pub const fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }
}

/// Something whose child list is stamped
pub trait Versioned {
    fn generation(&self) -> Generation;

    /// Record a structural mutation, returning the new stamp
    fn bump_generation(&mut self) -> Generation;

    /// True if no mutation happened since `seen` was read
    fn is_unchanged_since(&self, seen: Generation) -> bool {
        self.generation() == seen
    }
}
