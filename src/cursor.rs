//! Positions that notice when they have been invalidated.
//!
//! A [`Cursor`] records an index together with the container's generation at
//! the time it was taken. Any structural change (length, capacity or buffer)
//! advances the generation, after which the cursor no longer resolves.
//! Writing through `iter_mut` or indexing is not structural and keeps cursors
//! valid.

use crate::core::FixVec;
use crate::strategy::SlotStrategy;

/// An index into a `FixVec` tagged with the generation it was taken at.
///
/// A cursor is only meaningful for the container that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    generation: u64,
}

impl Cursor {
    /// Position this cursor was taken at.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T, S: SlotStrategy<T>> FixVec<T, S> {
    /// Takes a cursor at `index`. `index == len` denotes the end position.
    ///
    /// Returns `None` if `index > len`.
    #[must_use]
    pub fn cursor(&self, index: usize) -> Option<Cursor> {
        if index > self.len() {
            return None;
        }
        Some(Cursor {
            index,
            generation: self.generation,
        })
    }

    /// Cursor at the end position.
    #[must_use]
    pub fn cursor_end(&self) -> Cursor {
        Cursor {
            index: self.len(),
            generation: self.generation,
        }
    }

    /// Returns the cursor's index if nothing structural happened since it was
    /// taken.
    #[must_use]
    pub fn resolve(&self, cursor: Cursor) -> Option<usize> {
        if cursor.generation != self.generation || cursor.index > self.len() {
            return None;
        }
        Some(cursor.index)
    }

    #[must_use]
    pub fn is_valid(&self, cursor: Cursor) -> bool {
        self.resolve(cursor).is_some()
    }

    /// Element under a still-valid cursor. The end cursor has no element.
    #[must_use]
    pub fn get_at(&self, cursor: Cursor) -> Option<&T> {
        self.resolve(cursor).and_then(|index| self.as_slice().get(index))
    }

    pub fn get_at_mut(&mut self, cursor: Cursor) -> Option<&mut T> {
        let index = self.resolve(cursor)?;
        self.as_mut_slice().get_mut(index)
    }
}
