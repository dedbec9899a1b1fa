use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::{FusedIterator, Rev};
use core::ptr;
use core::slice;

use crate::core::FixVec;
use crate::strategy::{HeapStrategy, SlotStrategy};

impl<T, S: SlotStrategy<T>> FixVec<T, S> {
    /// Returns an iterator over the live elements, front to back.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns an iterator over the live elements, back to front.
    pub fn iter_rev(&self) -> Rev<slice::Iter<'_, T>> {
        self.as_slice().iter().rev()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }
}

impl<'a, T, S: SlotStrategy<T>> IntoIterator for &'a FixVec<T, S> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, S: SlotStrategy<T>> IntoIterator for &'a mut FixVec<T, S> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, S: SlotStrategy<T>> IntoIterator for FixVec<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T, S>;

    fn into_iter(mut self) -> Self::IntoIter {
        let back = self.len;
        // the iterator owns the elements; the container only keeps the buffer
        self.set_len(0);
        IntoIter {
            vec: self,
            front: 0,
            back,
        }
    }
}

/// Owning iterator over the elements of a `FixVec`.
///
/// Elements that are never yielded are destroyed through the strategy when
/// the iterator is dropped, and the buffer is released afterwards.
pub struct IntoIter<T, S: SlotStrategy<T> = HeapStrategy> {
    vec: FixVec<T, S>,
    front: usize,
    back: usize,
}

impl<T, S: SlotStrategy<T>> IntoIter<T, S> {
    /// The elements not yet yielded.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        if self.front == self.back {
            return &[];
        }
        // SAFETY: `[front, back)` is still live and inside the buffer
        unsafe { slice::from_raw_parts(self.vec.slot(self.front).as_ptr(), self.back - self.front) }
    }
}

impl<T, S: SlotStrategy<T>> Iterator for IntoIter<T, S> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        let offset = self.front;
        self.front += 1;
        // SAFETY: `offset` was live and leaves the owned range before the read
        Some(unsafe { ptr::read(self.vec.slot(offset).as_ptr()) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T, S: SlotStrategy<T>> DoubleEndedIterator for IntoIter<T, S> {
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // SAFETY: as in `next`
        Some(unsafe { ptr::read(self.vec.slot(self.back).as_ptr()) })
    }
}

impl<T, S: SlotStrategy<T>> ExactSizeIterator for IntoIter<T, S> {}

impl<T, S: SlotStrategy<T>> FusedIterator for IntoIter<T, S> {}

impl<T, S: SlotStrategy<T>> Drop for IntoIter<T, S> {
    fn drop(&mut self) {
        while self.front < self.back {
            let offset = self.front;
            self.front += 1;
            // SAFETY: `offset` is live and no longer part of the owned range
            unsafe { self.vec.destroy_at(offset) };
        }
        // `vec` releases the buffer when it drops
    }
}

impl<T: fmt::Debug, S: SlotStrategy<T>> fmt::Debug for IntoIter<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T: fmt::Debug, S: SlotStrategy<T>> fmt::Debug for FixVec<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, U, S1, S2> PartialEq<FixVec<U, S2>> for FixVec<T, S1>
where
    T: PartialEq<U>,
    S1: SlotStrategy<T>,
    S2: SlotStrategy<U>,
{
    fn eq(&self, other: &FixVec<U, S2>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq<U>, U, S: SlotStrategy<T>> PartialEq<[U]> for FixVec<T, S> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U, S: SlotStrategy<T>> PartialEq<&[U]> for FixVec<T, S> {
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq<U>, U, S: SlotStrategy<T>, const N: usize> PartialEq<[U; N]> for FixVec<T, S> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, S: SlotStrategy<T>> Eq for FixVec<T, S> {}

impl<T: Hash, S: SlotStrategy<T>> Hash for FixVec<T, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}
