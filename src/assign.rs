use alloc::alloc::{handle_alloc_error, Layout};
use core::mem;
use core::ptr;

use crate::core::FixVec;
use crate::error::FixVecError;
use crate::strategy::SlotStrategy;

impl<T, S: SlotStrategy<T>> FixVec<T, S> {
    /// Copy construction: a new buffer of the same capacity holding clones of
    /// the live elements, using the strategy chosen by
    /// [`SlotStrategy::select_on_copy`].
    ///
    /// # Errors
    ///
    /// Returns the allocation error reported by the strategy.
    pub fn try_clone(&self) -> Result<Self, FixVecError>
    where
        T: Clone,
    {
        let mut copy = Self::with_strategy(self.capacity, self.strategy.select_on_copy())?;
        copy.extend_cloned(self.as_slice())?;
        Ok(copy)
    }

    /// Copy assignment.
    ///
    /// Storage is discarded and reallocated with the source's capacity when
    /// the capacities differ, or when the strategy asks to propagate on copy
    /// and the two strategies differ (the source's strategy is adopted in that
    /// case). Then the overlapping prefix is assigned element by element and
    /// the tail is either destroyed or cloned in. A panic from `T::clone` or
    /// `T::clone_from` leaves the already-assigned prefix in place.
    ///
    /// # Errors
    ///
    /// Returns the allocation error reported by the strategy; the container
    /// is then empty with zero capacity.
    pub fn try_clone_from(&mut self, source: &Self) -> Result<(), FixVecError>
    where
        T: Clone,
    {
        if self.strategy.propagation().on_copy && self.strategy != source.strategy {
            self.discard_storage();
            self.strategy = source.strategy.clone();
            self.allocate_buffer(source.capacity)?;
        } else if self.capacity != source.capacity {
            self.discard_storage();
            self.allocate_buffer(source.capacity)?;
        }

        self.reconcile(source.as_slice())
    }

    /// Replaces the contents with clones of `values`. The capacity never
    /// changes.
    ///
    /// If a clone panics partway, the elements assigned or constructed so far
    /// are kept.
    ///
    /// # Errors
    ///
    /// Returns `FixVecError::CapacityExceeded` if `values` is longer than the
    /// capacity; the container is unchanged.
    pub fn assign_slice(&mut self, values: &[T]) -> Result<(), FixVecError>
    where
        T: Clone,
    {
        if values.len() > self.capacity {
            return Err(FixVecError::CapacityExceeded {
                requested: values.len(),
                capacity: self.capacity,
            });
        }

        self.reconcile(values)
    }

    /// Move construction: transfers the buffer, length and capacity into a
    /// new container in constant time. `self` is left with zero length and
    /// zero capacity. The strategy is cloned so both sides keep one.
    #[must_use]
    pub fn take(&mut self) -> Self {
        let mut taken = Self::unallocated(self.strategy.clone());
        taken.swap_state(self);
        taken
    }

    /// Move assignment: destroys the current elements, releases the current
    /// buffer and takes over `source`'s storage. `source` ends with zero
    /// length and zero capacity.
    ///
    /// The source's strategy is adopted when the strategy asks to propagate on
    /// move. If the strategies still differ afterwards, the buffer cannot
    /// change hands; a buffer of the same capacity is allocated here and the
    /// elements are moved over one by one.
    pub fn assign_take(&mut self, source: &mut Self) {
        self.discard_storage();

        if self.strategy.propagation().on_move && self.strategy != source.strategy {
            self.strategy = source.strategy.clone();
        }

        if self.strategy == source.strategy {
            self.swap_state(source);
        } else {
            self.relocate_from(source);
        }
    }

    /// Exchanges contents with `other` in constant time.
    ///
    /// Strategies are exchanged when the strategy asks to propagate on swap,
    /// and also whenever they differ, since each buffer must stay with a
    /// strategy able to release it.
    pub fn swap(&mut self, other: &mut Self) {
        if self.strategy.propagation().on_swap || self.strategy != other.strategy {
            mem::swap(&mut self.strategy, &mut other.strategy);
        }
        self.swap_state(other);
    }

    fn swap_state(&mut self, other: &mut Self) {
        mem::swap(&mut self.buffer, &mut other.buffer);
        mem::swap(&mut self.len, &mut other.len);
        mem::swap(&mut self.capacity, &mut other.capacity);
        self.touch();
        other.touch();
    }

    fn discard_storage(&mut self) {
        self.clear();
        self.release();
    }

    fn relocate_from(&mut self, source: &mut Self) {
        if let Err(err) = self.allocate_buffer(source.capacity) {
            allocation_failure::<T>(err);
        }

        let count = source.len;
        // the loop owns the elements from here on
        source.set_len(0);
        for offset in 0..count {
            // SAFETY: `offset` was live in `source` and is read exactly once;
            // it is raw in `self` because `self.len == offset`
            unsafe {
                let value = ptr::read(source.slot(offset).as_ptr());
                self.construct_at(offset, value);
            }
            self.set_len(offset + 1);
        }
        source.release();
    }

    /// Overlap-then-grow-or-shrink reconciliation shared by copy and slice
    /// assignment. The caller guarantees `values.len() <= capacity`.
    fn reconcile(&mut self, values: &[T]) -> Result<(), FixVecError>
    where
        T: Clone,
    {
        if values.len() <= self.len {
            self.truncate(values.len());
            for (dst, src) in self.as_mut_slice().iter_mut().zip(values) {
                dst.clone_from(src);
            }
            self.touch();
            Ok(())
        } else {
            let (overlap, rest) = values.split_at(self.len);
            for (dst, src) in self.as_mut_slice().iter_mut().zip(overlap) {
                dst.clone_from(src);
            }
            self.touch();
            self.extend_cloned(rest)
        }
    }
}

impl<T: Clone, S: SlotStrategy<T>> Clone for FixVec<T, S> {
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(copy) => copy,
            Err(err) => allocation_failure::<T>(err),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        if let Err(err) = self.try_clone_from(source) {
            allocation_failure::<T>(err);
        }
    }
}

/// Reports a failed allocation from an infallible entry point the way the
/// standard collections do.
fn allocation_failure<T>(err: FixVecError) -> ! {
    if let FixVecError::OutOfMemory { capacity } = err {
        if let Ok(layout) = Layout::array::<T>(capacity) {
            handle_alloc_error(layout);
        }
    }
    panic!("{}", err)
}
