use core::marker::PhantomData;
use core::mem;
use core::ops::{Deref, DerefMut};
use core::ptr::{self, NonNull};
use core::slice;

use log::{debug, trace};

use crate::error::FixVecError;
use crate::rotate::{rotate_left, rotate_right};
use crate::strategy::{HeapStrategy, SlotStrategy};

/// A vector whose capacity is fixed at construction and backed by a single
/// allocation that is never grown or shrunk.
///
/// Offsets `[0, len)` hold live elements, offsets `[len, capacity)` are raw
/// memory. Running out of room is reported as
/// [`FixVecError::CapacityExceeded`] instead of reallocating.
pub struct FixVec<T, S: SlotStrategy<T> = HeapStrategy> {
    /// `None` exactly when `capacity == 0`.
    pub(crate) buffer: Option<NonNull<T>>,
    pub(crate) len: usize,
    pub(crate) capacity: usize,
    pub(crate) strategy: S,
    /// Bumped whenever `len`, `capacity` or the buffer changes.
    pub(crate) generation: u64,
    _marker: PhantomData<T>,
}

// SAFETY: a `FixVec` exclusively owns its elements and its buffer, like `Vec`.
unsafe impl<T: Send, S: SlotStrategy<T> + Send> Send for FixVec<T, S> {}
// SAFETY: shared access only hands out `&T` and `&S`.
unsafe impl<T: Sync, S: SlotStrategy<T> + Sync> Sync for FixVec<T, S> {}

impl<T> FixVec<T> {
    /// Creates an empty `FixVec` with room for exactly `capacity` elements,
    /// allocated on the global heap.
    ///
    /// # Errors
    ///
    /// Returns `FixVecError::OutOfMemory` if the allocation fails, or
    /// `FixVecError::CapacityOverflow` if `capacity` elements do not fit in
    /// the address space.
    pub fn new(capacity: usize) -> Result<Self, FixVecError> {
        Self::with_strategy(capacity, HeapStrategy)
    }

    /// Creates a `FixVec` with the given capacity holding clones of `values`.
    ///
    /// # Errors
    ///
    /// Returns `FixVecError::CapacityExceeded` if `values` is longer than
    /// `capacity`, or an allocation error from the strategy.
    pub fn from_slice(capacity: usize, values: &[T]) -> Result<Self, FixVecError>
    where
        T: Clone,
    {
        Self::from_slice_in(capacity, values, HeapStrategy)
    }
}

impl<T, S: SlotStrategy<T>> FixVec<T, S> {
    /// Creates an empty `FixVec` that obtains its storage from `strategy`.
    ///
    /// A capacity of zero never calls the strategy.
    ///
    /// # Errors
    ///
    /// Returns whatever allocation error the strategy reports.
    pub fn with_strategy(capacity: usize, strategy: S) -> Result<Self, FixVecError> {
        let mut vec = Self::unallocated(strategy);
        vec.allocate_buffer(capacity)?;
        Ok(vec)
    }

    /// Creates a `FixVec` with the given capacity and strategy holding clones
    /// of `values`.
    ///
    /// # Errors
    ///
    /// Returns `FixVecError::CapacityExceeded` if `values` is longer than
    /// `capacity` (nothing is allocated in that case), or an allocation error
    /// from the strategy.
    pub fn from_slice_in(capacity: usize, values: &[T], strategy: S) -> Result<Self, FixVecError>
    where
        T: Clone,
    {
        if values.len() > capacity {
            return Err(FixVecError::CapacityExceeded {
                requested: values.len(),
                capacity,
            });
        }

        let mut vec = Self::with_strategy(capacity, strategy)?;
        vec.extend_cloned(values)?;
        Ok(vec)
    }

    pub(crate) fn unallocated(strategy: S) -> Self {
        Self {
            buffer: None,
            len: 0,
            capacity: 0,
            strategy,
            generation: 0,
            _marker: PhantomData,
        }
    }

    // ---------------------------------------------------------------------
    // Storage manager
    // ---------------------------------------------------------------------

    /// Obtains the single buffer for `capacity` elements.
    pub(crate) fn allocate_buffer(&mut self, capacity: usize) -> Result<(), FixVecError> {
        debug_assert!(self.buffer.is_none(), "buffer allocated twice");
        debug_assert_eq!(self.capacity, 0);

        if capacity > 0 {
            let ptr = self.strategy.allocate(capacity).map_err(|err| {
                debug!("allocation of {} elements failed: {}", capacity, err);
                err
            })?;
            trace!("allocated storage for {} elements", capacity);
            self.buffer = Some(ptr);
        }
        self.capacity = capacity;
        self.touch();
        Ok(())
    }

    /// Frees the buffer. Every element must already be destroyed.
    pub(crate) fn release(&mut self) {
        debug_assert_eq!(self.len, 0, "release() with live elements");

        if let Some(ptr) = self.buffer.take() {
            // SAFETY: `ptr` came from `allocate(self.capacity)` on this
            // strategy (or an equal one) and no slot is live
            unsafe { self.strategy.deallocate(ptr, self.capacity) };
            trace!("released storage for {} elements", self.capacity);
        }
        self.capacity = 0;
        self.touch();
    }

    pub(crate) fn touch(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    pub(crate) fn set_len(&mut self, len: usize) {
        debug_assert!(len <= self.capacity);
        self.len = len;
        self.touch();
    }

    // ---------------------------------------------------------------------
    // Element lifecycle primitives
    // ---------------------------------------------------------------------

    /// # Safety
    ///
    /// `offset < capacity`.
    pub(crate) unsafe fn slot(&self, offset: usize) -> NonNull<T> {
        debug_assert!(
            offset < self.capacity,
            "slot {} outside capacity {}",
            offset,
            self.capacity
        );
        // SAFETY: the caller keeps `offset` inside the allocation
        unsafe { self.base().add(offset) }
    }

    /// # Safety
    ///
    /// `offset` must be in the raw region `[len, capacity)`.
    pub(crate) unsafe fn construct_at(&mut self, offset: usize, value: T) {
        debug_assert!(offset >= self.len, "construct_at on a live slot");
        // SAFETY: forwarded from the caller
        unsafe {
            let slot = self.slot(offset);
            self.strategy.construct(slot, value);
        }
    }

    /// # Safety
    ///
    /// `offset` must hold a live element that is no longer counted in `len`.
    pub(crate) unsafe fn destroy_at(&mut self, offset: usize) {
        if mem::needs_drop::<T>() {
            // SAFETY: forwarded from the caller
            unsafe {
                let slot = self.slot(offset);
                self.strategy.destroy(slot);
            }
        }
    }

    /// Moves the last element out. The container must not be empty.
    unsafe fn take_last(&mut self) -> T {
        self.set_len(self.len - 1);
        // SAFETY: the slot at the old `len - 1` was live and is now excluded
        // from the live range, so it is read exactly once
        unsafe { ptr::read(self.slot(self.len).as_ptr()) }
    }

    fn ensure_room(&self, additional: usize) -> Result<(), FixVecError> {
        let requested = self.len.saturating_add(additional);
        if requested > self.capacity {
            return Err(FixVecError::CapacityExceeded {
                requested,
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no live elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Fixed maximum number of live elements.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of elements that can still be added.
    #[must_use]
    pub fn remaining_capacity(&self) -> usize {
        self.capacity - self.len
    }

    /// Returns `true` if `len == capacity`.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    /// Largest capacity the strategy could serve.
    #[must_use]
    pub fn max_size(&self) -> usize {
        self.strategy.max_size()
    }

    /// The allocation strategy owned by this container.
    #[must_use]
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Pointer to the first slot, dangling when the capacity is zero.
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.base().as_ptr().cast_const()
    }

    /// Mutable pointer to the first slot, dangling when the capacity is zero.
    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.base().as_ptr()
    }

    fn base(&self) -> NonNull<T> {
        self.buffer.unwrap_or(NonNull::dangling())
    }

    /// The live elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[0, len)` is live and the pointer is aligned and non-null
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    /// The live elements as a mutable slice.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as above, and `&mut self` guarantees exclusivity
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    /// First element.
    ///
    /// # Panics
    ///
    /// Calling this on an empty container is a contract violation; it is
    /// debug-asserted and panics in release builds as well.
    #[must_use]
    pub fn front(&self) -> &T {
        debug_assert!(!self.is_empty(), "front() called on empty FixVec");
        &self.as_slice()[0]
    }

    /// # Panics
    ///
    /// Panics if the container is empty.
    pub fn front_mut(&mut self) -> &mut T {
        debug_assert!(!self.is_empty(), "front_mut() called on empty FixVec");
        &mut self.as_mut_slice()[0]
    }

    /// Last element.
    ///
    /// # Panics
    ///
    /// Panics if the container is empty.
    #[must_use]
    pub fn back(&self) -> &T {
        debug_assert!(!self.is_empty(), "back() called on empty FixVec");
        &self.as_slice()[self.len - 1]
    }

    /// # Panics
    ///
    /// Panics if the container is empty.
    pub fn back_mut(&mut self) -> &mut T {
        debug_assert!(!self.is_empty(), "back_mut() called on empty FixVec");
        let last = self.len - 1;
        &mut self.as_mut_slice()[last]
    }

    // ---------------------------------------------------------------------
    // Mutating sequence operations
    // ---------------------------------------------------------------------

    /// Appends `value`.
    ///
    /// # Errors
    ///
    /// Returns `FixVecError::CapacityExceeded` if the container is full; the
    /// container is unchanged and `value` is dropped.
    pub fn push(&mut self, value: T) -> Result<(), FixVecError> {
        self.push_with(|| value)
    }

    /// Appends the value produced by `make`.
    ///
    /// `make` is only called when there is room. If it panics the container
    /// is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns `FixVecError::CapacityExceeded` if the container is full.
    pub fn push_with<F>(&mut self, make: F) -> Result<(), FixVecError>
    where
        F: FnOnce() -> T,
    {
        self.ensure_room(1)?;

        let value = make();
        // SAFETY: len < capacity, so the slot at `len` is raw
        unsafe { self.construct_at(self.len, value) };
        // only count the element once it exists
        self.set_len(self.len + 1);
        Ok(())
    }

    /// Destroys the last element.
    ///
    /// Calling this on an empty container is a contract violation: it is
    /// debug-asserted and otherwise does nothing.
    pub fn pop_back(&mut self) {
        debug_assert!(!self.is_empty(), "pop_back() called on empty FixVec");
        if self.len == 0 {
            return;
        }

        // shrink first so a panicking destructor cannot leave the slot counted
        self.set_len(self.len - 1);
        // SAFETY: the slot was live and is no longer counted
        unsafe { self.destroy_at(self.len) };
    }

    /// Removes the last element and returns it, or `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: non-empty
        Some(unsafe { self.take_last() })
    }

    /// Destroys trailing elements until at most `len` remain.
    pub fn truncate(&mut self, len: usize) {
        if !mem::needs_drop::<T>() {
            if len < self.len {
                self.set_len(len);
            }
            return;
        }
        while self.len > len {
            self.pop_back();
        }
    }

    /// Resizes to `new_len`, filling new slots with clones of `value`.
    ///
    /// If a clone panics while growing, the elements constructed so far are
    /// kept: the length ends up between the old and the requested one.
    ///
    /// # Errors
    ///
    /// Returns `FixVecError::CapacityExceeded` if `new_len > capacity`; the
    /// container is unchanged.
    pub fn resize(&mut self, new_len: usize, value: T) -> Result<(), FixVecError>
    where
        T: Clone,
    {
        self.check_len(new_len)?;
        self.truncate(new_len);

        if self.len < new_len {
            while self.len + 1 < new_len {
                self.push_with(|| value.clone())?;
            }
            self.push(value)?;
        }
        Ok(())
    }

    /// Resizes to `new_len`, filling new slots with `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns `FixVecError::CapacityExceeded` if `new_len > capacity`; the
    /// container is unchanged.
    pub fn resize_default(&mut self, new_len: usize) -> Result<(), FixVecError>
    where
        T: Default,
    {
        self.check_len(new_len)?;
        self.truncate(new_len);

        while self.len < new_len {
            self.push_with(T::default)?;
        }
        Ok(())
    }

    fn check_len(&self, new_len: usize) -> Result<(), FixVecError> {
        if new_len > self.capacity {
            return Err(FixVecError::CapacityExceeded {
                requested: new_len,
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    /// Inserts `value` at `index`, shifting later elements right, and returns
    /// the index of the inserted element.
    ///
    /// # Errors
    ///
    /// Returns `FixVecError::CapacityExceeded` if the container is full.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<usize, FixVecError> {
        self.ensure_room(1)?;
        assert!(
            index <= self.len,
            "insert position {} out of range for FixVec of length {}",
            index,
            self.len
        );

        self.push(value)?;
        rotate_right(&mut self.as_mut_slice()[index..], 1);
        Ok(index)
    }

    /// Destroys the element at `index`, shifting later elements left, and
    /// returns the index of the element that followed it.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn erase(&mut self, index: usize) -> usize {
        self.check_position(index);

        rotate_left(&mut self.as_mut_slice()[index..], 1);
        self.pop_back();
        index
    }

    /// Removes the element at `index` and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        self.check_position(index);

        rotate_left(&mut self.as_mut_slice()[index..], 1);
        // SAFETY: `index < len` so the container is non-empty
        unsafe { self.take_last() }
    }

    fn check_position(&self, index: usize) {
        assert!(
            index < self.len,
            "position {} out of range for FixVec of length {}",
            index,
            self.len
        );
    }

    /// Destroys every element. Capacity and buffer are kept.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Appends clones of `values`, one at a time.
    pub(crate) fn extend_cloned(&mut self, values: &[T]) -> Result<(), FixVecError>
    where
        T: Clone,
    {
        for value in values {
            self.push_with(|| value.clone())?;
        }
        Ok(())
    }
}

impl<T, S: SlotStrategy<T> + Default> Default for FixVec<T, S> {
    /// A zero-capacity container; nothing is allocated.
    fn default() -> Self {
        Self::unallocated(S::default())
    }
}

impl<T, S: SlotStrategy<T>> Drop for FixVec<T, S> {
    fn drop(&mut self) {
        self.clear();
        self.release();
    }
}

impl<T, S: SlotStrategy<T>> Deref for FixVec<T, S> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, S: SlotStrategy<T>> DerefMut for FixVec<T, S> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}
