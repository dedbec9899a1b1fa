//! Pluggable allocation and construction policies.
//!
//! A [`SlotStrategy`] supplies the raw storage behind a [`FixVec`](crate::FixVec)
//! and the hooks that build and tear down individual elements inside it.
//! [`HeapStrategy`] is the default and uses the global allocator.

use alloc::alloc::{alloc, dealloc, Layout};
use core::ptr::{self, NonNull};

use crate::error::FixVecError;

/// Whether copy, move and swap of a container also carry the strategy along.
///
/// The flags are plain runtime values so that one strategy type can be
/// configured differently per instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Propagation {
    /// Copy assignment adopts the source's strategy when the two differ
    pub on_copy: bool,
    /// Move assignment adopts the source's strategy when the two differ
    pub on_move: bool,
    /// Swap exchanges strategies together with the storage
    pub on_swap: bool,
}

impl Propagation {
    /// Never propagate.
    pub const NONE: Self = Self {
        on_copy: false,
        on_move: false,
        on_swap: false,
    };

    /// Propagate on copy, move and swap.
    pub const ALL: Self = Self {
        on_copy: true,
        on_move: true,
        on_swap: true,
    };
}

/// Allocation and construction policy for the elements of a `FixVec`.
///
/// Two strategies compare equal when memory allocated through one of them can
/// be released through the other. Clones must compare equal to the original,
/// and `clone` must not panic: move construction clones the strategy and is
/// infallible.
///
/// # Safety
///
/// Implementors must return from [`allocate`](Self::allocate) a pointer that is
/// valid for reads and writes of `capacity` values of `T`, properly aligned,
/// and that stays valid until it is handed back to
/// [`deallocate`](Self::deallocate) on this strategy or one equal to it.
/// [`construct`](Self::construct) must leave a fully initialised `T` in the
/// slot and [`destroy`](Self::destroy) must leave it logically uninitialised.
pub unsafe trait SlotStrategy<T>: Clone + PartialEq {
    /// Obtains uninitialised storage for `capacity` elements.
    ///
    /// Only called with `capacity > 0`.
    ///
    /// # Errors
    ///
    /// Returns `FixVecError::OutOfMemory` or `FixVecError::CapacityOverflow`
    /// when the storage cannot be provided.
    fn allocate(&mut self, capacity: usize) -> Result<NonNull<T>, FixVecError>;

    /// Releases storage previously returned by `allocate`.
    ///
    /// # Safety
    ///
    /// `ptr` must come from `allocate(capacity)` on this strategy or one that
    /// compares equal, and every slot in it must already be uninitialised.
    unsafe fn deallocate(&mut self, ptr: NonNull<T>, capacity: usize);

    /// Places `value` into the raw slot.
    ///
    /// # Safety
    ///
    /// `slot` must point to an uninitialised slot of storage obtained from
    /// this strategy.
    unsafe fn construct(&mut self, slot: NonNull<T>, value: T) {
        // SAFETY: the caller guarantees `slot` is valid for writes and raw
        unsafe { slot.as_ptr().write(value) }
    }

    /// Runs the destructor of the element in `slot`.
    ///
    /// # Safety
    ///
    /// `slot` must hold a live element; it is raw memory afterwards.
    unsafe fn destroy(&mut self, slot: NonNull<T>) {
        // SAFETY: the caller guarantees `slot` holds a live `T`
        unsafe { ptr::drop_in_place(slot.as_ptr()) }
    }

    /// Propagation policy for copy, move and swap.
    fn propagation(&self) -> Propagation {
        Propagation::NONE
    }

    /// Strategy handed to a container created by copy construction.
    #[must_use]
    fn select_on_copy(&self) -> Self {
        self.clone()
    }

    /// Largest capacity this strategy can serve.
    fn max_size(&self) -> usize {
        match core::mem::size_of::<T>() {
            0 => usize::MAX,
            size => isize::MAX as usize / size,
        }
    }
}

/// Default strategy: the global heap allocator and the element type's own
/// construction and destruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeapStrategy;

// SAFETY: storage comes straight from the global allocator with the layout of
// `[T; capacity]` and is returned with the same layout.
unsafe impl<T> SlotStrategy<T> for HeapStrategy {
    fn allocate(&mut self, capacity: usize) -> Result<NonNull<T>, FixVecError> {
        let layout =
            Layout::array::<T>(capacity).map_err(|_| FixVecError::CapacityOverflow { capacity })?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }

        // SAFETY: the layout has non-zero size
        let raw = unsafe { alloc(layout) };
        NonNull::new(raw.cast::<T>()).ok_or(FixVecError::OutOfMemory { capacity })
    }

    unsafe fn deallocate(&mut self, ptr: NonNull<T>, capacity: usize) {
        let Ok(layout) = Layout::array::<T>(capacity) else {
            return;
        };
        if layout.size() == 0 {
            return;
        }
        // SAFETY: `ptr` was produced by `allocate` with this same layout
        unsafe { dealloc(ptr.as_ptr().cast::<u8>(), layout) }
    }
}
