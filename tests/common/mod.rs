#![allow(dead_code)]

use std::alloc::{alloc, dealloc, Layout};
use std::cell::{Cell, RefCell};
use std::ptr::{self, NonNull};
use std::rc::Rc;

use fixvec::{FixVecError, Propagation, SlotStrategy};

/// Call counts recorded by a `TrackingStrategy` and all of its clones.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    pub allocations: usize,
    pub deallocations: usize,
    pub constructs: usize,
    pub destroys: usize,
    pub allocated_slots: usize,
}

impl Stats {
    pub fn live_allocations(&self) -> usize {
        self.allocations - self.deallocations
    }
}

/// Heap strategy that counts every hook call. Strategies with the same `pool`
/// id compare equal and share their stats.
#[derive(Debug, Clone)]
pub struct TrackingStrategy {
    pub pool: u32,
    pub propagation: Propagation,
    pub stats: Rc<RefCell<Stats>>,
    pub fail_allocation: bool,
}

impl TrackingStrategy {
    pub fn new(pool: u32) -> Self {
        Self::with_propagation(pool, Propagation::NONE)
    }

    pub fn with_propagation(pool: u32, propagation: Propagation) -> Self {
        Self {
            pool,
            propagation,
            stats: Rc::new(RefCell::new(Stats::default())),
            fail_allocation: false,
        }
    }

    pub fn failing(pool: u32) -> Self {
        Self {
            fail_allocation: true,
            ..Self::new(pool)
        }
    }

    pub fn stats(&self) -> Stats {
        self.stats.borrow().clone()
    }
}

impl PartialEq for TrackingStrategy {
    fn eq(&self, other: &Self) -> bool {
        self.pool == other.pool
    }
}

unsafe impl<T> SlotStrategy<T> for TrackingStrategy {
    fn allocate(&mut self, capacity: usize) -> Result<NonNull<T>, FixVecError> {
        if self.fail_allocation {
            return Err(FixVecError::OutOfMemory { capacity });
        }
        let layout =
            Layout::array::<T>(capacity).map_err(|_| FixVecError::CapacityOverflow { capacity })?;
        let ptr = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            NonNull::new(unsafe { alloc(layout) }.cast::<T>())
                .ok_or(FixVecError::OutOfMemory { capacity })?
        };

        let mut stats = self.stats.borrow_mut();
        stats.allocations += 1;
        stats.allocated_slots += capacity;
        Ok(ptr)
    }

    unsafe fn deallocate(&mut self, ptr: NonNull<T>, capacity: usize) {
        let layout = Layout::array::<T>(capacity).unwrap();
        if layout.size() != 0 {
            unsafe { dealloc(ptr.as_ptr().cast::<u8>(), layout) };
        }
        self.stats.borrow_mut().deallocations += 1;
    }

    unsafe fn construct(&mut self, slot: NonNull<T>, value: T) {
        unsafe { slot.as_ptr().write(value) };
        self.stats.borrow_mut().constructs += 1;
    }

    unsafe fn destroy(&mut self, slot: NonNull<T>) {
        unsafe { ptr::drop_in_place(slot.as_ptr()) };
        self.stats.borrow_mut().destroys += 1;
    }

    fn propagation(&self) -> Propagation {
        self.propagation
    }
}

thread_local! {
    static LIVE_PROBES: Cell<isize> = const { Cell::new(0) };
    static CLONE_BUDGET: Cell<Option<usize>> = const { Cell::new(None) };
    static DEFAULT_BUDGET: Cell<Option<usize>> = const { Cell::new(None) };
}

/// Element type that tracks live instances on the current thread and can be
/// told to panic after a number of successful clones or defaults.
#[derive(Debug, PartialEq, Eq)]
pub struct Probe(pub u32);

impl Probe {
    pub fn new(value: u32) -> Self {
        LIVE_PROBES.with(|live| live.set(live.get() + 1));
        Probe(value)
    }
}

impl Clone for Probe {
    fn clone(&self) -> Self {
        CLONE_BUDGET.with(|budget| match budget.get() {
            Some(0) => panic!("clone budget exhausted"),
            Some(n) => budget.set(Some(n - 1)),
            None => {}
        });
        Probe::new(self.0)
    }
}

impl Drop for Probe {
    fn drop(&mut self) {
        LIVE_PROBES.with(|live| live.set(live.get() - 1));
    }
}

impl Default for Probe {
    fn default() -> Self {
        DEFAULT_BUDGET.with(|budget| match budget.get() {
            Some(0) => panic!("default budget exhausted"),
            Some(n) => budget.set(Some(n - 1)),
            None => {}
        });
        Probe::new(0)
    }
}

pub fn live_probes() -> isize {
    LIVE_PROBES.with(Cell::get)
}

/// Allows `clones` more successful clones, then panics. `None` disables.
pub fn set_clone_budget(clones: Option<usize>) {
    CLONE_BUDGET.with(|budget| budget.set(clones));
}

/// Allows `defaults` more successful `Probe::default()` calls, then panics.
/// `None` disables.
pub fn set_default_budget(defaults: Option<usize>) {
    DEFAULT_BUDGET.with(|budget| budget.set(defaults));
}

pub fn probes(values: &[u32]) -> Vec<Probe> {
    values.iter().map(|&v| Probe::new(v)).collect()
}

pub fn values<'a>(items: impl IntoIterator<Item = &'a Probe>) -> Vec<u32> {
    items.into_iter().map(|p| p.0).collect()
}
