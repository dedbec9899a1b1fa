#![cfg_attr(not(test), no_std)]
#![warn(unsafe_op_in_unsafe_fn)]

//! `FixVec`: a vector with a fixed capacity and exactly one allocation.
//!
//! `FixVec<T, S>` behaves like an ordered, random-access, owning sequence,
//! except that its capacity is decided once, at construction, and backed by a
//! single contiguous buffer that is never grown or shrunk. Operations that
//! would need more room fail with [`FixVecError::CapacityExceeded`] instead of
//! reallocating.
//!
//! Buffer layout: `[live elements 0..len][raw slots len..capacity]`
//!
//! # Allocation Strategies
//!
//! Storage and element construction go through a [`SlotStrategy`]. The
//! default, [`HeapStrategy`], uses the global allocator. Custom strategies can
//! keep state (pools, counters) and decide through [`Propagation`] whether
//! copy assignment, move assignment and swap carry the strategy along with
//! the elements.
//!
//! # Failure Guarantees
//!
//! - `push`, `push_with` and `insert` either succeed or leave the container
//!   untouched, including when the element's constructor panics.
//! - `resize` keeps whatever it managed to construct before a panicking
//!   `Clone`; the length ends up between the old and the requested one.
//! - `clone_from` and `assign_slice` keep the already-assigned prefix.
//! - No element is ever dropped twice and the buffer is always released.
//!
//! Out-of-range indices and positions, and `front()`/`back()` on an empty
//! container, are contract violations. They are never reported as errors;
//! they are debug-asserted and otherwise panic through bounds checks.
//!
//! # Stack Interface
//!
//! ```
//! # use fixvec::{FixVec, FixVecError};
//! let mut vec = FixVec::new(3).unwrap();
//!
//! vec.push(1).unwrap();
//! vec.push(2).unwrap();
//! vec.push(3).unwrap();
//!
//! assert_eq!(
//!     vec.push(4),
//!     Err(FixVecError::CapacityExceeded { requested: 4, capacity: 3 })
//! );
//! assert_eq!(vec.len(), 3);
//!
//! vec.pop_back();
//! assert_eq!(vec, [1, 2]);
//! ```
//!
//! # Sequence Interface
//!
//! ```
//! # use fixvec::FixVec;
//! let mut vec = FixVec::from_slice(5, &[10, 20, 30]).unwrap();
//!
//! let next = vec.erase(1);
//! assert_eq!(vec, [10, 30]);
//! assert_eq!(vec[next], 30);
//!
//! let at = vec.insert(1, 20).unwrap();
//! assert_eq!(vec[at], 20);
//! assert_eq!(vec, [10, 20, 30]);
//!
//! vec.resize(5, 0).unwrap();
//! assert_eq!(vec, [10, 20, 30, 0, 0]);
//! assert!(vec.resize(6, 0).is_err());
//! ```
//!
//! # Assignment
//!
//! ```
//! # use fixvec::FixVec;
//! let mut vec = FixVec::from_slice(4, &[1, 2]).unwrap();
//!
//! vec.assign_slice(&[3, 4, 5, 6]).unwrap();
//! assert_eq!(vec, [3, 4, 5, 6]);
//!
//! assert!(vec.assign_slice(&[1, 2, 3, 4, 5]).is_err());
//! assert_eq!(vec, [3, 4, 5, 6]);
//!
//! let mut moved = vec.take();
//! assert_eq!(vec.capacity(), 0);
//! assert_eq!(moved.capacity(), 4);
//!
//! let copy = moved.clone();
//! moved.clear();
//! assert_eq!(copy, [3, 4, 5, 6]);
//! ```
//!
//! # Iterator Support
//!
//! ```
//! # use fixvec::FixVec;
//! let vec = FixVec::from_slice(4, &["a", "b", "c"]).unwrap();
//!
//! let forward: Vec<_> = vec.iter().copied().collect();
//! let backward: Vec<_> = vec.iter_rev().copied().collect();
//! assert_eq!(forward, ["a", "b", "c"]);
//! assert_eq!(backward, ["c", "b", "a"]);
//!
//! let cursor = vec.cursor(1).unwrap();
//! assert_eq!(vec.get_at(cursor), Some(&"b"));
//! ```

extern crate alloc;

mod assign;
mod core;
mod cursor;
mod error;
mod iter;
pub mod rotate;
mod strategy;

// Re-export public types and traits
pub use crate::core::FixVec;
pub use crate::cursor::Cursor;
pub use crate::error::FixVecError;
pub use crate::iter::IntoIter;
pub use crate::strategy::{HeapStrategy, Propagation, SlotStrategy};
