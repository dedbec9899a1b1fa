use thiserror::Error;

/// Error types for `FixVec` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum FixVecError {
    /// The operation would need more live elements than the fixed capacity allows
    #[error("Capacity exceeded: requested {requested} elements, but capacity is {capacity}")]
    CapacityExceeded {
        /// Number of live elements the operation would have produced
        requested: usize,
        /// Fixed capacity of the container
        capacity: usize,
    },
    /// The allocation strategy could not provide storage
    #[error("Out of memory: failed to allocate storage for {capacity} elements")]
    OutOfMemory {
        /// Number of element slots requested from the strategy
        capacity: usize,
    },
    /// The requested capacity does not describe a valid memory layout
    #[error("Capacity overflow: {capacity} elements exceed the addressable size")]
    CapacityOverflow {
        /// Number of element slots requested
        capacity: usize,
    },
}
