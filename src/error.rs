//! Error type for [`FixedMap`](crate::FixedMap) operations.

use thiserror::Error;

/// Errors returned by [`FixedMap`](crate::FixedMap).
///
/// Looking up or removing a key that is not present is not an error; those
/// operations return `None` or `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FixedMapError {
    /// The map is at full capacity and the key is not already present.
    /// Remove unneeded entries or increase the capacity parameter.
    #[error("map is full (capacity {capacity})")]
    CapacityExceeded {
        /// The map's fixed capacity.
        capacity: usize,
    },

    /// A positional accessor was given an index outside `[0, len)`.
    #[error("index {index} out of range for map of length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of occupied slots at the time of the call.
        len: usize,
    },
}
