//! Error type for checked vector operations.
//!
//! Most contract violations in this crate are compile-time errors: dimension
//! mismatches, out-of-range slices and float-only operations on integer
//! vectors never reach runtime. What remains is checked indexed access,
//! sequential-fill overflow and text parsing, all reported here.

/// Errors raised by the checked operations of [`Vector`](crate::Vector) and
/// [`Quaternion`](crate::Quaternion).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Checked access with an index past the last component.
    #[error("index {idx} out of bounds for vector of size {size}")]
    OutOfBounds {
        /// The offending index.
        idx: usize,
        /// The vector size `N`.
        size: usize,
    },

    /// The sequential-fill builder received more values than the vector holds.
    #[error("fill overflow: vector of size {size} is already full")]
    Overflow {
        /// The vector size `N`.
        size: usize,
    },

    /// A component sequence had the wrong length.
    #[error("expected {expected} components, got {actual}")]
    ComponentCount {
        /// The vector size `N`.
        expected: usize,
        /// The number of components supplied.
        actual: usize,
    },

    /// A component token failed to parse as a scalar.
    #[error("invalid component '{token}' at index {idx}")]
    ParseComponent {
        /// Index of the offending component.
        idx: usize,
        /// The token that failed to parse.
        token: String,
    },
}
