//! Numeric bounds for vector components.

use num_traits::{AsPrimitive, NumAssign};
use std::fmt::Debug;

/// The bounds every vector component type must satisfy.
///
/// Covered by all primitive numeric types through the blanket impl. Operations
/// involving norms, division or normalization additionally require
/// [`num_traits::Float`], so they are simply unavailable on integer vectors
/// rather than failing at runtime.
///
/// `AsPrimitive<f64>` feeds the tolerance-based equality of
/// [`Vector`](crate::Vector), which compares components in double precision
/// regardless of `T`.
pub trait Scalar: NumAssign + AsPrimitive<f64> + PartialOrd + Copy + Debug + 'static {}

impl<T> Scalar for T where T: NumAssign + AsPrimitive<f64> + PartialOrd + Copy + Debug + 'static {}
