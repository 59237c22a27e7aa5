//! # lineal
//!
//! Fixed-dimension vector and quaternion algebra primitives.
//!
//! The crate provides two value types: [`Vector`], a stack-allocated vector of
//! exactly `N` scalars with elementwise arithmetic, reductions, normalization
//! and compile-time-sized slicing, and [`Quaternion`], built on a 4-component
//! vector, for representing and composing 3-D rotations.
//!
//! Dimension mismatches, invalid component accessors, slices reaching past the
//! end and non-floating-point operands of norm/division operations are all
//! rejected at compile time. The only runtime errors are checked indexed
//! access, sequential-fill overflow and text parsing, reported through
//! [`Error`].

#![warn(missing_docs)]

pub mod error;
pub mod quaternion;
pub mod scalar;
pub mod vector;

pub use error::Error;
pub use quaternion::Quaternion;
pub use scalar::Scalar;
pub use vector::{Filler, Vector, EQ_EPSILON};

/// 2-dimensional `f32` vector.
pub type Vec2 = Vector<f32, 2>;
/// 3-dimensional `f32` vector.
pub type Vec3 = Vector<f32, 3>;
/// 4-dimensional `f32` vector.
pub type Vec4 = Vector<f32, 4>;

/// 2-dimensional `f64` vector.
pub type DVec2 = Vector<f64, 2>;
/// 3-dimensional `f64` vector.
pub type DVec3 = Vector<f64, 3>;
/// 4-dimensional `f64` vector.
pub type DVec4 = Vector<f64, 4>;

/// 2-dimensional `i32` vector.
pub type IVec2 = Vector<i32, 2>;
/// 3-dimensional `i32` vector.
pub type IVec3 = Vector<i32, 3>;

/// 2-dimensional `u32` vector.
pub type UVec2 = Vector<u32, 2>;
/// 3-dimensional `u32` vector.
pub type UVec3 = Vector<u32, 3>;

/// Single-precision rotation quaternion.
pub type Quat = Quaternion<f32>;
/// Double-precision rotation quaternion.
pub type DQuat = Quaternion<f64>;
