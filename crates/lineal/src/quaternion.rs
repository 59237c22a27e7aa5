//! Rotation quaternions built on a 4-component vector.

use crate::{error::Error, scalar::Scalar, vector::Vector};
use approx::{AbsDiffEq, RelativeEq};
use num_traits::{AsPrimitive, Float};
use std::{
    fmt::{self, Display, Formatter},
    ops::Mul,
    str::FromStr,
};

/// A quaternion `x·i + y·j + z·k + w` for representing and composing 3-D
/// rotations.
///
/// Storage is a [`Vector<T, 4>`] in component order `(x, y, z, w)`; the
/// vector (imaginary) part occupies the first three slots and the scalar
/// part the last. All construction paths go through floating-point scalars,
/// so integer quaternions do not exist.
///
/// Rotation and inversion divide by the squared norm and therefore work for
/// any non-zero quaternion, normalized or not. The zero quaternion is a
/// precondition violation: the division produces IEEE non-finite values
/// which propagate unguarded.
#[derive(Copy, Clone, Debug)]
pub struct Quaternion<T> {
    coeffs: Vector<T, 4>,
}

impl<T: Scalar + Float> Quaternion<T> {
    /// Creates a quaternion from its four coefficients, vector part first.
    pub fn new(x: T, y: T, z: T, w: T) -> Self {
        Self {
            coeffs: Vector::new([x, y, z, w]),
        }
    }

    /// The zero quaternion. Not a valid rotation.
    pub fn zero() -> Self {
        Self {
            coeffs: Vector::zeros(),
        }
    }

    /// The identity rotation `(0, 0, 0, 1)`.
    pub fn identity() -> Self {
        Self::new(T::zero(), T::zero(), T::zero(), T::one())
    }

    /// Creates the rotation of `angle` radians around `axis`.
    ///
    /// The axis is normalized internally, so any non-zero length is
    /// accepted. The result is a unit quaternion with scalar part
    /// `cos(angle / 2)` and vector part `sin(angle / 2)` times the unit
    /// axis. A zero axis violates the normalization precondition.
    pub fn from_axis_angle(axis: Vector<T, 3>, angle: T) -> Self {
        let two = T::one() + T::one();
        let half = angle / two;
        let v = axis.normalized() * half.sin();
        Self::new(v.x(), v.y(), v.z(), half.cos())
    }

    /// The `i` coefficient.
    pub fn x(&self) -> T { self.coeffs[0] }

    /// The `j` coefficient.
    pub fn y(&self) -> T { self.coeffs[1] }

    /// The `k` coefficient.
    pub fn z(&self) -> T { self.coeffs[2] }

    /// The scalar part.
    pub fn w(&self) -> T { self.coeffs[3] }

    /// Mutable access to the scalar part.
    pub fn w_mut(&mut self) -> &mut T { &mut self.coeffs[3] }

    /// The vector (imaginary) part as a 3-vector copy.
    pub fn vec(&self) -> Vector<T, 3> { self.coeffs.head::<3>() }

    /// Replaces the vector part, leaving the scalar part untouched.
    pub fn set_vec(&mut self, v: Vector<T, 3>) {
        self.coeffs[0] = v.x();
        self.coeffs[1] = v.y();
        self.coeffs[2] = v.z();
    }

    /// Sum of the four squared coefficients.
    pub fn squared_norm(&self) -> T { self.coeffs.squared_norm() }

    /// The quaternion norm, square root of [`Quaternion::squared_norm`].
    pub fn norm(&self) -> T { self.coeffs.norm() }

    /// Normalizes in place to unit norm. Zero norm propagates non-finite
    /// values.
    pub fn normalize(&mut self) { self.coeffs.normalize() }

    /// Returns a normalized copy, leaving `self` unmodified.
    pub fn normalized(&self) -> Self {
        Self {
            coeffs: self.coeffs.normalized(),
        }
    }

    /// The multiplicative inverse `(-x, -y, -z, w) / squared_norm`.
    ///
    /// `q * q.inverse()` is the identity for any non-zero `q`; for unit
    /// quaternions the inverse equals the conjugate.
    pub fn inverse(&self) -> Self {
        let inv = T::one() / self.squared_norm();
        let v = self.vec() * -inv;
        Self::new(v.x(), v.y(), v.z(), self.w() * inv)
    }

    /// The rotation angle in radians, `2 · atan2(‖vec‖, w)`.
    pub fn angle(&self) -> T {
        let two = T::one() + T::one();
        two * self.vec().norm().atan2(self.w())
    }

    /// The normalized rotation axis.
    ///
    /// For a (numerically) rotation-free quaternion the axis is
    /// indeterminate; the unit X axis is returned as an arbitrary but stable
    /// choice.
    pub fn axis(&self) -> Vector<T, 3> {
        let v = self.vec();
        if v.squared_norm() < T::epsilon() {
            Vector::new([T::one(), T::zero(), T::zero()])
        } else {
            v.normalized()
        }
    }

    /// Converts each coefficient to `S`.
    pub fn cast<S: Scalar + Float>(&self) -> Quaternion<S>
    where
        T: AsPrimitive<S>,
    {
        Quaternion {
            coeffs: self.coeffs.cast(),
        }
    }

    /// Fixed-decimal rendering of the four coefficients, six digits each.
    pub fn to_text(&self) -> String
    where
        T: Display,
    {
        self.coeffs.to_text()
    }
}

impl<T: Scalar + Float> Mul for Quaternion<T> {
    type Output = Self;

    /// Hamilton product. Composes rotations: `(a * b) * v` rotates `v` by
    /// `b` first, then by `a`. Not commutative.
    fn mul(self, rhs: Self) -> Self {
        let (v1, v2) = (self.vec(), rhs.vec());
        let v = v1.cross(&v2) + v2 * self.w() + v1 * rhs.w();
        Self::new(v.x(), v.y(), v.z(), self.w() * rhs.w() - v1.dot(&v2))
    }
}

impl<T: Scalar + Float> Mul<Vector<T, 3>> for Quaternion<T> {
    type Output = Vector<T, 3>;

    /// Rotates the vector, scaling by the squared norm so unnormalized
    /// quaternions rotate correctly too.
    fn mul(self, rhs: Vector<T, 3>) -> Vector<T, 3> {
        let v = self.vec();
        let two = T::one() + T::one();
        rhs + v.cross(&(rhs * self.w() + v.cross(&rhs))) * (two / self.squared_norm())
    }
}

impl<T: Scalar + Float> Default for Quaternion<T> {
    /// The zero quaternion, matching [`Vector`]'s default.
    fn default() -> Self { Self::zero() }
}

impl<T: Scalar> PartialEq for Quaternion<T> {
    /// Coefficient-wise tolerance comparison, inherited from
    /// [`Vector`]'s [`PartialEq`].
    fn eq(&self, other: &Self) -> bool { self.coeffs == other.coeffs }
}

impl<T> AbsDiffEq for Quaternion<T>
where
    T: Scalar + AbsDiffEq,
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> T::Epsilon { T::default_epsilon() }

    fn abs_diff_eq(&self, other: &Self, epsilon: T::Epsilon) -> bool {
        self.coeffs.abs_diff_eq(&other.coeffs, epsilon)
    }
}

impl<T> RelativeEq for Quaternion<T>
where
    T: Scalar + RelativeEq,
    T::Epsilon: Copy,
{
    fn default_max_relative() -> T::Epsilon { T::default_max_relative() }

    fn relative_eq(&self, other: &Self, epsilon: T::Epsilon, max_relative: T::Epsilon) -> bool {
        self.coeffs.relative_eq(&other.coeffs, epsilon, max_relative)
    }
}

impl<T: Scalar + Display> Display for Quaternion<T> {
    /// The four coefficients in `(x, y, z, w)` order, space separated.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { Display::fmt(&self.coeffs, f) }
}

impl<T: Scalar + FromStr> FromStr for Quaternion<T> {
    type Err = Error;

    /// Parses exactly four whitespace-separated coefficients in
    /// `(x, y, z, w)` order.
    fn from_str(s: &str) -> Result<Self, Error> {
        Ok(Self { coeffs: s.parse()? })
    }
}

impl<T: Scalar + Display> serde::Serialize for Quaternion<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.coeffs.serialize(serializer)
    }
}

impl<'de, T: Scalar + FromStr> serde::Deserialize<'de> for Quaternion<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Vector::deserialize(deserializer).map(|coeffs| Self { coeffs })
    }
}

#[cfg(test)]
mod quaternion_tests {
    use super::*;
    use approx::{abs_diff_eq, assert_abs_diff_eq};
    use proptest::prelude::*;

    type Quatd = Quaternion<f64>;
    type Vector3d = Vector<f64, 3>;

    #[test]
    fn construction() {
        let q = Quatd::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q.x(), 1.0);
        assert_eq!(q.y(), 2.0);
        assert_eq!(q.z(), 3.0);
        assert_eq!(q.w(), 4.0);

        assert_eq!(Quatd::identity(), Quatd::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(Quatd::zero(), Quatd::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!(Quatd::default(), Quatd::zero());
    }

    #[test]
    fn from_axis_angle() {
        let q = Quatd::from_axis_angle(Vector3d::from([1.0, 2.0, 3.0]), 4.0);
        assert_abs_diff_eq!(
            q,
            Quatd::new(
                0.24301995956120354,
                0.48603991912240707,
                0.7290598786836107,
                -0.4161468365471424,
            ),
            epsilon = 1e-15
        );
        assert_abs_diff_eq!(q.squared_norm(), 1.0, epsilon = 1e-15);

        // The axis length is irrelevant.
        let q2 = Quatd::from_axis_angle(Vector3d::from([10.0, 20.0, 30.0]), 4.0);
        assert_abs_diff_eq!(q, q2, epsilon = 1e-15);
    }

    #[test]
    fn accessors() {
        let mut q = Quatd::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q.vec(), Vector3d::from([1.0, 2.0, 3.0]));

        *q.w_mut() = 7.0;
        assert_eq!(q.w(), 7.0);

        q.set_vec(Vector3d::from([4.0, 5.0, 6.0]));
        assert_eq!(q, Quatd::new(4.0, 5.0, 6.0, 7.0));
    }

    #[test]
    fn norms() {
        let q = Quatd::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q.squared_norm(), 30.0);
        assert_eq!(q.norm(), 30.0f64.sqrt());

        let n = q.normalized();
        assert_abs_diff_eq!(n.norm(), 1.0, epsilon = 1e-15);
        assert_eq!(q.norm(), 30.0f64.sqrt());

        let mut q2 = q;
        q2.normalize();
        assert_abs_diff_eq!(q2, n, epsilon = 1e-15);
    }

    #[test]
    fn hamilton_product() {
        let q1 = Quatd::new(1.0, 2.0, 3.0, 4.0);
        let q2 = Quatd::new(2.0, 3.0, 4.0, 5.0);

        assert_eq!(q1 * q1, Quatd::new(8.0, 16.0, 24.0, 2.0));
        assert_eq!(q1 * q2, Quatd::new(12.0, 24.0, 30.0, 0.0));
        assert_eq!(q2 * q1, Quatd::new(14.0, 20.0, 32.0, 0.0));

        let q3 = Quatd::new(5.0, 6.0, 7.0, 8.0);
        assert_eq!(q1 * q3, Quatd::new(24.0, 48.0, 48.0, -6.0));
        assert_eq!(q3 * q1, Quatd::new(32.0, 32.0, 56.0, -6.0));
    }

    #[test]
    fn identity_laws() {
        let q = Quatd::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q * Quatd::identity(), q);
        assert_eq!(Quatd::identity() * q, q);

        let v = Vector3d::from([1.5, 2.5, 3.5]);
        assert_eq!(Quatd::identity() * v, v);
    }

    #[test]
    fn inverse() {
        let q = Quatd::new(1.0, 2.0, 3.0, 4.0);
        let inv = q.inverse();
        assert_abs_diff_eq!(
            inv,
            Quatd::new(
                -1.0 / 30.0,
                -2.0 / 30.0,
                -3.0 / 30.0,
                4.0 / 30.0,
            ),
            epsilon = 1e-15
        );
        assert_eq!(q * inv, Quatd::identity());
        assert_eq!(inv * q, Quatd::identity());

        // A unit quaternion inverts to its conjugate.
        let u = Quatd::from_axis_angle(Vector3d::from([1.0, 2.0, 3.0]), 4.0);
        assert_abs_diff_eq!(
            u.inverse(),
            Quatd::new(-u.x(), -u.y(), -u.z(), u.w()),
            epsilon = 1e-15
        );
    }

    #[test]
    fn rotation() {
        let q = Quatd::from_axis_angle(Vector3d::from([1.0, 2.0, 3.0]), 4.0);

        let rotated = q * Vector3d::from([1.5, 2.5, 3.5]);
        assert_abs_diff_eq!(
            rotated,
            Vector3d::from([
                1.128662381428177,
                2.179618623731323,
                3.8373667903697255,
            ]),
            epsilon = 1e-12
        );
        // Rotation preserves length.
        assert_abs_diff_eq!(
            rotated.norm(),
            Vector3d::from([1.5, 2.5, 3.5]).norm(),
            epsilon = 1e-12
        );

        // The rotation axis is a fixed point.
        let axis = Vector3d::from([1.0, 2.0, 3.0]);
        assert_abs_diff_eq!(q * axis, axis, epsilon = 1e-12);
    }

    #[test]
    fn rotation_quarter_turn() {
        let q = Quatd::from_axis_angle(Vector3d::from([0.0, 0.0, 1.0]), std::f64::consts::FRAC_PI_2);
        assert_abs_diff_eq!(
            q * Vector3d::from([1.0, 0.0, 0.0]),
            Vector3d::from([0.0, 1.0, 0.0]),
            epsilon = 1e-15
        );
    }

    #[test]
    fn rotation_ignores_quaternion_scale() {
        let q = Quatd::new(1.0, 2.0, 3.0, 4.0);
        let scaled = Quatd::new(2.0, 4.0, 6.0, 8.0);
        let v = Vector3d::from([1.5, 2.5, 3.5]);
        assert_abs_diff_eq!(q * v, scaled * v, epsilon = 1e-12);
    }

    #[test]
    fn angle_and_axis() {
        let q = Quatd::from_axis_angle(Vector3d::from([1.0, 2.0, 3.0]), 4.0);
        assert_abs_diff_eq!(q.angle(), 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            q.axis(),
            Vector3d::from([1.0, 2.0, 3.0]).normalized(),
            epsilon = 1e-12
        );

        assert_eq!(Quatd::identity().angle(), 0.0);
        // Indeterminate axis resolves to unit X.
        assert_eq!(Quatd::identity().axis(), Vector3d::from([1.0, 0.0, 0.0]));
        assert_eq!(Quatd::zero().axis(), Vector3d::from([1.0, 0.0, 0.0]));
    }

    #[test]
    fn zero_quaternion_propagates_non_finite() {
        let rotated = Quatd::zero() * Vector3d::from([1.0, 2.0, 3.0]);
        assert!(rotated[0].is_nan() || rotated[0].is_infinite());
    }

    #[test]
    fn cast() {
        let q = Quatd::new(1.5, 2.5, 3.5, 4.5);
        let single: Quaternion<f32> = q.cast();
        assert_eq!(single, Quaternion::<f32>::new(1.5, 2.5, 3.5, 4.5));
        assert_eq!(single.cast::<f64>(), q);
    }

    #[test]
    fn display_and_parse() {
        let q = Quatd::new(1.5, -2.25, 3.75, 4.0);
        assert_eq!(q.to_string(), "1.5 -2.25 3.75 4");
        assert_eq!(q.to_text(), "1.500000 -2.250000 3.750000 4.000000");
        assert_eq!(q.cast::<f32>().to_text(), "1.500000 -2.250000 3.750000 4.000000");

        let parsed: Quatd = q.to_string().parse().unwrap();
        assert_eq!(parsed, q);

        assert_eq!(
            "1 2 3".parse::<Quatd>(),
            Err(Error::ComponentCount {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn de_serialization() {
        let q = Quatd::new(1.5, 2.25, 3.75, 4.0);
        let serialized = serde_yaml::to_string(&q).unwrap();
        assert_eq!(serialized, "1.5 2.25 3.75 4\n");

        let deserialized: Quatd = serde_yaml::from_str(&serialized).unwrap();
        assert_eq!(deserialized, q);
    }

    fn axis_strategy() -> impl Strategy<Value = Vector3d> {
        prop::array::uniform3(-10.0f64..10.0)
            .prop_map(Vector3d::from)
            .prop_filter("axis too short", |a| a.squared_norm() > 0.1)
    }

    proptest! {
        #[test]
        fn identity_is_neutral(
            axis in axis_strategy(),
            angle in -6.0f64..6.0,
        ) {
            let q = Quatd::from_axis_angle(axis, angle);
            prop_assert_eq!(q * Quatd::identity(), q);
            prop_assert_eq!(Quatd::identity() * q, q);
        }

        #[test]
        fn inverse_cancels(
            axis in axis_strategy(),
            angle in 0.1f64..6.0,
        ) {
            let q = Quatd::from_axis_angle(axis, angle);
            prop_assert!(abs_diff_eq!(q * q.inverse(), Quatd::identity(), epsilon = 1e-9));
            prop_assert!(abs_diff_eq!(q.inverse() * q, Quatd::identity(), epsilon = 1e-9));
        }

        #[test]
        fn rotation_preserves_norm(
            axis in axis_strategy(),
            angle in -6.0f64..6.0,
            point in prop::array::uniform3(-100.0f64..100.0),
        ) {
            let q = Quatd::from_axis_angle(axis, angle);
            let p = Vector3d::from(point);
            prop_assert!(abs_diff_eq!((q * p).norm(), p.norm(), epsilon = 1e-9));
        }

        #[test]
        fn axis_angle_round_trip(
            axis in axis_strategy(),
            angle in 0.1f64..3.0,
        ) {
            let q = Quatd::from_axis_angle(axis, angle);
            prop_assert!(abs_diff_eq!(q.angle(), angle, epsilon = 1e-9));
            prop_assert!(abs_diff_eq!(q.axis(), axis.normalized(), epsilon = 1e-9));
        }
    }
}
