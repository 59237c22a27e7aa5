//! Fixed-dimension vector type and its elementwise algebra.

use crate::{error::Error, scalar::Scalar};
use approx::{AbsDiffEq, RelativeEq};
use num_traits::{AsPrimitive, Float, Signed};
use std::{
    fmt::{self, Display, Formatter},
    marker::PhantomData,
    ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

/// Absolute tolerance of the [`PartialEq`] implementation on [`Vector`].
///
/// Two vectors are equal iff every component pair, compared in double
/// precision, differs by no more than this value. All equality-based
/// assertions downstream (including [`Quaternion`](crate::Quaternion)
/// comparisons) inherit it. Note that for `f32` components the tolerance is
/// far below one `f32` ulp, making equality effectively exact there.
pub const EQ_EPSILON: f64 = f64::EPSILON;

/// A vector holding exactly `N` scalars of type `T`.
///
/// `N` is part of the type: binary operations between vectors of different
/// sizes do not type-check. Storage is a plain `[T; N]` on the stack; copying
/// a vector copies all components and yields an independent instance.
///
/// Operations involving norms, division or normalization require
/// `T: `[`Float`] and are unavailable on integer vectors.
#[derive(Copy, Clone, Debug)]
pub struct Vector<T, const N: usize> {
    data: [T; N],
}

impl<T: Scalar, const N: usize> Vector<T, N> {
    /// The number of components, `N`.
    pub const fn size() -> usize { N }

    /// Creates a vector from its components.
    pub const fn new(data: [T; N]) -> Self { Self { data } }

    /// Creates the zero vector.
    pub fn zeros() -> Self { Self { data: [T::zero(); N] } }

    /// Creates a vector with every component set to `value`.
    pub fn splat(value: T) -> Self { Self { data: [value; N] } }

    /// Checked read access; `Error::OutOfBounds` when `idx >= N`.
    pub fn at(&self, idx: usize) -> Result<T, Error> {
        if idx < N {
            Ok(self.data[idx])
        } else {
            Err(Error::OutOfBounds { idx, size: N })
        }
    }

    /// Checked write access; `Error::OutOfBounds` when `idx >= N`.
    pub fn at_mut(&mut self, idx: usize) -> Result<&mut T, Error> {
        if idx < N {
            Ok(&mut self.data[idx])
        } else {
            Err(Error::OutOfBounds { idx, size: N })
        }
    }

    /// The first component. Compile-time error when `N < 1`.
    pub fn x(&self) -> T {
        const { assert!(N >= 1, "x() requires at least 1 component") }
        self.data[0]
    }

    /// Mutable access to the first component. Compile-time error when `N < 1`.
    pub fn x_mut(&mut self) -> &mut T {
        const { assert!(N >= 1, "x_mut() requires at least 1 component") }
        &mut self.data[0]
    }

    /// The second component. Compile-time error when `N < 2`.
    pub fn y(&self) -> T {
        const { assert!(N >= 2, "y() requires at least 2 components") }
        self.data[1]
    }

    /// Mutable access to the second component. Compile-time error when `N < 2`.
    pub fn y_mut(&mut self) -> &mut T {
        const { assert!(N >= 2, "y_mut() requires at least 2 components") }
        &mut self.data[1]
    }

    /// The third component. Compile-time error when `N < 3`.
    pub fn z(&self) -> T {
        const { assert!(N >= 3, "z() requires at least 3 components") }
        self.data[2]
    }

    /// Mutable access to the third component. Compile-time error when `N < 3`.
    pub fn z_mut(&mut self) -> &mut T {
        const { assert!(N >= 3, "z_mut() requires at least 3 components") }
        &mut self.data[2]
    }

    /// Sum of all components, zero for `N == 0`.
    pub fn sum(&self) -> T {
        let mut acc = T::zero();
        for &c in &self.data {
            acc += c;
        }
        acc
    }

    /// The minimum component value. Compile-time error when `N == 0`.
    pub fn min(&self) -> T {
        const { assert!(N >= 1, "min() requires a non-empty vector") }
        let mut m = self.data[0];
        for &c in &self.data[1..] {
            if c < m {
                m = c;
            }
        }
        m
    }

    /// The maximum component value. Compile-time error when `N == 0`.
    pub fn max(&self) -> T {
        const { assert!(N >= 1, "max() requires a non-empty vector") }
        let mut m = self.data[0];
        for &c in &self.data[1..] {
            if c > m {
                m = c;
            }
        }
        m
    }

    /// Mutable handle to the minimum-valued component, allowing in-place
    /// update of that exact slot. Ties resolve to the first occurrence in
    /// index order. Compile-time error when `N == 0`.
    pub fn min_coeff(&mut self) -> &mut T {
        const { assert!(N >= 1, "min_coeff() requires a non-empty vector") }
        let mut idx = 0;
        for i in 1..N {
            if self.data[i] < self.data[idx] {
                idx = i;
            }
        }
        &mut self.data[idx]
    }

    /// Mutable handle to the maximum-valued component; first occurrence on
    /// ties. Compile-time error when `N == 0`.
    pub fn max_coeff(&mut self) -> &mut T {
        const { assert!(N >= 1, "max_coeff() requires a non-empty vector") }
        let mut idx = 0;
        for i in 1..N {
            if self.data[i] > self.data[idx] {
                idx = i;
            }
        }
        &mut self.data[idx]
    }

    /// Pairwise multiply-accumulate of the two vectors.
    pub fn dot(&self, other: &Self) -> T {
        let mut acc = T::zero();
        for i in 0..N {
            acc += self.data[i] * other.data[i];
        }
        acc
    }

    /// Sum of squared components, `self.dot(self)`.
    pub fn squared_norm(&self) -> T { self.dot(self) }

    /// The first `M` components as a new vector. `M <= N` is checked at
    /// compile time.
    pub fn head<const M: usize>(&self) -> Vector<T, M> {
        const { assert!(M <= N, "head(): requested size exceeds vector size") }
        Vector {
            data: std::array::from_fn(|i| self.data[i]),
        }
    }

    /// The last `M` components as a new vector. `M <= N` is checked at
    /// compile time.
    pub fn tail<const M: usize>(&self) -> Vector<T, M> {
        const { assert!(M <= N, "tail(): requested size exceeds vector size") }
        Vector {
            data: std::array::from_fn(|i| self.data[N - M + i]),
        }
    }

    /// `M` components starting at offset `S` as a new vector. `S + M <= N` is
    /// checked at compile time.
    pub fn segment<const S: usize, const M: usize>(&self) -> Vector<T, M> {
        const { assert!(S + M <= N, "segment(): requested range exceeds vector size") }
        Vector {
            data: std::array::from_fn(|i| self.data[S + i]),
        }
    }

    /// Converts each component to `S` via the standard scalar conversion
    /// (truncating for float to int).
    pub fn cast<S: Scalar>(&self) -> Vector<S, N>
    where
        T: AsPrimitive<S>,
    {
        Vector {
            data: self.data.map(|c| c.as_()),
        }
    }

    /// Starts an ordered fill writing successive components from index 0.
    pub fn filler(&mut self) -> Filler<'_, T, N> { Filler { vec: self, next: 0 } }
}

impl<T: Scalar> Vector<T, 3> {
    /// Right-handed cross product. Only defined for 3-vectors; calling it on
    /// any other size does not type-check.
    pub fn cross(&self, other: &Self) -> Self {
        let (a, b) = (&self.data, &other.data);
        Self::new([
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ])
    }
}

impl<T: Scalar + Float, const N: usize> Vector<T, N> {
    /// The Euclidean norm, square root of [`Vector::squared_norm`].
    pub fn norm(&self) -> T { self.squared_norm().sqrt() }

    /// Normalizes in place by dividing every component by the norm.
    ///
    /// A zero-norm vector is a precondition violation: the division produces
    /// IEEE infinities/NaNs, which propagate unguarded.
    pub fn normalize(&mut self) {
        let inv = T::one() / self.norm();
        for c in &mut self.data {
            *c *= inv;
        }
    }

    /// Returns a normalized copy, leaving `self` unmodified. Same zero-norm
    /// precondition as [`Vector::normalize`].
    pub fn normalized(&self) -> Self {
        let mut ret = *self;
        ret.normalize();
        ret
    }
}

/// Ordered bulk-fill builder over a borrowed vector.
///
/// Accepts scalars one at a time and writes them to successive components
/// starting at index 0; pushing more than `N` values fails with
/// [`Error::Overflow`] instead of silently truncating.
pub struct Filler<'a, T, const N: usize> {
    vec: &'a mut Vector<T, N>,
    next: usize,
}

impl<T: Scalar, const N: usize> Filler<'_, T, N> {
    /// Writes `value` to the next component and advances the cursor.
    pub fn push(&mut self, value: T) -> Result<(), Error> {
        if self.next >= N {
            return Err(Error::Overflow { size: N });
        }
        self.vec.data[self.next] = value;
        self.next += 1;
        Ok(())
    }
}

impl<T: Scalar, const N: usize> Default for Vector<T, N> {
    fn default() -> Self { Self::zeros() }
}

impl<T: Scalar, const N: usize> From<[T; N]> for Vector<T, N> {
    fn from(data: [T; N]) -> Self { Self { data } }
}

impl<T: Scalar, const N: usize> TryFrom<&[T]> for Vector<T, N> {
    type Error = Error;

    /// Fails with [`Error::ComponentCount`] when the slice length differs
    /// from `N`.
    fn try_from(slice: &[T]) -> Result<Self, Error> {
        if slice.len() != N {
            return Err(Error::ComponentCount {
                expected: N,
                actual: slice.len(),
            });
        }
        Ok(Self {
            data: std::array::from_fn(|i| slice[i]),
        })
    }
}

impl<T, const N: usize> Index<usize> for Vector<T, N> {
    type Output = T;

    /// Unchecked access with plain-array semantics: panics on `idx >= N`.
    fn index(&self, idx: usize) -> &T { &self.data[idx] }
}

impl<T, const N: usize> IndexMut<usize> for Vector<T, N> {
    fn index_mut(&mut self, idx: usize) -> &mut T { &mut self.data[idx] }
}

// Compound assignment is the single source of truth for arithmetic; the
// binary operators copy the receiver and delegate.

impl<T: Scalar, const N: usize> AddAssign for Vector<T, N> {
    fn add_assign(&mut self, rhs: Self) {
        for i in 0..N {
            self.data[i] += rhs.data[i];
        }
    }
}

impl<T: Scalar, const N: usize> SubAssign for Vector<T, N> {
    fn sub_assign(&mut self, rhs: Self) {
        for i in 0..N {
            self.data[i] -= rhs.data[i];
        }
    }
}

impl<T: Scalar, const N: usize> MulAssign for Vector<T, N> {
    fn mul_assign(&mut self, rhs: Self) {
        for i in 0..N {
            self.data[i] *= rhs.data[i];
        }
    }
}

impl<T: Scalar + Float, const N: usize> DivAssign for Vector<T, N> {
    fn div_assign(&mut self, rhs: Self) {
        for i in 0..N {
            self.data[i] /= rhs.data[i];
        }
    }
}

impl<T: Scalar, const N: usize> AddAssign<T> for Vector<T, N> {
    fn add_assign(&mut self, rhs: T) {
        for c in &mut self.data {
            *c += rhs;
        }
    }
}

impl<T: Scalar, const N: usize> SubAssign<T> for Vector<T, N> {
    fn sub_assign(&mut self, rhs: T) {
        for c in &mut self.data {
            *c -= rhs;
        }
    }
}

impl<T: Scalar, const N: usize> MulAssign<T> for Vector<T, N> {
    fn mul_assign(&mut self, rhs: T) {
        for c in &mut self.data {
            *c *= rhs;
        }
    }
}

impl<T: Scalar + Float, const N: usize> DivAssign<T> for Vector<T, N> {
    fn div_assign(&mut self, rhs: T) {
        for c in &mut self.data {
            *c /= rhs;
        }
    }
}

macro_rules! impl_binary_ops {
    ($($op:ident, $fn:ident, $assign_fn:ident);* $(;)?) => {
        $(
            impl<T: Scalar, const N: usize> $op for Vector<T, N> {
                type Output = Self;

                fn $fn(mut self, rhs: Self) -> Self {
                    self.$assign_fn(rhs);
                    self
                }
            }

            impl<T: Scalar, const N: usize> $op<T> for Vector<T, N> {
                type Output = Self;

                fn $fn(mut self, rhs: T) -> Self {
                    self.$assign_fn(rhs);
                    self
                }
            }
        )*
    };
}

impl_binary_ops! {
    Add, add, add_assign;
    Sub, sub, sub_assign;
    Mul, mul, mul_assign;
}

impl<T: Scalar + Float, const N: usize> Div for Vector<T, N> {
    type Output = Self;

    fn div(mut self, rhs: Self) -> Self {
        self /= rhs;
        self
    }
}

impl<T: Scalar + Float, const N: usize> Div<T> for Vector<T, N> {
    type Output = Self;

    fn div(mut self, rhs: T) -> Self {
        self /= rhs;
        self
    }
}

macro_rules! impl_commuted_ops {
    ($($t:ty),* $(,)?) => {
        $(
            impl<const N: usize> Add<Vector<$t, N>> for $t {
                type Output = Vector<$t, N>;

                fn add(self, rhs: Vector<$t, N>) -> Vector<$t, N> { rhs + self }
            }

            impl<const N: usize> Mul<Vector<$t, N>> for $t {
                type Output = Vector<$t, N>;

                fn mul(self, rhs: Vector<$t, N>) -> Vector<$t, N> { rhs * self }
            }
        )*
    };
}

impl_commuted_ops!(f32, f64, i32, u32);

impl<T: Scalar + Signed, const N: usize> Neg for Vector<T, N> {
    type Output = Self;

    /// Negation is scalar multiplication by minus one.
    fn neg(self) -> Self { self * -T::one() }
}

impl<T: Scalar, const N: usize> PartialEq for Vector<T, N> {
    /// Tolerance comparison: every component pair must differ by no more than
    /// [`EQ_EPSILON`] when compared in double precision.
    fn eq(&self, other: &Self) -> bool {
        self.data.iter().zip(other.data.iter()).all(|(a, b)| {
            let (a, b): (f64, f64) = (a.as_(), b.as_());
            (a - b).abs() <= EQ_EPSILON
        })
    }
}

impl<T, const N: usize> AbsDiffEq for Vector<T, N>
where
    T: Scalar + AbsDiffEq,
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> T::Epsilon { T::default_epsilon() }

    fn abs_diff_eq(&self, other: &Self, epsilon: T::Epsilon) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| T::abs_diff_eq(a, b, epsilon))
    }
}

impl<T, const N: usize> RelativeEq for Vector<T, N>
where
    T: Scalar + RelativeEq,
    T::Epsilon: Copy,
{
    fn default_max_relative() -> T::Epsilon { T::default_max_relative() }

    fn relative_eq(&self, other: &Self, epsilon: T::Epsilon, max_relative: T::Epsilon) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| T::relative_eq(a, b, epsilon, max_relative))
    }
}

impl<T: Scalar + Display, const N: usize> Display for Vector<T, N> {
    /// Components in index order, single-space separated, no trailing
    /// separator.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, c) in self.data.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl<T: Scalar + Display, const N: usize> Vector<T, N> {
    /// Fixed-decimal rendering: components separated by single spaces, each
    /// with six decimal digits. Integer components ignore the precision.
    pub fn to_text(&self) -> String {
        self.data
            .iter()
            .map(|c| format!("{c:.6}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<T: Scalar + FromStr, const N: usize> FromStr for Vector<T, N> {
    type Err = Error;

    /// Parses exactly `N` whitespace-separated scalars, assigned to
    /// components in order.
    fn from_str(s: &str) -> Result<Self, Error> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        if tokens.len() != N {
            return Err(Error::ComponentCount {
                expected: N,
                actual: tokens.len(),
            });
        }
        let mut ret = Self::zeros();
        for (i, token) in tokens.iter().enumerate() {
            ret.data[i] = token.parse().map_err(|_| Error::ParseComponent {
                idx: i,
                token: (*token).to_owned(),
            })?;
        }
        Ok(ret)
    }
}

impl<T: Scalar + Display, const N: usize> serde::Serialize for Vector<T, N> {
    /// Serializes to the native space-separated text form.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de, T: Scalar + FromStr, const N: usize> serde::Deserialize<'de> for Vector<T, N> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct VectorVisitor<T, const N: usize>(PhantomData<T>);

        impl<T: Scalar + FromStr, const N: usize> serde::de::Visitor<'_> for VectorVisitor<T, N> {
            type Value = Vector<T, N>;

            fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
                write!(formatter, "a string of {} whitespace-separated scalars", N)
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(VectorVisitor::<T, N>(PhantomData))
    }
}
