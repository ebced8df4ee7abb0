//! Dense, heap-backed numeric vector.
//!
//! [`Vector`] is a value type: cloning copies the element buffer and no two
//! vectors ever share storage. Elementwise operators require both operands to
//! have the same length and panic otherwise.

use alloc::vec::Vec;
use core::fmt;
use core::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};
use rand::distributions::uniform::SampleUniform;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::real::Real;

/// Ordered, index-addressable sequence of `T`.
///
/// # Example
///
/// ```
/// use linstat::Vector;
///
/// let a: Vector<f64> = Vector::from_vec(vec![3.0, 4.0]);
/// assert_eq!(a.length(), 5.0);
/// assert_eq!(a.dot(&Vector::ones(2)), 7.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector<T> {
    data: Vec<T>,
}

impl<T: Real> Vector<T> {
    /// Create a zero vector with `size` elements.
    pub fn new(size: usize) -> Self {
        Self::zeros(size)
    }

    /// Create a zero vector with `size` elements.
    pub fn zeros(size: usize) -> Self {
        Self::constant(size, T::zero())
    }

    /// Create a vector of ones.
    pub fn ones(size: usize) -> Self {
        Self::constant(size, T::one())
    }

    /// Create a vector filled with `value`.
    pub fn constant(size: usize, value: T) -> Self {
        Self {
            data: alloc::vec![value; size],
        }
    }

    /// Create the `index`-th standard basis vector.
    ///
    /// # Panics
    ///
    /// Panics if `index >= size`.
    pub fn unit(size: usize, index: usize) -> Self {
        assert!(index < size, "unit index out of bounds");
        let mut v = Self::zeros(size);
        v.data[index] = T::one();
        v
    }

    /// Wrap an existing buffer.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Copy elements from a slice.
    pub fn from_slice(data: &[T]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the vector has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutably borrow the elements.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Iterate over the elements.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Consume the vector and return its buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Resize in place, zero-filling new elements.
    pub fn resize(&mut self, size: usize) {
        self.data.resize(size, T::zero());
    }

    /// Swap two elements.
    pub fn swap_elements(&mut self, i: usize, j: usize) {
        self.data.swap(i, j);
    }

    /// Inner product.
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ.
    pub fn dot(&self, other: &Self) -> T {
        assert_eq!(self.len(), other.len(), "vector size mismatch in dot");
        self.data
            .iter()
            .zip(other.data.iter())
            .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
    }

    /// Squared Euclidean norm.
    pub fn squared_length(&self) -> T {
        self.dot(self)
    }

    /// Euclidean norm.
    pub fn length(&self) -> T {
        self.squared_length().sqrt()
    }

    /// Scale to unit length in place. A zero vector is left unchanged.
    pub fn normalize(&mut self) {
        let length = self.length();
        if length > T::zero() {
            for x in self.data.iter_mut() {
                *x /= length;
            }
        }
    }

    /// Return a unit-length copy.
    pub fn normalized(&self) -> Self {
        let mut v = self.clone();
        v.normalize();
        v
    }

    /// Sum of all elements.
    pub fn sum(&self) -> T {
        self.data.iter().copied().sum()
    }

    /// Arithmetic mean; zero for an empty vector.
    pub fn mean(&self) -> T {
        if self.data.is_empty() {
            return T::zero();
        }
        self.sum() / T::from_usize(self.len())
    }
}

impl<T: Real + SampleUniform> Vector<T> {
    /// Create a vector of uniform samples in `[0, 1)` from a seeded generator.
    pub fn random(size: usize, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        (0..size).map(|_| rng.gen_range(T::zero()..T::one())).collect()
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

impl<T> From<Vec<T>> for Vector<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for Vector<T> {
    type Item = T;
    type IntoIter = alloc::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

macro_rules! impl_elementwise {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl<T: Real> $assign_trait<&Vector<T>> for Vector<T> {
            fn $assign_method(&mut self, rhs: &Vector<T>) {
                assert_eq!(
                    self.len(),
                    rhs.len(),
                    concat!("vector size mismatch in ", stringify!($method))
                );
                for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
                    *a $op b;
                }
            }
        }

        impl<T: Real> $assign_trait<Vector<T>> for Vector<T> {
            fn $assign_method(&mut self, rhs: Vector<T>) {
                *self $op &rhs;
            }
        }

        impl<T: Real> $trait<&Vector<T>> for &Vector<T> {
            type Output = Vector<T>;

            fn $method(self, rhs: &Vector<T>) -> Vector<T> {
                let mut out = self.clone();
                out $op rhs;
                out
            }
        }

        impl<T: Real> $trait<&Vector<T>> for Vector<T> {
            type Output = Vector<T>;

            fn $method(mut self, rhs: &Vector<T>) -> Vector<T> {
                self $op rhs;
                self
            }
        }

        impl<T: Real> $trait<Vector<T>> for Vector<T> {
            type Output = Vector<T>;

            fn $method(mut self, rhs: Vector<T>) -> Vector<T> {
                self $op &rhs;
                self
            }
        }
    };
}

impl_elementwise!(Add, add, AddAssign, add_assign, +=);
impl_elementwise!(Sub, sub, SubAssign, sub_assign, -=);
impl_elementwise!(Mul, mul, MulAssign, mul_assign, *=);
impl_elementwise!(Div, div, DivAssign, div_assign, /=);

impl<T: Real> MulAssign<T> for Vector<T> {
    fn mul_assign(&mut self, rhs: T) {
        for x in self.data.iter_mut() {
            *x *= rhs;
        }
    }
}

impl<T: Real> DivAssign<T> for Vector<T> {
    fn div_assign(&mut self, rhs: T) {
        for x in self.data.iter_mut() {
            *x /= rhs;
        }
    }
}

impl<T: Real> Mul<T> for Vector<T> {
    type Output = Vector<T>;

    fn mul(mut self, rhs: T) -> Vector<T> {
        self *= rhs;
        self
    }
}

impl<T: Real> Mul<T> for &Vector<T> {
    type Output = Vector<T>;

    fn mul(self, rhs: T) -> Vector<T> {
        self.clone() * rhs
    }
}

impl<T: Real> Div<T> for Vector<T> {
    type Output = Vector<T>;

    fn div(mut self, rhs: T) -> Vector<T> {
        self /= rhs;
        self
    }
}

impl<T: Real> Div<T> for &Vector<T> {
    type Output = Vector<T>;

    fn div(self, rhs: T) -> Vector<T> {
        self.clone() / rhs
    }
}

impl<T: Real> Neg for Vector<T> {
    type Output = Vector<T>;

    fn neg(mut self) -> Vector<T> {
        for x in self.data.iter_mut() {
            *x = -*x;
        }
        self
    }
}

impl<T: Real> Neg for &Vector<T> {
    type Output = Vector<T>;

    fn neg(self) -> Vector<T> {
        -self.clone()
    }
}

macro_rules! impl_scalar_lhs {
    ($($t:ty),*) => {$(
        impl Mul<Vector<$t>> for $t {
            type Output = Vector<$t>;

            fn mul(self, rhs: Vector<$t>) -> Vector<$t> {
                rhs * self
            }
        }

        impl Mul<&Vector<$t>> for $t {
            type Output = Vector<$t>;

            fn mul(self, rhs: &Vector<$t>) -> Vector<$t> {
                rhs * self
            }
        }
    )*};
}

impl_scalar_lhs!(f32, f64);

impl<T: fmt::Display> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn test_constructors() {
        let z: Vector<f64> = Vector::zeros(3);
        assert_eq!(z.as_slice(), &[0.0, 0.0, 0.0]);

        let o: Vector<f64> = Vector::ones(2);
        assert_eq!(o.as_slice(), &[1.0, 1.0]);

        let e: Vector<f64> = Vector::unit(3, 1);
        assert_eq!(e.as_slice(), &[0.0, 1.0, 0.0]);

        let c: Vector<f32> = Vector::constant(2, 7.5);
        assert_eq!(c[0], 7.5);
        assert_eq!(c[1], 7.5);
    }

    #[test]
    fn test_dot_and_length() {
        let a: Vector<f64> = Vector::from_vec(vec![1.0, 2.0, 2.0]);
        let b: Vector<f64> = Vector::from_vec(vec![4.0, -1.0, 0.5]);

        assert_eq!(a.dot(&b), 3.0);
        assert_eq!(a.squared_length(), 9.0);
        assert_eq!(a.length(), 3.0);
    }

    #[test]
    fn test_normalize() {
        let v: Vector<f64> = Vector::from_vec(vec![3.0, 0.0, 4.0]);
        let n = v.normalized();
        assert!((n.length() - 1.0_f64).abs() < 1e-12);
        assert!((n[0] - 0.6_f64).abs() < 1e-12);

        // Zero vector is left alone rather than producing NaNs
        let mut z: Vector<f64> = Vector::zeros(3);
        z.normalize();
        assert_eq!(z.as_slice(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_elementwise_operators() {
        let a: Vector<f64> = Vector::from_vec(vec![1.0, 2.0, 3.0]);
        let b: Vector<f64> = Vector::from_vec(vec![4.0, 5.0, 6.0]);

        assert_eq!((&a + &b).as_slice(), &[5.0, 7.0, 9.0]);
        assert_eq!((&b - &a).as_slice(), &[3.0, 3.0, 3.0]);
        assert_eq!((&a * &b).as_slice(), &[4.0, 10.0, 18.0]);
        assert_eq!((&b / &a).as_slice(), &[4.0, 2.5, 2.0]);
        assert_eq!((-&a).as_slice(), &[-1.0, -2.0, -3.0]);
        assert_eq!((&a * 2.0).as_slice(), &[2.0, 4.0, 6.0]);
        assert_eq!((2.0 * &a).as_slice(), &[2.0, 4.0, 6.0]);
        assert_eq!((&a / 2.0).as_slice(), &[0.5, 1.0, 1.5]);

        let mut c = a.clone();
        c += &b;
        c -= b;
        assert_eq!(c, a);
    }

    #[test]
    #[should_panic(expected = "vector size mismatch")]
    fn test_size_mismatch_panics() {
        let a: Vector<f64> = Vector::zeros(2);
        let b: Vector<f64> = Vector::zeros(3);
        let _ = &a + &b;
    }

    #[test]
    fn test_sum_mean() {
        let v: Vector<f64> = Vector::from_vec(vec![1.0, 2.0, 3.0, 6.0]);
        assert_eq!(v.sum(), 12.0);
        assert_eq!(v.mean(), 3.0);

        let empty: Vector<f64> = Vector::zeros(0);
        assert_eq!(empty.mean(), 0.0);
    }

    #[test]
    fn test_random_is_seeded() {
        let a: Vector<f64> = Vector::random(16, 42);
        let b: Vector<f64> = Vector::random(16, 42);
        assert_eq!(a, b);
        assert!(a.iter().all(|&x| (0.0..1.0).contains(&x)));
    }

    #[test]
    fn test_display() {
        let v: Vector<f64> = Vector::from_vec(vec![1.0, 2.5]);
        assert_eq!(v.to_string(), "[1, 2.5]");
    }
}
