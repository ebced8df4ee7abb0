//! Dense row-major matrix.
//!
//! # Storage
//!
//! Elements live in a single flat buffer in row-major order: the element at
//! row `i`, column `j` is stored at `i * ncols + j`. Indexing with `m[i]`
//! yields row `i` as a slice, so `m[i][j]` addresses a single element.
//!
//! # Conformance
//!
//! Arithmetic operators (`+`, `-`, `*`) assert that their operands conform and
//! panic otherwise. Operations that can fail for numerical reasons, such as
//! inversion, return a [`LinalgError`] instead.

use alloc::vec::Vec;
use core::fmt;
use core::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};
use rand::distributions::uniform::SampleUniform;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::vector::Vector;
use crate::error::LinalgError;
use crate::real::Real;

/// Pivot magnitude below which a matrix is treated as singular.
pub const SINGULAR_THRESHOLD: f64 = 1e-10;

/// A dense matrix stored in row-major order.
///
/// # Example
///
/// ```
/// use linstat::Matrix;
///
/// let a: Matrix<f64> = Matrix::from_rows(&[[4.0, 7.0], [2.0, 6.0]]).unwrap();
/// let inv = a.inverted().unwrap();
/// let eye = &a * &inv;
/// assert!((eye[0][0] - 1.0).abs() < 1e-12);
/// assert!(eye[0][1].abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix<T> {
    nrows: usize,
    ncols: usize,
    /// Matrix data in row-major order
    data: Vec<T>,
}

impl<T: Real> Matrix<T> {
    /// Create a zero matrix.
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self::zeros(nrows, ncols)
    }

    /// Create a zero matrix.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self::constant(nrows, ncols, T::zero())
    }

    /// Create a matrix of ones.
    pub fn ones(nrows: usize, ncols: usize) -> Self {
        Self::constant(nrows, ncols, T::one())
    }

    /// Create a matrix with every element set to `value`.
    pub fn constant(nrows: usize, ncols: usize, value: T) -> Self {
        Self {
            nrows,
            ncols,
            data: alloc::vec![value; nrows * ncols],
        }
    }

    /// Create an n×n identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = T::one();
        }
        m
    }

    /// Create a square matrix with `diagonal` on its main diagonal.
    pub fn diagonal(diagonal: &Vector<T>) -> Self {
        let n = diagonal.len();
        let mut m = Self::zeros(n, n);
        for (i, &d) in diagonal.iter().enumerate() {
            m.data[i * n + i] = d;
        }
        m
    }

    /// Create a matrix from a flat row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `data.len() != nrows * ncols`.
    pub fn from_row_major(nrows: usize, ncols: usize, data: Vec<T>) -> Result<Self, LinalgError> {
        if data.len() != nrows * ncols {
            return Err(LinalgError::DimensionMismatch {
                expected: nrows * ncols,
                found: data.len(),
            });
        }
        Ok(Self { nrows, ncols, data })
    }

    /// Create a matrix from a sequence of rows.
    ///
    /// # Errors
    ///
    /// Returns `RaggedRows` if the rows are not all the same length.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self, LinalgError> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(nrows * ncols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != ncols {
                return Err(LinalgError::RaggedRows {
                    row: i,
                    expected: ncols,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { nrows, ncols, data })
    }

    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the matrix has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the row-major element buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get element at row i, column j.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        assert!(i < self.nrows && j < self.ncols, "Index out of bounds");
        self.data[i * self.ncols + j]
    }

    /// Set element at row i, column j.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        assert!(i < self.nrows && j < self.ncols, "Index out of bounds");
        self.data[i * self.ncols + j] = value;
    }

    /// Copy row `i` into a vector.
    pub fn row(&self, i: usize) -> Vector<T> {
        Vector::from_slice(&self[i])
    }

    /// Copy column `j` into a vector.
    pub fn column(&self, j: usize) -> Vector<T> {
        assert!(j < self.ncols, "Index out of bounds");
        (0..self.nrows).map(|i| self.data[i * self.ncols + j]).collect()
    }

    /// Overwrite row `i`.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != ncols`.
    pub fn set_row(&mut self, i: usize, values: &Vector<T>) {
        assert_eq!(values.len(), self.ncols, "row length mismatch");
        self[i].copy_from_slice(values.as_slice());
    }

    /// Swap two rows in place.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let n = self.ncols;
        for j in 0..n {
            self.data.swap(a * n + j, b * n + j);
        }
    }

    /// Returns true if the matrix has as many rows as columns.
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Returns true if the matrix is square and `|a_ij - a_ji|` stays within
    /// `tolerance` relative to the larger magnitude (absolute below 1).
    pub fn is_symmetric(&self, tolerance: T) -> bool {
        if !self.is_square() {
            return false;
        }
        for i in 0..self.nrows {
            for j in (i + 1)..self.ncols {
                let a = self.get(i, j);
                let b = self.get(j, i);
                let scale = T::one().max(a.abs()).max(b.abs());
                if (a - b).abs() > tolerance * scale {
                    return false;
                }
            }
        }
        true
    }

    /// Returns true if every off-diagonal element is exactly zero.
    pub fn is_diagonal(&self) -> bool {
        for i in 0..self.nrows {
            for j in 0..self.ncols {
                if i != j && self.get(i, j) != T::zero() {
                    return false;
                }
            }
        }
        true
    }

    /// Sum of the diagonal elements.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is not square.
    pub fn trace(&self) -> T {
        assert!(self.is_square(), "trace requires a square matrix");
        (0..self.nrows).map(|i| self.get(i, i)).sum()
    }

    /// Row index of the pivot for column `column`.
    ///
    /// Scans rows `column..nrows` in increasing order and returns the first row
    /// holding the largest absolute value in that column. If every candidate is
    /// zero, `column` itself is returned.
    pub fn pivot(&self, column: usize) -> usize {
        let mut max = T::zero();
        let mut k = column;
        for r in column..self.nrows {
            let abs = self.get(r, column).abs();
            if abs > max {
                max = abs;
                k = r;
            }
        }
        k
    }

    /// Transpose in place.
    pub fn transpose(&mut self) {
        *self = self.transposed();
    }

    /// Return the transpose.
    pub fn transposed(&self) -> Self {
        let mut result = Self::zeros(self.ncols, self.nrows);
        for i in 0..self.nrows {
            for j in 0..self.ncols {
                result.data[j * self.nrows + i] = self.data[i * self.ncols + j];
            }
        }
        result
    }

    /// Matrix product `self × other`.
    ///
    /// # Panics
    ///
    /// Panics if `self.ncols() != other.nrows()`.
    pub fn matmul(&self, other: &Self) -> Self {
        assert_eq!(
            self.ncols, other.nrows,
            "matrix size mismatch in multiplication"
        );
        let mut result = Self::zeros(self.nrows, other.ncols);
        for i in 0..self.nrows {
            for k in 0..self.ncols {
                let a_ik = self.data[i * self.ncols + k];
                if a_ik == T::zero() {
                    continue;
                }
                for j in 0..other.ncols {
                    result.data[i * other.ncols + j] += a_ik * other.data[k * other.ncols + j];
                }
            }
        }
        result
    }

    /// Matrix-vector product `self × v`.
    ///
    /// # Panics
    ///
    /// Panics if `self.ncols() != v.len()`.
    pub fn mul_vector(&self, v: &Vector<T>) -> Vector<T> {
        assert_eq!(self.ncols, v.len(), "matrix-vector size mismatch");
        (0..self.nrows)
            .map(|i| {
                self[i]
                    .iter()
                    .zip(v.iter())
                    .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
            })
            .collect()
    }

    /// Add a constant to the diagonal.
    pub fn add_diagonal(&mut self, lambda: T) {
        let n = self.nrows.min(self.ncols);
        for i in 0..n {
            self.data[i * self.ncols + i] += lambda;
        }
    }

    /// Invert in place by Gauss–Jordan elimination with partial pivoting.
    ///
    /// On failure the matrix is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `NotSquare` for rectangular input, `SingularMatrix` if a pivot
    /// magnitude falls below [`SINGULAR_THRESHOLD`].
    pub fn invert(&mut self) -> Result<(), LinalgError> {
        *self = self.inverted()?;
        Ok(())
    }

    /// Return the inverse, computed by Gauss–Jordan elimination with partial
    /// pivoting.
    ///
    /// # Errors
    ///
    /// Returns `NotSquare` for rectangular input, `SingularMatrix` if a pivot
    /// magnitude falls below [`SINGULAR_THRESHOLD`].
    pub fn inverted(&self) -> Result<Self, LinalgError> {
        if !self.is_square() {
            return Err(LinalgError::NotSquare {
                rows: self.nrows,
                cols: self.ncols,
            });
        }

        let n = self.nrows;
        let threshold = T::from_f64(SINGULAR_THRESHOLD);
        let mut work = self.clone();
        let mut result = Self::identity(n);

        for k in 0..n {
            let pivot_row = work.pivot(k);
            if work.get(pivot_row, k).abs() < threshold {
                log::error!("matrix inversion failed: singular pivot in column {}", k);
                return Err(LinalgError::SingularMatrix { column: k });
            }

            work.swap_rows(k, pivot_row);
            result.swap_rows(k, pivot_row);

            let diagonal = work.get(k, k);
            for c in 0..n {
                work[k][c] /= diagonal;
                result[k][c] /= diagonal;
            }

            let work_pivot: Vec<T> = work[k].to_vec();
            let result_pivot: Vec<T> = result[k].to_vec();
            for r in 0..n {
                if r == k {
                    continue;
                }
                let factor = work.get(r, k);
                if factor == T::zero() {
                    continue;
                }
                for c in 0..n {
                    work[r][c] -= factor * work_pivot[c];
                    result[r][c] -= factor * result_pivot[c];
                }
            }
        }

        Ok(result)
    }

    /// Determinant by Gaussian elimination with partial pivoting.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is not square.
    pub fn determinant(&self) -> T {
        assert!(self.is_square(), "determinant requires a square matrix");
        let n = self.nrows;
        let mut work = self.clone();
        let mut det = T::one();

        for k in 0..n {
            let pivot_row = work.pivot(k);
            if work.get(pivot_row, k) == T::zero() {
                return T::zero();
            }
            if pivot_row != k {
                work.swap_rows(k, pivot_row);
                det = -det;
            }

            let diagonal = work.get(k, k);
            det *= diagonal;

            let pivot: Vec<T> = work[k].to_vec();
            for r in (k + 1)..n {
                let factor = work.get(r, k) / diagonal;
                for c in (k + 1)..n {
                    work[r][c] -= factor * pivot[c];
                }
            }
        }

        det
    }
}

impl<T: Real + SampleUniform> Matrix<T> {
    /// Create a matrix of uniform samples in `[0, 1)` from a seeded generator.
    pub fn random(nrows: usize, ncols: usize, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let data = (0..nrows * ncols)
            .map(|_| rng.gen_range(T::zero()..T::one()))
            .collect();
        Self { nrows, ncols, data }
    }
}

impl<T> Index<usize> for Matrix<T> {
    type Output = [T];

    #[inline]
    fn index(&self, row: usize) -> &[T] {
        assert!(row < self.nrows, "Index out of bounds");
        &self.data[row * self.ncols..(row + 1) * self.ncols]
    }
}

impl<T> IndexMut<usize> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, row: usize) -> &mut [T] {
        assert!(row < self.nrows, "Index out of bounds");
        &mut self.data[row * self.ncols..(row + 1) * self.ncols]
    }
}

macro_rules! impl_matrix_elementwise {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl<T: Real> $assign_trait<&Matrix<T>> for Matrix<T> {
            fn $assign_method(&mut self, rhs: &Matrix<T>) {
                assert!(
                    self.nrows == rhs.nrows && self.ncols == rhs.ncols,
                    concat!("matrix size mismatch in ", stringify!($method))
                );
                for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
                    *a $op b;
                }
            }
        }

        impl<T: Real> $assign_trait<Matrix<T>> for Matrix<T> {
            fn $assign_method(&mut self, rhs: Matrix<T>) {
                *self $op &rhs;
            }
        }

        impl<T: Real> $trait<&Matrix<T>> for &Matrix<T> {
            type Output = Matrix<T>;

            fn $method(self, rhs: &Matrix<T>) -> Matrix<T> {
                let mut out = self.clone();
                out $op rhs;
                out
            }
        }

        impl<T: Real> $trait<&Matrix<T>> for Matrix<T> {
            type Output = Matrix<T>;

            fn $method(mut self, rhs: &Matrix<T>) -> Matrix<T> {
                self $op rhs;
                self
            }
        }

        impl<T: Real> $trait<Matrix<T>> for Matrix<T> {
            type Output = Matrix<T>;

            fn $method(mut self, rhs: Matrix<T>) -> Matrix<T> {
                self $op &rhs;
                self
            }
        }
    };
}

impl_matrix_elementwise!(Add, add, AddAssign, add_assign, +=);
impl_matrix_elementwise!(Sub, sub, SubAssign, sub_assign, -=);

impl<T: Real> Mul<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: &Matrix<T>) -> Matrix<T> {
        self.matmul(rhs)
    }
}

impl<T: Real> Mul<Matrix<T>> for Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: Matrix<T>) -> Matrix<T> {
        self.matmul(&rhs)
    }
}

impl<T: Real> Mul<&Matrix<T>> for Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: &Matrix<T>) -> Matrix<T> {
        self.matmul(rhs)
    }
}

impl<T: Real> Mul<&Vector<T>> for &Matrix<T> {
    type Output = Vector<T>;

    fn mul(self, rhs: &Vector<T>) -> Vector<T> {
        self.mul_vector(rhs)
    }
}

impl<T: Real> Mul<&Matrix<T>> for &Vector<T> {
    type Output = Vector<T>;

    /// Row vector times matrix.
    fn mul(self, rhs: &Matrix<T>) -> Vector<T> {
        assert_eq!(self.len(), rhs.nrows, "vector-matrix size mismatch");
        let mut result = Vector::zeros(rhs.ncols);
        for (i, &v) in self.iter().enumerate() {
            for (j, &m) in rhs[i].iter().enumerate() {
                result[j] += v * m;
            }
        }
        result
    }
}

impl<T: Real> MulAssign<T> for Matrix<T> {
    fn mul_assign(&mut self, rhs: T) {
        for x in self.data.iter_mut() {
            *x *= rhs;
        }
    }
}

impl<T: Real> DivAssign<T> for Matrix<T> {
    fn div_assign(&mut self, rhs: T) {
        for x in self.data.iter_mut() {
            *x /= rhs;
        }
    }
}

impl<T: Real> Mul<T> for Matrix<T> {
    type Output = Matrix<T>;

    fn mul(mut self, rhs: T) -> Matrix<T> {
        self *= rhs;
        self
    }
}

impl<T: Real> Mul<T> for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: T) -> Matrix<T> {
        self.clone() * rhs
    }
}

impl<T: Real> Div<T> for Matrix<T> {
    type Output = Matrix<T>;

    fn div(mut self, rhs: T) -> Matrix<T> {
        self /= rhs;
        self
    }
}

impl<T: Real> Div<T> for &Matrix<T> {
    type Output = Matrix<T>;

    fn div(self, rhs: T) -> Matrix<T> {
        self.clone() / rhs
    }
}

impl<T: Real> Neg for Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        self * -T::one()
    }
}

impl<T: Real> Neg for &Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        self.clone() * -T::one()
    }
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for i in 0..self.nrows {
            if i > 0 {
                writeln!(f, ",")?;
                write!(f, " ")?;
            }
            write!(f, "[")?;
            for j in 0..self.ncols {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.data[i * self.ncols + j])?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    fn assert_close(a: &Matrix<f64>, b: &Matrix<f64>, tol: f64) {
        assert_eq!(a.nrows(), b.nrows());
        assert_eq!(a.ncols(), b.ncols());
        for (x, y) in a.as_slice().iter().zip(b.as_slice()) {
            assert!((x - y).abs() < tol, "{} != {}", x, y);
        }
    }

    #[test]
    fn test_matrix_identity() {
        let eye: Matrix<f64> = Matrix::identity(3);

        assert_eq!(eye.get(0, 0), 1.0);
        assert_eq!(eye.get(1, 1), 1.0);
        assert_eq!(eye.get(2, 2), 1.0);

        assert_eq!(eye.get(0, 1), 0.0);
        assert_eq!(eye.get(1, 0), 0.0);
        assert!(eye.is_diagonal());
        assert_eq!(eye.trace(), 3.0);
    }

    #[test]
    fn test_matrix_get_set_and_index() {
        let mut m: Matrix<f64> = Matrix::zeros(2, 3);
        m.set(0, 1, 5.0);
        m[1][2] = 3.0;

        assert_eq!(m[0][1], 5.0);
        assert_eq!(m.get(1, 2), 3.0);
        assert_eq!(m.row(1).as_slice(), &[0.0, 0.0, 3.0]);
        assert_eq!(m.column(1).as_slice(), &[5.0, 0.0]);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let rows = vec![vec![1.0, 2.0], vec![3.0]];
        let result: Result<Matrix<f64>, _> = Matrix::from_rows(&rows);
        assert_eq!(
            result,
            Err(LinalgError::RaggedRows {
                row: 1,
                expected: 2,
                found: 1
            })
        );

        let bad = Matrix::<f64>::from_row_major(2, 2, vec![1.0, 2.0, 3.0]);
        assert!(matches!(bad, Err(LinalgError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_matrix_transpose() {
        let m: Matrix<f64> = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let t = m.transposed();

        assert_eq!(t.nrows(), 3);
        assert_eq!(t.ncols(), 2);
        assert_eq!(t[0][1], 4.0);
        assert_eq!(t[2][0], 3.0);

        let mut back = t.clone();
        back.transpose();
        assert_eq!(back, m);
    }

    #[test]
    fn test_matrix_multiply() {
        // | 1 2 |   | 5 6 |   | 19 22 |
        // | 3 4 | × | 7 8 | = | 43 50 |
        let a: Matrix<f64> = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let b: Matrix<f64> = Matrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]).unwrap();

        let c = &a * &b;

        assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
        assert_eq!(&a * &Matrix::identity(2), a);
    }

    #[test]
    fn test_matrix_vector_products() {
        let a: Matrix<f64> = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let v = Vector::from_vec(vec![1.0, 0.0, -1.0]);
        assert_eq!((&a * &v).as_slice(), &[-2.0, -2.0]);

        let w = Vector::from_vec(vec![1.0, 1.0]);
        assert_eq!((&w * &a).as_slice(), &[5.0, 7.0, 9.0]);
    }

    #[test]
    fn test_matrix_add_sub_scale() {
        let a: Matrix<f64> = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let b: Matrix<f64> = Matrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]).unwrap();

        assert_eq!((&a + &b).as_slice(), &[6.0, 8.0, 10.0, 12.0]);
        assert_eq!((&b - &a).as_slice(), &[4.0, 4.0, 4.0, 4.0]);
        assert_eq!((&a * 2.0).as_slice(), &[2.0, 4.0, 6.0, 8.0]);
        assert_eq!((&a / 2.0).as_slice(), &[0.5, 1.0, 1.5, 2.0]);
        assert_eq!((-&a).as_slice(), &[-1.0, -2.0, -3.0, -4.0]);
    }

    #[test]
    #[should_panic(expected = "matrix size mismatch")]
    fn test_nonconforming_multiply_panics() {
        let a: Matrix<f64> = Matrix::zeros(2, 3);
        let b: Matrix<f64> = Matrix::zeros(2, 3);
        let _ = &a * &b;
    }

    #[test]
    fn test_pivot_prefers_first_maximum() {
        let m: Matrix<f64> =
            Matrix::from_rows(&[[1.0, 0.0], [-3.0, 0.0], [3.0, 0.0], [2.0, 0.0]]).unwrap();
        assert_eq!(m.pivot(0), 1);

        // Rows above the pivot column are not candidates
        let m: Matrix<f64> = Matrix::from_rows(&[[0.0, 9.0], [0.0, 1.0], [0.0, -2.0]]).unwrap();
        assert_eq!(m.pivot(1), 2);

        // All-zero column falls back to the diagonal row
        let z: Matrix<f64> = Matrix::zeros(3, 3);
        assert_eq!(z.pivot(1), 1);
    }

    #[test]
    fn test_inversion_identity() {
        let a: Matrix<f64> = Matrix::from_rows(&[
            [2.0, -1.0, 0.0],
            [-1.0, 2.0, -1.0],
            [0.0, -1.0, 2.0],
        ])
        .unwrap();
        let inv = a.inverted().unwrap();

        assert_close(&(&a * &inv), &Matrix::identity(3), 1e-12);
        assert_close(&(&inv * &a), &Matrix::identity(3), 1e-12);
    }

    #[test]
    fn test_inversion_requires_pivoting() {
        // Zero in the leading position forces a row swap
        let mut a: Matrix<f64> = Matrix::from_rows(&[[0.0, 1.0], [2.0, 3.0]]).unwrap();
        let original = a.clone();
        a.invert().unwrap();

        assert_close(&(&original * &a), &Matrix::identity(2), 1e-12);
    }

    #[test]
    fn test_singular_inversion_leaves_matrix_untouched() {
        let mut a: Matrix<f64> = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
        let before = a.clone();

        let result = a.invert();
        assert_eq!(result, Err(LinalgError::SingularMatrix { column: 1 }));
        assert_eq!(a, before);

        let rect: Matrix<f64> = Matrix::zeros(2, 3);
        assert_eq!(
            rect.inverted(),
            Err(LinalgError::NotSquare { rows: 2, cols: 3 })
        );
    }

    #[test]
    fn test_determinant() {
        let a: Matrix<f64> = Matrix::from_rows(&[[4.0, 7.0], [2.0, 6.0]]).unwrap();
        assert!((a.determinant() - 10.0).abs() < 1e-12);

        let b: Matrix<f64> =
            Matrix::from_rows(&[[0.0, 2.0, 1.0], [1.0, 0.0, 0.0], [3.0, 1.0, 1.0]]).unwrap();
        assert!((b.determinant() + 1.0).abs() < 1e-12);

        let singular: Matrix<f64> = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
        assert!(singular.determinant().abs() < 1e-12);
    }

    #[test]
    fn test_is_symmetric() {
        let s: Matrix<f64> = Matrix::from_rows(&[[1.0, 0.5], [0.5, 1.0]]).unwrap();
        assert!(s.is_symmetric(1e-10));

        let a: Matrix<f64> = Matrix::from_rows(&[[1.0, 0.5], [0.4, 1.0]]).unwrap();
        assert!(!a.is_symmetric(1e-10));

        let r: Matrix<f64> = Matrix::zeros(2, 3);
        assert!(!r.is_symmetric(1e-10));
    }

    #[test]
    fn test_diagonal_and_add_diagonal() {
        let mut d: Matrix<f64> = Matrix::diagonal(&Vector::from_vec(vec![1.0, 2.0, 3.0]));
        assert!(d.is_diagonal());
        d.add_diagonal(0.5);
        assert_eq!(d.get(2, 2), 3.5);
        assert_eq!(d.get(0, 1), 0.0);
    }

    #[test]
    fn test_display() {
        let m: Matrix<f64> = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        assert_eq!(m.to_string(), "[[1, 2],\n [3, 4]]");
    }
}
