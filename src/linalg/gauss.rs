//! Direct solver for dense linear systems.
//!
//! [`GaussEliminationSolver`] reduces `[A | b]` by Gauss–Jordan elimination with
//! partial (row) pivoting. Each pivot column is normalised and then eliminated
//! from every other row, so after the last column the right-hand side holds the
//! solution.

use core::ops::Deref;

use super::matrix::{Matrix, SINGULAR_THRESHOLD};
use super::vector::Vector;
use crate::error::LinalgError;
use crate::real::Real;

/// Gauss–Jordan solver for `A·x = b`.
///
/// The solver owns the most recent solution and dereferences to it, so it can
/// be used wherever a `&Vector<T>` is expected.
///
/// # Example
///
/// ```
/// use linstat::{GaussEliminationSolver, Matrix, Vector};
///
/// let a: Matrix<f64> = Matrix::from_rows(&[[2.0, 1.0], [1.0, 3.0]]).unwrap();
/// let b = Vector::from_vec(vec![3.0, 5.0]);
///
/// let solver = GaussEliminationSolver::from_system(&a, &b).unwrap();
/// assert!((solver[0] - 0.8).abs() < 1e-12);
/// assert!((solver[1] - 1.4).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GaussEliminationSolver<T> {
    solution: Vector<T>,
}

impl<T: Real> GaussEliminationSolver<T> {
    /// Create a solver with an empty solution.
    pub fn new() -> Self {
        Self {
            solution: Vector::new(0),
        }
    }

    /// Create a solver and solve `a·x = b` immediately.
    pub fn from_system(a: &Matrix<T>, b: &Vector<T>) -> Result<Self, LinalgError> {
        let mut solver = Self::new();
        solver.solve(a, b)?;
        Ok(solver)
    }

    /// Solve `a·x = b`, replacing the held solution.
    ///
    /// # Errors
    ///
    /// - `Empty` if `a` has no elements
    /// - `NotSquare` if `a` is not square
    /// - `DimensionMismatch` if `b.len() != a.nrows()`
    /// - `SingularMatrix` if a pivot magnitude falls below
    ///   [`SINGULAR_THRESHOLD`]; the previous solution is kept
    pub fn solve(&mut self, a: &Matrix<T>, b: &Vector<T>) -> Result<&Vector<T>, LinalgError> {
        if a.is_empty() {
            return Err(LinalgError::Empty);
        }
        if !a.is_square() {
            return Err(LinalgError::NotSquare {
                rows: a.nrows(),
                cols: a.ncols(),
            });
        }
        let n = a.nrows();
        if b.len() != n {
            return Err(LinalgError::DimensionMismatch {
                expected: n,
                found: b.len(),
            });
        }

        let threshold = T::from_f64(SINGULAR_THRESHOLD);
        let mut m = a.clone();
        let mut x = b.clone();

        for k in 0..n {
            let pivot_row = m.pivot(k);
            let pivot = m.get(pivot_row, k);
            if pivot.abs() < threshold {
                log::error!(
                    "gauss elimination: matrix is singular (pivot {} in column {})",
                    pivot,
                    k
                );
                return Err(LinalgError::SingularMatrix { column: k });
            }

            if pivot_row != k {
                m.swap_rows(k, pivot_row);
                x.swap_elements(k, pivot_row);
            }

            for c in 0..n {
                m[k][c] /= pivot;
            }
            x[k] /= pivot;

            let row_k = m.row(k);
            let x_k = x[k];
            for r in 0..n {
                if r == k {
                    continue;
                }
                let factor = m.get(r, k);
                if factor == T::zero() {
                    continue;
                }
                for c in 0..n {
                    m[r][c] -= factor * row_k[c];
                }
                x[r] -= factor * x_k;
            }
        }

        self.solution = x;
        Ok(&self.solution)
    }

    /// The most recent solution.
    pub fn solution(&self) -> &Vector<T> {
        &self.solution
    }

    /// Consume the solver, returning the solution.
    pub fn into_solution(self) -> Vector<T> {
        self.solution
    }
}

impl<T> Deref for GaussEliminationSolver<T> {
    type Target = Vector<T>;

    fn deref(&self) -> &Vector<T> {
        &self.solution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_solve_3x3() {
        // x = (1, -2, 3)
        let a: Matrix<f64> = Matrix::from_rows(&[
            [2.0, 1.0, -1.0],
            [-3.0, -1.0, 2.0],
            [-2.0, 1.0, 2.0],
        ])
        .unwrap();
        let b = Vector::from_vec(vec![-3.0, 5.0, 2.0]);

        let mut solver = GaussEliminationSolver::new();
        let x = solver.solve(&a, &b).unwrap();

        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] + 2.0).abs() < 1e-12);
        assert!((x[2] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_solve_needs_row_swap() {
        let a: Matrix<f64> = Matrix::from_rows(&[[0.0, 1.0], [1.0, 0.0]]).unwrap();
        let b = Vector::from_vec(vec![4.0, 5.0]);

        let solver = GaussEliminationSolver::from_system(&a, &b).unwrap();
        assert_eq!(solver.as_slice(), &[5.0, 4.0]);
    }

    #[test]
    fn test_singular_keeps_previous_solution() {
        let good: Matrix<f64> = Matrix::identity(2);
        let b = Vector::from_vec(vec![1.0, 2.0]);
        let mut solver = GaussEliminationSolver::from_system(&good, &b).unwrap();

        let singular: Matrix<f64> = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
        let result = solver.solve(&singular, &Vector::from_vec(vec![3.0, 6.0]));

        assert_eq!(result, Err(LinalgError::SingularMatrix { column: 1 }));
        assert_eq!(solver.solution().as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn test_validation_errors() {
        let mut solver: GaussEliminationSolver<f64> = GaussEliminationSolver::new();
        let rect = Matrix::zeros(2, 3);
        assert_eq!(
            solver.solve(&rect, &Vector::zeros(2)),
            Err(LinalgError::NotSquare { rows: 2, cols: 3 })
        );

        let sq = Matrix::identity(3);
        assert_eq!(
            solver.solve(&sq, &Vector::zeros(2)),
            Err(LinalgError::DimensionMismatch {
                expected: 3,
                found: 2
            })
        );

        assert_eq!(
            solver.solve(&Matrix::zeros(0, 0), &Vector::zeros(0)),
            Err(LinalgError::Empty)
        );
        assert!(solver.is_empty());
    }

    #[test]
    fn test_solve_f32() {
        let a: Matrix<f32> = Matrix::from_rows(&[[4.0, 1.0], [1.0, 3.0]]).unwrap();
        let b = Vector::from_vec(vec![1.0f32, 2.0]);
        let solver = GaussEliminationSolver::from_system(&a, &b).unwrap();

        let residual = &(&a * solver.solution()) - &b;
        assert!(residual.length() < 1e-5);
    }
}
