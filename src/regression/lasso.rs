//! L1-penalised regression by cyclic coordinate descent.
//!
//! Each sweep visits the non-intercept coefficients in order. For coefficient
//! `j` the partial residual `r_j = y - Xβ` (with `β_j` zeroed) is projected on
//! column `X_j` and soft-thresholded:
//!
//! ```text
//! β_j = S(X_j · r_j, λ) / ‖X_j‖²,    λ = complexity · n
//! ```
//!
//! After every coordinate update the intercept is reset to the mean of
//! `y - Σ_{j≥1} X_j β_j`. A residual vector is kept up to date so a sweep costs
//! `O(n·k)`.

use super::{design_matrix, RegressionStatistics};
use crate::error::ModelError;
use crate::linalg::{Matrix, Vector};
use crate::real::Real;
use crate::table::ValueTable;

/// `sign(x) · max(|x| - λ, 0)`.
#[inline]
pub fn soft_threshold<T: Real>(x: T, lambda: T) -> T {
    if x > lambda {
        x - lambda
    } else if x < -lambda {
        x + lambda
    } else {
        T::zero()
    }
}

/// Configuration for [`LassoRegression`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LassoConfig<T> {
    /// L1 penalty multiplier; the effective penalty is `complexity · n`
    pub complexity: T,
    /// Stored and reported only; the fit does not rescale the inputs
    pub normalize: bool,
    /// Number of coordinate-descent sweeps
    pub max_iterations: usize,
    /// Stop early once no coefficient moves by more than this in a sweep
    pub tolerance: Option<T>,
}

impl<T: Real> Default for LassoConfig<T> {
    fn default() -> Self {
        Self {
            complexity: T::one(),
            normalize: false,
            max_iterations: 100, // Fixed sweep count
            tolerance: None,
        }
    }
}

/// Lasso regression.
///
/// `fit` estimates coefficients, R², adjusted R² and standard errors. The
/// standard errors reuse the least squares formula and are approximate for a
/// penalised estimator. `test` then derives t-values and p-values.
#[derive(Debug, Clone, PartialEq)]
pub struct LassoRegression<T> {
    config: LassoConfig<T>,
    statistics: RegressionStatistics<T>,
    fitted: bool,
    sweeps: usize,
}

impl<T: Real> Default for LassoRegression<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Real> LassoRegression<T> {
    pub fn new() -> Self {
        Self::with_config(LassoConfig::default())
    }

    pub fn with_config(config: LassoConfig<T>) -> Self {
        Self {
            config,
            statistics: RegressionStatistics::default(),
            fitted: false,
            sweeps: 0,
        }
    }

    pub fn config(&self) -> &LassoConfig<T> {
        &self.config
    }

    pub fn complexity(&self) -> T {
        self.config.complexity
    }

    pub fn set_complexity(&mut self, complexity: T) {
        self.config.complexity = complexity;
    }

    pub fn normalize(&self) -> bool {
        self.config.normalize
    }

    pub fn set_normalize(&mut self, normalize: bool) {
        self.config.normalize = normalize;
    }

    /// Sweeps performed by the last fit.
    pub fn sweeps(&self) -> usize {
        self.sweeps
    }

    /// Fit `dependent` against the columns of `independent`.
    ///
    /// On error the previous fit is kept.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for a negative or non-finite complexity, or a table
    ///   without columns
    /// - `Linalg(DimensionMismatch)` if the row counts differ
    /// - `InsufficientSamples` if fewer than `k + 2` observations are given
    ///
    /// Collinear columns are not an error: the coefficients and R² are kept,
    /// and the standard errors (then t-values and p-values) are NaN.
    pub fn fit(
        &mut self,
        dependent: &Vector<T>,
        independent: &ValueTable<T>,
    ) -> Result<(), ModelError> {
        let complexity = self.config.complexity;
        if !(complexity >= T::zero() && complexity.is_finite()) {
            return Err(ModelError::InvalidArgument(
                "complexity must be non-negative and finite",
            ));
        }

        let x = design_matrix(dependent, independent)?;
        let (coefficients, sweeps) = self.coordinate_descent(&x, dependent);

        let xt = x.transposed();
        let xtx_inv = match (&xt * &x).inverted() {
            Ok(inverse) => Some(inverse),
            Err(e) => {
                log::warn!("lasso regression: standard errors unavailable ({})", e);
                None
            }
        };
        let statistics =
            RegressionStatistics::summarize(&x, dependent, coefficients, xtx_inv.as_ref());

        log::debug!(
            "lasso regression: {} sweeps, {} of {} coefficients zero, r2 = {}",
            sweeps,
            statistics
                .coefficients()
                .iter()
                .skip(1)
                .filter(|&&b| b == T::zero())
                .count(),
            independent.ncolumns(),
            statistics.r2()
        );

        self.statistics = statistics;
        self.sweeps = sweeps;
        self.fitted = true;
        Ok(())
    }

    /// Compute t-values and p-values for the fitted coefficients.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` before a successful `fit`.
    pub fn test(&mut self) -> Result<(), ModelError> {
        if !self.fitted {
            return Err(ModelError::NotFitted);
        }
        self.statistics.test_significance()
    }

    fn coordinate_descent(&self, x: &Matrix<T>, y: &Vector<T>) -> (Vector<T>, usize) {
        let n = x.nrows();
        let p = x.ncols();
        let lambda = self.config.complexity * T::from_usize(n);

        let column_norms: Vector<T> = (0..p)
            .map(|j| (0..n).map(|i| x[i][j] * x[i][j]).sum::<T>())
            .collect();

        let mut beta = Vector::zeros(p);
        beta[0] = y.mean();
        let mut residual = y - &Vector::constant(n, beta[0]);

        let mut sweeps = 0;
        while sweeps < self.config.max_iterations {
            sweeps += 1;
            let mut max_change = T::zero();

            for j in 1..p {
                let old = beta[j];
                // X_j · r_j where r_j adds back this coefficient's contribution
                let rho: T = (0..n).map(|i| x[i][j] * (residual[i] + x[i][j] * old)).sum();
                let new = if column_norms[j] == T::zero() {
                    T::zero()
                } else {
                    soft_threshold(rho, lambda) / column_norms[j]
                };

                let change = new - old;
                if change != T::zero() {
                    for i in 0..n {
                        residual[i] -= x[i][j] * change;
                    }
                    beta[j] = new;
                }
                max_change = max_change.max(change.abs());

                let shift = residual.mean();
                if shift != T::zero() {
                    beta[0] += shift;
                    for r in residual.as_mut_slice() {
                        *r -= shift;
                    }
                }
                max_change = max_change.max(shift.abs());
            }

            if let Some(tolerance) = self.config.tolerance {
                if max_change < tolerance {
                    break;
                }
            }
        }

        (beta, sweeps)
    }
}

impl_statistics_accessors!(LassoRegression);
