//! Linear models with an intercept.
//!
//! Both estimators take the dependent variable as a [`Vector`] and the
//! independent variables as the columns of a [`ValueTable`]. Internally the
//! design matrix `X` has a leading column of ones, so coefficient 0 is always
//! the intercept and coefficient `j` belongs to table column `j - 1`.
//!
//! Goodness of fit and per-coefficient significance are shared through
//! [`RegressionStatistics`]:
//!
//! - `dof = n - k - 1` for `n` observations and `k` independent variables
//! - `R² = 1 - RSS / TSS`, `adjusted R² = 1 - (1 - R²)(n - 1) / dof`
//! - `se_i = sqrt(RSS / dof · (XᵗX)⁻¹_ii)`
//! - `t_i = β_i / se_i` with a two-sided Student-t p-value

use alloc::vec::Vec;

use crate::distribution::StudentTDistribution;
use crate::error::{LinalgError, ModelError};
use crate::linalg::{Matrix, Vector};
use crate::real::Real;
use crate::stats::OnlineStats;
use crate::table::ValueTable;

/// Fit summary shared by the regression models.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegressionStatistics<T> {
    coefficients: Vector<T>,
    degrees_of_freedom: usize,
    r2: T,
    adjusted_r2: T,
    standard_errors: Vector<T>,
    t_values: Vector<T>,
    p_values: Vector<T>,
}

impl<T: Real> RegressionStatistics<T> {
    /// Coefficients, intercept first.
    pub fn coefficients(&self) -> &Vector<T> {
        &self.coefficients
    }

    /// Residual degrees of freedom, `n - k - 1`.
    pub fn degrees_of_freedom(&self) -> usize {
        self.degrees_of_freedom
    }

    /// Coefficient of determination, `1 - RSS / TSS`.
    pub fn r2(&self) -> T {
        self.r2
    }

    /// R² corrected for the number of independent variables.
    pub fn adjusted_r2(&self) -> T {
        self.adjusted_r2
    }

    /// Standard error per coefficient, NaN where `XᵗX` was singular.
    pub fn standard_errors(&self) -> &Vector<T> {
        &self.standard_errors
    }

    /// Empty until significance has been tested.
    pub fn t_values(&self) -> &Vector<T> {
        &self.t_values
    }

    /// Empty until significance has been tested.
    pub fn p_values(&self) -> &Vector<T> {
        &self.p_values
    }

    /// Compute residual statistics for `coefficients` on design matrix `x`.
    ///
    /// `xtx_inv` is `(XᵗX)⁻¹`, used for the coefficient standard errors.
    /// Without it every standard error is NaN.
    fn summarize(
        x: &Matrix<T>,
        y: &Vector<T>,
        coefficients: Vector<T>,
        xtx_inv: Option<&Matrix<T>>,
    ) -> Self {
        let n = x.nrows();
        let dof = n - x.ncols();

        let fitted = x * &coefficients;
        let residuals = y - &fitted;
        let rss = residuals.squared_length();

        let mut y_stats = OnlineStats::new(1);
        for &yi in y.iter() {
            y_stats.update(&[yi]);
        }
        let tss = y_stats.sum_of_squares()[0];

        let r2 = if tss > T::zero() {
            T::one() - rss / tss
        } else if rss == T::zero() {
            T::one()
        } else {
            T::zero()
        };
        let adjusted_r2 =
            T::one() - (T::one() - r2) * T::from_usize(n - 1) / T::from_usize(dof);

        let residual_variance = rss / T::from_usize(dof);
        let standard_errors = match xtx_inv {
            Some(inverse) => (0..coefficients.len())
                .map(|i| (residual_variance * inverse.get(i, i)).abs().sqrt())
                .collect(),
            None => Vector::constant(coefficients.len(), T::nan()),
        };

        Self {
            coefficients,
            degrees_of_freedom: dof,
            r2,
            adjusted_r2,
            standard_errors,
            t_values: Vector::new(0),
            p_values: Vector::new(0),
        }
    }

    /// Fill `t_values` and `p_values` from the coefficients and standard errors.
    fn test_significance(&mut self) -> Result<(), ModelError> {
        let dist = StudentTDistribution::new(self.degrees_of_freedom as f64)?;

        let (t_values, p_values): (Vec<T>, Vec<T>) = self
            .coefficients
            .iter()
            .zip(self.standard_errors.iter())
            .map(|(&coef, &se)| {
                if se == T::zero() {
                    if coef == T::zero() {
                        (T::zero(), T::one())
                    } else {
                        (coef.signum() * T::infinity(), T::zero())
                    }
                } else {
                    let t = coef / se;
                    (t, T::from_f64(dist.two_sided_p_value(t.as_f64())))
                }
            })
            .unzip();

        self.t_values = Vector::from_vec(t_values);
        self.p_values = Vector::from_vec(p_values);
        Ok(())
    }
}

/// Build `X = [1 | independent]` after validating shapes.
fn design_matrix<T: Real>(
    dependent: &Vector<T>,
    independent: &ValueTable<T>,
) -> Result<Matrix<T>, ModelError> {
    let k = independent.ncolumns();
    if k == 0 {
        return Err(ModelError::InvalidArgument(
            "at least one independent variable is required",
        ));
    }
    let n = independent.nrows();
    if dependent.len() != n {
        return Err(LinalgError::DimensionMismatch {
            expected: n,
            found: dependent.len(),
        }
        .into());
    }
    if n < k + 2 {
        return Err(ModelError::InsufficientSamples {
            required: k + 2,
            found: n,
        });
    }

    let mut x = Matrix::ones(n, k + 1);
    for (j, column) in independent.columns().iter().enumerate() {
        for (i, &value) in column.iter().enumerate() {
            x[i][j + 1] = value;
        }
    }
    Ok(x)
}

/// Evaluate `β₀ + Σ β_j x_j` for one observation.
fn predict_with<T: Real>(coefficients: &Vector<T>, row: &[T]) -> Result<T, ModelError> {
    if coefficients.is_empty() {
        return Err(ModelError::NotFitted);
    }
    if row.len() + 1 != coefficients.len() {
        return Err(LinalgError::DimensionMismatch {
            expected: coefficients.len() - 1,
            found: row.len(),
        }
        .into());
    }
    Ok(row
        .iter()
        .zip(coefficients.iter().skip(1))
        .fold(coefficients[0], |acc, (&x, &b)| acc + x * b))
}

fn predict_table<T: Real>(
    coefficients: &Vector<T>,
    independent: &ValueTable<T>,
) -> Result<Vector<T>, ModelError> {
    (0..independent.nrows())
        .map(|i| predict_with(coefficients, independent.row(i).as_slice()))
        .collect::<Result<Vec<T>, ModelError>>()
        .map(Vector::from_vec)
}

/// Accessors every model forwards to its [`RegressionStatistics`].
macro_rules! impl_statistics_accessors {
    ($model:ident) => {
        impl<T: $crate::real::Real> $model<T> {
            /// Fit summary of the last successful `fit`.
            pub fn statistics(&self) -> &$crate::regression::RegressionStatistics<T> {
                &self.statistics
            }

            /// Returns true once `fit` has succeeded.
            pub fn is_fitted(&self) -> bool {
                self.fitted
            }

            /// Coefficients, intercept first.
            pub fn coefficients(&self) -> &$crate::linalg::Vector<T> {
                self.statistics.coefficients()
            }

            /// Residual degrees of freedom, `n - k - 1`.
            pub fn degrees_of_freedom(&self) -> usize {
                self.statistics.degrees_of_freedom()
            }

            /// Coefficient of determination.
            pub fn r2(&self) -> T {
                self.statistics.r2()
            }

            /// Adjusted coefficient of determination.
            pub fn adjusted_r2(&self) -> T {
                self.statistics.adjusted_r2()
            }

            /// Standard error per coefficient.
            pub fn standard_errors(&self) -> &$crate::linalg::Vector<T> {
                self.statistics.standard_errors()
            }

            /// t statistic per coefficient, empty until tested.
            pub fn t_values(&self) -> &$crate::linalg::Vector<T> {
                self.statistics.t_values()
            }

            /// Two-sided p-value per coefficient, empty until tested.
            pub fn p_values(&self) -> &$crate::linalg::Vector<T> {
                self.statistics.p_values()
            }

            /// Predict the dependent variable for one observation.
            ///
            /// # Errors
            ///
            /// `NotFitted` before `fit`, `DimensionMismatch` if `row` does not
            /// hold one value per independent variable.
            pub fn predict_row(&self, row: &[T]) -> Result<T, $crate::error::ModelError> {
                if !self.fitted {
                    return Err($crate::error::ModelError::NotFitted);
                }
                $crate::regression::predict_with(self.statistics.coefficients(), row)
            }

            /// Predict the dependent variable for every row of `independent`.
            pub fn predict(
                &self,
                independent: &$crate::table::ValueTable<T>,
            ) -> Result<$crate::linalg::Vector<T>, $crate::error::ModelError> {
                if !self.fitted {
                    return Err($crate::error::ModelError::NotFitted);
                }
                $crate::regression::predict_table(self.statistics.coefficients(), independent)
            }
        }
    };
}

mod lasso;
mod linear;

pub use lasso::{soft_threshold, LassoConfig, LassoRegression};
pub use linear::LinearRegression;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_design_matrix_layout() {
        let y: Vector<f64> = Vector::from_vec(vec![1.0, 2.0, 3.0]);
        let table = ValueTable::from_columns(vec![Vector::from_vec(vec![4.0, 5.0, 6.0])]).unwrap();
        let x = design_matrix(&y, &table).unwrap();

        assert_eq!(x.nrows(), 3);
        assert_eq!(x.ncols(), 2);
        assert_eq!(x.column(0).as_slice(), &[1.0, 1.0, 1.0]);
        assert_eq!(x.column(1).as_slice(), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_design_matrix_validation() {
        let y: Vector<f64> = Vector::from_vec(vec![1.0, 2.0, 3.0]);
        let short = ValueTable::from_columns(vec![Vector::from_vec(vec![1.0, 2.0])]).unwrap();
        assert_eq!(
            design_matrix(&y, &short),
            Err(ModelError::Linalg(LinalgError::DimensionMismatch {
                expected: 2,
                found: 3
            }))
        );

        let empty: ValueTable<f64> = ValueTable::new();
        assert!(matches!(
            design_matrix(&y, &empty),
            Err(ModelError::InvalidArgument(_))
        ));

        let wide = ValueTable::from_columns(vec![Vector::zeros(3), Vector::ones(3)]).unwrap();
        assert_eq!(
            design_matrix(&y, &wide),
            Err(ModelError::InsufficientSamples {
                required: 4,
                found: 3
            })
        );
    }

    #[test]
    fn test_zero_standard_error_significance() {
        let mut stats: RegressionStatistics<f64> = RegressionStatistics {
            coefficients: Vector::from_vec(vec![0.0, 2.0, -1.0]),
            degrees_of_freedom: 5,
            standard_errors: Vector::from_vec(vec![0.0, 0.0, 0.5]),
            ..Default::default()
        };
        stats.test_significance().unwrap();

        assert_eq!(stats.t_values()[0], 0.0);
        assert_eq!(stats.p_values()[0], 1.0);
        assert_eq!(stats.t_values()[1], f64::INFINITY);
        assert_eq!(stats.p_values()[1], 0.0);
        assert!((stats.t_values()[2] + 2.0).abs() < 1e-12);
        assert!(stats.p_values()[2] > 0.0 && stats.p_values()[2] < 0.2);
    }

    #[test]
    fn test_predict_with_checks_width() {
        let coef: Vector<f64> = Vector::from_vec(vec![1.0, 2.0]);
        assert_eq!(predict_with(&coef, &[3.0]), Ok(7.0));
        assert!(predict_with(&coef, &[3.0, 4.0]).is_err());
        assert_eq!(
            predict_with(&Vector::new(0), &[1.0]),
            Err(ModelError::NotFitted)
        );
    }
}
