//! Ordinary least squares via the normal equations.

use super::{design_matrix, RegressionStatistics};
use crate::error::ModelError;
use crate::linalg::Vector;
use crate::real::Real;
use crate::table::ValueTable;

/// Ordinary least squares regression, `β = (XᵗX)⁻¹ Xᵗy`.
///
/// `fit` computes the coefficients together with R², adjusted R², standard
/// errors, t-values and p-values.
///
/// # Example
///
/// ```
/// use linstat::{LinearRegression, ValueTable, Vector};
///
/// let x = Vector::from_vec(vec![0.0, 1.0, 2.0, 3.0]);
/// let y = Vector::from_vec(vec![1.0, 3.0, 5.0, 7.0]);
/// let table: ValueTable<f64> = ValueTable::from_columns(vec![x]).unwrap();
///
/// let mut model = LinearRegression::new();
/// model.fit(&y, &table).unwrap();
///
/// assert!((model.coefficients()[0] - 1.0).abs() < 1e-10);
/// assert!((model.coefficients()[1] - 2.0).abs() < 1e-10);
/// assert!((model.r2() - 1.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinearRegression<T> {
    statistics: RegressionStatistics<T>,
    fitted: bool,
}

impl<T: Real> LinearRegression<T> {
    pub fn new() -> Self {
        Self {
            statistics: RegressionStatistics::default(),
            fitted: false,
        }
    }

    /// Fit `dependent` against the columns of `independent`.
    ///
    /// On error the previous fit is kept.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `independent` has no columns
    /// - `Linalg(DimensionMismatch)` if the row counts differ
    /// - `InsufficientSamples` if fewer than `k + 2` observations are given
    /// - `Linalg(SingularMatrix)` if `XᵗX` cannot be inverted
    pub fn fit(
        &mut self,
        dependent: &Vector<T>,
        independent: &ValueTable<T>,
    ) -> Result<(), ModelError> {
        let x = design_matrix(dependent, independent)?;
        let xt = x.transposed();
        let xtx_inv = (&xt * &x).inverted()?;
        let coefficients = &xtx_inv * &(&xt * dependent);

        let mut statistics = RegressionStatistics::summarize(&x, dependent, coefficients, Some(&xtx_inv));
        statistics.test_significance()?;

        log::debug!(
            "linear regression: {} observations, {} variables, r2 = {}",
            x.nrows(),
            independent.ncolumns(),
            statistics.r2()
        );

        self.statistics = statistics;
        self.fitted = true;
        Ok(())
    }

    /// Recompute t-values and p-values from the current fit.
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
}

impl_statistics_accessors!(LinearRegression);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LinalgError;
    use alloc::vec;

    fn simple_table() -> (Vector<f64>, ValueTable<f64>) {
        let x = Vector::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let y = Vector::from_vec(vec![2.0, 4.0, 5.0, 4.0, 5.0]);
        (y, ValueTable::from_columns(vec![x]).unwrap())
    }

    #[test]
    fn test_simple_regression_statistics() {
        let (y, table) = simple_table();
        let mut model = LinearRegression::new();
        model.fit(&y, &table).unwrap();

        assert!((model.coefficients()[0] - 2.2).abs() < 1e-10);
        assert!((model.coefficients()[1] - 0.6).abs() < 1e-10);
        assert_eq!(model.degrees_of_freedom(), 3);
        assert!((model.r2() - 0.6).abs() < 1e-10);
        assert!((model.adjusted_r2() - (1.0 - 0.4 * 4.0 / 3.0)).abs() < 1e-10);

        // se(slope) = sqrt(s² / Sxx) = sqrt(0.8 / 10)
        let se_slope = libm::sqrt(0.08);
        assert!((model.standard_errors()[1] - se_slope).abs() < 1e-10);
        assert!((model.t_values()[1] - 0.6 / se_slope).abs() < 1e-9);
        assert!(model.p_values()[1] > 0.1 && model.p_values()[1] < 0.15);
    }

    #[test]
    fn test_exact_recovery_two_variables() {
        let x1 = Vector::from_vec(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let x2 = Vector::from_vec(vec![1.0, -1.0, 4.0, 0.5, 2.0, -3.0]);
        let y: Vector<f64> = x1
            .iter()
            .zip(x2.iter())
            .map(|(&a, &b)| 2.0 + 3.0 * a - b)
            .collect();
        let table = ValueTable::from_columns(vec![x1, x2]).unwrap();

        let mut model = LinearRegression::new();
        model.fit(&y, &table).unwrap();

        let expected = [2.0, 3.0, -1.0];
        for (b, e) in model.coefficients().iter().zip(expected) {
            assert!((b - e).abs() < 1e-9);
        }
        assert!((model.r2() - 1.0).abs() < 1e-12);
        assert!((model.predict_row(&[10.0, 1.0]).unwrap() - 31.0).abs() < 1e-9);

        let predicted = model.predict(&table).unwrap();
        assert!((&predicted - &y).length() < 1e-9);
    }

    #[test]
    fn test_fit_is_idempotent() {
        let (y, table) = simple_table();
        let mut model = LinearRegression::new();
        model.fit(&y, &table).unwrap();
        let first = model.clone();
        model.fit(&y, &table).unwrap();
        assert_eq!(model, first);

        model.test().unwrap();
        assert_eq!(model, first);
    }

    #[test]
    fn test_collinear_columns_are_singular() {
        let x1 = Vector::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
        let x2 = &x1 * 2.0;
        let y = Vector::from_vec(vec![1.0, 0.0, 1.0, 0.0]);
        let table = ValueTable::from_columns(vec![x1, x2]).unwrap();

        let mut model: LinearRegression<f64> = LinearRegression::new();
        let result = model.fit(&y, &table);
        assert!(matches!(
            result,
            Err(ModelError::Linalg(LinalgError::SingularMatrix { .. }))
        ));
        assert!(!model.is_fitted());
    }

    #[test]
    fn test_unfitted_model() {
        let mut model: LinearRegression<f64> = LinearRegression::new();
        assert_eq!(model.test(), Err(ModelError::NotFitted));
        assert_eq!(model.predict_row(&[1.0]), Err(ModelError::NotFitted));
        assert!(model.coefficients().is_empty());
    }
}
