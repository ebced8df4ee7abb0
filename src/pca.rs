//! Principal component analysis.
//!
//! The covariance matrix of the input columns is accumulated in a single
//! Welford pass ([`OnlineCovariance`]) and decomposed on the symmetric eigen
//! path. Components are the leading eigenvectors, ordered by explained
//! variance.

use crate::error::{LinalgError, ModelError};
use crate::linalg::{EigenConfig, EigenDecomposer, Matrix, MatrixKind, Vector};
use crate::real::Real;
use crate::stats::{OnlineCovariance, OnlineStats};

/// Principal component analysis on row-major data (rows = observations).
///
/// # Example
///
/// ```
/// use linstat::{Matrix, PrincipalComponentAnalysis};
///
/// let data: Matrix<f64> = Matrix::from_rows(&[
///     [1.0, 2.1],
///     [2.0, 3.9],
///     [3.0, 6.2],
///     [4.0, 7.8],
/// ])
/// .unwrap();
///
/// let mut pca = PrincipalComponentAnalysis::new(1);
/// let scores = pca.fit_transform(&data).unwrap();
///
/// assert_eq!(scores.ncols(), 1);
/// assert!(pca.explained_variance_ratio()[0] > 0.99);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PrincipalComponentAnalysis<T> {
    /// Requested component count, 0 = keep all
    requested: usize,
    number_of_components: usize,
    /// Row i = i-th principal axis
    components: Matrix<T>,
    explained_variance: Vector<T>,
    explained_variance_ratio: Vector<T>,
    mean: Vector<T>,
    eigen_config: EigenConfig,
    fitted: bool,
}

impl<T: Real> Default for PrincipalComponentAnalysis<T> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<T: Real> PrincipalComponentAnalysis<T> {
    /// Create an unfitted model keeping `number_of_components` components
    /// (0 keeps all of them).
    pub fn new(number_of_components: usize) -> Self {
        Self {
            requested: number_of_components,
            number_of_components,
            components: Matrix::zeros(0, 0),
            explained_variance: Vector::new(0),
            explained_variance_ratio: Vector::new(0),
            mean: Vector::new(0),
            eigen_config: EigenConfig::default(),
            fitted: false,
        }
    }

    /// Use `config` for the covariance eigen decomposition.
    pub fn with_eigen_config(mut self, config: EigenConfig) -> Self {
        self.eigen_config = config;
        self
    }

    /// Fit the principal axes of `data`.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `data` has no columns
    /// - `InsufficientSamples` with fewer than two rows
    pub fn fit(&mut self, data: &Matrix<T>) -> Result<(), ModelError> {
        let (n, p) = (data.nrows(), data.ncols());
        if p == 0 {
            return Err(ModelError::InvalidArgument("data has no columns"));
        }
        if n < 2 {
            return Err(ModelError::InsufficientSamples {
                required: 2,
                found: n,
            });
        }

        let mut accumulator = OnlineCovariance::new(p);
        for i in 0..n {
            accumulator.update(&data[i]);
        }
        let covariance = accumulator.covariance();

        let eigen =
            EigenDecomposer::with_config(&covariance, MatrixKind::Symmetric, self.eigen_config)?;

        let k = if self.requested == 0 {
            p
        } else if self.requested > p {
            log::warn!(
                "pca: {} components requested but data has {} variables; keeping {}",
                self.requested,
                p,
                p
            );
            p
        } else {
            self.requested
        };

        let eigenvalues = eigen.eigenvalues();
        let total = eigenvalues.sum();
        let mut components = Matrix::zeros(k, p);
        let mut explained_variance = Vector::zeros(k);
        let mut explained_variance_ratio = Vector::zeros(k);
        for i in 0..k {
            components.set_row(i, &eigen.eigenvector(i));
            explained_variance[i] = eigenvalues[i];
            if total != T::zero() {
                explained_variance_ratio[i] = eigenvalues[i] / total;
            }
        }

        log::debug!(
            "pca: {} observations, {} variables, {} components",
            n,
            p,
            k
        );

        self.number_of_components = k;
        self.components = components;
        self.explained_variance = explained_variance;
        self.explained_variance_ratio = explained_variance_ratio;
        self.mean = accumulator.mean();
        self.fitted = true;
        Ok(())
    }

    /// Project `data` onto the principal axes.
    ///
    /// `data` is centred by its own column means, computed afresh on every
    /// call. An unfitted model is first fitted on `data`.
    ///
    /// # Errors
    ///
    /// Returns the `fit` errors, or `Linalg(DimensionMismatch)` if `data` has a
    /// different number of columns than the fitted model.
    pub fn transform(&mut self, data: &Matrix<T>) -> Result<Matrix<T>, ModelError> {
        if !self.fitted {
            self.fit(data)?;
        }

        let p = self.components.ncols();
        if data.ncols() != p {
            return Err(LinalgError::DimensionMismatch {
                expected: p,
                found: data.ncols(),
            }
            .into());
        }

        let mut stats = OnlineStats::new(p);
        for i in 0..data.nrows() {
            stats.update(&data[i]);
        }
        let mean = Vector::from_slice(stats.mean());

        let mut centered = data.clone();
        for i in 0..centered.nrows() {
            for (x, &m) in centered[i].iter_mut().zip(mean.iter()) {
                *x -= m;
            }
        }

        Ok(&centered * &self.components.transposed())
    }

    /// Fit on `data` and return its projection.
    pub fn fit_transform(&mut self, data: &Matrix<T>) -> Result<Matrix<T>, ModelError> {
        self.fit(data)?;
        self.transform(data)
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Components kept by the last fit (the requested count before fitting).
    pub fn number_of_components(&self) -> usize {
        self.number_of_components
    }

    /// Principal axes, one unit-length row per component.
    pub fn components(&self) -> &Matrix<T> {
        &self.components
    }

    pub fn explained_variance(&self) -> &Vector<T> {
        &self.explained_variance
    }

    /// Share of the total variance captured by each kept component.
    pub fn explained_variance_ratio(&self) -> &Vector<T> {
        &self.explained_variance_ratio
    }

    /// Column means of the data passed to the last fit.
    pub fn mean(&self) -> &Vector<T> {
        &self.mean
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_data() -> Matrix<f64> {
        // Points near the direction (1, 2)
        Matrix::from_rows(&[
            [-2.0, -4.1],
            [-1.0, -1.9],
            [0.0, 0.1],
            [1.0, 2.05],
            [2.0, 3.95],
        ])
        .unwrap()
    }

    #[test]
    fn test_first_axis_follows_the_data() {
        let mut pca = PrincipalComponentAnalysis::new(0);
        pca.fit(&line_data()).unwrap();

        assert_eq!(pca.number_of_components(), 2);
        let axis = pca.components().row(0);
        let expected = [1.0 / libm::sqrt(5.0), 2.0 / libm::sqrt(5.0)];
        let sign = if axis[0] < 0.0 { -1.0 } else { 1.0 };
        assert!((sign * axis[0] - expected[0]).abs() < 1e-2);
        assert!((sign * axis[1] - expected[1]).abs() < 1e-2);
        assert!(pca.explained_variance_ratio()[0] > 0.99);

        let ratio_sum = pca.explained_variance_ratio().sum();
        assert!((ratio_sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_transform_shape_and_centering() {
        let data = line_data();
        let mut pca = PrincipalComponentAnalysis::new(1);
        let scores = pca.fit_transform(&data).unwrap();

        assert_eq!(scores.nrows(), 5);
        assert_eq!(scores.ncols(), 1);
        let mean_score: f64 = scores.column(0).mean();
        assert!(mean_score.abs() < 1e-12);

        // Variance of the scores equals the first eigenvalue
        let var: f64 = scores.column(0).squared_length() / 4.0;
        assert!((var - pca.explained_variance()[0]).abs() < 1e-10);
    }

    #[test]
    fn test_transform_fits_lazily() {
        let data = line_data();
        let mut pca = PrincipalComponentAnalysis::new(2);
        assert!(!pca.is_fitted());

        let scores = pca.transform(&data).unwrap();
        assert!(pca.is_fitted());
        assert_eq!(scores.ncols(), 2);
        assert!((pca.mean()[1] - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_too_many_components_are_clamped() {
        let mut pca = PrincipalComponentAnalysis::new(5);
        pca.fit(&line_data()).unwrap();
        assert_eq!(pca.number_of_components(), 2);
        assert_eq!(pca.components().nrows(), 2);
    }

    #[test]
    fn test_components_are_orthonormal() {
        let data: Matrix<f64> = Matrix::random(40, 4, 7);
        let mut pca = PrincipalComponentAnalysis::new(0);
        pca.fit(&data).unwrap();

        let c = pca.components();
        let gram = c * &c.transposed();
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((gram[i][j] - expected).abs() < 1e-9);
            }
        }
        for i in 1..4 {
            assert!(pca.explained_variance()[i - 1] >= pca.explained_variance()[i]);
        }
    }

    #[test]
    fn test_fit_is_idempotent() {
        let data: Matrix<f64> = Matrix::random(20, 3, 11);
        let mut pca = PrincipalComponentAnalysis::new(2);
        pca.fit(&data).unwrap();
        let first = pca.clone();
        pca.fit(&data).unwrap();
        assert_eq!(pca, first);
    }

    #[test]
    fn test_input_validation() {
        let mut pca: PrincipalComponentAnalysis<f64> = PrincipalComponentAnalysis::new(0);
        let one_row: Matrix<f64> = Matrix::from_rows(&[[1.0, 2.0]]).unwrap();
        assert_eq!(
            pca.fit(&one_row),
            Err(ModelError::InsufficientSamples {
                required: 2,
                found: 1
            })
        );

        pca.fit(&line_data()).unwrap();
        let wrong_width: Matrix<f64> = Matrix::zeros(3, 3);
        assert!(matches!(
            pca.transform(&wrong_width),
            Err(ModelError::Linalg(LinalgError::DimensionMismatch { .. }))
        ));
    }
}
