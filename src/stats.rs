//! Single-pass (Welford) accumulators for means, variances and covariances.

use alloc::vec;
use alloc::vec::Vec;

use crate::linalg::{Matrix, Vector};
use crate::real::Real;

/// Per-channel running mean and variance.
#[derive(Debug, Clone, PartialEq)]
pub struct OnlineStats<T> {
    count: u64,
    mean: Vec<T>,
    m2: Vec<T>,
}

impl<T: Real> OnlineStats<T> {
    pub fn new(channels: usize) -> Self {
        Self {
            count: 0,
            mean: vec![T::zero(); channels],
            m2: vec![T::zero(); channels],
        }
    }

    /// Fold one sample (one value per channel) into the running moments.
    ///
    /// # Panics
    ///
    /// Panics if `sample.len()` differs from the channel count.
    pub fn update(&mut self, sample: &[T]) {
        assert_eq!(sample.len(), self.mean.len(), "sample size mismatch");
        self.count += 1;
        let n = T::from_f64(self.count as f64);

        for i in 0..self.mean.len() {
            let delta = sample[i] - self.mean[i];
            self.mean[i] += delta / n;
            let delta2 = sample[i] - self.mean[i];
            self.m2[i] += delta * delta2;
        }
    }

    pub fn channels(&self) -> usize {
        self.mean.len()
    }

    pub fn mean(&self) -> &[T] {
        &self.mean
    }

    /// Sum of squared deviations from the mean.
    pub fn sum_of_squares(&self) -> &[T] {
        &self.m2
    }

    /// Unbiased sample variance (zero with fewer than two samples).
    pub fn variance(&self) -> Vec<T> {
        if self.count < 2 {
            return vec![T::zero(); self.mean.len()];
        }

        let denom = T::from_f64((self.count - 1) as f64);
        self.m2.iter().map(|&m2| m2 / denom).collect()
    }

    pub fn std_dev(&self) -> Vec<T> {
        self.variance().into_iter().map(|v| v.sqrt()).collect()
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.mean.iter_mut().for_each(|x| *x = T::zero());
        self.m2.iter_mut().for_each(|x| *x = T::zero());
    }
}

/// Running mean vector and covariance matrix.
///
/// Each update adjusts the co-moment matrix with the deviation from the old
/// mean times the deviation from the new one, so no second pass over the data
/// is needed and large offsets do not cancel catastrophically.
#[derive(Debug, Clone, PartialEq)]
pub struct OnlineCovariance<T> {
    count: u64,
    mean: Vec<T>,
    comoment: Matrix<T>,
}

impl<T: Real> OnlineCovariance<T> {
    pub fn new(variables: usize) -> Self {
        Self {
            count: 0,
            mean: vec![T::zero(); variables],
            comoment: Matrix::zeros(variables, variables),
        }
    }

    /// Fold one observation into the accumulator.
    ///
    /// # Panics
    ///
    /// Panics if `observation.len()` differs from the variable count.
    pub fn update(&mut self, observation: &[T]) {
        let p = self.mean.len();
        assert_eq!(observation.len(), p, "observation size mismatch");
        self.count += 1;
        let n = T::from_f64(self.count as f64);

        let delta: Vec<T> = observation
            .iter()
            .zip(&self.mean)
            .map(|(&x, &m)| x - m)
            .collect();
        for (m, &d) in self.mean.iter_mut().zip(&delta) {
            *m += d / n;
        }
        for i in 0..p {
            for j in 0..p {
                self.comoment[i][j] += delta[i] * (observation[j] - self.mean[j]);
            }
        }
    }

    pub fn variables(&self) -> usize {
        self.mean.len()
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> Vector<T> {
        Vector::from_slice(&self.mean)
    }

    /// Unbiased covariance matrix (zero with fewer than two observations).
    pub fn covariance(&self) -> Matrix<T> {
        let p = self.mean.len();
        if self.count < 2 {
            return Matrix::zeros(p, p);
        }
        &self.comoment / T::from_f64((self.count - 1) as f64)
    }

    pub fn reset(&mut self) {
        let p = self.mean.len();
        self.count = 0;
        self.mean.iter_mut().for_each(|x| *x = T::zero());
        self.comoment = Matrix::zeros(p, p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_online_stats_two_channels() {
        let mut stats: OnlineStats<f64> = OnlineStats::new(2);
        for x in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            stats.update(&[x, -x]);
        }

        assert_eq!(stats.count(), 8);
        assert!((stats.mean()[0] - 5.0).abs() < 1e-12);
        assert!((stats.mean()[1] + 5.0).abs() < 1e-12);
        assert!((stats.sum_of_squares()[0] - 32.0).abs() < 1e-12);
        assert!((stats.variance()[0] - 32.0 / 7.0).abs() < 1e-12);
        assert!((stats.std_dev()[1] - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);

        stats.reset();
        assert_eq!(stats.count(), 0);
        assert_eq!(stats.variance(), alloc::vec![0.0, 0.0]);
    }

    #[test]
    fn test_covariance_matches_two_pass() {
        let rows = [[1.0, 2.0, 0.5], [2.0, 1.0, 0.0], [3.0, 5.0, 1.5], [4.0, 3.0, 1.0]];
        let mut cov: OnlineCovariance<f64> = OnlineCovariance::new(3);
        for row in &rows {
            cov.update(row);
        }

        let n = rows.len() as f64;
        let mut mean = [0.0; 3];
        for row in &rows {
            for j in 0..3 {
                mean[j] += row[j] / n;
            }
        }
        let c = cov.covariance();
        for i in 0..3 {
            for j in 0..3 {
                let expected: f64 = rows
                    .iter()
                    .map(|r| (r[i] - mean[i]) * (r[j] - mean[j]))
                    .sum::<f64>()
                    / (n - 1.0);
                assert!((c[i][j] - expected).abs() < 1e-12);
            }
        }
        assert!(c.is_symmetric(1e-12));
        assert!((cov.mean()[1] - 2.75).abs() < 1e-12);
    }

    #[test]
    fn test_covariance_is_stable_under_large_offset() {
        let offset = 1e9;
        let mut cov: OnlineCovariance<f64> = OnlineCovariance::new(1);
        for x in [4.0, 7.0, 13.0, 16.0] {
            cov.update(&[offset + x]);
        }
        // Variance of {4, 7, 13, 16} is 30
        assert!((cov.covariance()[0][0] - 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_covariance_needs_two_observations() {
        let mut cov: OnlineCovariance<f64> = OnlineCovariance::new(2);
        cov.update(&[1.0, 2.0]);
        assert_eq!(cov.covariance(), Matrix::zeros(2, 2));

        cov.reset();
        assert_eq!(cov.count(), 0);
        assert_eq!(cov.variables(), 2);
    }
}
