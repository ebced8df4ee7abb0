//! Synthetic dataset generators for the demos.
//!
//! - Uniform white noise from a seeded `SmallRng`
//! - Latent-factor datasets (observed variables are noisy mixtures of a few
//!   hidden factors)

#![allow(dead_code)] // Functions used across multiple demos

use linstat::Matrix;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Generates uniform white noise.
///
/// # Arguments
/// * `samples` - Number of samples to generate
/// * `amplitude` - Peak amplitude (noise will be in range [-amplitude, amplitude])
/// * `seed` - Random seed for reproducibility
pub fn white_noise(samples: usize, amplitude: f64, seed: u64) -> Vec<f64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..samples)
        .map(|_| amplitude * rng.gen_range(-1.0..=1.0))
        .collect()
}

/// Generates a dataset whose columns mix a small number of latent factors.
///
/// Variable `j` of observation `i` is `Σ_f loadings[j][f] · factor_f[i] + noise`.
///
/// # Arguments
/// * `samples` - Number of observations (rows)
/// * `loadings` - One row of factor weights per observed variable
/// * `noise_amplitude` - Peak amplitude of the per-variable noise
/// * `seed` - Random seed for reproducibility
pub fn latent_factor_dataset(
    samples: usize,
    loadings: &[Vec<f64>],
    noise_amplitude: f64,
    seed: u64,
) -> Matrix<f64> {
    let factors = loadings.iter().map(Vec::len).max().unwrap_or(0);
    let latent: Vec<Vec<f64>> = (0..factors)
        .map(|f| white_noise(samples, 1.0, seed.wrapping_add(1000 * (f as u64 + 1))))
        .collect();

    let mut data = Matrix::zeros(samples, loadings.len());
    for (j, weights) in loadings.iter().enumerate() {
        let noise = white_noise(samples, noise_amplitude, seed.wrapping_add(j as u64));
        for i in 0..samples {
            let signal: f64 = weights
                .iter()
                .zip(&latent)
                .map(|(w, factor)| w * factor[i])
                .sum();
            data[i][j] = signal + noise[i];
        }
    }
    data
}
