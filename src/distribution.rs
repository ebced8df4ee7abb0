//! Student-t distribution for coefficient significance tests.
//!
//! The CDF is expressed through the regularized incomplete beta function
//!
//! ```text
//! P(|T| > t) = I_x(ν/2, 1/2),   x = ν / (ν + t²)
//! ```
//!
//! which is evaluated with Lentz's continued fraction. All arithmetic is done
//! in `f64` via `libm`, whatever the model's scalar type.

use crate::error::ModelError;

const MAX_ITER: usize = 300;
const EPSILON: f64 = 1e-15;
const TINY: f64 = 1e-300;

/// Natural log of the beta function, `ln B(a, b)`.
pub fn ln_beta(a: f64, b: f64) -> f64 {
    libm::lgamma(a) + libm::lgamma(b) - libm::lgamma(a + b)
}

/// Regularized incomplete beta function `I_x(a, b)` for `a, b > 0`.
///
/// Returns 0 for `x <= 0` and 1 for `x >= 1`.
pub fn regularized_incomplete_beta(a: f64, b: f64, x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    // The continued fraction converges fastest below the mean
    if x > (a + 1.0) / (a + b + 2.0) {
        return 1.0 - incomplete_beta_cf(b, a, 1.0 - x);
    }
    incomplete_beta_cf(a, b, x)
}

fn incomplete_beta_cf(a: f64, b: f64, x: f64) -> f64 {
    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = 1.0 - qab * x / qap;
    if libm::fabs(d) < TINY {
        d = TINY;
    }
    d = 1.0 / d;
    let mut h = d;

    for m in 1..MAX_ITER {
        let m = m as f64;
        let m2 = 2.0 * m;

        // Even step
        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 + aa * d;
        if libm::fabs(d) < TINY {
            d = TINY;
        }
        c = 1.0 + aa / c;
        if libm::fabs(c) < TINY {
            c = TINY;
        }
        d = 1.0 / d;
        h *= d * c;

        // Odd step
        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 + aa * d;
        if libm::fabs(d) < TINY {
            d = TINY;
        }
        c = 1.0 + aa / c;
        if libm::fabs(c) < TINY {
            c = TINY;
        }
        d = 1.0 / d;
        let delta = d * c;
        h *= delta;

        if libm::fabs(delta - 1.0) < EPSILON {
            break;
        }
    }

    let front = libm::exp(a * libm::log(x) + b * libm::log(1.0 - x) - ln_beta(a, b));
    front * h / a
}

/// Student-t distribution with `dof` degrees of freedom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudentTDistribution {
    dof: f64,
}

impl StudentTDistribution {
    /// # Errors
    ///
    /// Returns `InvalidArgument` unless `dof` is finite and positive.
    pub fn new(dof: f64) -> Result<Self, ModelError> {
        if !(dof > 0.0 && dof.is_finite()) {
            return Err(ModelError::InvalidArgument(
                "degrees of freedom must be positive and finite",
            ));
        }
        Ok(Self { dof })
    }

    pub fn degrees_of_freedom(&self) -> f64 {
        self.dof
    }

    /// `P(T <= t)`.
    pub fn cdf(&self, t: f64) -> f64 {
        let tail = self.two_sided_p_value(t) / 2.0;
        if t > 0.0 {
            1.0 - tail
        } else {
            tail
        }
    }

    /// `P(|T| >= |t|)`.
    pub fn two_sided_p_value(&self, t: f64) -> f64 {
        if t.is_nan() {
            return f64::NAN;
        }
        if t.is_infinite() {
            return 0.0;
        }
        let x = self.dof / (self.dof + t * t);
        regularized_incomplete_beta(self.dof / 2.0, 0.5, x)
    }
}
