//! Floating-point scalar abstraction shared by every container and model.
//!
//! All numeric code in this crate is generic over [`Real`], which is implemented
//! for `f32` and `f64`. The trait is a thin layer over [`num_traits::Float`] that
//! adds exact conversions to and from `f64`, used when a computation (such as the
//! Student-t CDF) is carried out in double precision regardless of `T`.

use core::fmt::{Debug, Display};
use core::iter::Sum;
use num_traits::{Float, NumAssign};

/// Real floating-point scalar.
pub trait Real: Float + NumAssign + Debug + Display + Sum + Default + 'static {
    /// Convert an `f64` constant into this type (rounding for `f32`).
    fn from_f64(value: f64) -> Self;

    /// Widen this value to `f64`.
    fn as_f64(self) -> f64;

    /// Convert an element count into this type.
    #[inline]
    fn from_usize(value: usize) -> Self {
        Self::from_f64(value as f64)
    }
}

impl Real for f32 {
    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl Real for f64 {
    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self
    }
}
