//! Dense linear algebra and statistical models.
//!
//! `linstat` provides row-major [`Matrix`] and [`Vector`] containers, a
//! pivoted Gauss–Jordan solver, an eigen engine for symmetric and general real
//! matrices, and three models built on them: ordinary least squares
//! ([`LinearRegression`]), L1-penalised regression ([`LassoRegression`]) and
//! principal component analysis ([`PrincipalComponentAnalysis`]).
//!
//! The crate is `no_std` and allocates through `alloc`. All numeric code is
//! generic over [`Real`] (`f32` or `f64`). Diagnostics go through the `log`
//! facade; install a logger in the application to see them.

#![no_std]

extern crate alloc;

pub mod distribution;
pub mod error;
pub mod linalg;
pub mod pca;
pub mod real;
pub mod regression;
pub mod stats;
pub mod table;

pub use distribution::StudentTDistribution;
pub use error::{LinalgError, ModelError};
pub use linalg::{
    EigenConfig, EigenDecomposer, GaussEliminationSolver, Matrix, MatrixKind, Vector,
};
pub use pca::PrincipalComponentAnalysis;
pub use real::Real;
pub use regression::{
    LassoConfig, LassoRegression, LinearRegression, RegressionStatistics,
};
pub use stats::{OnlineCovariance, OnlineStats};
pub use table::ValueTable;
