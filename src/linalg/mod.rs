//! Dense linear algebra: containers, a direct solver and an eigen engine.
//!
//! # Matrix Storage
//!
//! Matrices are stored in row-major order as flat buffers. Element `(i, j)` of
//! an `nrows × ncols` matrix lives at index `i * ncols + j`.

mod eigen;
mod gauss;
mod matrix;
mod vector;

pub use eigen::{EigenConfig, EigenDecomposer, MatrixKind};
pub use gauss::GaussEliminationSolver;
pub use matrix::{Matrix, SINGULAR_THRESHOLD};
pub use vector::Vector;
