//! Error types for linear algebra primitives and statistical models.

use thiserror::Error;

/// Errors raised by matrix operations and direct solvers.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinalgError {
    /// A pivot fell below the singular threshold during elimination.
    #[error("matrix is singular: pivot in column {column} is below threshold")]
    SingularMatrix {
        /// Column whose pivot candidate was too small
        column: usize,
    },

    /// Operand sizes do not conform.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected size
        expected: usize,
        /// Actual size
        found: usize,
    },

    /// A square matrix was required.
    #[error("matrix is not square ({rows}x{cols})")]
    NotSquare {
        /// Number of rows
        rows: usize,
        /// Number of columns
        cols: usize,
    },

    /// The operation needs at least one element.
    #[error("matrix or vector is empty")]
    Empty,

    /// Row-wise construction received rows of unequal length.
    #[error("row {row} has {found} elements, expected {expected}")]
    RaggedRows {
        /// Offending row index
        row: usize,
        /// Length of the first row
        expected: usize,
        /// Length of the offending row
        found: usize,
    },
}

/// Errors raised by the regression and PCA models.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelError {
    /// Input failed validation.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Not enough observations to fit the model.
    #[error("insufficient samples: need at least {required}, found {found}")]
    InsufficientSamples {
        /// Minimum number of observations
        required: usize,
        /// Observations supplied
        found: usize,
    },

    /// `test()` or a prediction was requested before `fit()`.
    #[error("model has not been fitted")]
    NotFitted,

    /// Underlying linear algebra failed.
    #[error(transparent)]
    Linalg(#[from] LinalgError),
}
