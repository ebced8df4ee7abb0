//! Python bindings for the linear solver and eigen decomposition.

use linstat::{EigenConfig, EigenDecomposer, GaussEliminationSolver, MatrixKind};
use numpy::{PyArray1, PyArray2, PyReadonlyArray1, PyReadonlyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::utils::{
    matrix_from_numpy, matrix_to_numpy, value_error, vector_from_numpy, vector_to_numpy,
};

/// Solve the square linear system `a @ x = b` by Gauss-Jordan elimination
/// with partial pivoting.
///
/// Args:
///     a (np.ndarray): Coefficient matrix of shape (n, n), float64.
///     b (np.ndarray): Right-hand side of length n, float64.
///
/// Returns:
///     np.ndarray: Solution vector x of length n.
///
/// Raises:
///     ValueError: If shapes do not conform or the matrix is singular.
///
/// Example:
///     >>> import pylinstat as ls
///     >>> import numpy as np
///     >>> a = np.array([[2.0, 1.0], [1.0, 3.0]])
///     >>> x = ls.solve(a, np.array([3.0, 5.0]))
///     >>> np.allclose(a @ x, [3.0, 5.0])
///     True
#[pyfunction]
fn solve<'py>(
    py: Python<'py>,
    a: PyReadonlyArray2<f64>,
    b: PyReadonlyArray1<f64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let a = matrix_from_numpy(&a, "a")?;
    let b = vector_from_numpy(&b)?;
    let solver = GaussEliminationSolver::from_system(&a, &b).map_err(value_error)?;
    Ok(vector_to_numpy(py, solver.solution()))
}

/// Inverse of a square matrix.
///
/// Raises:
///     ValueError: If the matrix is not square or is singular.
#[pyfunction]
fn inv<'py>(py: Python<'py>, a: PyReadonlyArray2<f64>) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let a = matrix_from_numpy(&a, "a")?;
    let inverse = a.inverted().map_err(value_error)?;
    matrix_to_numpy(py, &inverse)
}

/// Determinant of a square matrix (0.0 for singular input).
#[pyfunction]
fn det(a: PyReadonlyArray2<f64>) -> PyResult<f64> {
    let a = matrix_from_numpy(&a, "a")?;
    if !a.is_square() {
        return Err(PyValueError::new_err(format!(
            "a must be square, got {}x{}",
            a.nrows(),
            a.ncols()
        )));
    }
    Ok(a.determinant())
}

/// Eigen decomposition of a real square matrix.
///
/// Symmetric input takes the tridiagonal QR path, anything else the
/// Hessenberg QR path. Results are sorted by descending real part.
///
/// Args:
///     a (np.ndarray): Square matrix, float64.
///     kind (str): "auto", "symmetric" or "asymmetric". Default: "auto".
///     max_iterations (int): QR iteration cap per eigenvalue. Default: 1000.
///     tolerance (float): Deflation tolerance. Default: 1e-10.
///
/// Returns:
///     tuple: (real_parts, imaginary_parts, eigenvectors, converged) where
///         eigenvectors has one eigenvector per row. A complex pair occupies
///         adjacent rows holding the real and imaginary parts.
///
/// Example:
///     >>> values, imag, vectors, ok = ls.eigen(np.array([[2.0, 1.0], [1.0, 2.0]]))
///     >>> np.allclose(values, [3.0, 1.0])
///     True
#[pyfunction]
#[pyo3(signature = (a, kind = "auto", max_iterations = 1000, tolerance = 1e-10))]
#[allow(clippy::type_complexity)]
fn eigen<'py>(
    py: Python<'py>,
    a: PyReadonlyArray2<f64>,
    kind: &str,
    max_iterations: usize,
    tolerance: f64,
) -> PyResult<(
    Bound<'py, PyArray1<f64>>,
    Bound<'py, PyArray1<f64>>,
    Bound<'py, PyArray2<f64>>,
    bool,
)> {
    let kind = match kind {
        "auto" => MatrixKind::Unknown,
        "symmetric" => MatrixKind::Symmetric,
        "asymmetric" => MatrixKind::Asymmetric,
        _ => {
            return Err(PyValueError::new_err(format!(
                "Unknown kind '{}'. Use 'auto', 'symmetric' or 'asymmetric'",
                kind
            )))
        }
    };
    if !(tolerance > 0.0 && tolerance.is_finite()) {
        return Err(PyValueError::new_err("tolerance must be positive"));
    }

    let a = matrix_from_numpy(&a, "a")?;
    let config = EigenConfig::default()
        .with_max_iterations(max_iterations)
        .with_tolerance(tolerance);
    let decomposition = EigenDecomposer::with_config(&a, kind, config).map_err(value_error)?;

    Ok((
        vector_to_numpy(py, decomposition.eigenvalues()),
        vector_to_numpy(py, decomposition.imaginary_parts()),
        matrix_to_numpy(py, decomposition.eigenvectors())?,
        decomposition.converged(),
    ))
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(solve, m)?)?;
    m.add_function(wrap_pyfunction!(inv, m)?)?;
    m.add_function(wrap_pyfunction!(det, m)?)?;
    m.add_function(wrap_pyfunction!(eigen, m)?)?;
    Ok(())
}
