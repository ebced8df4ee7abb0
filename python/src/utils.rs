//! Conversions between numpy arrays and linstat containers.

use linstat::{Matrix, ValueTable, Vector};
use numpy::ndarray::Array2;
use numpy::{PyArray1, PyArray2, PyReadonlyArray1, PyReadonlyArray2, PyUntypedArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Convert a C-contiguous 2D float64 array into a row-major `Matrix`.
pub fn matrix_from_numpy(array: &PyReadonlyArray2<f64>, name: &str) -> PyResult<Matrix<f64>> {
    let shape = array.shape();
    let slice = array
        .as_slice()
        .map_err(|_| PyValueError::new_err(format!("{} must be C-contiguous float64 array", name)))?;
    Matrix::from_row_major(shape[0], shape[1], slice.to_vec())
        .map_err(value_error)
}

/// Convert a 1D float64 array into a `Vector`.
pub fn vector_from_numpy(array: &PyReadonlyArray1<f64>) -> PyResult<Vector<f64>> {
    Ok(Vector::from_slice(array.as_slice()?))
}

/// Interpret the columns of a 2D array as independent variables.
pub fn table_from_numpy(array: &PyReadonlyArray2<f64>) -> PyResult<ValueTable<f64>> {
    Ok(ValueTable::from_matrix(&matrix_from_numpy(array, "x")?))
}

/// Copy a `Matrix` into a new 2D numpy array.
pub fn matrix_to_numpy<'py>(
    py: Python<'py>,
    matrix: &Matrix<f64>,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let array = Array2::from_shape_vec((matrix.nrows(), matrix.ncols()), matrix.as_slice().to_vec())
        .map_err(|e| PyValueError::new_err(format!("Array creation failed: {}", e)))?;
    Ok(PyArray2::from_owned_array(py, array))
}

/// Copy a `Vector` into a new 1D numpy array.
pub fn vector_to_numpy<'py>(py: Python<'py>, vector: &Vector<f64>) -> Bound<'py, PyArray1<f64>> {
    PyArray1::from_slice(py, vector.as_slice())
}

/// Map a linstat error onto `ValueError`.
pub fn value_error<E: std::fmt::Display>(error: E) -> PyErr {
    PyValueError::new_err(error.to_string())
}
