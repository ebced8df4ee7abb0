//! Python bindings for statistics primitives.

use linstat::OnlineStats as LsOnlineStats;
use linstat::StudentTDistribution;
use numpy::{PyArray1, PyReadonlyArray1, PyReadonlyArray2, PyUntypedArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Multi-channel online statistics using Welford's algorithm.
///
/// Computes running mean, variance, and standard deviation per channel in a
/// numerically stable way without storing all samples.
///
/// # Example
/// ```python
/// import pylinstat as ls
/// import numpy as np
///
/// stats = ls.OnlineStats(2)
/// stats.update(np.array([1.0, 10.0]))
/// stats.update(np.array([3.0, 30.0]))
///
/// print(stats.mean)    # [2.0, 20.0]
/// print(stats.count)   # 2
/// ```
#[pyclass]
pub struct OnlineStats {
    inner: LsOnlineStats<f64>,
}

#[pymethods]
impl OnlineStats {
    /// Create a new online statistics calculator.
    ///
    /// Args:
    ///     channels (int): Number of values per observation. Default: 1.
    #[new]
    #[pyo3(signature = (channels = 1))]
    fn new(channels: usize) -> PyResult<Self> {
        if channels == 0 {
            return Err(PyValueError::new_err("channels must be > 0"));
        }
        Ok(Self {
            inner: LsOnlineStats::new(channels),
        })
    }

    /// Update statistics with one observation.
    ///
    /// Args:
    ///     values (np.ndarray): 1D float64 array with one value per channel.
    fn update(&mut self, values: PyReadonlyArray1<f64>) -> PyResult<()> {
        let slice = values.as_slice()?;
        if slice.len() != self.inner.channels() {
            return Err(PyValueError::new_err(format!(
                "expected {} values, got {}",
                self.inner.channels(),
                slice.len()
            )));
        }
        self.inner.update(slice);
        Ok(())
    }

    /// Update statistics with every row of a 2D array.
    ///
    /// Args:
    ///     rows (np.ndarray): Array of shape (n_observations, channels), float64.
    fn update_batch(&mut self, rows: PyReadonlyArray2<f64>) -> PyResult<()> {
        let channels = rows.shape()[1];
        if channels != self.inner.channels() {
            return Err(PyValueError::new_err(format!(
                "expected {} columns, got {}",
                self.inner.channels(),
                channels
            )));
        }
        let slice = rows
            .as_slice()
            .map_err(|_| PyValueError::new_err("rows must be C-contiguous float64 array"))?;
        for row in slice.chunks_exact(channels) {
            self.inner.update(row);
        }
        Ok(())
    }

    /// Per-channel mean.
    #[getter]
    fn mean<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_slice(py, self.inner.mean())
    }

    /// Per-channel sample variance (normalized by n-1).
    #[getter]
    fn variance<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_vec(py, self.inner.variance())
    }

    /// Per-channel sample standard deviation.
    #[getter]
    fn std<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_vec(py, self.inner.std_dev())
    }

    /// Number of observations processed.
    #[getter]
    fn count(&self) -> u64 {
        self.inner.count()
    }

    /// Reset statistics to initial zero state.
    fn reset(&mut self) {
        self.inner.reset();
    }

    fn __repr__(&self) -> String {
        format!(
            "OnlineStats(channels={}, count={})",
            self.inner.channels(),
            self.count()
        )
    }
}

/// Two-sided p-value of a t statistic under a Student-t distribution.
///
/// Args:
///     t (float): Test statistic.
///     dof (float): Degrees of freedom (> 0).
///
/// Returns:
///     float: P(|T| >= |t|).
///
/// Example:
///     >>> round(ls.t_test_p_value(2.228, 10), 3)
///     0.05
#[pyfunction]
fn t_test_p_value(t: f64, dof: f64) -> PyResult<f64> {
    let distribution =
        StudentTDistribution::new(dof).map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(distribution.two_sided_p_value(t))
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<OnlineStats>()?;
    m.add_function(wrap_pyfunction!(t_test_p_value, m)?)?;
    Ok(())
}
