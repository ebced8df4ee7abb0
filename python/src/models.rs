//! Python bindings for the regression and PCA models.

use linstat::{
    EigenConfig, LassoConfig, LassoRegression as LsLassoRegression,
    LinearRegression as LsLinearRegression, PrincipalComponentAnalysis,
};
use numpy::{PyArray1, PyArray2, PyReadonlyArray1, PyReadonlyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::utils::{
    matrix_from_numpy, matrix_to_numpy, table_from_numpy, value_error, vector_from_numpy,
    vector_to_numpy,
};

/// Ordinary least squares regression with an intercept.
///
/// `coefficients[0]` is the intercept, `coefficients[j + 1]` belongs to
/// column `j` of `x`. Standard errors, t-values and two-sided p-values are
/// computed during `fit`.
///
/// # Example
/// ```python
/// import pylinstat as ls
/// import numpy as np
///
/// x = np.array([[1.0], [2.0], [3.0], [4.0], [5.0]])
/// y = np.array([2.0, 4.0, 5.0, 4.0, 5.0])
///
/// model = ls.LinearRegression()
/// model.fit(x, y)
/// print(model.coefficients)   # [2.2, 0.6]
/// print(model.r2)             # 0.6
/// ```
#[pyclass]
pub struct LinearRegression {
    inner: LsLinearRegression<f64>,
}

#[pymethods]
impl LinearRegression {
    #[new]
    fn new() -> Self {
        Self {
            inner: LsLinearRegression::new(),
        }
    }

    /// Fit the model.
    ///
    /// Args:
    ///     x (np.ndarray): Independent variables of shape (n_samples, n_features), float64.
    ///     y (np.ndarray): Dependent variable of length n_samples, float64.
    ///
    /// Raises:
    ///     ValueError: On shape mismatch, too few samples, or collinear columns.
    fn fit(&mut self, x: PyReadonlyArray2<f64>, y: PyReadonlyArray1<f64>) -> PyResult<()> {
        let table = table_from_numpy(&x)?;
        let y = vector_from_numpy(&y)?;
        self.inner.fit(&y, &table).map_err(value_error)
    }

    /// Predict the dependent variable for each row of `x`.
    fn predict<'py>(
        &self,
        py: Python<'py>,
        x: PyReadonlyArray2<f64>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let table = table_from_numpy(&x)?;
        let prediction = self.inner.predict(&table).map_err(value_error)?;
        Ok(vector_to_numpy(py, &prediction))
    }

    #[getter]
    fn coefficients<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        vector_to_numpy(py, self.inner.coefficients())
    }

    #[getter]
    fn standard_errors<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        vector_to_numpy(py, self.inner.standard_errors())
    }

    #[getter]
    fn t_values<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        vector_to_numpy(py, self.inner.t_values())
    }

    #[getter]
    fn p_values<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        vector_to_numpy(py, self.inner.p_values())
    }

    #[getter]
    fn r2(&self) -> f64 {
        self.inner.r2()
    }

    #[getter]
    fn adjusted_r2(&self) -> f64 {
        self.inner.adjusted_r2()
    }

    #[getter]
    fn degrees_of_freedom(&self) -> usize {
        self.inner.degrees_of_freedom()
    }

    #[getter]
    fn is_fitted(&self) -> bool {
        self.inner.is_fitted()
    }

    fn __repr__(&self) -> String {
        if self.inner.is_fitted() {
            format!(
                "LinearRegression(coefficients={}, r2={:.4})",
                self.inner.coefficients().len(),
                self.inner.r2()
            )
        } else {
            "LinearRegression(unfitted)".to_string()
        }
    }
}

/// L1-penalised linear regression fitted by coordinate descent.
///
/// Larger `complexity` drives more coefficients to exactly zero. The
/// intercept is never penalised.
///
/// # Example
/// ```python
/// model = ls.LassoRegression(complexity=0.05)
/// model.fit(x, y)
/// model.test()
/// print(model.coefficients, model.p_values)
/// ```
#[pyclass]
pub struct LassoRegression {
    inner: LsLassoRegression<f64>,
}

#[pymethods]
impl LassoRegression {
    /// Create a Lasso model.
    ///
    /// Args:
    ///     complexity (float): Penalty strength (>= 0). Default: 1.0.
    ///     max_iterations (int): Coordinate-descent sweeps. Default: 100.
    ///     tolerance (float, optional): Stop early when no coefficient moves
    ///         more than this within a sweep. Default: None.
    #[new]
    #[pyo3(signature = (complexity = 1.0, max_iterations = 100, tolerance = None))]
    fn new(complexity: f64, max_iterations: usize, tolerance: Option<f64>) -> PyResult<Self> {
        if !(complexity >= 0.0 && complexity.is_finite()) {
            return Err(PyValueError::new_err("complexity must be non-negative and finite"));
        }
        Ok(Self {
            inner: LsLassoRegression::with_config(LassoConfig {
                complexity,
                max_iterations,
                tolerance,
                ..Default::default()
            }),
        })
    }

    /// Fit the model.
    ///
    /// Args:
    ///     x (np.ndarray): Independent variables of shape (n_samples, n_features), float64.
    ///     y (np.ndarray): Dependent variable of length n_samples, float64.
    fn fit(&mut self, x: PyReadonlyArray2<f64>, y: PyReadonlyArray1<f64>) -> PyResult<()> {
        let table = table_from_numpy(&x)?;
        let y = vector_from_numpy(&y)?;
        self.inner.fit(&y, &table).map_err(value_error)
    }

    /// Compute t-values and p-values for the fitted coefficients.
    ///
    /// Raises:
    ///     ValueError: If called before `fit`.
    fn test(&mut self) -> PyResult<()> {
        self.inner.test().map_err(value_error)
    }

    /// Predict the dependent variable for each row of `x`.
    fn predict<'py>(
        &self,
        py: Python<'py>,
        x: PyReadonlyArray2<f64>,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let table = table_from_numpy(&x)?;
        let prediction = self.inner.predict(&table).map_err(value_error)?;
        Ok(vector_to_numpy(py, &prediction))
    }

    #[getter]
    fn complexity(&self) -> f64 {
        self.inner.complexity()
    }

    #[setter]
    fn set_complexity(&mut self, complexity: f64) -> PyResult<()> {
        if !(complexity >= 0.0 && complexity.is_finite()) {
            return Err(PyValueError::new_err("complexity must be non-negative and finite"));
        }
        self.inner.set_complexity(complexity);
        Ok(())
    }

    #[getter]
    fn coefficients<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        vector_to_numpy(py, self.inner.coefficients())
    }

    #[getter]
    fn standard_errors<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        vector_to_numpy(py, self.inner.standard_errors())
    }

    #[getter]
    fn t_values<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        vector_to_numpy(py, self.inner.t_values())
    }

    #[getter]
    fn p_values<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        vector_to_numpy(py, self.inner.p_values())
    }

    #[getter]
    fn r2(&self) -> f64 {
        self.inner.r2()
    }

    #[getter]
    fn adjusted_r2(&self) -> f64 {
        self.inner.adjusted_r2()
    }

    /// Number of coordinate-descent sweeps run by the last fit.
    #[getter]
    fn sweeps(&self) -> usize {
        self.inner.sweeps()
    }

    fn __repr__(&self) -> String {
        format!("LassoRegression(complexity={})", self.inner.complexity())
    }
}

/// Principal component analysis.
///
/// # Example
/// ```python
/// pca = ls.PCA(n_components=2)
/// scores = pca.fit_transform(data)      # shape (n_samples, 2)
/// print(pca.explained_variance_ratio)
/// ```
#[pyclass(name = "PCA")]
pub struct Pca {
    inner: PrincipalComponentAnalysis<f64>,
}

#[pymethods]
impl Pca {
    /// Create a PCA model.
    ///
    /// Args:
    ///     n_components (int): Components to keep, 0 keeps all. Default: 0.
    ///     max_iterations (int): Eigen solver iteration cap. Default: 1000.
    ///     tolerance (float): Eigen solver tolerance. Default: 1e-10.
    #[new]
    #[pyo3(signature = (n_components = 0, max_iterations = 1000, tolerance = 1e-10))]
    fn new(n_components: usize, max_iterations: usize, tolerance: f64) -> Self {
        let config = EigenConfig::default()
            .with_max_iterations(max_iterations)
            .with_tolerance(tolerance);
        Self {
            inner: PrincipalComponentAnalysis::new(n_components).with_eigen_config(config),
        }
    }

    /// Fit on data of shape (n_samples, n_features).
    fn fit(&mut self, data: PyReadonlyArray2<f64>) -> PyResult<()> {
        let data = matrix_from_numpy(&data, "data")?;
        self.inner.fit(&data).map_err(value_error)
    }

    /// Project data onto the principal axes (fits first if needed).
    fn transform<'py>(
        &mut self,
        py: Python<'py>,
        data: PyReadonlyArray2<f64>,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let data = matrix_from_numpy(&data, "data")?;
        let scores = self.inner.transform(&data).map_err(value_error)?;
        matrix_to_numpy(py, &scores)
    }

    /// Fit on `data` and return its scores.
    fn fit_transform<'py>(
        &mut self,
        py: Python<'py>,
        data: PyReadonlyArray2<f64>,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let data = matrix_from_numpy(&data, "data")?;
        let scores = self.inner.fit_transform(&data).map_err(value_error)?;
        matrix_to_numpy(py, &scores)
    }

    /// Principal axes, one per row.
    #[getter]
    fn components<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f64>>> {
        matrix_to_numpy(py, self.inner.components())
    }

    #[getter]
    fn explained_variance<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        vector_to_numpy(py, self.inner.explained_variance())
    }

    #[getter]
    fn explained_variance_ratio<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        vector_to_numpy(py, self.inner.explained_variance_ratio())
    }

    #[getter]
    fn mean<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        vector_to_numpy(py, self.inner.mean())
    }

    #[getter]
    fn n_components(&self) -> usize {
        self.inner.number_of_components()
    }

    fn __repr__(&self) -> String {
        format!("PCA(n_components={})", self.inner.number_of_components())
    }
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<LinearRegression>()?;
    m.add_class::<LassoRegression>()?;
    m.add_class::<Pca>()?;
    Ok(())
}
