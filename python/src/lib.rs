use pyo3::prelude::*;
use pyo3::Bound;

mod linalg;
mod models;
mod stats;
mod utils;

/// pylinstat: dense linear algebra and statistical models.
///
/// Gauss-Jordan solving, eigen decomposition, ordinary least squares, Lasso
/// and PCA implemented in Rust. All arrays are float64.
#[pymodule]
fn pylinstat(m: &Bound<'_, PyModule>) -> PyResult<()> {
    linalg::register(m)?;
    models::register(m)?;
    stats::register(m)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
