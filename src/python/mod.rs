//! Python bindings for ilap-rs using PyO3.
//!
//! Exposes the indicator, the scalarizing function and the assignment solver
//! on NumPy arrays.

use pyo3::prelude::*;

mod indicator;

pub use indicator::{py_asf, py_compute_indicator, py_linear_sum_assignment};

/// Python module for ilap-rs.
///
/// The function is named `_ilap_rs` with underscore prefix for mixed Python/Rust projects.
#[pymodule]
fn _ilap_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(indicator::py_compute_indicator, m)?)?;
    m.add_function(wrap_pyfunction!(indicator::py_asf, m)?)?;
    m.add_function(wrap_pyfunction!(indicator::py_linear_sum_assignment, m)?)?;

    // Version info
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
