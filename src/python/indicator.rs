//! Python wrappers for the indicator pipeline.

use pyo3::prelude::*;
use pyo3::exceptions::PyValueError;
use numpy::{IntoPyArray, PyArray1, PyReadonlyArray1, PyReadonlyArray2};
use numpy::ndarray::Array1;
use nalgebra::DMatrix;

use crate::{asf, solve_assignment, LapIndicator, PointSet};

fn to_py_err(err: crate::Error) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn to_point_set(array: &PyReadonlyArray2<'_, f64>) -> PyResult<PointSet> {
    let rows: Vec<Vec<f64>> = array
        .as_array()
        .rows()
        .into_iter()
        .map(|row| row.to_vec())
        .collect();
    PointSet::from_rows(&rows).map_err(to_py_err)
}

/// Compute the ILAP indicator.
///
/// Args:
///     weights: Weight vectors, array of shape (n, d).
///     points: Pareto front approximation, array of shape (n, d).
///
/// Returns:
///     Mean cost of the optimal weight-to-point assignment. Lower is better.
///
/// Raises:
///     ValueError: If shapes disagree or a cost is not finite.
#[pyfunction]
#[pyo3(name = "compute_indicator")]
pub fn py_compute_indicator(
    py: Python<'_>,
    weights: PyReadonlyArray2<'_, f64>,
    points: PyReadonlyArray2<'_, f64>,
) -> PyResult<f64> {
    let weights = to_point_set(&weights)?;
    let points = to_point_set(&points)?;
    py.allow_threads(|| LapIndicator::default().compute(&weights, &points))
        .map_err(to_py_err)
}

/// Achievement scalarizing function of a single point and weight vector.
#[pyfunction]
#[pyo3(name = "asf")]
pub fn py_asf(point: PyReadonlyArray1<'_, f64>, weight: PyReadonlyArray1<'_, f64>) -> PyResult<f64> {
    let point = point.as_array().to_vec();
    let weight = weight.as_array().to_vec();
    if point.len() != weight.len() {
        return Err(PyValueError::new_err(format!(
            "point has {} objectives but weight has {}",
            point.len(),
            weight.len()
        )));
    }
    Ok(asf(&point, &weight))
}

/// Solve a square linear sum assignment problem.
///
/// Returns:
///     (row_ind, col_ind) arrays, as scipy.optimize.linear_sum_assignment does.
#[pyfunction]
#[pyo3(name = "linear_sum_assignment")]
pub fn py_linear_sum_assignment<'py>(
    py: Python<'py>,
    cost: PyReadonlyArray2<'_, f64>,
) -> PyResult<(Bound<'py, PyArray1<usize>>, Bound<'py, PyArray1<usize>>)> {
    let view = cost.as_array();
    let matrix = DMatrix::from_fn(view.nrows(), view.ncols(), |i, j| view[[i, j]]);
    let assignment = solve_assignment(&matrix).map_err(to_py_err)?;

    let rows = Array1::from_vec((0..assignment.len()).collect::<Vec<usize>>());
    let cols = Array1::from_vec(assignment.columns);
    Ok((rows.into_pyarray_bound(py), cols.into_pyarray_bound(py)))
}
