//! Cost matrix construction between weight vectors and points.

use nalgebra::DMatrix;
use rayon::prelude::*;
use tracing::debug;

use crate::scalarize::Scalarizer;
use crate::{PointSet, Result};

/// Build the `(n, n)` cost matrix of the assignment problem.
///
/// Entry `(i, j)` is `scalarizer.scalarize(points[j], weights[i])`: rows are weight
/// vectors, columns are points. Matrices with `n >= parallel_threshold` are filled
/// one row per task with rayon; every task owns a disjoint row, so the result does
/// not depend on the path taken.
///
/// # Errors
/// `DimensionMismatch` if the sets differ in size or dimension.
pub fn build_cost_matrix<S: Scalarizer + ?Sized>(
    weights: &PointSet,
    points: &PointSet,
    scalarizer: &S,
    parallel_threshold: usize,
) -> Result<DMatrix<f64>> {
    weights.ensure_compatible(points)?;

    let n_weights = weights.len();
    let n_points = points.len();
    let parallel = n_weights >= parallel_threshold;

    debug!(
        n = n_weights,
        dim = weights.dim(),
        parallel,
        "building cost matrix"
    );

    // Row-major scratch buffer, one chunk per weight vector
    let mut data = vec![0.0; n_weights * n_points];
    let fill_row = |(i, row): (usize, &mut [f64])| {
        let weight = weights.row(i);
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = scalarizer.scalarize(points.row(j), weight);
        }
    };

    if parallel {
        data.par_chunks_mut(n_points).enumerate().for_each(fill_row);
    } else {
        data.chunks_mut(n_points).enumerate().for_each(fill_row);
    }

    Ok(DMatrix::from_row_slice(n_weights, n_points, &data))
}
