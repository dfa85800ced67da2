//! Weight-to-point matching via the linear assignment problem.

use nalgebra::DMatrix;
use tracing::debug;

use crate::internal::scipy::linear_sum_assignment;
use crate::{Error, Result};

/// A perfect matching between rows (weight vectors) and columns (points).
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// `columns[i]` is the column matched to row `i`.
    pub columns: Vec<usize>,
    /// Sum of the matched cost matrix entries.
    pub total_cost: f64,
}

impl Assignment {
    /// Number of matched pairs.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column matched to `row`, if the row exists.
    pub fn column_for_row(&self, row: usize) -> Option<usize> {
        self.columns.get(row).copied()
    }

    /// Iterate over `(row, column)` pairs in row order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.columns.iter().copied().enumerate()
    }

    /// True if every column appears exactly once.
    pub fn is_permutation(&self) -> bool {
        let mut seen = vec![false; self.columns.len()];
        for &col in &self.columns {
            match seen.get_mut(col) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }

    /// Mean matched cost.
    pub fn mean_cost(&self) -> f64 {
        self.total_cost / self.columns.len() as f64
    }
}

/// Check if a matrix contains NaN values.
pub fn has_nan(matrix: &DMatrix<f64>) -> bool {
    matrix.iter().any(|&x| x.is_nan())
}

/// Validate a cost matrix: non-empty, square, every entry finite.
pub fn validate_cost_matrix(matrix: &DMatrix<f64>) -> Result<()> {
    let (rows, cols) = matrix.shape();
    if rows == 0 || cols == 0 {
        return Err(Error::InvalidMatrix(format!(
            "cost matrix is empty ({}x{})",
            rows, cols
        )));
    }
    if rows != cols {
        return Err(Error::InvalidMatrix(format!(
            "cost matrix must be square, got {}x{}",
            rows, cols
        )));
    }
    if has_nan(matrix) {
        return Err(Error::InvalidMatrix("cost matrix contains NaN values".to_string()));
    }
    if let Some(((i, j), x)) = (0..rows)
        .flat_map(|i| (0..cols).map(move |j| (i, j)))
        .map(|idx| (idx, matrix[idx]))
        .find(|(_, x)| x.is_infinite())
    {
        return Err(Error::InvalidMatrix(format!(
            "cost matrix contains non-finite value {} at ({}, {})",
            x, i, j
        )));
    }
    Ok(())
}

/// Compute a minimum-cost perfect matching of a square cost matrix.
///
/// When several optimal matchings exist, which one is returned is deterministic but
/// unspecified; only the total cost is guaranteed minimal.
///
/// # Errors
/// - `InvalidMatrix` for empty, non-square or non-finite input
/// - `AssignmentFailure` if the solver produces something other than a permutation
pub fn solve_assignment(matrix: &DMatrix<f64>) -> Result<Assignment> {
    validate_cost_matrix(matrix)?;

    let columns = linear_sum_assignment(matrix)?;
    let total_cost: f64 = columns
        .iter()
        .enumerate()
        .map(|(i, &j)| matrix[(i, j)])
        .sum();

    let assignment = Assignment { columns, total_cost };
    if assignment.len() != matrix.nrows() || !assignment.is_permutation() {
        return Err(Error::AssignmentFailure(format!(
            "solver returned a non-permutation: {:?}",
            assignment.columns
        )));
    }

    debug!(n = assignment.len(), total_cost, "assignment solved");
    Ok(assignment)
}
