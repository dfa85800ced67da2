//! SciPy optimization functions port.
//!
//! Ported from scipy.optimize.linear_sum_assignment (rectangular_lsap.cpp)
//! License: BSD 3-Clause (SciPy Developers)
#![allow(clippy::needless_range_loop)]

use nalgebra::DMatrix;
use crate::{Error, Result};

/// Solve the linear sum assignment problem on a square cost matrix.
///
/// Shortest augmenting path method with row and column potentials
/// (Jonker-Volgenant, as described by Crouse and implemented in scipy).
/// Rows are added one at a time; each addition runs a Dijkstra-like search over
/// reduced costs `cost[(i, j)] - u[i] - v[j]`, always recomputed from the raw
/// entries, then augments along the shortest path and updates the potentials.
///
/// # Arguments
/// * `cost` - Finite `(n, n)` cost matrix, `n >= 1`
///
/// # Returns
/// `result[i]` is the column assigned to row `i`.
///
/// # Errors
/// `AssignmentFailure` if no augmenting path exists. This cannot happen for a
/// finite square matrix; callers validate the matrix first.
///
/// O(n^3) time, O(n) extra space.
pub fn linear_sum_assignment(cost: &DMatrix<f64>) -> Result<Vec<usize>> {
    let n = cost.nrows();
    debug_assert_eq!(n, cost.ncols(), "cost matrix must be square");

    let mut u = vec![0.0; n];
    let mut v = vec![0.0; n];
    let mut shortest_path_costs = vec![f64::INFINITY; n];
    let mut path = vec![usize::MAX; n];
    let mut col4row: Vec<Option<usize>> = vec![None; n];
    let mut row4col: Vec<Option<usize>> = vec![None; n];
    let mut visited_rows = vec![false; n];
    let mut visited_cols = vec![false; n];
    let mut remaining = vec![0usize; n];

    for cur_row in 0..n {
        // Search
        visited_rows.iter_mut().for_each(|x| *x = false);
        visited_cols.iter_mut().for_each(|x| *x = false);
        shortest_path_costs.iter_mut().for_each(|x| *x = f64::INFINITY);

        // Columns are visited in reverse order, matching scipy's tie-breaking
        for (it, slot) in remaining.iter_mut().enumerate() {
            *slot = n - it - 1;
        }
        let mut num_remaining = n;

        let mut min_val = 0.0;
        let mut i = cur_row;
        let sink = loop {
            let mut index: Option<usize> = None;
            let mut lowest = f64::INFINITY;
            visited_rows[i] = true;

            for it in 0..num_remaining {
                let j = remaining[it];

                let r = min_val + cost[(i, j)] - u[i] - v[j];
                if r < shortest_path_costs[j] {
                    path[j] = i;
                    shortest_path_costs[j] = r;
                }

                // Prefer free columns on ties so the path ends as early as possible
                if shortest_path_costs[j] < lowest
                    || (shortest_path_costs[j] == lowest && row4col[j].is_none())
                {
                    lowest = shortest_path_costs[j];
                    index = Some(it);
                }
            }

            let index = match index {
                Some(index) if lowest.is_finite() => index,
                _ => {
                    return Err(Error::AssignmentFailure(format!(
                        "no augmenting path from row {}",
                        cur_row
                    )))
                }
            };

            min_val = lowest;
            let j = remaining[index];
            visited_cols[j] = true;
            num_remaining -= 1;
            remaining[index] = remaining[num_remaining];

            match row4col[j] {
                None => break j,
                Some(next_row) => i = next_row,
            }
        };

        // Update dual variables
        u[cur_row] += min_val;
        for i in 0..n {
            if visited_rows[i] && i != cur_row {
                if let Some(j) = col4row[i] {
                    u[i] += min_val - shortest_path_costs[j];
                }
            }
        }
        for j in 0..n {
            if visited_cols[j] {
                v[j] -= min_val - shortest_path_costs[j];
            }
        }

        // Augment previous solution
        let mut j = sink;
        loop {
            let i = path[j];
            row4col[j] = Some(i);
            let previous = col4row[i].replace(j);
            if i == cur_row {
                break;
            }
            j = previous.ok_or_else(|| {
                Error::AssignmentFailure(format!("broken augmenting path at row {}", i))
            })?;
        }
    }

    col4row
        .into_iter()
        .enumerate()
        .map(|(row, col)| {
            col.ok_or_else(|| Error::AssignmentFailure(format!("row {} left unassigned", row)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(cost: &DMatrix<f64>, cols: &[usize]) -> f64 {
        cols.iter().enumerate().map(|(i, &j)| cost[(i, j)]).sum()
    }

    #[test]
    fn test_linear_sum_assignment_basic_square() {
        let cost = DMatrix::from_row_slice(3, 3, &[
            4.0, 1.0, 3.0,
            2.0, 0.0, 5.0,
            3.0, 2.0, 2.0,
        ]);
        let cols = linear_sum_assignment(&cost).unwrap();

        // Optimal: (0,1)=1 + (1,0)=2 + (2,2)=2 = 5
        assert_eq!(cols, vec![1, 0, 2]);
        assert!((total(&cost, &cols) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_linear_sum_assignment_single_element() {
        let cost = DMatrix::from_row_slice(1, 1, &[3.0]);
        assert_eq!(linear_sum_assignment(&cost).unwrap(), vec![0]);
    }

    #[test]
    fn test_linear_sum_assignment_zero_costs() {
        let cost = DMatrix::zeros(4, 4);
        let cols = linear_sum_assignment(&cost).unwrap();

        let mut sorted = cols.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3]);
        assert_eq!(total(&cost, &cols), 0.0);
    }

    #[test]
    fn test_linear_sum_assignment_beats_greedy() {
        // Greedy takes (0,0)=1 first and ends at 1 + 4 + 9 = 14
        let cost = DMatrix::from_row_slice(3, 3, &[
            1.0, 2.0, 3.0,
            2.0, 4.0, 6.0,
            3.0, 6.0, 9.0,
        ]);
        let cols = linear_sum_assignment(&cost).unwrap();
        assert!((total(&cost, &cols) - 10.0).abs() < 1e-10);
        assert_eq!(cols, vec![2, 1, 0]);
    }

    #[test]
    fn test_linear_sum_assignment_negative_costs() {
        let cost = DMatrix::from_row_slice(2, 2, &[
            -1.0, -5.0,
            -2.0, -1.0,
        ]);
        let cols = linear_sum_assignment(&cost).unwrap();
        assert_eq!(cols, vec![1, 0]);
    }

    #[test]
    fn test_linear_sum_assignment_repeated_entries() {
        let cost = DMatrix::from_row_slice(3, 3, &[
            5.0, 5.0, 1.0,
            5.0, 5.0, 1.0,
            1.0, 5.0, 5.0,
        ]);
        let cols = linear_sum_assignment(&cost).unwrap();
        assert!((total(&cost, &cols) - 7.0).abs() < 1e-10);
    }

    #[test]
    fn test_linear_sum_assignment_large_magnitudes() {
        // Mixes the 1e6 entries produced by the bi-objective weight floor with small ones
        let cost = DMatrix::from_row_slice(3, 3, &[
            1e6, 1.0, 0.5,
            1.0, 1e6, 2.0,
            0.25, 3.0, 1e6,
        ]);
        let cols = linear_sum_assignment(&cost).unwrap();
        assert_eq!(cols, vec![1, 2, 0]);
        assert!((total(&cost, &cols) - 3.25).abs() < 1e-9);
    }
}
