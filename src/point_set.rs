//! Point sets: Pareto front approximations and weight vector sets.

use nalgebra::DMatrix;
use crate::{Error, Result};

/// An ordered, non-empty set of points sharing the same dimension.
///
/// Weight sets use the same type; they are just read as reference directions.
/// Rows are stored contiguously (row-major) so that each point is a plain slice.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    data: Vec<f64>,
    dim: usize,
}

impl PointSet {
    /// Build a point set from rows, rejecting empty and ragged input.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let first = rows.first().ok_or_else(|| Error::DimensionMismatch {
            expected: "at least one point".to_string(),
            got: "an empty point set".to_string(),
        })?;

        let dim = first.as_ref().len();
        if dim == 0 {
            return Err(Error::DimensionMismatch {
                expected: "points with at least one objective".to_string(),
                got: "a point of dimension 0".to_string(),
            });
        }

        let mut data = Vec::with_capacity(rows.len() * dim);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != dim {
                return Err(Error::DimensionMismatch {
                    expected: format!("every point to have dimension {}", dim),
                    got: format!("point {} of dimension {}", i, row.len()),
                });
            }
            data.extend_from_slice(row);
        }

        Ok(Self { data, dim })
    }

    /// Build a point set from a matrix with one point per row.
    pub fn from_matrix(matrix: &DMatrix<f64>) -> Result<Self> {
        let rows: Vec<Vec<f64>> = matrix
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect();
        Self::from_rows(&rows)
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.data.len() / self.dim
    }

    /// Always false: construction rejects empty sets.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of objectives per point.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The `i`-th point.
    ///
    /// # Panics
    /// Panics if `i >= self.len()`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    /// Iterate over points in order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.dim)
    }

    /// Copy into an `(n, d)` matrix.
    pub fn to_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_row_slice(self.len(), self.dim, &self.data)
    }

    /// Check that `other` can be paired one-to-one with `self`.
    pub fn ensure_compatible(&self, other: &PointSet) -> Result<()> {
        if self.len() != other.len() {
            return Err(Error::DimensionMismatch {
                expected: format!("{} points", self.len()),
                got: format!("{} points", other.len()),
            });
        }
        if self.dim != other.dim {
            return Err(Error::DimensionMismatch {
                expected: format!("points of dimension {}", self.dim),
                got: format!("points of dimension {}", other.dim),
            });
        }
        Ok(())
    }

    /// True if any coordinate is negative.
    pub fn has_negative(&self) -> bool {
        self.data.iter().any(|&x| x < 0.0)
    }
}
