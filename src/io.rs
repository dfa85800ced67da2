//! Point file reader.
//!
//! Files hold one point per line as whitespace-separated numbers:
//! ```text
//! # weights for 3 objectives
//! 1.0 0.0 0.0
//! 0.5 0.5 0.0
//! ```
//! Lines starting with `#` and blank lines are ignored.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::{Error, PointSet, Result};

/// Read a point set from a file.
///
/// # Errors
/// - `IoError` if the file cannot be read
/// - `Format` if a token is not a number
/// - `DimensionMismatch` if rows differ in length or the file has no points
pub fn read_point_file<P: AsRef<Path>>(file_path: P) -> Result<PointSet> {
    let path = file_path.as_ref().to_string_lossy().to_string();
    let text = fs::read_to_string(&file_path).map_err(|e| {
        Error::IoError(std::io::Error::new(
            e.kind(),
            format!("can not open the file '{}': {}", path, e),
        ))
    })?;

    let points = parse_points(&text, &path)?;
    debug!(file = %path, n = points.len(), dim = points.dim(), "read point file");
    Ok(points)
}

/// Parse point rows from text; `name` is used in error messages.
pub fn parse_points(text: &str, name: &str) -> Result<PointSet> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut first_line = 0;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }

        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<f64>().map_err(|_| Error::Format {
                    path: name.to_string(),
                    line: line_no,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        if let Some(first) = rows.first() {
            if row.len() != first.len() {
                return Err(Error::DimensionMismatch {
                    expected: format!(
                        "{} values per line in {} (as on line {})",
                        first.len(),
                        name,
                        first_line
                    ),
                    got: format!("{} values on line {}", row.len(), line_no),
                });
            }
        } else {
            first_line = line_no;
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(Error::DimensionMismatch {
            expected: format!("at least one point in {}", name),
            got: "no points".to_string(),
        });
    }

    PointSet::from_rows(&rows)
}
