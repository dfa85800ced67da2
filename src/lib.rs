//! # ILAP - Linear Assignment Problem Indicator
//!
//! Rust implementation of the ILAP quality indicator for Pareto front approximations:
//! Valencia-Rodríguez, D.C., Coello Coello, C.A. (2023). *A Novel Performance Indicator
//! Based on the Linear Assignment Problem*. EMO 2023, LNCS vol 13970.
//!
//! A reference set of uniformly distributed weight vectors is matched one-to-one to the
//! points of an approximation set. The cost of pairing a weight vector with a point is the
//! achievement scalarizing function (ASF); the indicator is the mean cost of the optimal
//! matching. Lower is better.
//!
//! ## Pipeline
//!
//! - [`scalarize`] - ASF and the [`Scalarizer`] trait
//! - [`cost`] - dense cost matrix between weights (rows) and points (columns)
//! - [`matching`] - minimum-cost perfect matching (Hungarian / Jonker-Volgenant)
//! - [`indicator`] - orchestration and reduction to the indicator value
//!
//! ## Example
//!
//! ```rust
//! use ilap_rs::compute_indicator;
//!
//! let weights = vec![vec![1.0, 1.0], vec![2.0, 2.0], vec![3.0, 3.0]];
//! let points = weights.clone();
//! let value = compute_indicator(&weights, &points).unwrap();
//! assert_eq!(value, 1.0);
//! ```

// Internal modules (ports of scipy)
pub(crate) mod internal;

// Public modules
pub mod point_set;
pub mod scalarize;
pub mod cost;
pub mod matching;
pub mod indicator;
pub mod io;

// Optional modules
#[cfg(feature = "python")]
pub mod python;

// Re-exports for convenience
pub use point_set::PointSet;
pub use scalarize::{asf, weight_floor, Asf, Scalarizer};
pub use cost::build_cost_matrix;
pub use matching::{solve_assignment, Assignment};
pub use indicator::{compute_indicator, IndicatorConfig, IndicatorReport, LapIndicator};

// Error types
pub use crate::error::{Error, Result};

mod error {
    use thiserror::Error;

    /// Errors that can occur while computing the indicator
    #[derive(Error, Debug)]
    pub enum Error {
        #[error("Wrong format in {path}: '{token}' is not a number (line {line})")]
        Format {
            path: String,
            line: usize,
            token: String,
        },

        #[error("Dimension mismatch: expected {expected}, got {got}")]
        DimensionMismatch { expected: String, got: String },

        #[error("Invalid matrix: {0}")]
        InvalidMatrix(String),

        #[error("Assignment failure: {0}")]
        AssignmentFailure(String),

        #[error("Invalid configuration: {0}")]
        InvalidConfig(String),

        #[error("Computation cancelled")]
        Cancelled,

        #[error("IO error: {0}")]
        IoError(#[from] std::io::Error),
    }

    /// Result type for indicator operations
    pub type Result<T> = std::result::Result<T, Error>;
}
