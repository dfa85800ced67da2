//! SciPy functions port.
//!
//! Ported from:
//! - scipy.optimize
//!
//! License: BSD 3-Clause (SciPy Developers)

mod optimize;

pub use optimize::*;
