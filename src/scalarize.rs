//! Scalarizing functions turning (point, weight vector) pairs into costs.

/// Weight floor for bi-objective problems.
pub const WEIGHT_FLOOR_2D: f64 = 1e-6;

/// Weight floor for every other number of objectives.
pub const WEIGHT_FLOOR: f64 = 1e-2;

/// Trait for scalarizing functions used to fill the cost matrix.
///
/// Implementations must be pure: the same (point, weight) pair always yields
/// the same cost. Lower costs indicate a better pairing.
pub trait Scalarizer: Send + Sync {
    /// Scalarize `point` with respect to the reference direction `weight`.
    ///
    /// Both slices have the same length.
    fn scalarize(&self, point: &[f64], weight: &[f64]) -> f64;
}

/// Achievement scalarizing function (weighted Chebyshev, max-ratio form).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Asf;

impl Scalarizer for Asf {
    #[inline]
    fn scalarize(&self, point: &[f64], weight: &[f64]) -> f64 {
        asf(point, weight)
    }
}

/// Minimum magnitude a weight component may take for `dim` objectives.
#[inline]
pub fn weight_floor(dim: usize) -> f64 {
    if dim == 2 {
        WEIGHT_FLOOR_2D
    } else {
        WEIGHT_FLOOR
    }
}

/// Evaluate the achievement scalarizing function.
///
/// Returns `max_k point[k] / w_k`, where any weight component with magnitude
/// below [`weight_floor`] is replaced by the (positive) floor. A NaN ratio makes
/// the result NaN. Empty input yields 0.
pub fn asf(point: &[f64], weight: &[f64]) -> f64 {
    debug_assert_eq!(point.len(), weight.len(), "point and weight dimensions differ");

    let floor = weight_floor(point.len());
    point
        .iter()
        .zip(weight)
        .map(|(&f, &w)| {
            let w = if w.abs() < floor { floor } else { w };
            f / w
        })
        .reduce(|best, v| if best >= v || best.is_nan() { best } else { v })
        .unwrap_or(0.0)
}
