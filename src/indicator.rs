//! ILAP indicator computation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::cost::build_cost_matrix;
use crate::matching::{solve_assignment, Assignment};
use crate::scalarize::Asf;
use crate::{Error, PointSet, Result};

/// Default matrix size from which the cost matrix is filled in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// Configuration for the indicator.
#[derive(Debug, Clone)]
pub struct IndicatorConfig {
    /// Scalarizing function used for every (weight, point) pair.
    pub scalarizer: Asf,

    /// Number of weight vectors from which the cost matrix is built with rayon.
    pub parallel_threshold: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            scalarizer: Asf,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl IndicatorConfig {
    /// Create a configuration with the given parallel threshold.
    pub fn new(parallel_threshold: usize) -> Self {
        Self {
            parallel_threshold,
            ..Self::default()
        }
    }

    /// Check the configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.parallel_threshold == 0 {
            return Err(Error::InvalidConfig(
                "parallel_threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Full result of an indicator evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorReport {
    /// Mean matched cost (the ILAP value). Lower is better.
    pub value: f64,
    /// Optimal pairing: row `i` is weight vector `i`, column is the point index.
    pub assignment: Assignment,
    /// Number of weight vectors (and points).
    pub size: usize,
    /// Number of objectives.
    pub dim: usize,
}

/// ILAP indicator evaluator.
///
/// Holds configuration only; every evaluation is independent and the evaluator
/// can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct LapIndicator {
    /// Indicator configuration.
    pub config: IndicatorConfig,
}

impl LapIndicator {
    /// Create a new evaluator with the given configuration.
    pub fn new(config: IndicatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Compute the indicator value.
    pub fn compute(&self, weights: &PointSet, points: &PointSet) -> Result<f64> {
        Ok(self.evaluate(weights, points)?.value)
    }

    /// Compute the indicator value together with the optimal assignment.
    pub fn evaluate(&self, weights: &PointSet, points: &PointSet) -> Result<IndicatorReport> {
        self.evaluate_with_termination(weights, points, None)
    }

    /// Like [`evaluate`](Self::evaluate), checking `terminate` between building the
    /// cost matrix and solving the assignment.
    ///
    /// # Errors
    /// - `DimensionMismatch` if the sets differ in size or dimension
    /// - `InvalidMatrix` if a cost is not finite (e.g. NaN or infinite coordinates)
    /// - `Cancelled` if `terminate` was set
    pub fn evaluate_with_termination(
        &self,
        weights: &PointSet,
        points: &PointSet,
        terminate: Option<&AtomicBool>,
    ) -> Result<IndicatorReport> {
        weights.ensure_compatible(points)?;

        if points.has_negative() {
            warn!("approximation set has negative objective values; ASF costs may be negative");
        }

        let start = Instant::now();
        let cost = build_cost_matrix(
            weights,
            points,
            &self.config.scalarizer,
            self.config.parallel_threshold,
        )?;
        debug!(elapsed_ms = start.elapsed().as_secs_f64() * 1e3, "cost matrix built");

        if terminate.is_some_and(|flag| flag.load(Ordering::SeqCst)) {
            debug!("terminated before solving the assignment");
            return Err(Error::Cancelled);
        }

        let start = Instant::now();
        let assignment = solve_assignment(&cost)?;
        debug!(elapsed_ms = start.elapsed().as_secs_f64() * 1e3, "assignment solved");

        let size = points.len();
        let value = assignment.total_cost / size as f64;
        info!(event = "indicator", n = size, dim = points.dim(), value);

        Ok(IndicatorReport {
            value,
            assignment,
            size,
            dim: points.dim(),
        })
    }
}

/// Compute the ILAP indicator of `points` with respect to `weights`.
///
/// Both arguments hold one vector per row; they must have the same number of rows
/// and every row the same length. Uses the default [`IndicatorConfig`].
///
/// # Errors
/// `DimensionMismatch` for empty, ragged or incompatible input, `InvalidMatrix` for
/// non-finite costs.
pub fn compute_indicator<R: AsRef<[f64]>>(weights: &[R], points: &[R]) -> Result<f64> {
    let weights = PointSet::from_rows(weights)?;
    let points = PointSet::from_rows(points)?;
    LapIndicator::default().compute(&weights, &points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn set(rows: &[&[f64]]) -> PointSet {
        PointSet::from_rows(rows).unwrap()
    }

    #[test]
    fn test_unit_weights_swapped_points() {
        // Each point is matched to the weight vector it is aligned with
        let weights = set(&[&[1.0, 0.0], &[0.0, 1.0]]);
        let points = set(&[&[0.0, 1.0], &[1.0, 0.0]]);
        let report = LapIndicator::default().evaluate(&weights, &points).unwrap();

        assert_eq!(report.assignment.columns, vec![1, 0]);
        assert_eq!(report.assignment.total_cost, 2.0);
        assert_eq!(report.value, 1.0);
        assert_eq!(report.size, 2);
        assert_eq!(report.dim, 2);
    }

    #[test]
    fn test_identical_sets() {
        let rows = vec![vec![1.0, 1.0], vec![2.0, 2.0], vec![3.0, 3.0]];
        let report = LapIndicator::default()
            .evaluate(&PointSet::from_rows(&rows).unwrap(), &PointSet::from_rows(&rows).unwrap())
            .unwrap();

        assert_eq!(report.assignment.columns, vec![0, 1, 2]);
        assert_eq!(report.value, 1.0);
        assert_eq!(compute_indicator(&rows, &rows).unwrap(), 1.0);
    }

    #[test]
    fn test_single_pair() {
        let value = compute_indicator(&[[0.2, 0.4, 0.6]], &[[0.1, 0.1, 0.3]]).unwrap();
        assert!((value - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_count_mismatch() {
        let weights = vec![vec![1.0, 0.0], vec![0.5, 0.5], vec![0.0, 1.0]];
        let points = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        assert!(matches!(
            compute_indicator(&weights, &points),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_dimension_mismatch() {
        let weights = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let points = vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]];
        assert!(matches!(
            compute_indicator(&weights, &points),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_ragged_and_empty_rejected() {
        let ragged = vec![vec![1.0, 0.0], vec![0.0]];
        let good = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let empty: Vec<Vec<f64>> = Vec::new();

        assert!(matches!(
            compute_indicator(&ragged, &good),
            Err(Error::DimensionMismatch { .. })
        ));
        assert!(matches!(
            compute_indicator(&empty, &empty),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_non_finite_points() {
        let weights = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let points = vec![vec![f64::NAN, 0.0], vec![0.0, 1.0]];
        assert!(matches!(
            compute_indicator(&weights, &points),
            Err(Error::InvalidMatrix(_))
        ));

        let points = vec![vec![f64::INFINITY, 0.0], vec![0.0, 1.0]];
        assert!(matches!(
            compute_indicator(&weights, &points),
            Err(Error::InvalidMatrix(_))
        ));
    }

    #[test]
    fn test_termination_flag() {
        let weights = set(&[&[1.0, 0.0], &[0.0, 1.0]]);
        let points = set(&[&[0.0, 1.0], &[1.0, 0.0]]);
        let indicator = LapIndicator::default();

        let stop = AtomicBool::new(true);
        assert!(matches!(
            indicator.evaluate_with_termination(&weights, &points, Some(&stop)),
            Err(Error::Cancelled)
        ));

        let go = AtomicBool::new(false);
        let report = indicator
            .evaluate_with_termination(&weights, &points, Some(&go))
            .unwrap();
        assert_eq!(report.value, 1.0);
    }

    #[test]
    fn test_config_validation() {
        assert!(LapIndicator::new(IndicatorConfig::new(0)).is_err());
        assert!(LapIndicator::new(IndicatorConfig::new(1)).is_ok());
        assert_eq!(IndicatorConfig::default().parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
    }

    #[test]
    fn test_parallel_path_same_value() {
        let n = 12;
        let weights: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                let t = i as f64 / (n - 1) as f64;
                vec![t, 1.0 - t]
            })
            .collect();
        let points: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                let t = (i * 5 % n) as f64 / (n - 1) as f64;
                vec![t, (1.0 - t * t).sqrt()]
            })
            .collect();
        let weights = PointSet::from_rows(&weights).unwrap();
        let points = PointSet::from_rows(&points).unwrap();

        let sequential = LapIndicator::default().compute(&weights, &points).unwrap();
        let parallel = LapIndicator::new(IndicatorConfig::new(1))
            .unwrap()
            .compute(&weights, &points)
            .unwrap();
        assert_eq!(sequential, parallel);
    }

    fn weights_and_points() -> impl Strategy<Value = (Vec<Vec<f64>>, Vec<Vec<f64>>, Vec<usize>)> {
        (1usize..=6, 2usize..=4).prop_flat_map(|(n, d)| {
            let weights = prop::collection::vec(prop::collection::vec(0.0f64..1.0, d), n);
            let points = prop::collection::vec(prop::collection::vec(0.0f64..10.0, d), n);
            let perm = Just((0..n).collect::<Vec<usize>>()).prop_shuffle();
            (weights, points, perm)
        })
    }

    proptest! {
        #[test]
        fn prop_relabeling_invariance((weights, points, perm) in weights_and_points()) {
            let base = compute_indicator(&weights, &points).unwrap();

            let weights_perm: Vec<Vec<f64>> = perm.iter().map(|&i| weights[i].clone()).collect();
            let points_perm: Vec<Vec<f64>> = perm.iter().map(|&i| points[i].clone()).collect();
            let permuted = compute_indicator(&weights_perm, &points_perm).unwrap();

            prop_assert!((base - permuted).abs() <= 1e-9 * base.abs().max(1.0));
        }

        #[test]
        fn prop_non_negative_for_non_negative_points((weights, points, _perm) in weights_and_points()) {
            prop_assert!(compute_indicator(&weights, &points).unwrap() >= 0.0);
        }
    }
}
