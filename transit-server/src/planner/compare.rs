//! Side-by-side run of both solvers on the same request.

use std::time::{Duration, Instant};

use rand::Rng;
use tracing::info;

use crate::domain::{RouteResult, Weights};

use super::config::SlimeConfig;
use super::error::RouteError;
use super::route::RoutePlanner;

#[derive(Debug, Clone)]
pub struct Comparison {
    pub exact: RouteResult,
    pub exact_elapsed: Duration,
    pub slime: RouteResult,
    pub slime_elapsed: Duration,
    /// How much worse the metaheuristic is, in percent of the exact cost.
    pub gap_percent: Option<f64>,
}

/// Run the exact solver, then the slime-mould search, and time both.
pub fn compare_solvers<R: Rng>(
    planner: &RoutePlanner<'_>,
    origin: &str,
    destination: &str,
    weights: &Weights,
    config: &SlimeConfig,
    rng: &mut R,
) -> Result<Comparison, RouteError> {
    let started = Instant::now();
    let exact = planner.solve_exact(origin, destination, weights)?;
    let exact_elapsed = started.elapsed();

    let started = Instant::now();
    let slime = planner.solve_metaheuristic(origin, destination, weights, config, rng)?;
    let slime_elapsed = started.elapsed();

    let gap_percent = optimality_gap(exact.cost, slime.cost);
    info!(
        origin,
        destination,
        exact_cost = exact.cost,
        slime_cost = slime.cost,
        exact_ms = exact_elapsed.as_millis() as u64,
        slime_ms = slime_elapsed.as_millis() as u64,
        gap_percent,
        "solver comparison"
    );

    Ok(Comparison {
        exact,
        exact_elapsed,
        slime,
        slime_elapsed,
        gap_percent,
    })
}

/// `(heuristic - exact) / exact` as a percentage, when defined.
pub fn optimality_gap(exact: f64, heuristic: f64) -> Option<f64> {
    (exact.is_finite() && heuristic.is_finite() && exact != 0.0)
        .then(|| (heuristic - exact) / exact * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gap_is_relative_to_exact() {
        assert_eq!(optimality_gap(2.0, 3.0), Some(50.0));
        assert_eq!(optimality_gap(2.0, 2.0), Some(0.0));
    }

    #[test]
    fn gap_undefined_for_zero_or_infinite() {
        assert_eq!(optimality_gap(0.0, 1.0), None);
        assert_eq!(optimality_gap(f64::INFINITY, 1.0), None);
        assert_eq!(optimality_gap(1.0, f64::NAN), None);
    }
}
