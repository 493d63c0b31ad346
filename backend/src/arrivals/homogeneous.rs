//! Homogeneous Poisson arrivals.
//!
//! Two equivalent constructions are provided: cumulative exponential gaps,
//! and a Poisson count of sorted uniform times (the order-statistics
//! property). Both return ascending times on `[0, horizon)`.

use crate::error::{require_positive, SimulationError};
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

/// Upper limit on the up-front allocation for gap-built arrivals
const MAX_PREALLOCATED: usize = 1 << 20;

/// Arrival time with an attached numeric mark (e.g. revenue per call).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkedArrival {
    pub time: f64,
    pub mark: f64,
}

/// Arrivals built by summing exponential inter-arrival gaps.
pub fn homogeneous_by_gaps(
    rate: f64,
    horizon: f64,
    rng: &mut RngManager,
) -> Result<Vec<f64>, SimulationError> {
    require_positive("rate", rate)?;
    require_positive("horizon", horizon)?;

    let mut times = Vec::with_capacity(preallocation(rate, horizon));
    let mut t = rng.exponential(rate);
    while t < horizon {
        times.push(t);
        t += rng.exponential(rate);
    }
    Ok(times)
}

fn preallocation(rate: f64, horizon: f64) -> usize {
    (rate * horizon * 1.1).min(MAX_PREALLOCATED as f64) as usize
}

/// Arrivals built from `N ~ Poisson(rate · horizon)` sorted uniform times.
pub fn homogeneous_by_order_stats(
    rate: f64,
    horizon: f64,
    rng: &mut RngManager,
) -> Result<Vec<f64>, SimulationError> {
    require_positive("rate", rate)?;
    require_positive("horizon", horizon)?;

    let count = rng.poisson(rate * horizon) as usize;
    let upper = horizon * (1.0 - f64::EPSILON);
    let mut times: Vec<f64> = (0..count)
        .map(|_| (rng.next_f64() * horizon).min(upper))
        .collect();
    times.sort_by(f64::total_cmp);
    Ok(times)
}

/// Poisson arrivals, each marked with an exponential amount of the given
/// mean rounded to two decimals (currency).
///
/// # Example
/// ```
/// use stochastic_sim_core::arrivals::marked_arrivals;
/// use stochastic_sim_core::RngManager;
///
/// let mut rng = RngManager::new(5);
/// let calls = marked_arrivals(2.5, 60.0, 15.0, &mut rng).unwrap();
/// assert!(calls.iter().all(|c| c.mark >= 0.0));
/// ```
pub fn marked_arrivals(
    rate: f64,
    horizon: f64,
    mean_mark: f64,
    rng: &mut RngManager,
) -> Result<Vec<MarkedArrival>, SimulationError> {
    require_positive("mean_mark", mean_mark)?;
    let times = homogeneous_by_gaps(rate, horizon, rng)?;

    Ok(times
        .into_iter()
        .map(|time| {
            let mark = (rng.exponential(1.0 / mean_mark) * 100.0).round() / 100.0;
            MarkedArrival { time, mark }
        })
        .collect())
}
