//! Rate estimation for a homogeneous Poisson process observed over `[0, T]`.

use crate::error::{require_positive, SimulationError};
use serde::{Deserialize, Serialize};

/// z-score for a two-sided 95% interval
pub const Z_95: f64 = 1.96;

/// MLE of a Poisson rate with its normal-approximation 95% interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateEstimate {
    pub count: usize,
    pub observation_time: f64,
    /// λ̂ = n / T
    pub rate: f64,
    /// √(λ̂ / T)
    pub standard_error: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
}

impl RateEstimate {
    pub fn contains(&self, rate: f64) -> bool {
        (self.ci_lower..=self.ci_upper).contains(&rate)
    }
}

/// Estimate the rate from `count` events over `observation_time`.
///
/// # Example
/// ```
/// use stochastic_sim_core::estimation::estimate_rate;
///
/// let est = estimate_rate(108_000, 43_200.0).unwrap();
/// assert_eq!(est.rate, 2.5);
/// assert!(est.contains(2.5));
/// ```
pub fn estimate_rate(count: usize, observation_time: f64) -> Result<RateEstimate, SimulationError> {
    require_positive("observation_time", observation_time)?;

    let rate = count as f64 / observation_time;
    let standard_error = (rate / observation_time).sqrt();

    Ok(RateEstimate {
        count,
        observation_time,
        rate,
        standard_error,
        ci_lower: rate - Z_95 * standard_error,
        ci_upper: rate + Z_95 * standard_error,
    })
}

/// Gaps between consecutive times, after sorting a copy ascending.
pub fn inter_arrival_times(times: &[f64]) -> Vec<f64> {
    let mut sorted = times.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.windows(2).map(|w| w[1] - w[0]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_count_gives_zero_rate() {
        let est = estimate_rate(0, 10.0).unwrap();
        assert_eq!(est.rate, 0.0);
        assert_eq!(est.standard_error, 0.0);
    }

    #[test]
    fn test_interval_is_symmetric() {
        let est = estimate_rate(400, 100.0).unwrap();
        assert!((est.standard_error - 0.2).abs() < 1e-12);
        assert!((est.rate - est.ci_lower - (est.ci_upper - est.rate)).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_zero_observation_time() {
        assert!(estimate_rate(5, 0.0).is_err());
    }

    #[test]
    fn test_inter_arrivals_sort_first() {
        assert_eq!(inter_arrival_times(&[3.0, 1.0, 6.0]), vec![2.0, 3.0]);
        assert!(inter_arrival_times(&[1.0]).is_empty());
    }
}
