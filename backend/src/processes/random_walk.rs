//! Random walk on {0, 1, ..., N} reflecting at 0 and absorbed at N.

use crate::error::{require_probability, SimulationError};
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

/// Reflecting random walk parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomWalkConfig {
    /// Absorbing barrier N (≥ 1)
    pub barrier: u64,
    /// Probability of a +1 step away from 0
    pub p_right: f64,
    /// Give up after this many steps. With a left drift the expected time
    /// grows like (q/p)^N, so unbounded runs may not finish.
    #[serde(default)]
    pub max_steps: Option<u64>,
}

impl RandomWalkConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.barrier == 0 {
            return Err(SimulationError::invalid("barrier", 0.0, "must be at least 1"));
        }
        require_probability("p_right", self.p_right)?;
        if self.p_right == 0.0 || self.p_right == 1.0 {
            return Err(SimulationError::invalid(
                "p_right",
                self.p_right,
                "must lie strictly between 0 and 1",
            ));
        }
        if self.max_steps == Some(0) {
            return Err(SimulationError::invalid("max_steps", 0.0, "must be at least 1"));
        }
        Ok(())
    }

    /// Steps needed to reach the barrier starting from 0, or `None` if
    /// `max_steps` ran out first.
    ///
    /// At 0 the walk always moves to 1.
    pub fn absorption_time(&self, rng: &mut RngManager) -> Result<Option<u64>, SimulationError> {
        self.validate()?;

        let mut state = 0u64;
        let mut steps = 0u64;
        while state < self.barrier {
            if self.max_steps.is_some_and(|cap| steps >= cap) {
                return Ok(None);
            }
            if state == 0 || rng.bernoulli(self.p_right) {
                state += 1;
            } else {
                state -= 1;
            }
            steps += 1;
        }
        Ok(Some(steps))
    }

    /// Closed-form expected absorption time, see [`expected_absorption_time`].
    pub fn expected_absorption_time(&self) -> f64 {
        expected_absorption_time(self.barrier, self.p_right)
    }
}

/// Expected steps from 0 to N with reflection at 0.
///
/// `N²` when p = ½, otherwise
/// `N/(p−q) − 2pq/(p−q)² · (1 − (q/p)^N)`.
///
/// # Example
/// ```
/// use stochastic_sim_core::processes::expected_absorption_time;
///
/// assert_eq!(expected_absorption_time(200, 0.5), 40_000.0);
/// ```
pub fn expected_absorption_time(barrier: u64, p_right: f64) -> f64 {
    let n = barrier as f64;
    let q = 1.0 - p_right;
    if (p_right - 0.5).abs() < 1e-12 {
        return n * n;
    }
    let drift = p_right - q;
    n / drift - 2.0 * p_right * q / (drift * drift) * (1.0 - (q / p_right).powf(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_barrier_one_takes_one_step() {
        let config = RandomWalkConfig {
            barrier: 1,
            p_right: 0.3,
            max_steps: None,
        };
        let mut rng = RngManager::new(1);
        assert_eq!(config.absorption_time(&mut rng).unwrap(), Some(1));
        assert!((config.expected_absorption_time() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_parity_of_absorption_time() {
        // Every step changes parity, so reaching N from 0 takes N + 2k steps
        let config = RandomWalkConfig {
            barrier: 10,
            p_right: 0.5,
            max_steps: None,
        };
        let mut rng = RngManager::new(6);
        for _ in 0..50 {
            let steps = config.absorption_time(&mut rng).unwrap().unwrap();
            assert!(steps >= 10);
            assert_eq!(steps % 2, 0);
        }
    }

    #[test]
    fn test_monte_carlo_matches_closed_form() {
        let config = RandomWalkConfig {
            barrier: 20,
            p_right: 0.55,
            max_steps: None,
        };
        let mut rng = RngManager::new(17);
        let trials = 2000;
        let total: u64 = (0..trials)
            .map(|_| config.absorption_time(&mut rng).unwrap().unwrap())
            .sum();
        let mean = total as f64 / trials as f64;
        let expected = config.expected_absorption_time();
        assert!(
            (mean - expected).abs() / expected < 0.05,
            "mean {} vs expected {}",
            mean,
            expected
        );
    }

    #[test]
    fn test_rejects_degenerate_probabilities() {
        for p in [0.0, 1.0, 1.5] {
            let config = RandomWalkConfig {
                barrier: 5,
                p_right: p,
                max_steps: None,
            };
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn test_step_cap_stops_a_hopeless_walk() {
        // Expected time is about 9^60 steps
        let config = RandomWalkConfig {
            barrier: 60,
            p_right: 0.1,
            max_steps: Some(10_000),
        };
        let mut rng = RngManager::new(3);
        assert_eq!(config.absorption_time(&mut rng).unwrap(), None);
    }

    #[test]
    fn test_zero_step_cap_rejected() {
        let config = RandomWalkConfig {
            barrier: 5,
            p_right: 0.5,
            max_steps: Some(0),
        };
        assert!(matches!(
            config.validate(),
            Err(SimulationError::InvalidParameter { name: "max_steps", .. })
        ));
    }
}
