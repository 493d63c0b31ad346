//! Renewal distributions for inter-arrival and service times.

use crate::error::{require_positive, SimulationError};
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

/// Distribution of the gap between consecutive renewals.
///
/// Exponential gaps give the Markovian "M" of M/M/1; the other variants turn
/// the simulator into a general G/G/1 queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenewalDistribution {
    /// Exponential gaps with the given rate (events per time unit)
    Exponential { rate: f64 },

    /// Fixed gap length
    Deterministic { interval: f64 },

    /// Gaps uniform on `[min, max)`
    Uniform { min: f64, max: f64 },
}

impl RenewalDistribution {
    /// Check parameters before any sampling happens.
    pub fn validate(&self) -> Result<(), SimulationError> {
        match self {
            RenewalDistribution::Exponential { rate } => require_positive("rate", *rate),
            RenewalDistribution::Deterministic { interval } => {
                require_positive("interval", *interval)
            }
            RenewalDistribution::Uniform { min, max } => {
                if !(min.is_finite() && *min >= 0.0) {
                    return Err(SimulationError::invalid(
                        "min",
                        *min,
                        "must be finite and non-negative",
                    ));
                }
                if !(max.is_finite() && max > min) {
                    return Err(SimulationError::invalid("max", *max, "must exceed min"));
                }
                Ok(())
            }
        }
    }

    /// Draw one gap.
    pub fn sample(&self, rng: &mut RngManager) -> f64 {
        match self {
            RenewalDistribution::Exponential { rate } => rng.exponential(*rate),
            RenewalDistribution::Deterministic { interval } => *interval,
            RenewalDistribution::Uniform { min, max } => rng.uniform(*min, *max),
        }
    }

    /// Mean gap length.
    pub fn mean(&self) -> f64 {
        match self {
            RenewalDistribution::Exponential { rate } => 1.0 / rate,
            RenewalDistribution::Deterministic { interval } => *interval,
            RenewalDistribution::Uniform { min, max } => (min + max) / 2.0,
        }
    }

    /// Long-run renewals per time unit (`1 / mean`).
    pub fn rate(&self) -> f64 {
        1.0 / self.mean()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_bad_parameters() {
        assert!(RenewalDistribution::Exponential { rate: 0.0 }.validate().is_err());
        assert!(RenewalDistribution::Deterministic { interval: -1.0 }.validate().is_err());
        assert!(RenewalDistribution::Uniform { min: 2.0, max: 1.0 }.validate().is_err());
        assert!(RenewalDistribution::Uniform { min: 0.0, max: 1.0 }.validate().is_ok());
    }

    #[test]
    fn test_deterministic_does_not_consume_randomness() {
        let mut rng = RngManager::new(8);
        let before = rng.get_state();
        let gap = RenewalDistribution::Deterministic { interval: 0.25 }.sample(&mut rng);
        assert_eq!(gap, 0.25);
        assert_eq!(rng.get_state(), before);
    }

    #[test]
    fn test_rates_and_means() {
        let exp = RenewalDistribution::Exponential { rate: 4.0 };
        assert_eq!(exp.mean(), 0.25);
        assert_eq!(exp.rate(), 4.0);

        let uni = RenewalDistribution::Uniform { min: 1.0, max: 3.0 };
        assert_eq!(uni.mean(), 2.0);
        assert_eq!(uni.rate(), 0.5);
    }

    #[test]
    fn test_deserialize_tagged() {
        let dist: RenewalDistribution =
            serde_json::from_str(r#"{"type": "exponential", "rate": 3.0}"#).unwrap();
        assert_eq!(dist, RenewalDistribution::Exponential { rate: 3.0 });
    }
}
