//! Discrete-step birth-death population process.
//!
//! In each step of length `dt` a birth happens with probability `β·dt·N`
//! and, independently, a death with probability `δ·dt·N`. Extinction is
//! absorbing.

use crate::error::{require_positive, SimulationError};
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthDeathConfig {
    pub birth_rate: f64,
    pub death_rate: f64,
    pub initial_population: u64,
    pub steps: usize,
    #[serde(default = "default_dt")]
    pub dt: f64,
}

fn default_dt() -> f64 {
    0.1
}

impl Default for BirthDeathConfig {
    fn default() -> Self {
        Self {
            birth_rate: 0.5,
            death_rate: 0.5,
            initial_population: 20,
            steps: 500,
            dt: default_dt(),
        }
    }
}

/// Trajectory of one run (`steps + 1` entries including the start).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthDeathRun {
    pub population: Vec<u64>,
}

impl BirthDeathRun {
    pub fn final_population(&self) -> u64 {
        self.population.last().copied().unwrap_or(0)
    }

    pub fn mean_population(&self) -> f64 {
        if self.population.is_empty() {
            return 0.0;
        }
        self.population.iter().sum::<u64>() as f64 / self.population.len() as f64
    }

    /// First step at which the population hit zero, if it did.
    pub fn extinction_step(&self) -> Option<usize> {
        self.population.iter().position(|n| *n == 0)
    }
}

impl BirthDeathConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        for (name, rate) in [("birth_rate", self.birth_rate), ("death_rate", self.death_rate)] {
            if !(rate.is_finite() && rate >= 0.0) {
                return Err(SimulationError::invalid(
                    name,
                    rate,
                    "must be finite and non-negative",
                ));
            }
        }
        require_positive("dt", self.dt)
    }

    pub fn simulate(&self, rng: &mut RngManager) -> Result<BirthDeathRun, SimulationError> {
        self.validate()?;

        let mut population = Vec::with_capacity(self.steps + 1);
        let mut current = self.initial_population;
        population.push(current);

        for _ in 0..self.steps {
            if current > 0 {
                let n = current as f64;
                let born = rng.bernoulli(self.birth_rate * self.dt * n);
                let died = rng.bernoulli(self.death_rate * self.dt * n);
                if born {
                    current += 1;
                }
                if died {
                    current = current.saturating_sub(1);
                }
            }
            population.push(current);
        }

        Ok(BirthDeathRun { population })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trajectory_length_and_unit_changes() {
        let mut rng = RngManager::new(4);
        let run = BirthDeathConfig::default().simulate(&mut rng).unwrap();
        assert_eq!(run.population.len(), 501);
        assert_eq!(run.population[0], 20);
        for w in run.population.windows(2) {
            assert!(w[0].abs_diff(w[1]) <= 1);
        }
    }

    #[test]
    fn test_extinction_is_absorbing() {
        let config = BirthDeathConfig {
            birth_rate: 0.0,
            death_rate: 2.0,
            initial_population: 3,
            steps: 100,
            dt: 0.1,
        };
        let mut rng = RngManager::new(4);
        let run = config.simulate(&mut rng).unwrap();
        let step = run.extinction_step().unwrap();
        assert!(run.population[step..].iter().all(|n| *n == 0));
        assert_eq!(run.final_population(), 0);
    }

    #[test]
    fn test_pure_birth_grows() {
        let config = BirthDeathConfig {
            birth_rate: 1.0,
            death_rate: 0.0,
            initial_population: 10,
            steps: 50,
            dt: 0.1,
        };
        let mut rng = RngManager::new(4);
        let run = config.simulate(&mut rng).unwrap();
        // Birth probability is 1.0 once N >= 10
        assert_eq!(run.final_population(), 60);
        assert!(run.mean_population() > 10.0);
    }
}
