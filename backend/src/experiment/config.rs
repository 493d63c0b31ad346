//! Experiment configuration.
//!
//! An experiment is one model, a master seed and a number of independent
//! replications. Configs deserialize from JSON or TOML:
//!
//! ```toml
//! name = "mm1-baseline"
//! seed = 42
//! replications = 20
//!
//! [model]
//! kind = "mm1"
//! arrival_rate = 3.0
//! service_rate = 4.0
//! horizon = 1000.0
//! ```

use crate::arrivals::{IntensityProfile, ThinningGenerator};
use crate::error::{require_positive, SimulationError};
use crate::processes::{BirthDeathConfig, GbmConfig, RandomWalkConfig, SirConfig, TransitionMatrix};
use crate::queueing::QueueConfig;
use serde::{Deserialize, Serialize};

fn default_replications() -> usize {
    1
}

/// Complete description of an experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    #[serde(default)]
    pub name: Option<String>,

    /// Master seed; replication `i` uses `derive_seed(seed, i)`
    pub seed: u64,

    #[serde(default = "default_replications")]
    pub replications: usize,

    pub model: ModelConfig,
}

/// Monte Carlo walks through a Markov chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkovExperiment {
    /// Defaults to the five-state customer support chain
    #[serde(default)]
    pub transitions: Option<TransitionMatrix>,
    pub start: usize,
    pub target: usize,
    pub max_steps: usize,
    pub trials: usize,
}

impl MarkovExperiment {
    pub fn chain(&self) -> TransitionMatrix {
        self.transitions
            .clone()
            .unwrap_or_else(TransitionMatrix::customer_support)
    }
}

/// The model to simulate, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelConfig {
    /// M/M/1 queue
    Mm1 {
        arrival_rate: f64,
        service_rate: f64,
        horizon: f64,
    },

    /// Single-server queue with arbitrary renewal distributions
    Gg1(QueueConfig),

    /// Non-homogeneous Poisson arrivals by thinning
    Nhpp {
        horizon: f64,
        intensity: IntensityProfile,
    },

    /// Homogeneous Poisson arrivals with optional exponential marks
    Homogeneous {
        rate: f64,
        horizon: f64,
        #[serde(default)]
        mean_mark: Option<f64>,
    },

    /// Geometric Brownian motion path plus MLE refit
    Gbm(GbmConfig),

    /// Reflecting random walk absorption time
    RandomWalk(RandomWalkConfig),

    /// Markov chain absorption
    Markov(MarkovExperiment),

    /// Birth-death population
    BirthDeath(BirthDeathConfig),

    /// SIR epidemic
    Sir(SirConfig),
}

impl ModelConfig {
    /// Short name used in logs and reports
    pub fn kind(&self) -> &'static str {
        match self {
            ModelConfig::Mm1 { .. } => "mm1",
            ModelConfig::Gg1(_) => "gg1",
            ModelConfig::Nhpp { .. } => "nhpp",
            ModelConfig::Homogeneous { .. } => "homogeneous",
            ModelConfig::Gbm(_) => "gbm",
            ModelConfig::RandomWalk(_) => "random_walk",
            ModelConfig::Markov(_) => "markov",
            ModelConfig::BirthDeath(_) => "birth_death",
            ModelConfig::Sir(_) => "sir",
        }
    }

    /// The metric aggregated across replications as the headline result
    pub fn headline_metric(&self) -> &'static str {
        match self {
            ModelConfig::Mm1 { .. } | ModelConfig::Gg1(_) => "mean_wait_time",
            ModelConfig::Nhpp { .. } | ModelConfig::Homogeneous { .. } => "count",
            ModelConfig::Gbm(_) => "final_price",
            ModelConfig::RandomWalk(_) => "absorption_time",
            ModelConfig::Markov(_) => "absorption_fraction",
            ModelConfig::BirthDeath(_) => "final_population",
            ModelConfig::Sir(_) => "total_infected",
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        match self {
            ModelConfig::Mm1 {
                arrival_rate,
                service_rate,
                horizon,
            } => QueueConfig::mm1(*arrival_rate, *service_rate, *horizon).validate(),
            ModelConfig::Gg1(config) => config.validate(),
            ModelConfig::Nhpp { horizon, intensity } => {
                intensity.validate()?;
                ThinningGenerator::new(*horizon)?.bound(intensity).map(|_| ())
            }
            ModelConfig::Homogeneous {
                rate,
                horizon,
                mean_mark,
            } => {
                require_positive("rate", *rate)?;
                require_positive("horizon", *horizon)?;
                match mean_mark {
                    Some(mark) => require_positive("mean_mark", *mark),
                    None => Ok(()),
                }
            }
            ModelConfig::Gbm(config) => config.validate(),
            ModelConfig::RandomWalk(config) => config.validate(),
            ModelConfig::Markov(experiment) => {
                let chain = experiment.chain();
                chain.validate()?;
                for (name, state) in [("start", experiment.start), ("target", experiment.target)] {
                    if state >= chain.num_states() {
                        return Err(SimulationError::InvalidConfig(format!(
                            "{} state {} out of range for {} states",
                            name,
                            state,
                            chain.num_states()
                        )));
                    }
                }
                if experiment.trials == 0 {
                    return Err(SimulationError::InvalidConfig(
                        "trials must be > 0".to_string(),
                    ));
                }
                Ok(())
            }
            ModelConfig::BirthDeath(config) => config.validate(),
            ModelConfig::Sir(config) => config.validate(),
        }
    }
}

impl ExperimentConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.replications == 0 {
            return Err(SimulationError::InvalidConfig(
                "replications must be > 0".to_string(),
            ));
        }
        self.model.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_mm1_from_json() {
        let json = r#"{
            "seed": 7,
            "model": {"kind": "mm1", "arrival_rate": 3.0, "service_rate": 4.0, "horizon": 100.0}
        }"#;
        let config: ExperimentConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.replications, 1);
        assert_eq!(config.model.kind(), "mm1");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_gg1_nested_distributions() {
        let json = r#"{
            "seed": 1,
            "replications": 3,
            "model": {
                "kind": "gg1",
                "arrival": {"type": "uniform", "min": 0.5, "max": 1.5},
                "service": {"type": "deterministic", "interval": 0.8},
                "horizon": 50.0
            }
        }"#;
        let config: ExperimentConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.model.headline_metric(), "mean_wait_time");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_replications_rejected() {
        let config = ExperimentConfig {
            name: None,
            seed: 1,
            replications: 0,
            model: ModelConfig::Gbm(GbmConfig::default()),
        };
        assert!(matches!(config.validate(), Err(SimulationError::InvalidConfig(_))));
    }

    #[test]
    fn test_markov_state_bounds_checked() {
        let model = ModelConfig::Markov(MarkovExperiment {
            transitions: None,
            start: 0,
            target: 7,
            max_steps: 20,
            trials: 10,
        });
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_nhpp_negative_profile_rejected() {
        let model = ModelConfig::Nhpp {
            horizon: 24.0,
            intensity: IntensityProfile::Constant { rate: -1.0 },
        };
        assert!(matches!(
            model.validate(),
            Err(SimulationError::InvalidParameter { name: "intensity", .. })
        ));
    }
}
