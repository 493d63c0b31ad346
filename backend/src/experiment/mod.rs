//! Seeded, replicated experiments over any of the crate's models.
//!
//! - **config**: `ExperimentConfig` and the tagged `ModelConfig`
//! - **hash**: canonical config fingerprint
//! - **runner**: replication loop and metric aggregation

pub mod config;
pub mod hash;
pub mod runner;

pub use config::{ExperimentConfig, MarkovExperiment, ModelConfig};
pub use hash::compute_config_hash;
pub use runner::{run_experiment, run_replication, theory, ExperimentReport, ReplicationResult};
