//! Stochastic Simulation Core
//!
//! Seeded simulators for queues, arrival processes and a handful of classic
//! discrete-step stochastic processes, plus the estimators used to check them.
//!
//! # Architecture
//!
//! - **rng**: Deterministic random number generation and sampling
//! - **core**: Simulation clock
//! - **models**: Event calendar and FIFO queue state
//! - **queueing**: Discrete-event single-server queue (M/M/1, G/G/1)
//! - **arrivals**: Homogeneous and non-homogeneous Poisson arrivals (thinning)
//! - **processes**: GBM, random walk, Markov chain, birth-death, SIR
//! - **estimation**: Rate, GBM and intensity estimators
//! - **experiment**: Config-driven replicated runs
//!
//! # Critical Invariants
//!
//! 1. All randomness is deterministic (seeded RNG)
//! 2. Parameters are validated before any simulation work starts
//! 3. Simulated time never moves backwards

// Module declarations
pub mod arrivals;
pub mod core;
pub mod error;
pub mod estimation;
pub mod experiment;
pub mod models;
pub mod processes;
pub mod queueing;
pub mod rng;

// Re-exports for convenience
pub use arrivals::{generate_nhpp, Intensity, IntensityProfile, ThinningGenerator};
pub use core::clock::SimulationClock;
pub use error::SimulationError;
pub use experiment::{run_experiment, ExperimentConfig, ExperimentReport, ModelConfig};
pub use models::{Event, EventCalendar, EventKind, QueueSample, QueueState, WaitRecord};
pub use queueing::{run_mm1, QueueConfig, QueueSimulator, QueueSummary};
pub use rng::{derive_seed, RngManager};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn stochastic_sim_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::run_mm1, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::generate_nhpp_profile, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::generate_nhpp_constant, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::run_experiment_json, m)?)?;
    Ok(())
}
