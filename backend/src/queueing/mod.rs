//! Single-server FIFO queue simulation
//!
//! - **distribution**: renewal distributions for inter-arrival and service times
//! - **simulator**: the discrete-event loop
//! - **theory**: closed-form M/M/1 results to check simulations against
//!
//! # Example
//!
//! ```
//! use stochastic_sim_core::queueing::{run_mm1, Mm1Theory};
//! use stochastic_sim_core::RngManager;
//!
//! let mut rng = RngManager::new(42);
//! let (mean_queue_length, mean_wait_time) = run_mm1(3.0, 4.0, 1000.0, &mut rng).unwrap();
//!
//! let theory = Mm1Theory::new(3.0, 4.0).unwrap();
//! assert_eq!(theory.mean_in_system(), Some(3.0));
//! assert!(mean_queue_length > 0.0 && mean_wait_time > 0.0);
//! ```

pub mod distribution;
pub mod simulator;
pub mod theory;

pub use distribution::RenewalDistribution;
pub use simulator::{run_mm1, QueueConfig, QueueRunResult, QueueSimulator, QueueSummary};
pub use theory::Mm1Theory;
