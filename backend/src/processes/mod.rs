//! Discrete-step stochastic processes
//!
//! - **gbm**: geometric Brownian motion price paths
//! - **random_walk**: reflecting random walk with an absorbing barrier
//! - **markov**: finite discrete-time Markov chains
//! - **birth_death**: population birth-death process
//! - **epidemic**: chain-binomial SIR epidemic

pub mod birth_death;
pub mod epidemic;
pub mod gbm;
pub mod markov;
pub mod random_walk;

pub use birth_death::{BirthDeathConfig, BirthDeathRun};
pub use epidemic::{SirConfig, SirRun, SirState};
pub use gbm::GbmConfig;
pub use markov::TransitionMatrix;
pub use random_walk::{expected_absorption_time, RandomWalkConfig};
