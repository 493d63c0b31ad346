//! Simulation time management

pub mod clock;
