//! Deterministic random number generation
//!
//! Uses xorshift64* algorithm for fast, deterministic random number generation.
//! CRITICAL: All randomness in the simulators MUST go through this module, so
//! that a seed fully determines the output of a run.

mod sampling;
mod xorshift;

pub use xorshift::{derive_seed, RngManager};
