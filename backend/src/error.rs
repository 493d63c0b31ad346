//! Error types shared by every simulator and estimator in the crate.
//!
//! All validation happens before any simulation work begins: a runner either
//! rejects its parameters up front or runs to completion.

use thiserror::Error;

/// Errors surfaced by simulation and estimation routines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// A rate, horizon, probability or size parameter is out of range
    #[error("Invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Transition matrix failed validation
    #[error("Invalid transition matrix: {0}")]
    InvalidMatrix(String),

    /// An expected input data file does not exist
    #[error("Input file not found: {path}")]
    MissingInput { path: String },

    /// An input data file exists but could not be read or parsed
    #[error("Invalid input '{path}': {reason}")]
    InvalidInput { path: String, reason: String },

    /// Not enough observations to compute the requested estimate
    #[error("Insufficient data: need at least {needed} observations, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Experiment configuration is inconsistent
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Report or config could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SimulationError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        SimulationError::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

/// Reject anything that is not a finite, strictly positive number.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<(), SimulationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimulationError::invalid(
            name,
            value,
            "must be finite and strictly positive",
        ))
    }
}

/// Reject rates that are negative or not finite. Zero is allowed.
pub(crate) fn require_non_negative(name: &'static str, value: f64) -> Result<(), SimulationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimulationError::invalid(
            name,
            value,
            "must be finite and non-negative",
        ))
    }
}

/// Reject probabilities outside `[0, 1]`.
pub(crate) fn require_probability(name: &'static str, value: f64) -> Result<(), SimulationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SimulationError::invalid(name, value, "must lie in [0, 1]"))
    }
}
