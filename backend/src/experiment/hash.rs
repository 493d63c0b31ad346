//! Config fingerprinting.
//!
//! Reports carry a SHA-256 of the canonical JSON of the config that produced
//! them, so two reports can be checked for "same config, same seed" before
//! their numbers are compared.

use crate::error::SimulationError;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Hex SHA-256 of a config's JSON with object keys sorted.
///
/// `serde_json::Map` is ordered by key unless the `preserve_order` feature is
/// enabled, so going through a `Value` is enough to make the text canonical.
///
/// # Example
/// ```
/// use stochastic_sim_core::experiment::compute_config_hash;
///
/// let a = compute_config_hash(&serde_json::json!({"b": 1, "a": 2})).unwrap();
/// let b = compute_config_hash(&serde_json::json!({"a": 2, "b": 1})).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 64);
/// ```
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, SimulationError> {
    let canonical = serde_json::to_value(config)
        .and_then(|value| serde_json::to_string(&value))
        .map_err(|e| SimulationError::Serialization(format!("config serialization failed: {}", e)))?;

    let digest = Sha256::digest(canonical.as_bytes());
    Ok(digest.iter().map(|byte| format!("{:02x}", byte)).collect())
}
