//! Loading observed event times for the estimators.

use crate::arrivals::homogeneous_by_order_stats;
use crate::error::SimulationError;
use crate::rng::RngManager;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Read a JSON array of event times and sort it ascending.
///
/// # Errors
/// - `MissingInput` if `path` does not exist
/// - `InvalidInput` if it cannot be read or is not an array of numbers
pub fn read_times(path: &Path) -> Result<Vec<f64>, SimulationError> {
    if !path.exists() {
        return Err(SimulationError::MissingInput {
            path: path.display().to_string(),
        });
    }

    let invalid = |reason: String| SimulationError::InvalidInput {
        path: path.display().to_string(),
        reason,
    };
    let text = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    let mut times: Vec<f64> = serde_json::from_str(&text)
        .map_err(|e| invalid(format!("expected a JSON array of numbers: {}", e)))?;
    times.sort_by(f64::total_cmp);

    debug!(path = %path.display(), count = times.len(), "loaded event times");
    Ok(times)
}

/// Read event times from `path`, or generate homogeneous Poisson arrivals at
/// `fallback_rate` on `[0, window)` when the file is missing.
///
/// The flag is `true` when the times are synthetic. Only a missing file
/// triggers the fallback; any other error is returned.
///
/// # Example
/// ```
/// use std::path::Path;
/// use stochastic_sim_core::estimation::load_times_or_synthetic;
/// use stochastic_sim_core::RngManager;
///
/// let mut rng = RngManager::new(42);
/// let (times, synthetic) =
///     load_times_or_synthetic(Path::new("no/such/file.json"), 5.0, 60.0, &mut rng).unwrap();
/// assert!(synthetic);
/// assert!(times.iter().all(|t| (0.0..60.0).contains(t)));
/// ```
pub fn load_times_or_synthetic(
    path: &Path,
    fallback_rate: f64,
    window: f64,
    rng: &mut RngManager,
) -> Result<(Vec<f64>, bool), SimulationError> {
    match read_times(path) {
        Ok(times) => Ok((times, false)),
        Err(err @ SimulationError::MissingInput { .. }) => {
            warn!(
                "{}; generating synthetic arrivals at rate {}",
                err, fallback_rate
            );
            let times = homogeneous_by_order_stats(fallback_rate, window, rng)?;
            Ok((times, true))
        }
        Err(err) => Err(err),
    }
}
