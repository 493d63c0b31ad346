//! Python bindings (enabled with the `pyo3` feature)
//!
//! The boundary is kept small: plain numbers and strings cross it, and every
//! `SimulationError` becomes a Python `ValueError`.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::arrivals::{self, IntensityProfile};
use crate::error::SimulationError;
use crate::experiment::{self, ExperimentConfig};
use crate::queueing;
use crate::rng::RngManager;

fn to_py_err(err: SimulationError) -> PyErr {
    PyErr::new::<PyValueError, _>(err.to_string())
}

/// Simulate an M/M/1 queue and return `{"mean_queue_length", "mean_wait_time"}`.
#[pyfunction]
#[pyo3(signature = (arrival_rate, service_rate, horizon, seed = 42))]
pub fn run_mm1(
    py: Python<'_>,
    arrival_rate: f64,
    service_rate: f64,
    horizon: f64,
    seed: u64,
) -> PyResult<Py<PyDict>> {
    let mut rng = RngManager::new(seed);
    let (mean_queue_length, mean_wait_time) =
        queueing::run_mm1(arrival_rate, service_rate, horizon, &mut rng).map_err(to_py_err)?;

    let dict = PyDict::new_bound(py);
    dict.set_item("mean_queue_length", mean_queue_length)?;
    dict.set_item("mean_wait_time", mean_wait_time)?;
    Ok(dict.unbind())
}

/// Thinning with a named profile: "festival" or "regular".
#[pyfunction]
#[pyo3(signature = (profile, horizon = 24.0, seed = 42))]
pub fn generate_nhpp_profile(profile: &str, horizon: f64, seed: u64) -> PyResult<Vec<f64>> {
    let intensity = match profile {
        "festival" => IntensityProfile::festival_day(),
        "regular" => IntensityProfile::regular_day(),
        other => {
            return Err(PyErr::new::<PyValueError, _>(format!(
                "unknown intensity profile '{}'",
                other
            )))
        }
    };
    let mut rng = RngManager::new(seed);
    arrivals::generate_nhpp(&intensity, horizon, &mut rng).map_err(to_py_err)
}

/// Thinning with a constant intensity.
#[pyfunction]
#[pyo3(signature = (rate, horizon, seed = 42))]
pub fn generate_nhpp_constant(rate: f64, horizon: f64, seed: u64) -> PyResult<Vec<f64>> {
    let intensity = IntensityProfile::Constant { rate };
    intensity.validate().map_err(to_py_err)?;
    let mut rng = RngManager::new(seed);
    arrivals::generate_nhpp(&intensity, horizon, &mut rng).map_err(to_py_err)
}

/// Run an experiment described by a JSON config; returns the report as JSON.
#[pyfunction]
pub fn run_experiment_json(config_json: &str) -> PyResult<String> {
    let config: ExperimentConfig = serde_json::from_str(config_json)
        .map_err(|e| PyErr::new::<PyValueError, _>(format!("invalid config: {}", e)))?;
    let report = experiment::run_experiment(&config).map_err(to_py_err)?;
    serde_json::to_string(&report)
        .map_err(|e| PyErr::new::<PyRuntimeError, _>(format!("report serialization failed: {}", e)))
}
