//! Runs an experiment's replications and aggregates their metrics.
//!
//! Every replication owns a fresh `RngManager` seeded with
//! `derive_seed(master, index)`, so replications are independent and any one
//! of them can be re-run on its own.

use super::config::{ExperimentConfig, ModelConfig};
use super::hash::compute_config_hash;
use crate::arrivals::{homogeneous_by_gaps, marked_arrivals, Intensity, ThinningGenerator};
use crate::error::SimulationError;
use crate::estimation::{estimate_rate, fit_gbm, SummaryStats};
use crate::processes::expected_absorption_time;
use crate::queueing::{Mm1Theory, QueueConfig, QueueSimulator, RenewalDistribution};
use crate::rng::{derive_seed, RngManager};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Intervals used to integrate an intensity for its expected count
const EXPECTED_COUNT_STEPS: usize = 10_000;

/// Metrics of a single replication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicationResult {
    pub index: usize,
    pub seed: u64,
    pub metrics: BTreeMap<String, f64>,
}

/// Outcome of a whole experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub name: Option<String>,
    pub kind: String,
    /// SHA-256 of the canonical config JSON
    pub config_hash: String,
    pub seed: u64,
    pub headline_metric: String,
    /// Closed-form values to compare against, where known
    pub theory: BTreeMap<String, f64>,
    /// Per-metric statistics across replications
    pub aggregates: BTreeMap<String, SummaryStats>,
    pub replications: Vec<ReplicationResult>,
}

impl ExperimentReport {
    /// Aggregate statistics of the headline metric
    pub fn headline(&self) -> Option<&SummaryStats> {
        self.aggregates.get(&self.headline_metric)
    }
}

/// Validate the config and run every replication.
///
/// # Example
/// ```
/// use stochastic_sim_core::experiment::{run_experiment, ExperimentConfig, ModelConfig};
///
/// let config = ExperimentConfig {
///     name: None,
///     seed: 42,
///     replications: 3,
///     model: ModelConfig::Mm1 { arrival_rate: 3.0, service_rate: 4.0, horizon: 200.0 },
/// };
/// let report = run_experiment(&config).unwrap();
/// assert_eq!(report.replications.len(), 3);
/// assert_eq!(report.theory["mean_sojourn"], 1.0);
/// ```
pub fn run_experiment(config: &ExperimentConfig) -> Result<ExperimentReport, SimulationError> {
    config.validate()?;
    let config_hash = compute_config_hash(config)?;

    info!(
        kind = config.model.kind(),
        seed = config.seed,
        replications = config.replications,
        "running experiment"
    );

    let mut replications = Vec::with_capacity(config.replications);
    for index in 0..config.replications {
        let seed = derive_seed(config.seed, index as u64);
        let mut rng = RngManager::new(seed);
        let metrics = run_replication(&config.model, &mut rng)?;
        debug!(index, seed, ?metrics, "replication finished");
        replications.push(ReplicationResult {
            index,
            seed,
            metrics,
        });
    }

    let aggregates = aggregate(&replications);
    let report = ExperimentReport {
        name: config.name.clone(),
        kind: config.model.kind().to_string(),
        config_hash,
        seed: config.seed,
        headline_metric: config.model.headline_metric().to_string(),
        theory: theory(&config.model)?,
        aggregates,
        replications,
    };

    if let Some(headline) = report.headline() {
        info!(
            metric = %report.headline_metric,
            mean = headline.mean,
            std_dev = headline.std_dev(),
            "experiment finished"
        );
    }
    Ok(report)
}

/// Run one replication of `model` and collect its metrics.
pub fn run_replication(
    model: &ModelConfig,
    rng: &mut RngManager,
) -> Result<BTreeMap<String, f64>, SimulationError> {
    let mut metrics = BTreeMap::new();
    let mut put = |name: &str, value: f64| {
        metrics.insert(name.to_string(), value);
    };

    match model {
        ModelConfig::Mm1 {
            arrival_rate,
            service_rate,
            horizon,
        } => {
            let config = QueueConfig::mm1(*arrival_rate, *service_rate, *horizon);
            record_queue(config, rng, &mut put)?;
        }
        ModelConfig::Gg1(config) => record_queue(config.clone(), rng, &mut put)?,
        ModelConfig::Nhpp { horizon, intensity } => {
            let outcome = ThinningGenerator::new(*horizon)?.generate(intensity, rng)?;
            put("count", outcome.times.len() as f64);
            put("candidate_count", outcome.candidate_count as f64);
            put("lambda_max", outcome.lambda_max);
            put("acceptance_ratio", outcome.acceptance_ratio());
        }
        ModelConfig::Homogeneous {
            rate,
            horizon,
            mean_mark,
        } => {
            let count = match mean_mark {
                Some(mean_mark) => {
                    let calls = marked_arrivals(*rate, *horizon, *mean_mark, rng)?;
                    let total: f64 = calls.iter().map(|c| c.mark).sum();
                    put("total_mark", total);
                    if !calls.is_empty() {
                        put("mean_mark", total / calls.len() as f64);
                    }
                    calls.len()
                }
                None => homogeneous_by_gaps(*rate, *horizon, rng)?.len(),
            };
            let estimate = estimate_rate(count, *horizon)?;
            put("count", count as f64);
            put("rate_mle", estimate.rate);
            put("ci_lower", estimate.ci_lower);
            put("ci_upper", estimate.ci_upper);
        }
        ModelConfig::Gbm(config) => {
            let path = config.simulate(rng)?;
            put("final_price", path.last().copied().unwrap_or(config.initial_price));
            if path.len() >= 2 {
                let fit = fit_gbm(&path, config.dt)?;
                put("fitted_log_drift", fit.drift);
                put("fitted_drift", fit.price_drift());
                put("fitted_volatility", fit.volatility);
            }
        }
        ModelConfig::RandomWalk(config) => {
            match config.absorption_time(rng)? {
                Some(steps) => {
                    put("absorption_time", steps as f64);
                    put("absorbed", 1.0);
                }
                None => put("absorbed", 0.0),
            }
        }
        ModelConfig::Markov(experiment) => {
            let chain = experiment.chain();
            let hits = chain.absorption_count(
                experiment.start,
                experiment.target,
                experiment.max_steps,
                experiment.trials,
                rng,
            )?;
            put("hits", hits as f64);
            put("absorption_fraction", hits as f64 / experiment.trials as f64);
        }
        ModelConfig::BirthDeath(config) => {
            let run = config.simulate(rng)?;
            put("final_population", run.final_population() as f64);
            put("mean_population", run.mean_population());
            put("extinct", if run.extinction_step().is_some() { 1.0 } else { 0.0 });
        }
        ModelConfig::Sir(config) => {
            let run = config.simulate(rng)?;
            put("duration", run.duration() as f64);
            put("total_infected", run.total_infected() as f64);
            put("peak_infected", run.peak_infected() as f64);
        }
    }

    Ok(metrics)
}

fn record_queue(
    config: QueueConfig,
    rng: &mut RngManager,
    put: &mut impl FnMut(&str, f64),
) -> Result<(), SimulationError> {
    let summary = QueueSimulator::new(config, rng)?.run(rng).summary;
    put("mean_queue_length", summary.mean_queue_length);
    put("mean_wait_time", summary.mean_wait_time);
    put("time_weighted_queue_length", summary.time_weighted_queue_length);
    put("customers_served", summary.customers_served as f64);
    put("customers_remaining", summary.customers_remaining as f64);
    put("max_queue_length", summary.max_queue_length as f64);
    put("final_clock", summary.final_clock);
    Ok(())
}

/// Closed-form reference values for the model, where they exist.
pub fn theory(model: &ModelConfig) -> Result<BTreeMap<String, f64>, SimulationError> {
    model.validate()?;
    let mut values = BTreeMap::new();

    match model {
        ModelConfig::Mm1 {
            arrival_rate,
            service_rate,
            ..
        } => insert_mm1(&mut values, *arrival_rate, *service_rate)?,
        ModelConfig::Gg1(config) => {
            values.insert("utilization".to_string(), config.utilization());
            if let (
                RenewalDistribution::Exponential { rate: lambda },
                RenewalDistribution::Exponential { rate: mu },
            ) = (&config.arrival, &config.service)
            {
                insert_mm1(&mut values, *lambda, *mu)?;
            }
        }
        ModelConfig::Nhpp { horizon, intensity } => {
            values.insert(
                "expected_count".to_string(),
                integrate(intensity, *horizon, EXPECTED_COUNT_STEPS),
            );
            let lambda_max = ThinningGenerator::new(*horizon)?.bound(intensity)?;
            values.insert("lambda_max".to_string(), lambda_max);
        }
        ModelConfig::Homogeneous { rate, horizon, .. } => {
            values.insert("expected_count".to_string(), rate * horizon);
        }
        ModelConfig::Gbm(config) => {
            let years = config.dt * config.steps as f64;
            values.insert(
                "expected_final_price".to_string(),
                config.initial_price * (config.drift * years).exp(),
            );
        }
        ModelConfig::RandomWalk(config) => {
            values.insert(
                "expected_absorption_time".to_string(),
                expected_absorption_time(config.barrier, config.p_right),
            );
        }
        ModelConfig::Markov(experiment) => {
            let chain = experiment.chain();
            let mut initial = vec![0.0; chain.num_states()];
            initial[experiment.start] = 1.0;
            let dist = chain.n_step_distribution(&initial, experiment.max_steps)?;
            values.insert(
                "target_probability_at_max_steps".to_string(),
                dist[experiment.target],
            );
        }
        ModelConfig::BirthDeath(_) | ModelConfig::Sir(_) => {}
    }

    Ok(values)
}

fn insert_mm1(
    values: &mut BTreeMap<String, f64>,
    arrival_rate: f64,
    service_rate: f64,
) -> Result<(), SimulationError> {
    let mm1 = Mm1Theory::new(arrival_rate, service_rate)?;
    values.insert("utilization".to_string(), mm1.utilization());
    let closed_forms = [
        ("mean_in_system", mm1.mean_in_system()),
        ("mean_sojourn", mm1.mean_sojourn()),
        ("mean_in_queue", mm1.mean_in_queue()),
        ("mean_wait_in_queue", mm1.mean_wait_in_queue()),
    ];
    for (name, value) in closed_forms {
        if let Some(value) = value {
            values.insert(name.to_string(), value);
        }
    }
    Ok(())
}

/// Trapezoidal ∫₀^horizon λ(t) dt.
fn integrate<I: Intensity + ?Sized>(intensity: &I, horizon: f64, steps: usize) -> f64 {
    let h = horizon / steps as f64;
    let interior: f64 = (1..steps).map(|k| intensity.rate(k as f64 * h)).sum();
    h * (0.5 * (intensity.rate(0.0) + intensity.rate(horizon)) + interior)
}

fn aggregate(replications: &[ReplicationResult]) -> BTreeMap<String, SummaryStats> {
    let mut columns: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for replication in replications {
        for (name, value) in &replication.metrics {
            columns.entry(name.as_str()).or_default().push(*value);
        }
    }
    columns
        .into_iter()
        .map(|(name, values)| (name.to_string(), SummaryStats::from_slice(&values)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrivals::IntensityProfile;

    #[test]
    fn test_integrate_constant() {
        let constant = IntensityProfile::Constant { rate: 50.0 };
        assert!((integrate(&constant, 24.0, 100) - 1200.0).abs() < 1e-9);
    }

    #[test]
    fn test_theory_for_unstable_mm1_has_only_utilization() {
        let values = theory(&ModelConfig::Mm1 {
            arrival_rate: 5.0,
            service_rate: 4.0,
            horizon: 10.0,
        })
        .unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values["utilization"], 1.25);
    }

    #[test]
    fn test_replications_use_derived_seeds() {
        let config = ExperimentConfig {
            name: Some("rw".to_string()),
            seed: 9,
            replications: 4,
            model: ModelConfig::RandomWalk(crate::processes::RandomWalkConfig {
                barrier: 10,
                p_right: 0.5,
                max_steps: None,
            }),
        };
        let report = run_experiment(&config).unwrap();
        for (i, rep) in report.replications.iter().enumerate() {
            assert_eq!(rep.seed, derive_seed(9, i as u64));
        }
        assert_eq!(report.headline().unwrap().count, 4);
    }
}
