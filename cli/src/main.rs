// cli/src/main.rs - command-line front end for the simulation core
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stochastic_sim_core::arrivals::{IntensityProfile, ThinningGenerator};
use stochastic_sim_core::estimation::{
    estimate_rate, fit_piecewise, inter_arrival_times, load_times_or_synthetic, log_likelihood,
    SummaryStats,
};
use stochastic_sim_core::queueing::{Mm1Theory, QueueConfig, QueueSimulator};
use stochastic_sim_core::{run_experiment, ExperimentConfig, RngManager};

#[derive(Parser, Debug)]
#[command(name = "stochsim", version, about = "Seeded stochastic process simulations", long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is not set (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a replicated experiment described by a TOML file.
    Run {
        #[arg(long)]
        config: PathBuf,
    },

    /// Simulate an M/M/1 queue.
    Mm1 {
        #[arg(long = "lambda", default_value = "3.0")]
        arrival_rate: f64,
        #[arg(long = "mu", default_value = "4.0")]
        service_rate: f64,
        #[arg(long, default_value = "1000.0")]
        horizon: f64,
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Generate non-homogeneous Poisson arrivals by thinning.
    Nhpp {
        #[arg(long, value_enum, default_value = "festival")]
        profile: Profile,
        /// Rate for the constant profile.
        #[arg(long, default_value = "50.0")]
        rate: f64,
        #[arg(long, default_value = "24.0")]
        horizon: f64,
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Estimate an arrival rate from a JSON array of event times.
    FitRate {
        #[arg(long)]
        input: PathBuf,
        /// Observation window [0, window).
        #[arg(long, default_value = "60.0")]
        window: f64,
        /// Width of the bins for the piecewise intensity fit.
        #[arg(long)]
        bin_width: Option<f64>,
        /// Rate of the synthetic arrivals used when the input is missing.
        #[arg(long, default_value = "5.0")]
        fallback_rate: f64,
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Profile {
    Festival,
    Regular,
    Constant,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only JSON
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let output = match cli.command {
        Command::Run { config } => run_config(&config)?,
        Command::Mm1 {
            arrival_rate,
            service_rate,
            horizon,
            seed,
        } => mm1(arrival_rate, service_rate, horizon, seed)?,
        Command::Nhpp {
            profile,
            rate,
            horizon,
            seed,
        } => nhpp(profile, rate, horizon, seed)?,
        Command::FitRate {
            input,
            window,
            bin_width,
            fallback_rate,
            seed,
        } => fit_rate(&input, window, bin_width, fallback_rate, seed)?,
    };

    print_json(&output, cli.pretty)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", text);
    Ok(())
}

fn load_config(path: &Path) -> Result<ExperimentConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config '{}'", path.display()))?;
    let config: ExperimentConfig = toml::from_str(&text)
        .with_context(|| format!("failed to parse config '{}'", path.display()))?;
    Ok(config)
}

fn run_config(path: &Path) -> Result<serde_json::Value> {
    info!("Loading experiment from: {}", path.display());
    let config = load_config(path)?;
    let report = run_experiment(&config).context("experiment failed")?;
    Ok(serde_json::to_value(report)?)
}

fn mm1(arrival_rate: f64, service_rate: f64, horizon: f64, seed: u64) -> Result<serde_json::Value> {
    let mut rng = RngManager::new(seed);
    let config = QueueConfig::mm1(arrival_rate, service_rate, horizon);
    let result = QueueSimulator::new(config, &mut rng)?.run(&mut rng);
    let theory = Mm1Theory::new(arrival_rate, service_rate)?;

    info!(
        served = result.summary.customers_served,
        remaining = result.summary.customers_remaining,
        "M/M/1 run complete"
    );

    Ok(json!({
        "seed": seed,
        "summary": result.summary,
        "theory": {
            "utilization": theory.utilization(),
            "mean_in_system": theory.mean_in_system(),
            "mean_sojourn": theory.mean_sojourn(),
        },
    }))
}

fn nhpp(profile: Profile, rate: f64, horizon: f64, seed: u64) -> Result<serde_json::Value> {
    let intensity = match profile {
        Profile::Festival => IntensityProfile::festival_day(),
        Profile::Regular => IntensityProfile::regular_day(),
        Profile::Constant => IntensityProfile::Constant { rate },
    };
    intensity.validate()?;

    let mut rng = RngManager::new(seed);
    let outcome = ThinningGenerator::new(horizon)?.generate(&intensity, &mut rng)?;
    info!(
        accepted = outcome.times.len(),
        candidates = outcome.candidate_count,
        lambda_max = outcome.lambda_max,
        "thinning complete"
    );

    Ok(json!({
        "seed": seed,
        "count": outcome.times.len(),
        "lambda_max": outcome.lambda_max,
        "acceptance_ratio": outcome.acceptance_ratio(),
        "times": outcome.times,
    }))
}

fn fit_rate(
    input: &Path,
    window: f64,
    bin_width: Option<f64>,
    fallback_rate: f64,
    seed: u64,
) -> Result<serde_json::Value> {
    let mut rng = RngManager::new(seed);
    let (times, synthetic) = load_times_or_synthetic(input, fallback_rate, window, &mut rng)?;

    let observed: Vec<f64> = times.iter().copied().filter(|t| (0.0..window).contains(t)).collect();
    let estimate = estimate_rate(observed.len(), window)?;
    let gaps = SummaryStats::from_slice(&inter_arrival_times(&observed));

    let piecewise = match bin_width {
        Some(width) => {
            let model = fit_piecewise(&observed, window, width)?;
            let fit_log_likelihood = log_likelihood(&observed, &model, window);
            Some(json!({ "model": model, "log_likelihood": fit_log_likelihood }))
        }
        None => None,
    };

    Ok(json!({
        "synthetic": synthetic,
        "estimate": estimate,
        "inter_arrival": gaps,
        "piecewise": piecewise,
    }))
}
