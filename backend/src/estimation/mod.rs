//! Parameter estimation for the simulated processes
//!
//! - **summary**: sample moments
//! - **input**: observed event times from disk, with a synthetic fallback
//! - **poisson_rate**: rate MLE with a normal-approximation interval
//! - **gbm_fit**: drift and volatility MLE from a price series
//! - **nhpp_fit**: piecewise-constant intensity fit and diagnostics

pub mod gbm_fit;
pub mod input;
pub mod nhpp_fit;
pub mod poisson_rate;
pub mod summary;

pub use gbm_fit::{fit_gbm, GbmEstimate};
pub use input::{load_times_or_synthetic, read_times};
pub use nhpp_fit::{fit_piecewise, log_likelihood, rescaled_inter_arrivals};
pub use poisson_rate::{estimate_rate, inter_arrival_times, RateEstimate};
pub use summary::SummaryStats;
