//! Piecewise-constant NHPP fitting and model diagnostics.

use crate::arrivals::PiecewiseConstant;
use crate::error::{require_positive, SimulationError};

/// Most bins a piecewise fit may allocate
const MAX_BINS: usize = 1_000_000;

/// Fit a piecewise-constant intensity on `[0, horizon)` by counting events
/// per bin. The MLE of each bin's rate is `count / bin_width`.
///
/// Times outside `[0, horizon)` are ignored. The final bin is shortened
/// implicitly if `horizon` is not a multiple of `bin_width`; its rate still
/// divides by the full width.
///
/// # Example
/// ```
/// use stochastic_sim_core::estimation::fit_piecewise;
///
/// let fit = fit_piecewise(&[0.1, 0.2, 1.5, 2.9], 3.0, 1.0).unwrap();
/// assert_eq!(fit.rates, vec![2.0, 1.0, 1.0]);
/// ```
pub fn fit_piecewise(
    times: &[f64],
    horizon: f64,
    bin_width: f64,
) -> Result<PiecewiseConstant, SimulationError> {
    require_positive("horizon", horizon)?;
    require_positive("bin_width", bin_width)?;

    let bins = (horizon / bin_width).ceil();
    if bins > MAX_BINS as f64 {
        return Err(SimulationError::invalid(
            "bin_width",
            bin_width,
            "too small for the horizon (more than 1,000,000 bins)",
        ));
    }
    let bins = bins as usize;
    let mut counts = vec![0usize; bins];
    for &t in times {
        if (0.0..horizon).contains(&t) {
            let idx = ((t / bin_width) as usize).min(bins - 1);
            counts[idx] += 1;
        }
    }

    let rates = counts.iter().map(|c| *c as f64 / bin_width).collect();
    PiecewiseConstant::new(bin_width, rates)
}

/// Log-likelihood of event times under a piecewise-constant model over
/// `[0, horizon]`: `Σ ln λ(tᵢ) − ∫₀^horizon λ(t) dt`.
///
/// Returns `-inf` if an event falls in a bin with zero fitted rate.
pub fn log_likelihood(times: &[f64], model: &PiecewiseConstant, horizon: f64) -> f64 {
    let log_sum: f64 = times.iter().map(|t| model.rate_at(*t).ln()).sum();
    log_sum - model.integral(0.0, horizon)
}

/// Time-rescaled gaps `∫_{t(i−1)}^{t(i)} λ(t) dt` between consecutive events.
///
/// Under a correct model these are i.i.d. Exponential(1).
pub fn rescaled_inter_arrivals(times: &[f64], model: &PiecewiseConstant) -> Vec<f64> {
    let mut sorted = times.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
        .windows(2)
        .map(|w| model.integral(w[0], w[1]))
        .collect()
}
