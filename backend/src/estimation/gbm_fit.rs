//! Maximum-likelihood fit of GBM drift and volatility.
//!
//! Log returns r_k = ln S(k) − ln S(k−1) are i.i.d. N(m, v) with
//! m = (μ − σ²/2)·dt and v = σ²·dt. With m̂ and v̂ (dividing by n):
//!
//! - σ̂ = √(v̂ / dt)
//! - μ̂ = m̂ / dt
//!
//! μ̂ here is the drift of the log price; add σ̂²/2 for the price drift.

use super::summary::SummaryStats;
use crate::error::{require_positive, SimulationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GbmEstimate {
    /// Mean log return per step
    pub mean_log_return: f64,
    /// Variance of log returns per step (divides by n)
    pub log_return_variance: f64,
    /// m̂ / dt
    pub drift: f64,
    /// √(v̂ / dt)
    pub volatility: f64,
    /// De-meaned log returns
    pub residuals: Vec<f64>,
}

impl GbmEstimate {
    /// Drift of the price itself: μ̂ + σ̂²/2
    pub fn price_drift(&self) -> f64 {
        self.drift + 0.5 * self.volatility * self.volatility
    }
}

/// Fit GBM parameters from consecutive prices sampled every `dt`.
///
/// # Errors
/// `InsufficientData` with fewer than two prices; `InvalidParameter` for a
/// non-positive price or `dt`.
pub fn fit_gbm(prices: &[f64], dt: f64) -> Result<GbmEstimate, SimulationError> {
    require_positive("dt", dt)?;
    if prices.len() < 2 {
        return Err(SimulationError::InsufficientData {
            needed: 2,
            got: prices.len(),
        });
    }
    for price in prices {
        require_positive("price", *price)?;
    }

    let log_returns: Vec<f64> = prices.windows(2).map(|w| w[1].ln() - w[0].ln()).collect();
    let stats = SummaryStats::from_slice(&log_returns);
    let residuals = log_returns.iter().map(|r| r - stats.mean).collect();

    Ok(GbmEstimate {
        mean_log_return: stats.mean,
        log_return_variance: stats.variance,
        drift: stats.mean / dt,
        volatility: (stats.variance / dt).sqrt(),
        residuals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_growth_has_zero_volatility() {
        let prices: Vec<f64> = (0..10).map(|k| 100.0 * (0.01 * k as f64).exp()).collect();
        let est = fit_gbm(&prices, 0.1).unwrap();
        assert!((est.drift - 0.1).abs() < 1e-9);
        assert!(est.volatility < 1e-6);
        assert_eq!(est.residuals.len(), 9);
    }

    #[test]
    fn test_rejects_short_or_invalid_series() {
        assert!(matches!(
            fit_gbm(&[100.0], 0.1),
            Err(SimulationError::InsufficientData { needed: 2, got: 1 })
        ));
        assert!(fit_gbm(&[100.0, -1.0], 0.1).is_err());
        assert!(fit_gbm(&[100.0, 101.0], 0.0).is_err());
    }
}
