//! Geometric Brownian motion.
//!
//! Exact discretization of dS = μS dt + σS dW:
//!
//! `S(k+1) = S(k) · exp((μ − σ²/2)·dt + σ·√dt·Z)`,  Z ~ N(0, 1)

use crate::error::{require_positive, SimulationError};
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

/// Parameters of a GBM price path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GbmConfig {
    /// Starting price
    pub initial_price: f64,
    /// Annualized drift μ
    pub drift: f64,
    /// Annualized volatility σ
    pub volatility: f64,
    /// Step length in years (1/252 for trading days)
    pub dt: f64,
    /// Number of steps
    pub steps: usize,
}

impl Default for GbmConfig {
    /// One trading year of a 150.0 stock with 15% drift and 25% volatility.
    fn default() -> Self {
        Self {
            initial_price: 150.0,
            drift: 0.15,
            volatility: 0.25,
            dt: 1.0 / 252.0,
            steps: 252,
        }
    }
}

impl GbmConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        require_positive("initial_price", self.initial_price)?;
        require_positive("dt", self.dt)?;
        if !self.drift.is_finite() {
            return Err(SimulationError::invalid("drift", self.drift, "must be finite"));
        }
        if !(self.volatility.is_finite() && self.volatility >= 0.0) {
            return Err(SimulationError::invalid(
                "volatility",
                self.volatility,
                "must be finite and non-negative",
            ));
        }
        Ok(())
    }

    /// Simulate a path of `steps + 1` prices starting at `initial_price`.
    ///
    /// # Example
    /// ```
    /// use stochastic_sim_core::processes::GbmConfig;
    /// use stochastic_sim_core::RngManager;
    ///
    /// let mut rng = RngManager::new(3);
    /// let path = GbmConfig::default().simulate(&mut rng).unwrap();
    /// assert_eq!(path.len(), 253);
    /// assert_eq!(path[0], 150.0);
    /// ```
    pub fn simulate(&self, rng: &mut RngManager) -> Result<Vec<f64>, SimulationError> {
        self.validate()?;

        let drift_term = (self.drift - 0.5 * self.volatility * self.volatility) * self.dt;
        let shock_scale = self.volatility * self.dt.sqrt();

        let mut path = Vec::with_capacity(self.steps + 1);
        let mut price = self.initial_price;
        path.push(price);
        for _ in 0..self.steps {
            price *= (drift_term + shock_scale * rng.standard_normal()).exp();
            path.push(price);
        }
        Ok(path)
    }
}
