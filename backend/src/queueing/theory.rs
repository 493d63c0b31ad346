//! Closed-form steady-state results for the M/M/1 queue.

use crate::error::{require_positive, SimulationError};
use serde::{Deserialize, Serialize};

/// Steady-state M/M/1 measures for arrival rate λ and service rate μ.
///
/// All measures except utilization exist only when ρ = λ/μ < 1 and are
/// `None` otherwise.
///
/// # Example
/// ```
/// use stochastic_sim_core::queueing::Mm1Theory;
///
/// let theory = Mm1Theory::new(3.0, 4.0).unwrap();
/// assert_eq!(theory.utilization(), 0.75);
/// assert_eq!(theory.mean_sojourn(), Some(1.0));
///
/// let overloaded = Mm1Theory::new(5.0, 4.0).unwrap();
/// assert!(!overloaded.is_stable());
/// assert_eq!(overloaded.mean_in_system(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mm1Theory {
    arrival_rate: f64,
    service_rate: f64,
}

impl Mm1Theory {
    pub fn new(arrival_rate: f64, service_rate: f64) -> Result<Self, SimulationError> {
        require_positive("arrival_rate", arrival_rate)?;
        require_positive("service_rate", service_rate)?;
        Ok(Self {
            arrival_rate,
            service_rate,
        })
    }

    /// ρ = λ / μ
    pub fn utilization(&self) -> f64 {
        self.arrival_rate / self.service_rate
    }

    pub fn is_stable(&self) -> bool {
        self.utilization() < 1.0
    }

    /// L = ρ / (1 − ρ)
    pub fn mean_in_system(&self) -> Option<f64> {
        let rho = self.utilization();
        self.is_stable().then(|| rho / (1.0 - rho))
    }

    /// W = 1 / (μ − λ)
    pub fn mean_sojourn(&self) -> Option<f64> {
        self.is_stable()
            .then(|| 1.0 / (self.service_rate - self.arrival_rate))
    }

    /// Lq = ρ² / (1 − ρ)
    pub fn mean_in_queue(&self) -> Option<f64> {
        let rho = self.utilization();
        self.is_stable().then(|| rho * rho / (1.0 - rho))
    }

    /// Wq = ρ / (μ − λ)
    pub fn mean_wait_in_queue(&self) -> Option<f64> {
        self.is_stable()
            .then(|| self.utilization() / (self.service_rate - self.arrival_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_littles_law_holds() {
        let theory = Mm1Theory::new(2.0, 5.0).unwrap();
        let l = theory.mean_in_system().unwrap();
        let w = theory.mean_sojourn().unwrap();
        assert!((l - 2.0 * w).abs() < 1e-12);

        let lq = theory.mean_in_queue().unwrap();
        let wq = theory.mean_wait_in_queue().unwrap();
        assert!((lq - 2.0 * wq).abs() < 1e-12);
    }

    #[test]
    fn test_critical_load_is_unstable() {
        let theory = Mm1Theory::new(4.0, 4.0).unwrap();
        assert!(!theory.is_stable());
        assert_eq!(theory.mean_sojourn(), None);
        assert_eq!(theory.mean_in_queue(), None);
    }

    #[test]
    fn test_rejects_zero_rate() {
        assert!(Mm1Theory::new(0.0, 1.0).is_err());
        assert!(Mm1Theory::new(1.0, 0.0).is_err());
    }
}
