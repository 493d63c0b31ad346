//! Non-homogeneous Poisson arrivals by thinning.
//!
//! 1. **Bound**: sample λ(t) on a grid over `[0, horizon]` and take
//!    `λ_max = 1.1 × max`. A peak narrower than the grid spacing can be
//!    undershot, in which case the output is slightly under-thinned there.
//! 2. **Propose**: draw `N ~ Poisson(λ_max · horizon)` candidate times
//!    uniformly on `[0, horizon)`.
//! 3. **Thin**: keep each candidate with probability `λ(t) / λ_max`.
//! 4. **Sort** the survivors ascending.

use super::intensity::Intensity;
use crate::error::{require_non_negative, require_positive, SimulationError};
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Grid points used to bound the intensity
pub const DEFAULT_GRID_POINTS: usize = 1000;

/// Margin applied to the observed grid maximum
pub const DEFAULT_SAFETY_FACTOR: f64 = 1.1;

/// Result of one thinning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThinningOutcome {
    /// Accepted arrival times, strictly ascending
    pub times: Vec<f64>,

    /// Rate of the dominating homogeneous process
    pub lambda_max: f64,

    /// Number of candidates proposed before thinning
    pub candidate_count: usize,
}

impl ThinningOutcome {
    /// Fraction of candidates that were accepted (0.0 with no candidates).
    pub fn acceptance_ratio(&self) -> f64 {
        if self.candidate_count == 0 {
            0.0
        } else {
            self.times.len() as f64 / self.candidate_count as f64
        }
    }
}

/// Thinning generator for a fixed horizon.
///
/// # Example
/// ```
/// use stochastic_sim_core::arrivals::{IntensityProfile, ThinningGenerator};
/// use stochastic_sim_core::RngManager;
///
/// let generator = ThinningGenerator::new(24.0).unwrap();
/// let mut rng = RngManager::new(1);
/// let outcome = generator
///     .generate(&IntensityProfile::Constant { rate: 50.0 }, &mut rng)
///     .unwrap();
///
/// assert!((outcome.lambda_max - 55.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ThinningGenerator {
    horizon: f64,
    grid_points: usize,
    safety_factor: f64,
}

impl ThinningGenerator {
    pub fn new(horizon: f64) -> Result<Self, SimulationError> {
        require_positive("horizon", horizon)?;
        Ok(Self {
            horizon,
            grid_points: DEFAULT_GRID_POINTS,
            safety_factor: DEFAULT_SAFETY_FACTOR,
        })
    }

    /// Use a finer or coarser bounding grid (at least 2 points).
    pub fn with_grid_points(mut self, grid_points: usize) -> Result<Self, SimulationError> {
        if grid_points < 2 {
            return Err(SimulationError::invalid(
                "grid_points",
                grid_points as f64,
                "need at least 2 points",
            ));
        }
        self.grid_points = grid_points;
        Ok(self)
    }

    /// Use a different margin over the grid maximum (at least 1.0).
    pub fn with_safety_factor(mut self, safety_factor: f64) -> Result<Self, SimulationError> {
        if !(safety_factor.is_finite() && safety_factor >= 1.0) {
            return Err(SimulationError::invalid(
                "safety_factor",
                safety_factor,
                "must be finite and at least 1.0",
            ));
        }
        self.safety_factor = safety_factor;
        Ok(self)
    }

    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    /// Upper bound λ_max from the grid maximum times the safety factor.
    ///
    /// # Errors
    /// `InvalidParameter` naming `intensity` if any grid sample is negative
    /// or not finite.
    pub fn bound<I: Intensity + ?Sized>(&self, intensity: &I) -> Result<f64, SimulationError> {
        let last = (self.grid_points - 1) as f64;
        let mut max_rate: f64 = 0.0;

        for i in 0..self.grid_points {
            let t = self.horizon * i as f64 / last;
            let rate = checked_rate(intensity, t)?;
            max_rate = max_rate.max(rate);
        }

        Ok(max_rate * self.safety_factor)
    }

    /// Generate one realization of the process.
    pub fn generate<I: Intensity + ?Sized>(
        &self,
        intensity: &I,
        rng: &mut RngManager,
    ) -> Result<ThinningOutcome, SimulationError> {
        let lambda_max = self.bound(intensity)?;

        let candidate_count = rng.poisson(lambda_max * self.horizon) as usize;
        // Keep u·horizon strictly inside [0, horizon) despite rounding
        let upper = self.horizon * (1.0 - f64::EPSILON);
        let candidates: Vec<f64> = (0..candidate_count)
            .map(|_| (rng.next_f64() * self.horizon).min(upper))
            .collect();

        let mut times = Vec::with_capacity(candidate_count);
        for t in candidates {
            let rate = checked_rate(intensity, t)?;
            if rng.next_f64() < rate / lambda_max {
                times.push(t);
            }
        }
        times.sort_by(f64::total_cmp);

        debug!(
            horizon = self.horizon,
            lambda_max,
            candidates = candidate_count,
            accepted = times.len(),
            "thinning complete"
        );

        Ok(ThinningOutcome {
            times,
            lambda_max,
            candidate_count,
        })
    }
}

fn checked_rate<I: Intensity + ?Sized>(intensity: &I, t: f64) -> Result<f64, SimulationError> {
    let rate = intensity.rate(t);
    if let Err(err) = require_non_negative("intensity", rate) {
        warn!(time = t, rate, "intensity sample rejected");
        return Err(err);
    }
    Ok(rate)
}

/// Generate NHPP arrival times on `[0, horizon)` with the default grid and
/// safety margin.
pub fn generate_nhpp<I: Intensity + ?Sized>(
    intensity: &I,
    horizon: f64,
    rng: &mut RngManager,
) -> Result<Vec<f64>, SimulationError> {
    Ok(ThinningGenerator::new(horizon)?
        .generate(intensity, rng)?
        .times)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrivals::IntensityProfile;

    #[test]
    fn test_bound_uses_safety_margin() {
        let generator = ThinningGenerator::new(10.0).unwrap();
        let bound = generator.bound(&|t: f64| t).unwrap();
        assert!((bound - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_intensity_rejected_before_sampling() {
        let mut rng = RngManager::new(3);
        let before = rng.get_state();
        let result = generate_nhpp(&|t: f64| 5.0 - t, 10.0, &mut rng);

        assert!(matches!(
            result,
            Err(SimulationError::InvalidParameter { name: "intensity", .. })
        ));
        assert_eq!(rng.get_state(), before);
    }

    #[test]
    fn test_zero_intensity_produces_nothing() {
        let mut rng = RngManager::new(3);
        let outcome = ThinningGenerator::new(5.0)
            .unwrap()
            .generate(&IntensityProfile::Constant { rate: 0.0 }, &mut rng)
            .unwrap();
        assert!(outcome.times.is_empty());
        assert_eq!(outcome.candidate_count, 0);
        assert_eq!(outcome.acceptance_ratio(), 0.0);
    }

    #[test]
    fn test_builder_validation() {
        assert!(ThinningGenerator::new(0.0).is_err());
        let generator = ThinningGenerator::new(1.0).unwrap();
        assert!(generator.clone().with_grid_points(1).is_err());
        assert!(generator.clone().with_safety_factor(0.9).is_err());
        assert!(generator.with_safety_factor(1.0).is_ok());
    }

    #[test]
    fn test_intensity_on_candidates_is_checked() {
        // Non-negative on the grid only: negative strictly between grid points
        let generator = ThinningGenerator::new(1.0).unwrap().with_grid_points(2).unwrap();
        let spiky = |t: f64| if t > 0.0 && t < 1.0 { -1.0 } else { 100.0 };
        let mut rng = RngManager::new(4);

        assert!(matches!(
            generator.generate(&spiky, &mut rng),
            Err(SimulationError::InvalidParameter { name: "intensity", .. })
        ));
    }
}
