//! Intensity functions λ(t) for non-homogeneous Poisson processes.

use crate::error::{require_non_negative, require_positive, SimulationError};
use serde::{Deserialize, Serialize};

/// Instantaneous arrival rate as a function of time.
///
/// Any `Fn(f64) -> f64` closure is an intensity, so callers can pass
/// arbitrary functions without defining a type.
///
/// # Example
/// ```
/// use stochastic_sim_core::arrivals::Intensity;
///
/// let daily = |t: f64| 40.0 + 10.0 * (t / 24.0 * std::f64::consts::TAU).sin().abs();
/// assert_eq!(daily.rate(0.0), 40.0);
/// ```
pub trait Intensity {
    fn rate(&self, t: f64) -> f64;
}

impl<F> Intensity for F
where
    F: Fn(f64) -> f64,
{
    fn rate(&self, t: f64) -> f64 {
        self(t)
    }
}

/// Gaussian bump `amplitude · exp(−(t − center)² / (2·width²))`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaussianPeak {
    pub amplitude: f64,
    pub center: f64,
    pub width: f64,
}

impl GaussianPeak {
    fn value(&self, t: f64) -> f64 {
        let z = t - self.center;
        self.amplitude * (-(z * z) / (2.0 * self.width * self.width)).exp()
    }
}

/// Step function with equal-width bins starting at t = 0.
///
/// Times past the last bin use the last bin's rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiecewiseConstant {
    pub bin_width: f64,
    pub rates: Vec<f64>,
}

impl PiecewiseConstant {
    pub fn new(bin_width: f64, rates: Vec<f64>) -> Result<Self, SimulationError> {
        let profile = Self { bin_width, rates };
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        require_positive("bin_width", self.bin_width)?;
        if self.rates.is_empty() {
            return Err(SimulationError::InsufficientData { needed: 1, got: 0 });
        }
        for rate in &self.rates {
            require_non_negative("intensity", *rate)?;
        }
        Ok(())
    }

    /// Index of the bin containing `t`, clamped to the valid range.
    pub fn bin_index(&self, t: f64) -> usize {
        let idx = (t.max(0.0) / self.bin_width) as usize;
        idx.min(self.rates.len().saturating_sub(1))
    }

    pub fn rate_at(&self, t: f64) -> f64 {
        self.rates.get(self.bin_index(t)).copied().unwrap_or(0.0)
    }

    /// ∫ λ(t) dt over `[start, end]`.
    pub fn integral(&self, start: f64, end: f64) -> f64 {
        if end <= start {
            return 0.0;
        }
        let first = self.bin_index(start);
        let last = self.bin_index(end);
        if first == last {
            return self.rates[first] * (end - start);
        }

        let mut total = self.rates[first] * (self.bin_width * (first + 1) as f64 - start);
        for rate in &self.rates[first + 1..last] {
            total += rate * self.bin_width;
        }
        total + self.rates[last] * (end - self.bin_width * last as f64)
    }

    /// Integral over all bins.
    pub fn total(&self) -> f64 {
        self.rates.iter().sum::<f64>() * self.bin_width
    }

    /// Bin midpoints, for reporting fitted rates against time.
    pub fn bin_centers(&self) -> Vec<f64> {
        (0..self.rates.len())
            .map(|idx| (idx as f64 + 0.5) * self.bin_width)
            .collect()
    }
}

impl Intensity for PiecewiseConstant {
    fn rate(&self, t: f64) -> f64 {
        self.rate_at(t)
    }
}

/// Serializable intensity profiles usable from configuration files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IntensityProfile {
    /// Homogeneous rate
    Constant { rate: f64 },

    /// Base rate plus Gaussian bumps
    GaussianPeaks { base: f64, peaks: Vec<GaussianPeak> },

    /// Step function over equal-width bins
    Piecewise(PiecewiseConstant),
}

impl IntensityProfile {
    /// Festival day (arrivals/hour over 24h): low base, a large evening
    /// spike around 20:30 and a smaller one around 01:00 as people leave.
    pub fn festival_day() -> Self {
        IntensityProfile::GaussianPeaks {
            base: 50.0,
            peaks: vec![
                GaussianPeak {
                    amplitude: 800.0,
                    center: 20.5,
                    width: 1.5,
                },
                GaussianPeak {
                    amplitude: 300.0,
                    center: 1.0,
                    width: 1.0,
                },
            ],
        }
    }

    /// Regular day (arrivals/hour over 24h): morning and evening commute peaks.
    pub fn regular_day() -> Self {
        IntensityProfile::GaussianPeaks {
            base: 40.0,
            peaks: vec![
                GaussianPeak {
                    amplitude: 200.0,
                    center: 8.5,
                    width: 1.0,
                },
                GaussianPeak {
                    amplitude: 250.0,
                    center: 17.5,
                    width: 1.5,
                },
            ],
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        match self {
            IntensityProfile::Constant { rate } => require_non_negative("intensity", *rate),
            IntensityProfile::GaussianPeaks { peaks, .. } => {
                for peak in peaks {
                    require_positive("width", peak.width)?;
                }
                Ok(())
            }
            IntensityProfile::Piecewise(piecewise) => piecewise.validate(),
        }
    }
}

impl Intensity for IntensityProfile {
    fn rate(&self, t: f64) -> f64 {
        match self {
            IntensityProfile::Constant { rate } => *rate,
            IntensityProfile::GaussianPeaks { base, peaks } => {
                base + peaks.iter().map(|p| p.value(t)).sum::<f64>()
            }
            IntensityProfile::Piecewise(piecewise) => piecewise.rate_at(t),
        }
    }
}
