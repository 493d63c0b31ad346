//! Sample moments.

use serde::{Deserialize, Serialize};

/// Count, mean and spread of a sample.
///
/// # Example
/// ```
/// use stochastic_sim_core::estimation::SummaryStats;
///
/// let stats = SummaryStats::from_slice(&[1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(stats.mean, 2.5);
/// assert_eq!(stats.variance, 1.25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    /// Population variance (divides by n)
    pub variance: f64,
    pub min: f64,
    pub max: f64,
}

impl SummaryStats {
    /// Summarize a sample. An empty sample yields zeros.
    pub fn from_slice(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                count: 0,
                mean: 0.0,
                variance: 0.0,
                min: 0.0,
                max: 0.0,
            };
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            count: values.len(),
            mean,
            variance,
            min,
            max,
        }
    }

    /// Population standard deviation
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }

    /// Unbiased variance (divides by n − 1); 0.0 for fewer than two values
    pub fn sample_variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.variance * self.count as f64 / (self.count - 1) as f64
        }
    }

    /// Standard error of the mean, using the unbiased variance
    pub fn standard_error(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            (self.sample_variance() / self.count as f64).sqrt()
        }
    }
}
