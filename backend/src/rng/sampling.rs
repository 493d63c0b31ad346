//! Sampling from the distributions the simulators need.
//!
//! Everything here is built on `next_f64()`, so the draws inherit the
//! determinism of the underlying generator. Parameters are assumed to be
//! validated by the caller; these methods only `debug_assert!` them.

use super::RngManager;

/// Means at or above this use gap counting instead of Knuth's product method,
/// whose running product underflows for large means.
const KNUTH_POISSON_LIMIT: f64 = 30.0;

impl RngManager {
    /// Uniform draw on `[low, high)`.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        debug_assert!(low <= high);
        low + (high - low) * self.next_f64()
    }

    /// Exponential draw with the given rate (mean `1/rate`).
    ///
    /// # Example
    /// ```
    /// use stochastic_sim_core::RngManager;
    ///
    /// let mut rng = RngManager::new(1);
    /// let gap = rng.exponential(3.0);
    /// assert!(gap >= 0.0);
    /// ```
    pub fn exponential(&mut self, rate: f64) -> f64 {
        debug_assert!(rate > 0.0);
        // 1 - u lies in (0, 1], keeping ln finite
        -(1.0 - self.next_f64()).ln() / rate
    }

    /// Poisson draw with the given mean.
    ///
    /// Small means use Knuth's multiplication method. Larger means count the
    /// arrivals of a unit-rate process in `[0, mean]`, which is exact and
    /// costs O(mean) draws.
    pub fn poisson(&mut self, mean: f64) -> u64 {
        debug_assert!(mean >= 0.0);
        if mean <= 0.0 {
            return 0;
        }

        if mean < KNUTH_POISSON_LIMIT {
            let limit = (-mean).exp();
            let mut product = self.next_f64();
            let mut count = 0;
            while product > limit {
                count += 1;
                product *= self.next_f64();
            }
            count
        } else {
            let mut elapsed = self.exponential(1.0);
            let mut count = 0;
            while elapsed <= mean {
                count += 1;
                elapsed += self.exponential(1.0);
            }
            count
        }
    }

    /// Standard normal draw via the Box-Muller transform.
    pub fn standard_normal(&mut self) -> f64 {
        let u1 = 1.0 - self.next_f64();
        let u2 = self.next_f64();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }

    /// Normal draw with the given mean and standard deviation.
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        mean + std_dev * self.standard_normal()
    }

    /// Single Bernoulli trial: `true` with probability `p`.
    pub fn bernoulli(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Binomial draw as the sum of `n` Bernoulli trials.
    pub fn binomial(&mut self, n: u64, p: f64) -> u64 {
        debug_assert!((0.0..=1.0).contains(&p));
        if p <= 0.0 {
            return 0;
        }
        if p >= 1.0 {
            return n;
        }
        (0..n).filter(|_| self.bernoulli(p)).count() as u64
    }

    /// Index drawn from a discrete distribution given by `weights`.
    ///
    /// Weights need not be normalized. Returns the last index with positive
    /// weight if rounding leaves some residual mass.
    pub fn categorical(&mut self, weights: &[f64]) -> usize {
        debug_assert!(!weights.is_empty());
        let total: f64 = weights.iter().sum();
        let mut target = self.next_f64() * total;

        for (idx, weight) in weights.iter().enumerate() {
            if target < *weight {
                return idx;
            }
            target -= weight;
        }

        weights
            .iter()
            .rposition(|w| *w > 0.0)
            .unwrap_or(weights.len() - 1)
    }
}
