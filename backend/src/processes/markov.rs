//! Finite discrete-time Markov chains.

use crate::error::SimulationError;
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

/// Row sums may deviate from 1 by at most this much
const ROW_SUM_TOLERANCE: f64 = 1e-9;

/// Row-stochastic transition matrix with optional state labels.
///
/// # Example
/// ```
/// use stochastic_sim_core::processes::TransitionMatrix;
///
/// let chain = TransitionMatrix::customer_support();
/// let after_five = chain.n_step_distribution(&[1.0, 0.0, 0.0, 0.0, 0.0], 5).unwrap();
///
/// let total: f64 = after_five.iter().sum();
/// assert!((total - 1.0).abs() < 1e-12);
/// assert_eq!(chain.absorbing_states(), vec![4]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionMatrix {
    rows: Vec<Vec<f64>>,
    #[serde(default)]
    labels: Vec<String>,
}

impl TransitionMatrix {
    /// Build and validate a matrix.
    ///
    /// # Errors
    /// `InvalidMatrix` if the matrix is empty, not square, has a negative or
    /// non-finite entry, or a row that does not sum to 1.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, SimulationError> {
        let matrix = Self {
            rows,
            labels: Vec::new(),
        };
        matrix.validate()?;
        Ok(matrix)
    }

    /// Attach human-readable state names (one per state).
    pub fn with_labels(mut self, labels: Vec<String>) -> Result<Self, SimulationError> {
        if labels.len() != self.rows.len() {
            return Err(SimulationError::InvalidMatrix(format!(
                "{} labels for {} states",
                labels.len(),
                self.rows.len()
            )));
        }
        self.labels = labels;
        Ok(self)
    }

    /// Five-state customer support chain:
    /// Waiting, On Hold, Talking, Resolved, Exit (absorbing).
    pub fn customer_support() -> Self {
        Self {
            rows: vec![
                vec![0.2, 0.3, 0.5, 0.0, 0.0],
                vec![0.1, 0.4, 0.5, 0.0, 0.0],
                vec![0.0, 0.1, 0.4, 0.5, 0.0],
                vec![0.0, 0.0, 0.0, 0.0, 1.0],
                vec![0.0, 0.0, 0.0, 0.0, 1.0],
            ],
            labels: ["Waiting", "On Hold", "Talking", "Resolved", "Exit"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        let n = self.rows.len();
        if n == 0 {
            return Err(SimulationError::InvalidMatrix("no states".to_string()));
        }
        if !self.labels.is_empty() && self.labels.len() != n {
            return Err(SimulationError::InvalidMatrix(format!(
                "{} labels for {} states",
                self.labels.len(),
                n
            )));
        }

        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != n {
                return Err(SimulationError::InvalidMatrix(format!(
                    "row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            if let Some(bad) = row.iter().find(|p| !(p.is_finite() && **p >= 0.0)) {
                return Err(SimulationError::InvalidMatrix(format!(
                    "row {} has invalid probability {}",
                    i, bad
                )));
            }
            let sum: f64 = row.iter().sum();
            if (sum - 1.0).abs() > ROW_SUM_TOLERANCE {
                return Err(SimulationError::InvalidMatrix(format!(
                    "row {} sums to {}",
                    i, sum
                )));
            }
        }
        Ok(())
    }

    pub fn num_states(&self) -> usize {
        self.rows.len()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Probability of moving from `from` to `to` in one step.
    pub fn probability(&self, from: usize, to: usize) -> f64 {
        self.rows[from][to]
    }

    /// States that transition to themselves with probability 1.
    pub fn absorbing_states(&self) -> Vec<usize> {
        (0..self.rows.len())
            .filter(|&i| self.rows[i][i] == 1.0)
            .collect()
    }

    /// Distribution after `steps` transitions from `initial`.
    pub fn n_step_distribution(
        &self,
        initial: &[f64],
        steps: usize,
    ) -> Result<Vec<f64>, SimulationError> {
        let n = self.rows.len();
        if initial.len() != n {
            return Err(SimulationError::InvalidMatrix(format!(
                "initial distribution has {} entries, expected {}",
                initial.len(),
                n
            )));
        }

        let mut current = initial.to_vec();
        for _ in 0..steps {
            let mut next = vec![0.0; n];
            for (i, mass) in current.iter().enumerate() {
                if *mass == 0.0 {
                    continue;
                }
                for (j, p) in self.rows[i].iter().enumerate() {
                    next[j] += mass * p;
                }
            }
            current = next;
        }
        Ok(current)
    }

    /// Draw the state following `from`.
    pub fn step(&self, from: usize, rng: &mut RngManager) -> usize {
        rng.categorical(&self.rows[from])
    }

    /// Sample a path of at most `max_steps` transitions, stopping early at an
    /// absorbing state. The path includes the start state.
    pub fn simulate_path(
        &self,
        start: usize,
        max_steps: usize,
        rng: &mut RngManager,
    ) -> Result<Vec<usize>, SimulationError> {
        self.check_state(start)?;

        let mut path = vec![start];
        let mut state = start;
        for _ in 0..max_steps {
            if self.rows[state][state] == 1.0 {
                break;
            }
            state = self.step(state, rng);
            path.push(state);
        }
        Ok(path)
    }

    /// Monte Carlo count of `trials` walks from `start` that hit `target`
    /// within `max_steps` transitions.
    pub fn absorption_count(
        &self,
        start: usize,
        target: usize,
        max_steps: usize,
        trials: usize,
        rng: &mut RngManager,
    ) -> Result<usize, SimulationError> {
        self.check_state(start)?;
        self.check_state(target)?;

        let mut hits = 0;
        for _ in 0..trials {
            let mut state = start;
            for _ in 0..max_steps {
                state = self.step(state, rng);
                if state == target {
                    hits += 1;
                    break;
                }
            }
        }
        Ok(hits)
    }

    fn check_state(&self, state: usize) -> Result<(), SimulationError> {
        if state < self.rows.len() {
            Ok(())
        } else {
            Err(SimulationError::InvalidMatrix(format!(
                "state {} out of range for {} states",
                state,
                self.rows.len()
            )))
        }
    }
}
