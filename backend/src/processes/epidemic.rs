//! Chain-binomial SIR epidemic.
//!
//! Each step every susceptible escapes each infective independently with
//! probability `1 − p_infect`, so
//!
//! - new infections ~ Binomial(S, 1 − (1 − p_infect)^I)
//! - new recoveries ~ Binomial(I, p_recover)
//!
//! The run ends when nobody is infected (I = 0 is absorbing).

use crate::error::{require_probability, SimulationError};
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SirState {
    pub susceptible: u64,
    pub infected: u64,
    pub recovered: u64,
}

impl SirState {
    pub fn population(&self) -> u64 {
        self.susceptible + self.infected + self.recovered
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SirConfig {
    pub population: u64,
    pub initial_infected: u64,
    pub p_infect: f64,
    pub p_recover: f64,
    /// Stop after this many steps even if infections persist
    #[serde(default)]
    pub max_steps: Option<usize>,
}

impl Default for SirConfig {
    fn default() -> Self {
        Self {
            population: 1000,
            initial_infected: 5,
            p_infect: 0.05,
            p_recover: 0.1,
            max_steps: None,
        }
    }
}

/// States after each step, starting with the initial state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SirRun {
    pub history: Vec<SirState>,
}

impl SirRun {
    pub fn final_state(&self) -> Option<SirState> {
        self.history.last().copied()
    }

    /// Steps simulated (excluding the initial state)
    pub fn duration(&self) -> usize {
        self.history.len().saturating_sub(1)
    }

    /// Everyone who was ever infected
    pub fn total_infected(&self) -> u64 {
        self.final_state()
            .map(|s| s.infected + s.recovered)
            .unwrap_or(0)
    }

    pub fn peak_infected(&self) -> u64 {
        self.history.iter().map(|s| s.infected).max().unwrap_or(0)
    }
}

impl SirConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.initial_infected > self.population {
            return Err(SimulationError::invalid(
                "initial_infected",
                self.initial_infected as f64,
                "cannot exceed population",
            ));
        }
        require_probability("p_infect", self.p_infect)?;
        require_probability("p_recover", self.p_recover)?;
        if self.p_recover == 0.0 && self.max_steps.is_none() {
            return Err(SimulationError::invalid(
                "p_recover",
                0.0,
                "must be positive unless max_steps bounds the run",
            ));
        }
        Ok(())
    }

    pub fn simulate(&self, rng: &mut RngManager) -> Result<SirRun, SimulationError> {
        self.validate()?;

        let mut state = SirState {
            susceptible: self.population - self.initial_infected,
            infected: self.initial_infected,
            recovered: 0,
        };
        let mut history = vec![state];

        while state.infected > 0 {
            if self.max_steps.is_some_and(|cap| history.len() > cap) {
                break;
            }

            let escape = (1.0 - self.p_infect).powf(state.infected as f64);
            let new_infected = rng.binomial(state.susceptible, 1.0 - escape);
            let new_recovered = rng.binomial(state.infected, self.p_recover);

            state = SirState {
                susceptible: state.susceptible - new_infected,
                infected: state.infected + new_infected - new_recovered,
                recovered: state.recovered + new_recovered,
            };
            history.push(state);
        }

        Ok(SirRun { history })
    }
}
