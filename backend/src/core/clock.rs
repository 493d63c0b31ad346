//! Continuous simulation clock
//!
//! Discrete-event simulations jump from one event time to the next. The clock
//! only ever moves forward, to the timestamp of the event being processed.

use serde::{Deserialize, Serialize};

/// Monotone, real-valued simulation clock (minutes, hours, ... as the caller
/// chooses).
///
/// # Example
/// ```
/// use stochastic_sim_core::SimulationClock;
///
/// let mut clock = SimulationClock::new();
/// assert_eq!(clock.now(), 0.0);
///
/// clock.advance_to(2.5);
/// assert_eq!(clock.now(), 2.5);
/// assert_eq!(clock.events_processed(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationClock {
    /// Current simulation time
    now: f64,
    /// Number of times the clock has been advanced
    events_processed: usize,
}

impl SimulationClock {
    /// Create a clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock to `time`.
    ///
    /// # Panics
    /// Panics if `time` is earlier than the current time. The event calendar
    /// always hands out events in time order, so a rewind means the caller
    /// scheduled an event in the past.
    pub fn advance_to(&mut self, time: f64) {
        assert!(
            time >= self.now,
            "clock cannot rewind from {} to {}",
            self.now,
            time
        );
        self.now = time;
        self.events_processed += 1;
    }

    /// Current simulation time.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Number of events processed so far.
    pub fn events_processed(&self) -> usize {
        self.events_processed
    }

    /// True once the clock has reached or passed `horizon`.
    pub fn reached(&self, horizon: f64) -> bool {
        self.now >= horizon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "clock cannot rewind")]
    fn test_rewind_panics() {
        let mut clock = SimulationClock::new();
        clock.advance_to(5.0);
        clock.advance_to(4.0);
    }

    #[test]
    fn test_advance_to_same_time_allowed() {
        let mut clock = SimulationClock::new();
        clock.advance_to(1.0);
        clock.advance_to(1.0);
        assert_eq!(clock.now(), 1.0);
        assert_eq!(clock.events_processed(), 2);
    }
}
