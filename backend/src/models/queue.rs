//! Single-server queue state and the records a run accumulates.
//!
//! # Invariants
//!
//! 1. The number in system equals the number of unmatched arrivals
//! 2. Arrivals and departures change the count by exactly one
//! 3. Departures are matched to the oldest unmatched arrival (FIFO)

use super::event::EventKind;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One completed customer: when they arrived and when they left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaitRecord {
    pub arrival_time: f64,
    pub departure_time: f64,
}

impl WaitRecord {
    /// Time spent in the system (queueing plus service)
    pub fn sojourn(&self) -> f64 {
        self.departure_time - self.arrival_time
    }
}

/// Queue length observed right after processing an event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueueSample {
    pub clock: f64,
    pub queue_length: usize,
    pub event: EventKind,
}

/// Customers currently in the system, in arrival order.
///
/// # Example
/// ```
/// use stochastic_sim_core::models::QueueState;
///
/// let mut state = QueueState::new();
/// assert_eq!(state.arrive(1.0), 1);
/// assert_eq!(state.arrive(2.0), 2);
///
/// let record = state.depart(3.5).unwrap();
/// assert_eq!(record.arrival_time, 1.0);
/// assert_eq!(state.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueueState {
    unmatched_arrivals: VecDeque<f64>,
}

impl QueueState {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an arrival at `time`; returns the new number in system.
    pub fn arrive(&mut self, time: f64) -> usize {
        self.unmatched_arrivals.push_back(time);
        self.unmatched_arrivals.len()
    }

    /// Release the customer at the head of the line at `time`.
    ///
    /// Returns `None` if the system is empty.
    pub fn depart(&mut self, time: f64) -> Option<WaitRecord> {
        self.unmatched_arrivals
            .pop_front()
            .map(|arrival_time| WaitRecord {
                arrival_time,
                departure_time: time,
            })
    }

    /// Number of customers in the system (waiting + in service)
    pub fn len(&self) -> usize {
        self.unmatched_arrivals.len()
    }

    /// True when the server is idle and nobody waits
    pub fn is_empty(&self) -> bool {
        self.unmatched_arrivals.is_empty()
    }

    /// Arrival time of the customer in service, if any
    pub fn head_arrival(&self) -> Option<f64> {
        self.unmatched_arrivals.front().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depart_from_empty_queue() {
        let mut state = QueueState::new();
        assert!(state.is_empty());
        assert_eq!(state.depart(1.0), None);
    }

    #[test]
    fn test_fifo_matching() {
        let mut state = QueueState::new();
        state.arrive(0.5);
        state.arrive(0.7);
        state.arrive(0.9);

        let first = state.depart(1.0).unwrap();
        let second = state.depart(2.0).unwrap();

        assert_eq!(first.arrival_time, 0.5);
        assert_eq!(second.arrival_time, 0.7);
        assert_eq!(state.head_arrival(), Some(0.9));
        assert!((second.sojourn() - 1.3).abs() < 1e-12);
    }
}
