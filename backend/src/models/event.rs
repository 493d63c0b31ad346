//! Timestamped events and the calendar that orders them.
//!
//! A discrete-event simulation is a loop that repeatedly takes the earliest
//! pending event off the calendar, advances the clock to its time and reacts
//! to it. Event kinds form a closed sum type; adding a kind means adding a
//! variant and a match arm, never another "next_x_time" variable.
//!
//! # Example
//!
//! ```rust
//! use stochastic_sim_core::models::{Event, EventCalendar};
//!
//! let mut calendar = EventCalendar::new();
//! calendar.schedule(Event::Departure { time: 4.0 });
//! calendar.schedule(Event::Arrival { time: 1.5 });
//!
//! assert_eq!(calendar.pop_next(), Some(Event::Arrival { time: 1.5 }));
//! assert_eq!(calendar.pop_next(), Some(Event::Departure { time: 4.0 }));
//! assert_eq!(calendar.pop_next(), None);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Simulation event with its scheduled time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A customer enters the system
    Arrival { time: f64 },

    /// The customer in service leaves the system
    Departure { time: f64 },
}

/// Event kind without its timestamp, used in per-event samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Arrival,
    Departure,
}

impl Event {
    /// Scheduled time of the event
    pub fn time(&self) -> f64 {
        match self {
            Event::Arrival { time } => *time,
            Event::Departure { time } => *time,
        }
    }

    /// Kind of the event
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Arrival { .. } => EventKind::Arrival,
            Event::Departure { .. } => EventKind::Departure,
        }
    }
}

/// Heap entry: events come out earliest first, equal times in the order they
/// were scheduled.
#[derive(Debug, Clone, Copy)]
struct Pending {
    event: Event,
    seq: u64,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse so the earliest event is on top
        other
            .event
            .time()
            .total_cmp(&self.event.time())
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Pending events ordered by scheduled time.
#[derive(Debug, Clone, Default)]
pub struct EventCalendar {
    heap: BinaryHeap<Pending>,
    next_seq: u64,
}

impl EventCalendar {
    /// Create an empty calendar
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event to the calendar
    pub fn schedule(&mut self, event: Event) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Pending { event, seq });
    }

    /// Remove and return the earliest pending event
    pub fn pop_next(&mut self) -> Option<Event> {
        self.heap.pop().map(|pending| pending.event)
    }

    /// Time of the earliest pending event, if any
    pub fn peek_time(&self) -> Option<f64> {
        self.heap.peek().map(|pending| pending.event.time())
    }

    /// Number of pending events of the given kind
    pub fn count_of(&self, kind: EventKind) -> usize {
        self.heap
            .iter()
            .filter(|pending| pending.event.kind() == kind)
            .count()
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// True when nothing is scheduled
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
