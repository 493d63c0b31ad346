//! Tests for SimulationClock and the event calendar ordering it relies on

use stochastic_sim_core::{Event, EventCalendar, EventKind, SimulationClock};

#[test]
fn test_clock_starts_at_zero() {
    let clock = SimulationClock::new();
    assert_eq!(clock.now(), 0.0);
    assert_eq!(clock.events_processed(), 0);
    assert!(!clock.reached(1.0));
}

#[test]
fn test_advance_counts_events() {
    let mut clock = SimulationClock::new();

    clock.advance_to(0.5);
    clock.advance_to(0.5); // simultaneous events are allowed
    clock.advance_to(3.25);

    assert_eq!(clock.now(), 3.25);
    assert_eq!(clock.events_processed(), 3);
}

#[test]
fn test_reached_is_inclusive() {
    let mut clock = SimulationClock::new();
    clock.advance_to(10.0);
    assert!(clock.reached(10.0));
    assert!(clock.reached(9.99));
    assert!(!clock.reached(10.01));
}

#[test]
#[should_panic(expected = "clock cannot rewind")]
fn test_clock_never_moves_backwards() {
    let mut clock = SimulationClock::new();
    clock.advance_to(2.0);
    clock.advance_to(1.0);
}

#[test]
fn test_calendar_pops_in_time_order() {
    let mut calendar = EventCalendar::new();
    calendar.schedule(Event::Arrival { time: 4.0 });
    calendar.schedule(Event::Departure { time: 1.5 });
    calendar.schedule(Event::Arrival { time: 2.0 });

    let mut clock = SimulationClock::new();
    let mut seen = Vec::new();
    while let Some(event) = calendar.pop_next() {
        clock.advance_to(event.time());
        seen.push(event.time());
    }

    assert_eq!(seen, vec![1.5, 2.0, 4.0]);
    assert_eq!(clock.events_processed(), 3);
}

#[test]
fn test_calendar_ties_follow_insertion_order() {
    let mut calendar = EventCalendar::new();
    calendar.schedule(Event::Departure { time: 1.0 });
    calendar.schedule(Event::Arrival { time: 1.0 });

    assert_eq!(calendar.pop_next().map(|e| e.kind()), Some(EventKind::Departure));
    assert_eq!(calendar.pop_next().map(|e| e.kind()), Some(EventKind::Arrival));
    assert!(calendar.is_empty());
}

#[test]
fn test_clock_serialization_roundtrip() {
    let mut clock = SimulationClock::new();
    clock.advance_to(7.5);

    let json = serde_json::to_string(&clock).unwrap();
    let restored: SimulationClock = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, clock);
}
