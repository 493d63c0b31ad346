//! Domain models shared by the simulators

pub mod event;
pub mod queue;

// Re-exports
pub use event::{Event, EventCalendar, EventKind};
pub use queue::{QueueSample, QueueState, WaitRecord};
