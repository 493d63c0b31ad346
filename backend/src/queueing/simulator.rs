//! Discrete-event simulation of a single-server FIFO queue.
//!
//! The loop takes the earliest event off the calendar, advances the clock to
//! it and reacts:
//!
//! 1. **Arrival**: join the line, schedule the next arrival, and start
//!    service straight away if the server was idle
//! 2. **Departure**: the head of the line leaves and its sojourn time is
//!    recorded; the next customer (if any) starts service
//!
//! The run stops once the clock reaches the horizon. The horizon is checked
//! before each event, so the event that crosses it is still processed.
//!
//! # Queue length estimator
//!
//! `mean_queue_length` is the plain average of the queue length sampled after
//! every event. It is not weighted by the time between events, so it is an
//! approximation of the time-average L. The time-weighted value is reported
//! separately as `time_weighted_queue_length`.

use crate::core::clock::SimulationClock;
use crate::error::{require_positive, SimulationError};
use crate::models::{Event, EventCalendar, QueueSample, QueueState, WaitRecord};
use crate::queueing::distribution::RenewalDistribution;
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Configuration for one queue simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Inter-arrival time distribution
    pub arrival: RenewalDistribution,

    /// Service time distribution
    pub service: RenewalDistribution,

    /// Simulated time span (same unit as the rates)
    pub horizon: f64,
}

impl QueueConfig {
    /// M/M/1 configuration with Poisson arrivals and exponential service.
    pub fn mm1(arrival_rate: f64, service_rate: f64, horizon: f64) -> Self {
        Self {
            arrival: RenewalDistribution::Exponential { rate: arrival_rate },
            service: RenewalDistribution::Exponential { rate: service_rate },
            horizon,
        }
    }

    /// Validate all parameters.
    pub fn validate(&self) -> Result<(), SimulationError> {
        self.arrival.validate()?;
        self.service.validate()?;
        require_positive("horizon", self.horizon)
    }

    /// Offered load `arrival rate / service rate`.
    pub fn utilization(&self) -> f64 {
        self.arrival.rate() / self.service.rate()
    }
}

/// Headline statistics of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueSummary {
    /// Unweighted mean of per-event queue length samples
    pub mean_queue_length: f64,

    /// Mean sojourn time of completed customers (0.0 if none completed)
    pub mean_wait_time: f64,

    /// Queue length averaged over simulated time
    pub time_weighted_queue_length: f64,

    /// Customers that completed service
    pub customers_served: usize,

    /// Customers still in the system when the run stopped
    pub customers_remaining: usize,

    /// Largest number in system seen during the run
    pub max_queue_length: usize,

    /// Clock value after the last processed event
    pub final_clock: f64,

    /// Number of events processed
    pub events_processed: usize,
}

/// Complete output of a run: summary plus the raw logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueRunResult {
    pub summary: QueueSummary,

    /// One sample per processed event, in processing order
    pub samples: Vec<QueueSample>,

    /// One record per completed customer, in departure order
    pub waits: Vec<WaitRecord>,
}

/// Event-driven single-server queue.
///
/// # Example
/// ```
/// use stochastic_sim_core::queueing::{QueueConfig, QueueSimulator};
/// use stochastic_sim_core::RngManager;
///
/// let mut rng = RngManager::new(7);
/// let sim = QueueSimulator::new(QueueConfig::mm1(3.0, 4.0, 100.0), &mut rng).unwrap();
/// let result = sim.run(&mut rng);
///
/// assert_eq!(result.samples.len(), result.summary.events_processed);
/// assert!(result.summary.final_clock >= 100.0);
/// ```
#[derive(Debug, Clone)]
pub struct QueueSimulator {
    config: QueueConfig,
    clock: SimulationClock,
    calendar: EventCalendar,
    state: QueueState,
    samples: Vec<QueueSample>,
    waits: Vec<WaitRecord>,
    /// Integral of queue length over time up to the clock
    queue_area: f64,
    max_queue_length: usize,
}

impl QueueSimulator {
    /// Validate the config and schedule the first arrival.
    ///
    /// The system starts empty with no departure scheduled.
    pub fn new(config: QueueConfig, rng: &mut RngManager) -> Result<Self, SimulationError> {
        config.validate()?;

        if config.utilization() >= 1.0 {
            warn!(
                utilization = config.utilization(),
                "queue is not stable; the line will grow over the horizon"
            );
        }

        let mut calendar = EventCalendar::new();
        calendar.schedule(Event::Arrival {
            time: config.arrival.sample(rng),
        });

        Ok(Self {
            config,
            clock: SimulationClock::new(),
            calendar,
            state: QueueState::new(),
            samples: Vec::new(),
            waits: Vec::new(),
            queue_area: 0.0,
            max_queue_length: 0,
        })
    }

    /// Process the next event and return the sample it produced.
    ///
    /// Returns `None` only if the calendar is empty, which cannot happen while
    /// arrivals keep rescheduling themselves.
    pub fn step(&mut self, rng: &mut RngManager) -> Option<QueueSample> {
        let event = self.calendar.pop_next()?;
        let now = event.time();

        self.queue_area += self.state.len() as f64 * (now - self.clock.now());
        self.clock.advance_to(now);

        match event {
            Event::Arrival { .. } => {
                let in_system = self.state.arrive(now);
                self.calendar.schedule(Event::Arrival {
                    time: now + self.config.arrival.sample(rng),
                });

                // Server was idle: the newcomer goes straight into service
                if in_system == 1 {
                    self.calendar.schedule(Event::Departure {
                        time: now + self.config.service.sample(rng),
                    });
                }
            }
            Event::Departure { .. } => {
                if let Some(record) = self.state.depart(now) {
                    self.waits.push(record);
                }
                if !self.state.is_empty() {
                    self.calendar.schedule(Event::Departure {
                        time: now + self.config.service.sample(rng),
                    });
                }
            }
        }

        let sample = QueueSample {
            clock: now,
            queue_length: self.state.len(),
            event: event.kind(),
        };
        self.max_queue_length = self.max_queue_length.max(sample.queue_length);
        self.samples.push(sample);
        Some(sample)
    }

    /// Run until the clock reaches the horizon.
    pub fn run(mut self, rng: &mut RngManager) -> QueueRunResult {
        debug!(
            horizon = self.config.horizon,
            utilization = self.config.utilization(),
            "starting queue simulation"
        );

        while !self.clock.reached(self.config.horizon) {
            if self.step(rng).is_none() {
                break;
            }
        }

        let result = self.finish();
        debug!(
            events = result.summary.events_processed,
            served = result.summary.customers_served,
            mean_queue_length = result.summary.mean_queue_length,
            mean_wait_time = result.summary.mean_wait_time,
            "queue simulation finished"
        );
        result
    }

    /// Current clock value
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// Customers currently in the system
    pub fn in_system(&self) -> usize {
        self.state.len()
    }

    /// Number of pending departures (0 or 1 for a single server)
    pub fn pending_departures(&self) -> usize {
        self.calendar.count_of(crate::models::EventKind::Departure)
    }

    fn finish(self) -> QueueRunResult {
        let mean_queue_length = if self.samples.is_empty() {
            0.0
        } else {
            self.samples.iter().map(|s| s.queue_length as f64).sum::<f64>()
                / self.samples.len() as f64
        };

        let mean_wait_time = if self.waits.is_empty() {
            0.0
        } else {
            self.waits.iter().map(WaitRecord::sojourn).sum::<f64>() / self.waits.len() as f64
        };

        let final_clock = self.clock.now();
        let time_weighted_queue_length = if final_clock > 0.0 {
            self.queue_area / final_clock
        } else {
            0.0
        };

        QueueRunResult {
            summary: QueueSummary {
                mean_queue_length,
                mean_wait_time,
                time_weighted_queue_length,
                customers_served: self.waits.len(),
                customers_remaining: self.state.len(),
                max_queue_length: self.max_queue_length,
                final_clock,
                events_processed: self.clock.events_processed(),
            },
            samples: self.samples,
            waits: self.waits,
        }
    }
}

/// Simulate an M/M/1 queue and return `(mean_queue_length, mean_wait_time)`.
///
/// `mean_queue_length` averages the count sampled after each event, not over
/// time. Departures leave the count one lower than the matching arrival saw,
/// so a long stable run settles near `L + ½` rather than `L = ρ/(1−ρ)`
/// (about 3.5 instead of 3.0 for λ = 3, μ = 4), and a single run can miss
/// `L` by more than 20%. Compare against
/// [`QueueSummary::time_weighted_queue_length`] when checking `L`.
/// `mean_wait_time` has no such bias and tracks `W = 1/(μ−λ)`.
///
/// # Errors
///
/// `InvalidParameter` if any of the rates or the horizon is not strictly
/// positive. An arrival rate at or above the service rate is allowed; the
/// queue simply grows.
pub fn run_mm1(
    arrival_rate: f64,
    service_rate: f64,
    horizon: f64,
    rng: &mut RngManager,
) -> Result<(f64, f64), SimulationError> {
    require_positive("arrival_rate", arrival_rate)?;
    require_positive("service_rate", service_rate)?;

    let config = QueueConfig::mm1(arrival_rate, service_rate, horizon);
    let summary = QueueSimulator::new(config, rng)?.run(rng).summary;
    Ok((summary.mean_queue_length, summary.mean_wait_time))
}
