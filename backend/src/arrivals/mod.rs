//! Arrival-time generation for Poisson processes.
//!
//! All generation is deterministic given the RNG seed.
//!
//! # Key Principles
//!
//! 1. **Determinism**: Same seed + same intensity → same arrivals
//! 2. **Thinning**: Time-varying rates are produced by acceptance-rejection
//!    against a dominating homogeneous process
//! 3. **Fail fast**: Negative intensities are rejected, never clamped
//!
//! # Example
//!
//! ```
//! use stochastic_sim_core::arrivals::{generate_nhpp, IntensityProfile};
//! use stochastic_sim_core::RngManager;
//!
//! let mut rng = RngManager::new(42);
//! let festival = IntensityProfile::festival_day();
//! let times = generate_nhpp(&festival, 24.0, &mut rng).unwrap();
//!
//! assert!(times.windows(2).all(|w| w[0] < w[1]));
//! assert!(times.iter().all(|t| (0.0..24.0).contains(t)));
//! ```

pub mod homogeneous;
pub mod intensity;
pub mod thinning;

pub use homogeneous::{
    homogeneous_by_gaps, homogeneous_by_order_stats, marked_arrivals, MarkedArrival,
};
pub use intensity::{GaussianPeak, Intensity, IntensityProfile, PiecewiseConstant};
pub use thinning::{generate_nhpp, ThinningGenerator, ThinningOutcome};
