//! 2D Rocket TVC Landing Environment
//!
//! A planar thrust-vector-control rocket simulation for reinforcement
//! learning: a Falcon-9-class booster falls from a spawn height and a
//! discrete-action policy must gimbal and throttle it to a soft,
//! upright touchdown.
//!
//! # Features
//!
//! - **Rate-Limited Actuation**: thrust and nozzle both slew, never
//!   jump; a bang-bang preset covers the classic on/off scheme
//! - **Pluggable Action Spaces**: thrust-only (3), thrust x gimbal (9)
//!   and bang-bang (4) decoders behind one trait
//! - **Curriculum Learning**: spawn height/tilt/offset policies and
//!   reward-term toggles, adjustable between episodes
//! - **Non-Auto-Reset API**: stepping a finished episode is an error,
//!   so value-based algorithms see every terminal state exactly once
//! - **Telemetry**: per-step flight log with CSV/JSON export
//!
//! # Example
//!
//! ```rust,ignore
//! use tvc_lander::{Lander, LanderConfig};
//!
//! let mut env: Lander = LanderConfig::new().with_seed(42).build()?;
//! env.curriculum_mut().set_random_height(5.0, 10.0)?;
//! env.curriculum_mut().enable_turn();
//!
//! let mut observation = env.reset();
//! loop {
//!     let action = policy(observation); // your policy here
//!     let outcome = env.step(action)?;
//!     observation = outcome.observation;
//!     if outcome.terminated.is_some() {
//!         break;
//!     }
//! }
//! env.flight_log().write_csv("landing.csv")?;
//! ```
//!
//! # Batched rollouts
//!
//! [`LanderPool`] runs many independent environments for vectorized
//! training, with explicit control over which finished episodes to
//! restart:
//!
//! ```rust,ignore
//! use tvc_lander::{LanderConfig, LanderPool};
//!
//! let mut pool: LanderPool = LanderPool::from_config(LanderConfig::new(), 64)?;
//! let outcomes = pool.step(&actions)?;
//! pool.reset_finished();
//! ```

// Core modules
pub mod action;
pub mod config;
pub mod constants;
pub mod error;
pub mod types;

// Physics simulation
pub mod physics;

// Environment components
pub mod curriculum;
pub mod env;
pub mod flight_log;
pub mod observation;
pub mod reward;
pub mod termination;

// Integration adapters
pub mod adapter;

// Comprehensive test suite
#[cfg(test)]
pub mod tests;

// Re-exports for convenience
pub use action::{
    ActionDecoder, BangBang, ControlCommand, GimbalDirection, NozzleCommand, NozzleSetpoint,
    ThrustCommand, ThrustGimbal, ThrustOnly,
};
pub use adapter::LanderPool;
pub use config::LanderConfig;
pub use curriculum::{Curriculum, HeightPolicy};
pub use env::{Lander, StepOutcome};
pub use error::{LanderError, Result};
pub use flight_log::{EpisodeSummary, FlightLog, FlightSample};
pub use observation::{observe, Observation, OBSERVATION_SIZE};
pub use physics::{
    CommandQueue, Rocket, RocketConfig, ThrustVectorControl, TvcConfig,
};
pub use reward::RewardWeights;
pub use termination::TerminationReason;
pub use types::UnitVec2;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
