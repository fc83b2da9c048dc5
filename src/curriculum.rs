//! Curriculum learning controls.
//!
//! The curriculum owns every knob that shapes episode generation:
//! where the rocket spawns, how it is tilted, and which reward terms
//! are active. The training loop mutates it **between episodes only**
//! (its owner, the environment, exposes it through
//! `curriculum_mut()`); changes take effect at the next reset. The
//! single sanctioned mid-training side effect is the increasing-height
//! policy, which widens its own upper bound once per spawn query.
//!
//! Defaults are the easiest stage: fixed low spawn, upright, turning
//! disabled, no optional reward terms.

use crate::constants::{
    DEFAULT_SPAWN_HEIGHT, SPAWN_HEIGHT_CEILING, SPAWN_OFFSET_RANGE, SPAWN_TILT_MAX, SPAWN_TILT_MIN,
};
use crate::error::{LanderError, Result};
use crate::types::UnitVec2;

/// Spawn-height policy. `Increasing` widens `max` by `rate` on every
/// spawn query; `max` never decreases.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HeightPolicy {
    /// Always spawn at exactly this height.
    Fixed(f64),
    /// Spawn uniformly within `[min, max]`.
    Random {
        /// Lower bound (m).
        min: f64,
        /// Upper bound (m).
        max: f64,
    },
    /// Like `Random`, but `max` grows by `rate` per episode.
    Increasing {
        /// Lower bound (m).
        min: f64,
        /// Current upper bound (m); grows without shrinking.
        max: f64,
        /// Growth per spawn query (m).
        rate: f64,
    },
}

/// Episode-initialization policy and reward-shaping toggles.
#[derive(Clone, Debug)]
pub struct Curriculum {
    height: HeightPolicy,
    height_ceiling: f64,
    random_tilt: bool,
    turn_enabled: bool,
    x_velocity_penalty: bool,
    landing_target: bool,
}

impl Default for Curriculum {
    fn default() -> Self {
        Self {
            height: HeightPolicy::Fixed(DEFAULT_SPAWN_HEIGHT),
            height_ceiling: SPAWN_HEIGHT_CEILING,
            random_tilt: false,
            turn_enabled: false,
            x_velocity_penalty: false,
            landing_target: false,
        }
    }
}

impl Curriculum {
    /// The default starting curriculum.
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Spawn height
    // ========================================================================

    /// Spawn at exactly `height` every episode.
    pub fn set_fixed_height(&mut self, height: f64) -> Result<()> {
        if !(height > 0.0) {
            return Err(LanderError::Configuration(format!(
                "spawn height must be positive, got {height}"
            )));
        }
        self.height = HeightPolicy::Fixed(height);
        Ok(())
    }

    /// Spawn uniformly within `[min, max]`.
    pub fn set_random_height(&mut self, min: f64, max: f64) -> Result<()> {
        Self::check_bounds(min, max)?;
        self.height = HeightPolicy::Random { min, max };
        Ok(())
    }

    /// Spawn uniformly within `[min, max]`, with `max` widening by
    /// `rate` on every spawn query. Sampling stays capped at the
    /// height ceiling even as the stored bound keeps growing.
    pub fn set_increasing_height(&mut self, min: f64, max: f64, rate: f64) -> Result<()> {
        Self::check_bounds(min, max)?;
        if !(rate >= 0.0) {
            return Err(LanderError::Configuration(format!(
                "height growth rate must be non-negative, got {rate}"
            )));
        }
        self.height = HeightPolicy::Increasing { min, max, rate };
        Ok(())
    }

    /// Cap on sampled spawn heights for the random/increasing policies.
    pub fn set_height_ceiling(&mut self, ceiling: f64) -> Result<()> {
        if !(ceiling > 0.0) {
            return Err(LanderError::Configuration(format!(
                "height ceiling must be positive, got {ceiling}"
            )));
        }
        self.height_ceiling = ceiling;
        Ok(())
    }

    fn check_bounds(min: f64, max: f64) -> Result<()> {
        if !(min > 0.0) {
            return Err(LanderError::Configuration(format!(
                "height range minimum must be positive, got {min}"
            )));
        }
        if min > max {
            return Err(LanderError::Configuration(format!(
                "height range minimum {min} exceeds maximum {max}"
            )));
        }
        Ok(())
    }

    // ========================================================================
    // Toggles
    // ========================================================================

    /// Let decoded nozzle commands through to the actuator.
    pub fn enable_turn(&mut self) {
        self.turn_enabled = true;
    }

    /// Suppress the nozzle part of every command; thrust still works.
    pub fn disable_turn(&mut self) {
        self.turn_enabled = false;
    }

    /// Spawn with a random tilt of up to 45 degrees off vertical.
    pub fn enable_random_starting_tilt(&mut self) {
        self.random_tilt = true;
    }

    /// Spawn upright.
    pub fn disable_random_starting_tilt(&mut self) {
        self.random_tilt = false;
    }

    /// Penalize residual horizontal velocity at touchdown.
    pub fn enable_x_velocity_penalty(&mut self) {
        self.x_velocity_penalty = true;
    }

    /// Ignore horizontal velocity at touchdown.
    pub fn disable_x_velocity_penalty(&mut self) {
        self.x_velocity_penalty = false;
    }

    /// Penalize touchdown distance from the pad center, and spawn with
    /// a random horizontal offset so there is a miss to penalize.
    pub fn enable_landing_target(&mut self) {
        self.landing_target = true;
    }

    /// No landing target: spawn centered, ignore touchdown position.
    pub fn disable_landing_target(&mut self) {
        self.landing_target = false;
    }

    // ========================================================================
    // Spawn sampling
    // ========================================================================

    /// Sample the next episode's spawn height.
    ///
    /// The one sanctioned side effect: in increasing mode the stored
    /// `max` widens by `rate` before sampling. The effective upper
    /// bound is additionally capped at the height ceiling (but never
    /// below `min`).
    pub fn spawn_height(&mut self, rng: &mut fastrand::Rng) -> f64 {
        match &mut self.height {
            HeightPolicy::Fixed(height) => *height,
            HeightPolicy::Random { min, max } => {
                sample_uniform(*min, max.min(self.height_ceiling).max(*min), rng)
            }
            HeightPolicy::Increasing { min, max, rate } => {
                *max += *rate;
                sample_uniform(*min, max.min(self.height_ceiling).max(*min), rng)
            }
        }
    }

    /// Sample the next episode's body direction: upright, or uniformly
    /// tilted within 45 degrees of vertical when random tilt is on.
    pub fn spawn_direction(&self, rng: &mut fastrand::Rng) -> UnitVec2 {
        if self.random_tilt {
            let angle = sample_uniform(SPAWN_TILT_MIN, SPAWN_TILT_MAX, rng);
            UnitVec2::from_angle(angle)
        } else {
            UnitVec2::up()
        }
    }

    /// Sample the next episode's horizontal spawn offset; zero unless
    /// a landing target is active.
    pub fn spawn_offset(&self, rng: &mut fastrand::Rng) -> f64 {
        if self.landing_target {
            sample_uniform(-SPAWN_OFFSET_RANGE, SPAWN_OFFSET_RANGE, rng)
        } else {
            0.0
        }
    }

    // ========================================================================
    // Getters
    // ========================================================================

    /// Current spawn-height policy.
    #[inline]
    pub fn height_policy(&self) -> &HeightPolicy {
        &self.height
    }

    /// Cap on sampled spawn heights.
    #[inline]
    pub fn height_ceiling(&self) -> f64 {
        self.height_ceiling
    }

    /// Whether nozzle commands reach the actuator.
    #[inline]
    pub fn turn_enabled(&self) -> bool {
        self.turn_enabled
    }

    /// Whether episodes start with a random tilt.
    #[inline]
    pub fn random_tilt_enabled(&self) -> bool {
        self.random_tilt
    }

    /// Whether touchdown horizontal velocity is penalized.
    #[inline]
    pub fn x_velocity_penalty_enabled(&self) -> bool {
        self.x_velocity_penalty
    }

    /// Whether a landing target is active.
    #[inline]
    pub fn landing_target_enabled(&self) -> bool {
        self.landing_target
    }
}

/// Uniform sample over `[low, high)`; degenerate ranges return `low`.
#[inline]
fn sample_uniform(low: f64, high: f64, rng: &mut fastrand::Rng) -> f64 {
    low + (high - low) * rng.f64()
}
