//! Environment configuration.
//!
//! One pub-field struct with chainable `with_*` setters, validated as
//! a whole before an environment is built from it. Defaults reproduce
//! the reference vehicle: a Falcon-9-class booster with a rate-limited
//! nozzle and no actuation delay.

use crate::action::ActionDecoder;
use crate::constants::TIMESTEP;
use crate::env::Lander;
use crate::error::{LanderError, Result};
use crate::physics::{RocketConfig, TvcConfig};
use crate::reward::RewardWeights;

/// Full environment configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LanderConfig {
    /// Actuator limits and slew rates.
    pub tvc: TvcConfig,
    /// Mass properties of the body.
    pub rocket: RocketConfig,
    /// Reward coefficients.
    pub reward: RewardWeights,
    /// Integration timestep (s).
    pub timestep: f64,
    /// Command latency (s); rounded to whole timesteps. Zero means
    /// commands act on the step they are issued.
    pub actuation_delay: f64,
    /// RNG seed; identical seeds give identical episode sequences.
    pub seed: u64,
}

impl Default for LanderConfig {
    fn default() -> Self {
        Self {
            tvc: TvcConfig::rate_limited(),
            rocket: RocketConfig::default(),
            reward: RewardWeights::default(),
            timestep: TIMESTEP,
            actuation_delay: 0.0,
            seed: 0,
        }
    }
}

impl LanderConfig {
    /// The default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set actuator limits and slew rates.
    pub fn with_tvc(mut self, tvc: TvcConfig) -> Self {
        self.tvc = tvc;
        self
    }

    /// Set the body's mass properties.
    pub fn with_rocket(mut self, rocket: RocketConfig) -> Self {
        self.rocket = rocket;
        self
    }

    /// Set reward coefficients.
    pub fn with_reward(mut self, reward: RewardWeights) -> Self {
        self.reward = reward;
        self
    }

    /// Set the integration timestep.
    pub fn with_timestep(mut self, timestep: f64) -> Self {
        self.timestep = timestep;
        self
    }

    /// Set the command latency in seconds.
    pub fn with_actuation_delay(mut self, delay: f64) -> Self {
        self.actuation_delay = delay;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validate the whole configuration.
    pub fn validate(&self) -> Result<()> {
        self.tvc.validate()?;
        self.rocket.validate()?;
        if !(self.timestep > 0.0 && self.timestep.is_finite()) {
            return Err(LanderError::Configuration(format!(
                "timestep must be positive and finite, got {}",
                self.timestep
            )));
        }
        if !(self.actuation_delay >= 0.0 && self.actuation_delay.is_finite()) {
            return Err(LanderError::Configuration(format!(
                "actuation_delay must be non-negative and finite, got {}",
                self.actuation_delay
            )));
        }
        Ok(())
    }

    /// Build the environment with the decoder chosen by the type
    /// parameter.
    pub fn build<D: ActionDecoder + Default>(self) -> Result<Lander<D>> {
        Lander::from_config(self)
    }
}
