//! Thrust-vector-control actuator.
//!
//! The engine cannot jump between states: per timestep, thrust moves
//! at most `thrust_rate * dt` and the nozzle deflection moves at most
//! `rotation_rate * dt` (rate-limited scheme) or one `max_rotation`
//! increment (bang-bang scheme). Bounded actuation is the actuator's
//! core physical-realism contract; nothing here is instantaneous.
//!
//! The nozzle deflection is tracked twice, deliberately: `level` is
//! the signed scalar angle away from the body axis, and `direction`
//! is the actual unit vector the thrust acts along. The two advance
//! in lockstep on every command; body rotation moves `direction`
//! without touching `level`, because deflection is measured in the
//! body frame.

use crate::action::{
    ControlCommand, GimbalDirection, NozzleCommand, NozzleSetpoint, ThrustCommand,
};
use crate::constants::{
    DEFAULT_NOZZLE_RATE, DEFAULT_THRUST_RATE, MAX_NOZZLE_ROTATION, MAX_THRUST, TIMESTEP,
};
use crate::error::{LanderError, Result};
use crate::types::UnitVec2;

// ============================================================================
// Configuration
// ============================================================================

/// Actuation limits of the TVC mount.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TvcConfig {
    /// Maximum engine thrust (N).
    pub max_thrust: f64,
    /// Thrust slew rate (N/s).
    pub thrust_rate: f64,
    /// Maximum nozzle deflection from the body axis (rad). Doubles as
    /// the per-command step size in the bang-bang scheme.
    pub max_rotation: f64,
    /// Nozzle slew rate (rad/s) in the rate-limited scheme.
    pub rotation_rate: f64,
}

impl TvcConfig {
    /// Continuous actuation: thrust ramps over
    /// [`crate::constants::THRUST_RAMP_TIME`], nozzle slews at
    /// [`DEFAULT_NOZZLE_RATE`].
    pub const fn rate_limited() -> Self {
        Self {
            max_thrust: MAX_THRUST,
            thrust_rate: DEFAULT_THRUST_RATE,
            max_rotation: MAX_NOZZLE_ROTATION,
            rotation_rate: DEFAULT_NOZZLE_RATE,
        }
    }

    /// Bang-bang actuation: the thrust rate covers the full range in a
    /// single timestep, so Increase/Decrease behave as on/off while
    /// still honoring the per-step bound.
    pub const fn bang_bang() -> Self {
        Self {
            max_thrust: MAX_THRUST,
            thrust_rate: MAX_THRUST / TIMESTEP,
            max_rotation: MAX_NOZZLE_ROTATION,
            rotation_rate: DEFAULT_NOZZLE_RATE,
        }
    }

    /// Check physical plausibility; called from environment config
    /// validation.
    pub fn validate(&self) -> Result<()> {
        if !(self.max_thrust > 0.0) {
            return Err(LanderError::Configuration(format!(
                "max_thrust must be positive, got {}",
                self.max_thrust
            )));
        }
        if !(self.thrust_rate > 0.0) {
            return Err(LanderError::Configuration(format!(
                "thrust_rate must be positive, got {}",
                self.thrust_rate
            )));
        }
        if !(self.max_rotation > 0.0) {
            return Err(LanderError::Configuration(format!(
                "max_rotation must be positive, got {}",
                self.max_rotation
            )));
        }
        if !(self.rotation_rate > 0.0) {
            return Err(LanderError::Configuration(format!(
                "rotation_rate must be positive, got {}",
                self.rotation_rate
            )));
        }
        Ok(())
    }
}

impl Default for TvcConfig {
    fn default() -> Self {
        Self::rate_limited()
    }
}

// ============================================================================
// Kernels
// ============================================================================

/// Move `current` toward `target` by at most `max_delta`.
#[inline(always)]
pub fn slew_toward(current: f64, target: f64, max_delta: f64) -> f64 {
    current + (target - current).clamp(-max_delta, max_delta)
}

// ============================================================================
// Actuator
// ============================================================================

/// The gimbaled engine: thrust magnitude plus nozzle direction.
///
/// Constructed at episode reset pointing along the rocket's spawn
/// direction (zero deflection, zero thrust).
#[derive(Clone, Debug)]
pub struct ThrustVectorControl {
    config: TvcConfig,
    direction: UnitVec2,
    /// Signed nozzle deflection from the body axis (rad).
    level: f64,
    current_thrust: f64,
}

impl ThrustVectorControl {
    /// Create an idle actuator aligned with `direction`.
    pub fn new(config: TvcConfig, direction: UnitVec2) -> Self {
        Self {
            config,
            direction,
            level: 0.0,
            current_thrust: 0.0,
        }
    }

    /// Apply one decoded command for one timestep.
    pub fn apply_command(&mut self, command: ControlCommand, dt: f64) {
        self.apply_thrust_command(command.thrust, dt);
        self.apply_nozzle_command(command.nozzle, dt);
    }

    /// Slew thrust toward max/zero; `Hold` is a no-op.
    pub fn apply_thrust_command(&mut self, command: ThrustCommand, dt: f64) {
        let target = match command {
            ThrustCommand::Decrease => 0.0,
            ThrustCommand::Hold => return,
            ThrustCommand::Increase => self.config.max_thrust,
        };
        self.current_thrust = slew_toward(self.current_thrust, target, self.config.thrust_rate * dt)
            .clamp(0.0, self.config.max_thrust);
    }

    /// Move the nozzle. `Nudge` is rate-limited, `Snap` steps between
    /// the bang-bang setpoints, `Stay` is a no-op.
    pub fn apply_nozzle_command(&mut self, command: NozzleCommand, dt: f64) {
        let new_level = match command {
            NozzleCommand::Stay => return,
            NozzleCommand::Nudge(direction) => {
                let target = match direction {
                    GimbalDirection::Left => -self.config.max_rotation,
                    GimbalDirection::Right => self.config.max_rotation,
                };
                slew_toward(self.level, target, self.config.rotation_rate * dt)
            }
            NozzleCommand::Snap(setpoint) => self.snapped_level(setpoint),
        };
        // The realized delta keeps level and direction in lockstep and
        // enforces |level| <= max_rotation even off the setpoint lattice.
        let new_level = new_level.clamp(-self.config.max_rotation, self.config.max_rotation);
        let delta = new_level - self.level;
        if delta != 0.0 {
            self.direction.rotate_around_z(delta);
            self.level = new_level;
        }
    }

    /// Bang-bang step logic. Setpoints are `{-max_rotation, 0,
    /// +max_rotation}`; the hysteresis band is half a step on either
    /// side of center, so commands inside the band do not oscillate
    /// and a command across the whole range takes a double step.
    fn snapped_level(&self, setpoint: NozzleSetpoint) -> f64 {
        let step = self.config.max_rotation;
        let band = 0.5 * step;
        match setpoint {
            NozzleSetpoint::Left => {
                if self.level > band {
                    self.level - 2.0 * step
                } else if self.level > -band {
                    self.level - step
                } else {
                    self.level
                }
            }
            NozzleSetpoint::Right => {
                if self.level < -band {
                    self.level + 2.0 * step
                } else if self.level < band {
                    self.level + step
                } else {
                    self.level
                }
            }
            NozzleSetpoint::Middle => {
                if self.level > band {
                    self.level - step
                } else if self.level < -band {
                    self.level + step
                } else {
                    self.level
                }
            }
        }
    }

    /// Rotate the nozzle with the rocket body. Deflection (`level`) is
    /// body-relative and therefore unchanged.
    pub fn rotate_with_body(&mut self, angle: f64) {
        self.direction.rotate_around_z(angle);
    }

    /// Thrust force as a world-frame vector: direction scaled by the
    /// current thrust magnitude.
    pub fn force_vector(&self) -> (f64, f64) {
        (
            self.direction.x() * self.current_thrust,
            self.direction.y() * self.current_thrust,
        )
    }

    /// Current thrust magnitude (N).
    #[inline]
    pub fn thrust(&self) -> f64 {
        self.current_thrust
    }

    /// Signed nozzle deflection from the body axis (rad).
    #[inline]
    pub fn level(&self) -> f64 {
        self.level
    }

    /// World-frame direction the thrust acts along.
    #[inline]
    pub fn direction(&self) -> &UnitVec2 {
        &self.direction
    }

    /// Actuation limits this actuator was built with.
    #[inline]
    pub fn config(&self) -> &TvcConfig {
        &self.config
    }
}

// ============================================================================
// Tests
// ============================================================================
