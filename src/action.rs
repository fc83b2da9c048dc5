//! Discrete action decoding.
//!
//! The environment is generic over an [`ActionDecoder`] so the same
//! simulation core serves all three historical control schemes:
//!
//! - [`ThrustOnly`] (3 actions): throttle up/hold/down, nozzle fixed.
//! - [`ThrustGimbal`] (9 actions): throttle x gimbal as a combined
//!   index, `thrust = action % 3`, `direction = action / 3`.
//! - [`BangBang`] (4 actions): three full-thrust nozzle setpoints plus
//!   an engine-off action.
//!
//! A decoder never guesses: an out-of-range index fails the step.

use crate::error::{LanderError, Result};

// ============================================================================
// Command Types
// ============================================================================

/// Throttle sub-command; moves thrust toward max/zero at the slew rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThrustCommand {
    /// Slew thrust toward zero.
    Decrease,
    /// Leave thrust where it is.
    Hold,
    /// Slew thrust toward the maximum.
    Increase,
}

/// Side the nozzle is nudged toward in the rate-limited scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GimbalDirection {
    /// Deflect toward negative level.
    Left,
    /// Deflect toward positive level.
    Right,
}

/// Target position in the bang-bang scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NozzleSetpoint {
    /// Full deflection, negative level.
    Left,
    /// Centered.
    Middle,
    /// Full deflection, positive level.
    Right,
}

/// Nozzle sub-command covering both actuation schemes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NozzleCommand {
    /// Leave the nozzle where it is.
    Stay,
    /// Rate-limited nudge toward one side.
    Nudge(GimbalDirection),
    /// Bang-bang step toward a setpoint.
    Snap(NozzleSetpoint),
}

/// One decoded control command: what the actuator is asked to do for
/// the next timestep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlCommand {
    /// Throttle part.
    pub thrust: ThrustCommand,
    /// Nozzle part; suppressed by the environment when turning is
    /// disabled in the curriculum.
    pub nozzle: NozzleCommand,
}

impl ControlCommand {
    /// The do-nothing command (hold thrust, leave nozzle). Used to
    /// prefill actuation-delay queues.
    pub const fn neutral() -> Self {
        Self {
            thrust: ThrustCommand::Hold,
            nozzle: NozzleCommand::Stay,
        }
    }

    /// Same command with the nozzle part removed.
    pub const fn without_nozzle(self) -> Self {
        Self {
            thrust: self.thrust,
            nozzle: NozzleCommand::Stay,
        }
    }
}

// ============================================================================
// Decoder Trait
// ============================================================================

/// Maps a discrete action index to a [`ControlCommand`].
///
/// Implementations are stateless value types; the environment is
/// generic over the decoder, with [`ThrustGimbal`] as the default.
pub trait ActionDecoder: Clone + Send + Sync {
    /// Human-readable scheme name, used in error messages.
    const NAME: &'static str;

    /// Cardinality of the action space.
    const N_ACTIONS: usize;

    /// Decode `action`, failing with
    /// [`LanderError::InvalidAction`] when `action >= N_ACTIONS`.
    fn decode(&self, action: usize) -> Result<ControlCommand>;
}

fn invalid<D: ActionDecoder>(action: usize) -> LanderError {
    LanderError::InvalidAction {
        action,
        num_actions: D::N_ACTIONS,
        decoder: D::NAME,
    }
}

// ============================================================================
// Thrust-Only (3 actions)
// ============================================================================

/// Throttle-only control: `0` lower, `1` stay, `2` higher. The nozzle
/// never moves; useful for the vertical-descent curriculum stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThrustOnly;

impl ActionDecoder for ThrustOnly {
    const NAME: &'static str = "thrust-only";
    const N_ACTIONS: usize = 3;

    fn decode(&self, action: usize) -> Result<ControlCommand> {
        let thrust = match action {
            0 => ThrustCommand::Decrease,
            1 => ThrustCommand::Hold,
            2 => ThrustCommand::Increase,
            _ => return Err(invalid::<Self>(action)),
        };
        Ok(ControlCommand {
            thrust,
            nozzle: NozzleCommand::Stay,
        })
    }
}

// ============================================================================
// Thrust x Gimbal (9 actions)
// ============================================================================

/// Combined throttle-and-gimbal control over a single index in `0..9`.
///
/// The index is a base-3 pair: `action % 3` selects the throttle
/// sub-action (`0` lower, `1` stay, `2` higher) and `action / 3`
/// selects the gimbal sub-action (`0` left, `1` stay, `2` right), so
/// e.g. `0` is lower-left, `4` is stay-stay, `8` is higher-right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThrustGimbal;

impl ActionDecoder for ThrustGimbal {
    const NAME: &'static str = "thrust-gimbal";
    const N_ACTIONS: usize = 9;

    fn decode(&self, action: usize) -> Result<ControlCommand> {
        if action >= Self::N_ACTIONS {
            return Err(invalid::<Self>(action));
        }
        let thrust = match action % 3 {
            0 => ThrustCommand::Decrease,
            1 => ThrustCommand::Hold,
            _ => ThrustCommand::Increase,
        };
        let nozzle = match action / 3 {
            0 => NozzleCommand::Nudge(GimbalDirection::Left),
            1 => NozzleCommand::Stay,
            _ => NozzleCommand::Nudge(GimbalDirection::Right),
        };
        Ok(ControlCommand { thrust, nozzle })
    }
}

// ============================================================================
// Bang-Bang (4 actions)
// ============================================================================

/// Bang-bang control: `0` LEFT, `1` MIDDLE, `2` RIGHT each command the
/// corresponding nozzle setpoint at full throttle; `3` NOTHING cuts
/// the throttle and leaves the nozzle alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BangBang;

impl ActionDecoder for BangBang {
    const NAME: &'static str = "bang-bang";
    const N_ACTIONS: usize = 4;

    fn decode(&self, action: usize) -> Result<ControlCommand> {
        let command = match action {
            0 => ControlCommand {
                thrust: ThrustCommand::Increase,
                nozzle: NozzleCommand::Snap(NozzleSetpoint::Left),
            },
            1 => ControlCommand {
                thrust: ThrustCommand::Increase,
                nozzle: NozzleCommand::Snap(NozzleSetpoint::Middle),
            },
            2 => ControlCommand {
                thrust: ThrustCommand::Increase,
                nozzle: NozzleCommand::Snap(NozzleSetpoint::Right),
            },
            3 => ControlCommand {
                thrust: ThrustCommand::Decrease,
                nozzle: NozzleCommand::Stay,
            },
            _ => return Err(invalid::<Self>(action)),
        };
        Ok(command)
    }
}
