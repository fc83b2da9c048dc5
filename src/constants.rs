//! Physical, actuation, and reward constants for the landing problem.
//!
//! The rocket is a single-stage booster parameterized at roughly
//! Falcon-9 first-stage scale. All angles are radians, all distances
//! meters, all forces newtons; degrees appear only in flight-log
//! exports.

// ============================================================================
// Environment
// ============================================================================

/// Gravitational acceleration (m/s^2)
pub const GRAVITY: f64 = 9.81;

/// Fixed integration timestep (s). One `step()` advances exactly this much.
pub const TIMESTEP: f64 = 0.02;

/// Default fixed spawn height (m), the easiest curriculum stage.
pub const DEFAULT_SPAWN_HEIGHT: f64 = 1.0;

/// Widest spawn height any random/increasing curriculum may sample (m).
pub const SPAWN_HEIGHT_CEILING: f64 = 10.0;

/// Lateral flight corridor half-width (m). Crossing it ends the episode.
pub const LATERAL_BOUND: f64 = 10.0;

/// Horizontal spawn offset range (m) when a landing target is active.
pub const SPAWN_OFFSET_RANGE: f64 = 3.0;

// ============================================================================
// Rocket Body
// ============================================================================

/// Dry-ish mass of the booster (kg)
pub const ROCKET_MASS: f64 = 4.5e5;

/// Distance from the center of mass to the engine gimbal (m).
/// Lever arm for the torque produced by the deflected nozzle.
pub const CENTER_OF_MASS_OFFSET: f64 = 16.0;

/// Moment of inertia about the out-of-plane axis (kg*m^2)
pub const MOMENT_OF_INERTIA: f64 = 2.15e6;

// ============================================================================
// Thrust Vector Control
// ============================================================================

/// Maximum engine thrust (N)
pub const MAX_THRUST: f64 = 7.6e6;

/// Maximum nozzle deflection from the body axis (rad)
pub const MAX_NOZZLE_ROTATION: f64 = 0.2;

/// Seconds for the engine to slew from zero to full thrust.
pub const THRUST_RAMP_TIME: f64 = 1.0;

/// Default continuous nozzle slew rate (rad/s)
pub const DEFAULT_NOZZLE_RATE: f64 = 1.0;

// ============================================================================
// Derived Constants
// ============================================================================

/// Default thrust slew rate (N/s) = MAX_THRUST / THRUST_RAMP_TIME
pub const DEFAULT_THRUST_RATE: f64 = MAX_THRUST / THRUST_RAMP_TIME;

/// Maximum thrust-to-weight ratio; > 1 or the booster can never decelerate.
pub const THRUST_TO_WEIGHT: f64 = MAX_THRUST / (ROCKET_MASS * GRAVITY);

// ============================================================================
// Reward Shaping
// ============================================================================

/// Flat bonus granted on touching the pad, before quality penalties.
pub const REWARD_LANDING: f64 = 15.0;

/// Fuel/impatience shaping: cost of one second of flight.
pub const PENALTY_PER_SECOND: f64 = 0.3;

/// Landing penalty per radian of residual tilt.
pub const PENALTY_PER_RADIAN_AT_LANDING: f64 = 0.5;

/// Landing penalty per rad/s of residual spin.
pub const PENALTY_PER_ANGULAR_VELOCITY_AT_LANDING: f64 = 0.25;

/// Landing penalty per m/s of residual horizontal drift (toggleable).
pub const PENALTY_PER_HORIZONTAL_VELOCITY: f64 = 0.25;

/// Landing penalty per meter of miss distance from the pad (toggleable).
pub const PENALTY_PER_HORIZONTAL_POSITION: f64 = 0.05;

/// Ideal touchdown vertical velocity (m/s); a gentle controlled descent
/// rather than a hover, so the bonus peaks at -1 m/s, not 0.
pub const TARGET_DESCENT_RATE: f64 = -1.0;

// ============================================================================
// Spawn Attitude
// ============================================================================

/// Random-tilt direction angle range, measured from +x toward +y (rad).
/// [PI/4, 3*PI/4] keeps the body axis within 45 degrees of vertical.
pub const SPAWN_TILT_MIN: f64 = std::f64::consts::FRAC_PI_4;

/// Upper end of the random-tilt direction angle range (rad).
pub const SPAWN_TILT_MAX: f64 = 3.0 * std::f64::consts::FRAC_PI_4;
