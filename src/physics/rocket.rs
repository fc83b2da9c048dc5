//! Rigid-body rocket integrator.
//!
//! Semi-implicit Euler at a fixed timestep: velocities are updated
//! from the decomposed thrust first, then positions from the new
//! velocities. Angular acceleration is rounded to a fixed decimal
//! precision to keep floating noise from accumulating as phantom spin
//! over thousands of steps. First-order and not symplectic-exact;
//! test tolerances account for that.
//!
//! Thrust decomposition: the nozzle force is projected onto the body
//! axis (`push`, accelerates the rocket along itself) and onto the
//! side axis (`torque_force`, spins it). The torque lever arm is the
//! distance between the thrust application point and the center of
//! mass.

use crate::constants::{CENTER_OF_MASS_OFFSET, GRAVITY, MOMENT_OF_INERTIA, ROCKET_MASS};
use crate::error::{LanderError, Result};
use crate::physics::tvc::ThrustVectorControl;
use crate::types::UnitVec2;

/// Decimal places kept in the angular acceleration.
const ANGULAR_ACCEL_DECIMALS: i32 = 5;

// ============================================================================
// Configuration
// ============================================================================

/// Mass properties of the rocket body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RocketConfig {
    /// Total mass (kg).
    pub mass: f64,
    /// Moment of inertia about the out-of-plane axis (kg*m^2).
    pub moment_of_inertia: f64,
    /// Lever arm between thrust application point and center of mass (m).
    pub center_of_mass_offset: f64,
}

impl Default for RocketConfig {
    fn default() -> Self {
        Self {
            mass: ROCKET_MASS,
            moment_of_inertia: MOMENT_OF_INERTIA,
            center_of_mass_offset: CENTER_OF_MASS_OFFSET,
        }
    }
}

impl RocketConfig {
    /// Reject non-physical mass properties. A zero lever arm is legal
    /// (thrust through the center of mass produces no torque);
    /// negative values are not.
    pub fn validate(&self) -> Result<()> {
        if !(self.mass > 0.0) {
            return Err(LanderError::Configuration(format!(
                "mass must be positive, got {}",
                self.mass
            )));
        }
        if !(self.moment_of_inertia > 0.0) {
            return Err(LanderError::Configuration(format!(
                "moment_of_inertia must be positive, got {}",
                self.moment_of_inertia
            )));
        }
        if !(self.center_of_mass_offset >= 0.0) {
            return Err(LanderError::Configuration(format!(
                "center_of_mass_offset must be non-negative, got {}",
                self.center_of_mass_offset
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Kernels
// ============================================================================

/// Project the nozzle thrust onto the body frame.
///
/// Returns `(push, torque_force)`: the force component along the body
/// axis and the component along its perpendicular.
#[inline]
pub fn thrust_components(thrust: f64, nozzle: &UnitVec2, along: &UnitVec2) -> (f64, f64) {
    let side = along.perpendicular();
    let push = thrust * nozzle.component_along(along);
    let torque_force = thrust * nozzle.component_along(&side);
    (push, torque_force)
}

/// Angular acceleration from the side-force on the thrust lever arm,
/// rounded to [`ANGULAR_ACCEL_DECIMALS`] places.
#[inline]
pub fn angular_acceleration(center_of_mass_offset: f64, torque_force: f64, moment_of_inertia: f64) -> f64 {
    round_to_decimals(
        center_of_mass_offset * torque_force / moment_of_inertia,
        ANGULAR_ACCEL_DECIMALS,
    )
}

#[inline]
fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

// ============================================================================
// Rocket
// ============================================================================

/// The rocket rigid body: planar position and velocity, a unit body
/// axis, and a scalar spin rate. Created fresh at every episode reset
/// and mutated once per step by [`Rocket::step`].
#[derive(Clone, Debug)]
pub struct Rocket {
    config: RocketConfig,
    position_x: f64,
    position_y: f64,
    velocity_x: f64,
    velocity_y: f64,
    body_axis: UnitVec2,
    angular_velocity: f64,
}

impl Rocket {
    /// Place a motionless rocket at `(position_x, position_y)` pointing
    /// along `body_axis`.
    pub fn new(config: RocketConfig, position_x: f64, position_y: f64, body_axis: UnitVec2) -> Self {
        Self {
            config,
            position_x,
            position_y,
            velocity_x: 0.0,
            velocity_y: 0.0,
            body_axis,
            angular_velocity: 0.0,
        }
    }

    /// Advance one timestep under gravity and the actuator's thrust.
    ///
    /// Also rotates the actuator's nozzle with the body so it stays
    /// attached to the rotating frame.
    pub fn step(&mut self, tvc: &mut ThrustVectorControl, dt: f64) {
        let along = self.body_axis;
        let (push, torque_force) = thrust_components(tvc.thrust(), tvc.direction(), &along);

        // Linear: velocities first, then positions from the new
        // velocities (semi-implicit Euler).
        self.velocity_x += dt * (along.x() * push) / self.config.mass;
        self.velocity_y += dt * (-GRAVITY + (along.y() * push) / self.config.mass);
        self.position_x += dt * self.velocity_x;
        self.position_y += dt * self.velocity_y;

        // Angular: the same scheme, with the spin applied to both the
        // body axis and the nozzle.
        let angular_accel = angular_acceleration(
            self.config.center_of_mass_offset,
            torque_force,
            self.config.moment_of_inertia,
        );
        self.angular_velocity += dt * angular_accel;
        let rotation = dt * self.angular_velocity;
        self.body_axis.rotate_around_z(rotation);
        tvc.rotate_with_body(rotation);
    }

    #[cfg(test)]
    pub(crate) fn set_velocity_for_test(&mut self, velocity_x: f64, velocity_y: f64) {
        self.velocity_x = velocity_x;
        self.velocity_y = velocity_y;
    }

    /// Signed angle of the body axis from vertical; positive when
    /// leaning toward +x. Defined on the whole circle via atan2.
    #[inline]
    pub fn signed_tilt(&self) -> f64 {
        self.body_axis.angle_from_vertical()
    }

    /// Magnitude of the tilt away from vertical.
    #[inline]
    pub fn unsigned_tilt(&self) -> f64 {
        self.signed_tilt().abs()
    }

    /// Horizontal position (m).
    #[inline]
    pub fn position_x(&self) -> f64 {
        self.position_x
    }

    /// Height above the pad (m).
    #[inline]
    pub fn position_y(&self) -> f64 {
        self.position_y
    }

    /// Horizontal velocity (m/s).
    #[inline]
    pub fn velocity_x(&self) -> f64 {
        self.velocity_x
    }

    /// Vertical velocity (m/s); negative is descending.
    #[inline]
    pub fn velocity_y(&self) -> f64 {
        self.velocity_y
    }

    /// Spin rate (rad/s) in the tilt sense.
    #[inline]
    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    /// Unit direction the nose points in.
    #[inline]
    pub fn body_axis(&self) -> &UnitVec2 {
        &self.body_axis
    }

    /// Mass properties this body was built with.
    #[inline]
    pub fn config(&self) -> &RocketConfig {
        &self.config
    }
}

// ============================================================================
// Tests
// ============================================================================
