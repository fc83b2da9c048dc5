//! The agent-facing state vector.
//!
//! Everything the policy sees, in one place, so the layout cannot
//! drift between training and evaluation. Physics runs in f64; the
//! narrowing to f32 happens here and nowhere else.

use crate::physics::Rocket;

/// Number of entries in an [`Observation`].
pub const OBSERVATION_SIZE: usize = 6;

/// State vector handed to the policy. Layout, in order:
///
/// | index | value |
/// |-------|------------------------------------------|
/// | 0 | altitude as a fraction of spawn height |
/// | 1 | vertical velocity (m/s) |
/// | 2 | horizontal velocity (m/s) |
/// | 3 | horizontal position (m) |
/// | 4 | angular velocity (rad/s) |
/// | 5 | signed tilt from vertical (rad) |
pub type Observation = [f32; OBSERVATION_SIZE];

/// Build the observation for the rocket's current state.
///
/// Altitude is normalized by the episode's spawn height so "1.0" means
/// "where you started" regardless of the curriculum stage; the
/// remaining entries are raw physical quantities.
pub fn observe(rocket: &Rocket, spawn_height: f64) -> Observation {
    [
        (rocket.position_y() / spawn_height) as f32,
        rocket.velocity_y() as f32,
        rocket.velocity_x() as f32,
        rocket.position_x() as f32,
        rocket.angular_velocity() as f32,
        rocket.signed_tilt() as f32,
    ]
}
