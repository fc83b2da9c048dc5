//! Reward shaping.
//!
//! Two pieces: a constant time penalty charged every step (burning
//! fuel while hovering is not free), and a touchdown bonus paid only
//! when the episode ends with ground contact. Leaving upward or
//! sideways forfeits the bonus; there is no separate crash penalty, a
//! hard impact just erodes the bonus through its velocity term.

use crate::curriculum::Curriculum;
use crate::physics::Rocket;
use crate::termination::TerminationReason;

use crate::constants::{
    PENALTY_PER_ANGULAR_VELOCITY_AT_LANDING, PENALTY_PER_HORIZONTAL_POSITION,
    PENALTY_PER_HORIZONTAL_VELOCITY, PENALTY_PER_RADIAN_AT_LANDING, PENALTY_PER_SECOND,
    REWARD_LANDING, TARGET_DESCENT_RATE,
};

/// Coefficients of the reward function. All penalties are magnitudes;
/// the signs are applied where the terms are summed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RewardWeights {
    /// Base bonus for touching the ground at all.
    pub landing_bonus: f64,
    /// Charged per second of flight.
    pub time_penalty_per_second: f64,
    /// Vertical speed to aim for at touchdown (m/s, negative = down).
    pub target_descent_rate: f64,
    /// Bonus lost per radian of tilt at touchdown.
    pub tilt_penalty: f64,
    /// Bonus lost per rad/s of residual spin at touchdown.
    pub angular_velocity_penalty: f64,
    /// Bonus lost per m/s of horizontal speed at touchdown (only when
    /// the curriculum enables it).
    pub horizontal_velocity_penalty: f64,
    /// Bonus lost per meter of distance from the pad center at
    /// touchdown (only when the landing target is active).
    pub horizontal_position_penalty: f64,
}

impl Default for RewardWeights {
    fn default() -> Self {
        Self {
            landing_bonus: REWARD_LANDING,
            time_penalty_per_second: PENALTY_PER_SECOND,
            target_descent_rate: TARGET_DESCENT_RATE,
            tilt_penalty: PENALTY_PER_RADIAN_AT_LANDING,
            angular_velocity_penalty: PENALTY_PER_ANGULAR_VELOCITY_AT_LANDING,
            horizontal_velocity_penalty: PENALTY_PER_HORIZONTAL_VELOCITY,
            horizontal_position_penalty: PENALTY_PER_HORIZONTAL_POSITION,
        }
    }
}

/// The per-step time penalty (negative).
#[inline]
pub fn step_penalty(weights: &RewardWeights, dt: f64) -> f64 {
    -weights.time_penalty_per_second * dt
}

/// The touchdown bonus for the rocket's final state.
///
/// Quality terms subtract from the base bonus: distance from the
/// target descent rate, tilt, residual spin, and (curriculum
/// permitting) horizontal speed and distance from the pad. A violent
/// enough impact drives this negative.
pub fn landing_bonus(weights: &RewardWeights, rocket: &Rocket, curriculum: &Curriculum) -> f64 {
    let mut bonus = weights.landing_bonus;
    bonus -= (rocket.velocity_y() - weights.target_descent_rate).abs();
    bonus -= weights.tilt_penalty * rocket.unsigned_tilt();
    bonus -= weights.angular_velocity_penalty * rocket.angular_velocity().abs();
    if curriculum.x_velocity_penalty_enabled() {
        bonus -= weights.horizontal_velocity_penalty * rocket.velocity_x().abs();
    }
    if curriculum.landing_target_enabled() {
        bonus -= weights.horizontal_position_penalty * rocket.position_x().abs();
    }
    bonus
}

/// The terminal payout for an episode ending this step: the touchdown
/// bonus on ground contact, nothing for escaping or drifting out.
pub fn terminal_bonus(
    weights: &RewardWeights,
    rocket: &Rocket,
    curriculum: &Curriculum,
    reason: TerminationReason,
) -> f64 {
    match reason {
        TerminationReason::Landed => landing_bonus(weights, rocket, curriculum),
        TerminationReason::Escaped | TerminationReason::OutOfBounds => 0.0,
    }
}
