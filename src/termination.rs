//! Episode termination rules.

use serde::{Deserialize, Serialize};

use crate::constants::LATERAL_BOUND;
use crate::physics::Rocket;

/// Why an episode ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    /// The rocket reached the ground (`y <= 0`), softly or not.
    Landed,
    /// The rocket climbed past twice its spawn height.
    Escaped,
    /// The rocket drifted out of the corridor (`|x| > 10`).
    OutOfBounds,
}

impl TerminationReason {
    /// Stable lowercase name, used in errors and exported summaries.
    pub fn as_str(self) -> &'static str {
        match self {
            TerminationReason::Landed => "landed",
            TerminationReason::Escaped => "escaped",
            TerminationReason::OutOfBounds => "out of bounds",
        }
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check the three exit conditions against the rocket's position.
///
/// Ground contact wins when several hold at once; a rocket cannot both
/// land and escape on the same step, but it can cross `y <= 0` outside
/// the corridor, and that still counts as a landing (the touchdown
/// bonus, not this check, is what punishes the miss).
pub fn check_termination(rocket: &Rocket, spawn_height: f64) -> Option<TerminationReason> {
    if rocket.position_y() <= 0.0 {
        Some(TerminationReason::Landed)
    } else if rocket.position_y() > 2.0 * spawn_height {
        Some(TerminationReason::Escaped)
    } else if rocket.position_x().abs() > LATERAL_BOUND {
        Some(TerminationReason::OutOfBounds)
    } else {
        None
    }
}
