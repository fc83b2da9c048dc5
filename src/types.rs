//! Type-level encoding of the geometric invariant at the heart of the
//! simulation: every direction is a unit vector.
//!
//! `UnitVec2` guarantees x^2 + y^2 = 1 after construction and after
//! every rotation. Both the rocket body axis and the TVC nozzle axis
//! are `UnitVec2`s; forces are produced by scaling one of them, never
//! by storing a non-unit direction.
//!
//! One angular convention holds crate-wide: positive angles run from
//! the vertical (+y) toward +x. Tilt angles, nozzle deflections,
//! angular velocity, and `rotate_around_z` all share this sense, so a
//! positive rotation increases a positive tilt.

use crate::error::{LanderError, Result};

/// Norm threshold below which a vector is treated as zero-length.
const ZERO_NORM_SQ: f64 = 1e-24;

/// A 2D direction with unit norm.
///
/// Invariant: x^2 + y^2 = 1 (within 1e-9 after arbitrarily long
/// rotation sequences; renormalized on every mutation).
///
/// Represents a direction only, never a point. Each physical entity
/// (rocket body, nozzle) embeds its own copy; directions are not
/// shared.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitVec2 {
    x: f64,
    y: f64,
}

impl UnitVec2 {
    /// Create a unit vector, normalizing the input.
    ///
    /// A zero-length input falls back to [`UnitVec2::up`], the
    /// documented default direction, so no NaN can enter the
    /// integrator. Use [`UnitVec2::try_new`] where a zero input must
    /// be rejected instead.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        let norm_sq = x * x + y * y;
        if norm_sq < ZERO_NORM_SQ {
            return Self::up();
        }
        let inv_norm = 1.0 / norm_sq.sqrt();
        Self {
            x: x * inv_norm,
            y: y * inv_norm,
        }
    }

    /// Create a unit vector, failing on zero-length input.
    pub fn try_new(x: f64, y: f64) -> Result<Self> {
        let norm_sq = x * x + y * y;
        if norm_sq < ZERO_NORM_SQ {
            return Err(LanderError::NumericDegeneracy(format!(
                "cannot normalize zero-length vector ({x}, {y})"
            )));
        }
        Ok(Self::new(x, y))
    }

    /// Direction with components `(cos(angle), sin(angle))`, i.e. the
    /// spawn-attitude parameterization: `from_angle(PI/2)` is straight
    /// up, `PI/4` leans 45 degrees toward +x, `3*PI/4` leans 45
    /// degrees toward -x.
    #[inline]
    pub fn from_angle(angle: f64) -> Self {
        // cos/sin of a finite angle are already unit-norm.
        Self {
            x: angle.cos(),
            y: angle.sin(),
        }
    }

    /// The default direction: straight up, `(0, 1)`.
    #[inline]
    pub const fn up() -> Self {
        Self { x: 0.0, y: 1.0 }
    }

    /// X component.
    #[inline(always)]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y component.
    #[inline(always)]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Rotate by `angle` radians in the tilt sense (positive from +y
    /// toward +x), then renormalize. `rotate_around_z(PI/2)` turns
    /// [`UnitVec2::up`] into `(1, 0)`.
    ///
    /// Any real angle is valid; it wraps naturally through sin/cos.
    /// Renormalization keeps drift below 1e-9 over arbitrarily long
    /// rotation sequences.
    pub fn rotate_around_z(&mut self, angle: f64) {
        let (sin, cos) = angle.sin_cos();
        let x = self.x * cos + self.y * sin;
        let y = self.y * cos - self.x * sin;
        // A rotation of an already-unit vector cannot reach zero norm.
        let inv_norm = 1.0 / (x * x + y * y).sqrt();
        self.x = x * inv_norm;
        self.y = y * inv_norm;
    }

    /// The projection of this direction onto `other` (dot product).
    ///
    /// With both vectors unit length this is the cosine of the angle
    /// between them, used to decompose a scalar thrust magnitude into
    /// axis-aligned force components.
    #[inline]
    pub fn component_along(&self, other: &UnitVec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// This direction rotated by +90 degrees: `(x, y) -> (y, -x)`.
    ///
    /// Derives the "sideways" torque-producing axis from the rocket's
    /// "along" body axis; for an upright body the side axis points
    /// toward +x.
    #[inline]
    pub fn perpendicular(&self) -> UnitVec2 {
        Self {
            x: self.y,
            y: -self.x,
        }
    }

    /// Signed angle between this direction and the vertical (+y) axis.
    ///
    /// Positive when leaning toward +x. Total on the whole unit circle
    /// (atan2), so a horizontal direction gives exactly ±PI/2 and an
    /// inverted one ±PI; no division by y happens anywhere.
    #[inline]
    pub fn angle_from_vertical(&self) -> f64 {
        self.x.atan2(self.y)
    }

    /// Squared norm; ~1.0 by construction, exposed for invariant checks.
    #[inline]
    pub fn norm_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }
}

impl Default for UnitVec2 {
    fn default() -> Self {
        Self::up()
    }
}
