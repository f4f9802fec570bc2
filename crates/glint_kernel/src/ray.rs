//! Ray type for the bounce loop.
//!
//! Besides origin and direction, a ray carries the per-channel energy it
//! still has left after the reflections it went through.

use glint_math::Vec3;

/// A ray with position, direction, and carried energy.
///
/// Owned by exactly one in-flight path and mutated in place bounce by bounce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Origin point of the ray
    pub position: Vec3,
    /// Direction vector (not necessarily normalized)
    pub direction: Vec3,
    /// Remaining light-carrying capacity, per channel
    pub energy: Vec3,
}

impl Ray {
    /// Create a new ray with full energy.
    #[inline]
    pub fn new(position: Vec3, direction: Vec3) -> Self {
        Self {
            position,
            direction,
            energy: Vec3::ONE,
        }
    }

    /// Compute a point along the ray at parameter t.
    /// P(t) = position + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.position + t * self.direction
    }

    /// True once every energy channel has reached exactly zero.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.energy == Vec3::ZERO
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::NEG_Z)
    }
}
