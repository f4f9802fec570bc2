// Re-export glam for convenience
pub use glam::*;

// Glint math helpers
mod interval;
pub use interval::Interval;

/// Fractional part in the GLSL sense: `x - floor(x)`.
///
/// Unlike [`f32::fract`], the result is never negative.
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// Mirror `direction` about the surface `normal`.
///
/// `normal` is expected to be unit length; the result is `d - 2 * dot(d, n) * n`.
#[inline]
pub fn reflect(direction: Vec3, normal: Vec3) -> Vec3 {
    direction - 2.0 * direction.dot(normal) * normal
}
