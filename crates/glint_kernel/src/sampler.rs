//! Positional pseudo-random sampling.
//!
//! Every value is a pure function of a 2D key derived from pixel coordinates
//! and sample index, so workers need no shared seed or mutable state. The
//! hash is `fract(sin(dot(key, (12.9898, 78.233))) * 43758.5453)`: cheap and
//! reproducible, not statistically rigorous. Rendered noise patterns depend
//! on this exact function, so don't swap it for a stream PRNG.

use glint_math::{fract, Vec2, Vec3};

const HASH_DIRECTION: Vec2 = Vec2::new(12.9898, 78.233);
const HASH_SCALE: f32 = 43758.5453;

/// Rejection draws before falling back to a rescaled sample.
pub const MAX_REJECTION_ATTEMPTS: u32 = 8;

/// Length of the fallback sample, just inside the unit ball.
const FALLBACK_RADIUS: f32 = 0.999;

/// Hash a 2D key to a value in `[0, 1)`.
#[inline]
pub fn hash(key: Vec2) -> f32 {
    let value = fract(key.dot(HASH_DIRECTION).sin() * HASH_SCALE);
    // x - floor(x) rounds up to 1.0 for tiny negative x
    if value < 1.0 {
        value
    } else {
        0.0
    }
}

/// Three hashes of independently scaled copies of `key`, each in `[0, 1)`.
#[inline]
pub fn hash3(key: Vec2) -> Vec3 {
    Vec3::new(hash(key), hash(key * 2.0), hash(key * 3.0))
}

/// [`hash3`] rescaled to `[min, max)` per component.
#[inline]
pub fn hash3_range(key: Vec2, min: f32, max: f32) -> Vec3 {
    hash3(key) * (max - min) + Vec3::splat(min)
}

/// Point inside the unit ball, keyed by `key`.
///
/// Rejection samples the `[-1, 1)` cube, varying the key per attempt. After
/// [`MAX_REJECTION_ATTEMPTS`] misses the last draw is rescaled to just
/// inside the ball, so the loop always terminates.
pub fn random_in_unit_sphere(key: Vec2) -> Vec3 {
    sample_unit_ball(|attempt| hash3_range(key + Vec2::splat(attempt as f32), -1.0, 1.0))
}

fn sample_unit_ball(mut draw: impl FnMut(u32) -> Vec3) -> Vec3 {
    let mut p = Vec3::ZERO;
    for attempt in 0..MAX_REJECTION_ATTEMPTS {
        p = draw(attempt);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
    p.normalize_or_zero() * FALLBACK_RADIUS
}

/// Identity of one sample of one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleKey {
    pub x: u32,
    pub y: u32,
    pub sample: u32,
}

impl SampleKey {
    pub fn new(x: u32, y: u32, sample: u32) -> Self {
        Self { x, y, sample }
    }

    /// Sub-pixel jitter in `[0, 1)²`, keyed by `(x*i, x)` and `(y, y*i)`.
    pub fn jitter(&self) -> Vec2 {
        let x = self.x as f32;
        let y = self.y as f32;
        let i = self.sample as f32;
        Vec2::new(hash(Vec2::new(x * i, x)), hash(Vec2::new(y, y * i)))
    }

    /// Key for scattering decisions at a given bounce of this sample.
    pub fn bounce(&self, bounce: u32) -> Vec2 {
        Vec2::new(
            (self.x + 1) as f32 * (self.sample + 1) as f32,
            (self.y + 1) as f32 * (bounce + 1) as f32,
        )
    }
}
