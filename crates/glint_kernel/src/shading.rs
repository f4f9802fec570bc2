//! Bounce shading: mirror reflection on hits, sky gradient on misses.
//!
//! Every sphere shares one uniform mirror surface. A hit contributes no
//! light of its own; all visible color comes from the sky a path escapes to.

use crate::sampler::random_in_unit_sphere;
use crate::{HitRecord, Ray, RenderConfig};
use glint_math::{reflect, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Background seen by rays that escape the scene.
///
/// Blends linearly from `bottom` (straight down) to `top` (straight up).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyGradient {
    pub bottom: Color,
    pub top: Color,
}

impl SkyGradient {
    /// Sky color for a (not necessarily normalized) direction.
    pub fn color(&self, direction: Vec3) -> Color {
        let unit_direction = direction.normalize();
        let t = 0.5 * (unit_direction.y + 1.0);
        (1.0 - t) * self.bottom + t * self.top
    }
}

impl Default for SkyGradient {
    fn default() -> Self {
        Self {
            bottom: Color::new(1.0, 1.0, 1.0),
            top: Color::new(0.5, 0.7, 1.0),
        }
    }
}

/// Shade one bounce, mutating `ray` for the next one.
///
/// On a hit the ray restarts just off the surface along the mirrored
/// direction and its energy is attenuated by the reflectance; the returned
/// contribution is black. On a miss the energy is zeroed and the sky color
/// for the current direction is returned.
///
/// `key` only matters when `config.fuzz > 0`.
pub fn shade(ray: &mut Ray, hit: Option<&HitRecord>, config: &RenderConfig, key: Vec2) -> Color {
    let Some(rec) = hit else {
        ray.energy = Vec3::ZERO;
        return config.sky.color(ray.direction);
    };

    let mut direction = reflect(ray.direction, rec.normal);
    if config.fuzz > 0.0 {
        direction = direction.normalize() + config.fuzz * random_in_unit_sphere(key);
        if direction.dot(rec.normal) <= 0.0 {
            // Fuzzed below the surface: absorbed
            ray.energy = Vec3::ZERO;
            return Color::ZERO;
        }
    }

    ray.position = rec.point + rec.normal * config.surface_epsilon;
    ray.direction = direction;
    ray.energy *= config.reflectance;
    Color::ZERO
}
