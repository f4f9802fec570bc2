//! Fixed-budget bounce loop for a single camera ray.

use crate::sampler::SampleKey;
use crate::shading::shade;
use crate::{Color, Hittable, Ray, RenderConfig};

/// Compute the color carried back along `ray`.
///
/// Runs at most `config.max_bounces` bounces. Each bounce's contribution
/// is weighted by the energy the ray carried *into* that bounce, so a path
/// that escapes after `k` mirror hits returns `reflectance^k * sky`. The
/// loop stops early once the energy is exactly zero; a path still bouncing
/// when the budget runs out keeps only what it already accumulated.
pub fn ray_color<W: Hittable + ?Sized>(
    ray: &mut Ray,
    world: &W,
    config: &RenderConfig,
    key: SampleKey,
) -> Color {
    let ray_t = config.ray_range();
    let mut result = Color::ZERO;

    for bounce in 0..config.max_bounces {
        let hit = world.hit(ray, ray_t);
        let energy_in = ray.energy;
        result += energy_in * shade(ray, hit.as_ref(), config, key.bounce(bounce));

        if ray.is_exhausted() {
            break;
        }
    }

    result
}
