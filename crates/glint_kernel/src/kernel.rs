//! Per-pixel kernel driver.
//!
//! Maps a flat invocation id to a pixel, runs the multi-sample bounce loop
//! for it, and resolves the result to a packed `0x00RRGGBB` value. Each
//! invocation owns exactly one framebuffer slot.

use crate::integrator::ray_color;
use crate::sampler::SampleKey;
use crate::{Camera, CameraConfig, Color, RenderConfig, Scene};
use glint_math::Interval;

/// Channel range kept before 8-bit quantization; the headroom below 1.0
/// keeps `channel * 255` from rounding up to 256.
pub const OUTPUT_RANGE: Interval = Interval::new(0.0, 0.999);

/// A single framebuffer write produced by one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelWrite {
    /// Framebuffer index, `x + y * width`
    pub index: usize,
    /// Packed `0x00RRGGBB` color
    pub color: u32,
}

/// Read-only view of the inputs shared by every invocation of a render.
#[derive(Debug, Clone, Copy)]
pub struct Kernel<'a> {
    scene: &'a Scene,
    camera: &'a CameraConfig,
    config: &'a RenderConfig,
}

impl<'a> Kernel<'a> {
    /// Inputs are expected to be validated already; debug builds check.
    pub fn new(scene: &'a Scene, camera: &'a CameraConfig, config: &'a RenderConfig) -> Self {
        debug_assert!(scene.validate().is_ok(), "invalid scene: {:?}", scene.validate());
        debug_assert!(camera.validate().is_ok(), "invalid camera: {:?}", camera.validate());
        debug_assert!(config.validate().is_ok(), "invalid config: {:?}", config.validate());
        Self {
            scene,
            camera,
            config,
        }
    }

    /// Run invocation `id`.
    ///
    /// Ids past the last pixel come from rounding the dispatch up to whole
    /// work groups; they produce no write.
    pub fn invoke(&self, id: usize) -> Option<PixelWrite> {
        if id >= self.scene.pixel_count() {
            return None;
        }

        let width = self.scene.width as usize;
        let x = (id % width) as u32;
        let y = (id / width) as u32;

        Some(PixelWrite {
            index: x as usize + y as usize * width,
            color: self.render_pixel(x, y),
        })
    }

    /// Packed color of pixel `(x, y)`; `y = 0` is the bottom row of the viewport.
    pub fn render_pixel(&self, x: u32, y: u32) -> u32 {
        let scene = self.scene;
        let camera = Camera::new(
            self.camera,
            scene.width,
            scene.height,
            self.config.samples_per_pixel,
        );
        let max_u = (scene.width - 1) as f32;
        let max_v = (scene.height - 1) as f32;

        let mut color = Color::ZERO;
        for i in 0..camera.num_samples {
            let key = SampleKey::new(x, y, i);
            let jitter = key.jitter();
            let u = (x as f32 + jitter.x) / max_u;
            let v = (y as f32 + jitter.y) / max_v;

            let mut ray = camera.get_ray(u, v);
            color += ray_color(&mut ray, scene.spheres.as_slice(), self.config, key);
        }

        pack_rgb(resolve_color(color, camera.num_samples))
    }
}

/// Average a sample sum and clamp every channel to [`OUTPUT_RANGE`].
///
/// No gamma curve is applied.
pub fn resolve_color(sum: Color, num_samples: u32) -> Color {
    let scale = 1.0 / num_samples as f32;
    let color = sum * scale;
    Color::new(
        OUTPUT_RANGE.clamp(color.x),
        OUTPUT_RANGE.clamp(color.y),
        OUTPUT_RANGE.clamp(color.z),
    )
}

/// Pack a resolved color as `(r << 16) | (g << 8) | b`, truncating each
/// channel times 255.
#[inline]
pub fn pack_rgb(color: Color) -> u32 {
    let r = (color.x * 255.0) as u32;
    let g = (color.y * 255.0) as u32;
    let b = (color.z * 255.0) as u32;
    (r << 16) | (g << 8) | b
}

/// Split a packed color back into `[r, g, b]`.
#[inline]
pub fn unpack_rgb(packed: u32) -> [u8; 3] {
    [(packed >> 16) as u8, (packed >> 8) as u8, packed as u8]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sphere;
    use glint_math::Vec3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn one_sphere_scene(width: u32, height: u32) -> Scene {
        Scene::new(vec![Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5)], width, height)
    }

    fn single_sample(max_bounces: u32) -> RenderConfig {
        RenderConfig {
            samples_per_pixel: 1,
            max_bounces,
            ..RenderConfig::default()
        }
    }

    #[test]
    fn test_pack_rgb_layout() {
        assert_eq!(pack_rgb(Color::ZERO), 0);
        assert_eq!(pack_rgb(Color::new(0.999, 0.0, 0.0)), 254 << 16);
        assert_eq!(pack_rgb(Color::new(0.0, 0.5, 0.0)), 127 << 8);
        assert_eq!(pack_rgb(Color::new(0.0, 0.0, 0.2)), 51);
        assert_eq!(unpack_rgb(0x00fe7f33), [0xfe, 0x7f, 0x33]);
    }

    #[test]
    fn test_pack_unpack_matches_floor() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10_000 {
            let color = Color::new(
                rng.gen_range(0.0..=0.999),
                rng.gen_range(0.0..=0.999),
                rng.gen_range(0.0..=0.999),
            );
            let expected = [
                (color.x * 255.0).floor() as u8,
                (color.y * 255.0).floor() as u8,
                (color.z * 255.0).floor() as u8,
            ];
            assert_eq!(unpack_rgb(pack_rgb(color)), expected);
        }
    }

    #[test]
    fn test_resolve_color_averages_and_clamps() {
        let resolved = resolve_color(Color::new(5.0, 20.0, -3.0), 10);
        assert_eq!(resolved, Color::new(0.5, 0.999, 0.0));
    }

    #[test]
    fn test_invoke_maps_id_to_pixel() {
        let scene = one_sphere_scene(4, 3);
        let camera = CameraConfig::default();
        let config = single_sample(3);
        let kernel = Kernel::new(&scene, &camera, &config);

        let write = kernel.invoke(6).expect("in range");
        assert_eq!(write.index, 6);
        assert_eq!(write.color, kernel.render_pixel(2, 1));
    }

    #[test]
    fn test_invoke_skips_out_of_range_ids() {
        let scene = one_sphere_scene(2, 2);
        let camera = CameraConfig::default();
        let config = single_sample(3);
        let kernel = Kernel::new(&scene, &camera, &config);

        assert!(kernel.invoke(3).is_some());
        assert!(kernel.invoke(4).is_none());
        assert!(kernel.invoke(47).is_none());
    }

    #[test]
    fn test_corner_pixel_is_exact_sky() {
        // Sample 0 of pixel (0, 0) has zero jitter: u = v = 0
        let scene = one_sphere_scene(2, 2);
        let camera = CameraConfig::default();
        let config = single_sample(1);
        let kernel = Kernel::new(&scene, &camera, &config);

        let direction = Vec3::new(-1.0, -1.0, -1.0);
        let expected = pack_rgb(resolve_color(config.sky.color(direction), 1));
        assert_eq!(kernel.render_pixel(0, 0), expected);
    }

    #[test]
    fn test_center_pixel_hits_sphere() {
        let scene = one_sphere_scene(33, 33);
        let camera = CameraConfig::default();

        // With a single bounce the mirror never reaches the sky
        let config = single_sample(1);
        let kernel = Kernel::new(&scene, &camera, &config);
        assert_eq!(kernel.render_pixel(16, 16), 0);

        // With the default budget it shows the attenuated sky behind the camera
        let config = RenderConfig::default();
        let kernel = Kernel::new(&scene, &camera, &config);
        let [r, g, b] = unpack_rgb(kernel.render_pixel(16, 16));
        let sky = unpack_rgb(kernel.render_pixel(0, 0));
        assert!(r < sky[0] && g < sky[1] && b < sky[2]);
        assert!(r > 0 && g > 0 && b > 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "invalid scene")]
    fn test_kernel_rejects_single_column_image() {
        // One column would divide the viewport coordinate by zero
        let scene = one_sphere_scene(1, 4);
        let camera = CameraConfig::default();
        let config = single_sample(1);
        let _ = Kernel::new(&scene, &camera, &config);
    }

    #[test]
    fn test_render_pixel_deterministic() {
        let scene = Scene::reference(64, 48);
        let camera = CameraConfig::default();
        let config = RenderConfig::default();
        let kernel = Kernel::new(&scene, &camera, &config);

        for (x, y) in [(0, 0), (31, 23), (40, 10), (63, 47)] {
            assert_eq!(kernel.render_pixel(x, y), kernel.render_pixel(x, y));
        }
    }
}
