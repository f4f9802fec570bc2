//! Work-group dispatch of the kernel over a whole image.
//!
//! The framebuffer is split into `group_size` slices that rayon renders
//! independently. Slots are disjoint, so no locking is needed.

use std::time::Instant;

use crate::buffers::{CameraBuffer, SceneBuffer};
use crate::kernel::{unpack_rgb, Kernel};
use crate::{CameraConfig, RenderConfig, RenderResult, Scene, SceneError};
use log::{debug, info};
use rayon::prelude::*;

/// Packed `0x00RRGGBB` pixels, indexed `x + y * width`.
///
/// Row 0 is the bottom of the viewport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

impl Framebuffer {
    /// Create a new framebuffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    /// Get the packed pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> u32 {
        self.pixels[x as usize + y as usize * self.width as usize]
    }

    /// Get the pixel at (x, y) as `[r, g, b]`.
    pub fn rgb8(&self, x: u32, y: u32) -> [u8; 3] {
        unpack_rgb(self.get(x, y))
    }

    /// Raw bytes of the pixel array, native endianness.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

/// Number of work groups covering `pixel_count` invocations.
pub fn group_count(pixel_count: usize, group_size: u32) -> usize {
    pixel_count.div_ceil(group_size as usize)
}

/// Check every precondition the kernel relies on.
pub fn validate_inputs(
    scene: &Scene,
    camera: &CameraConfig,
    config: &RenderConfig,
) -> Result<(), SceneError> {
    scene.validate()?;
    camera.validate()?;
    config.validate()
}

/// Render the full image in parallel.
pub fn render(
    scene: &Scene,
    camera: &CameraConfig,
    config: &RenderConfig,
) -> RenderResult<Framebuffer> {
    validate_inputs(scene, camera, config)?;

    let kernel = Kernel::new(scene, camera, config);
    let group_size = config.group_size as usize;
    debug!(
        "Dispatching {} groups of {} for {}x{} ({} spheres, {} spp, {} bounces)",
        group_count(scene.pixel_count(), config.group_size),
        group_size,
        scene.width,
        scene.height,
        scene.spheres.len(),
        config.samples_per_pixel,
        config.max_bounces,
    );

    let start = Instant::now();
    let mut framebuffer = Framebuffer::new(scene.width, scene.height);
    framebuffer
        .pixels
        .par_chunks_mut(group_size)
        .enumerate()
        .for_each(|(group, slots)| run_group(&kernel, group, group_size, slots));

    info!(
        "Rendered {}x{} in {:.2?}",
        scene.width,
        scene.height,
        start.elapsed()
    );
    Ok(framebuffer)
}

/// Single-threaded render; bit-identical to [`render`].
pub fn render_sequential(
    scene: &Scene,
    camera: &CameraConfig,
    config: &RenderConfig,
) -> RenderResult<Framebuffer> {
    validate_inputs(scene, camera, config)?;

    let kernel = Kernel::new(scene, camera, config);
    let group_size = config.group_size as usize;
    let mut framebuffer = Framebuffer::new(scene.width, scene.height);
    for (group, slots) in framebuffer.pixels.chunks_mut(group_size).enumerate() {
        run_group(&kernel, group, group_size, slots);
    }
    Ok(framebuffer)
}

/// Render from the fixed wire layouts, as uploaded by a host.
pub fn render_from_buffers(
    scene_bytes: &[u8],
    camera_bytes: &[u8],
    config: &RenderConfig,
) -> RenderResult<Framebuffer> {
    let scene = SceneBuffer::decode(scene_bytes)?.to_scene();
    let camera = CameraConfig::from(CameraBuffer::decode(camera_bytes)?);
    render(&scene, &camera, config)
}

/// Offer every invocation id of one work group to the kernel.
///
/// The last group may be cut short by the end of the framebuffer; its
/// trailing ids are out of range and the kernel skips them.
fn run_group(kernel: &Kernel<'_>, group: usize, group_size: usize, slots: &mut [u32]) {
    let base = group * group_size;
    for local in 0..group_size {
        if let Some(write) = kernel.invoke(base + local) {
            slots[write.index - base] = write.color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrator::ray_color;
    use crate::kernel::{pack_rgb, resolve_color};
    use crate::{BufferError, Camera, Hittable, RenderError, SampleKey, Sphere};
    use glint_math::Vec3;

    fn spec_scene() -> Scene {
        Scene::new(vec![Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5)], 2, 2)
    }

    fn single_sample(max_bounces: u32) -> RenderConfig {
        RenderConfig {
            samples_per_pixel: 1,
            max_bounces,
            ..RenderConfig::default()
        }
    }

    #[test]
    fn test_group_count() {
        assert_eq!(group_count(4, 48), 1);
        assert_eq!(group_count(96, 48), 2);
        assert_eq!(group_count(97, 48), 3);
        assert_eq!(group_count(480_000, 48), 10_000);
    }

    #[test]
    fn test_two_by_two_scene() {
        let scene = spec_scene();
        let camera = CameraConfig::default();
        let config = single_sample(1);

        let image = render(&scene, &camera, &config).expect("valid render");
        assert_eq!(image.pixels.len(), 4);

        // Every corner sample looks past the sphere and sees only sky
        let view = Camera::new(&camera, 2, 2, 1);
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            let jitter = SampleKey::new(x, y, 0).jitter();
            let ray = view.get_ray(x as f32 + jitter.x, y as f32 + jitter.y);
            assert!(scene.spheres.as_slice().hit(&ray, config.ray_range()).is_none());

            let sky = config.sky.color(ray.direction);
            assert_eq!(image.get(x, y), pack_rgb(resolve_color(sky, 1)));
        }
        assert_ne!(image.get(0, 0), image.get(0, 1));

        // The center ray hits the mirror and, with one bounce, never sees the sky
        let mut ray = Camera::new(&camera, 2, 2, 1).get_ray(0.5, 0.5);
        let color = ray_color(&mut ray, scene.spheres.as_slice(), &config, SampleKey::new(0, 0, 0));
        assert_eq!(color, Vec3::ZERO);
        assert_eq!(ray.energy, Vec3::splat(0.6));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let scene = Scene::reference(37, 23);
        let camera = CameraConfig::default();
        let config = RenderConfig {
            samples_per_pixel: 3,
            ..RenderConfig::default()
        };

        let parallel = render(&scene, &camera, &config).expect("valid render");
        let sequential = render_sequential(&scene, &camera, &config).expect("valid render");
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_group_size_does_not_change_output() {
        let scene = Scene::reference(19, 11);
        let camera = CameraConfig::default();
        let base = RenderConfig {
            samples_per_pixel: 2,
            ..RenderConfig::default()
        };
        let expected = render(&scene, &camera, &base).expect("valid render");

        for group_size in [1, 3, 7, 64, 1000] {
            let config = RenderConfig {
                group_size,
                ..base.clone()
            };
            let image = render(&scene, &camera, &config).expect("valid render");
            assert_eq!(image, expected, "group_size {group_size}");
        }
    }

    #[test]
    fn test_render_deterministic() {
        let scene = Scene::reference(24, 16);
        let camera = CameraConfig::default();
        let config = RenderConfig::default();

        let a = render(&scene, &camera, &config).expect("valid render");
        let b = render(&scene, &camera, &config).expect("valid render");
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_pixel_written() {
        // No pixel of an open sky render can stay black
        let scene = Scene::new(Vec::new(), 13, 7);
        let image = render(&scene, &CameraConfig::default(), &RenderConfig::default())
            .expect("valid render");
        assert!(image.pixels.iter().all(|&p| p != 0));
    }

    #[test]
    fn test_render_rejects_invalid_input() {
        let scene = Scene::reference(1, 1);
        let result = render(&scene, &CameraConfig::default(), &RenderConfig::default());
        assert_eq!(
            result,
            Err(RenderError::Scene(SceneError::ImageTooSmall { width: 1, height: 1 }))
        );
    }

    #[test]
    fn test_render_from_buffers() {
        let scene = Scene::reference(16, 8);
        let camera = CameraConfig::default();
        let config = RenderConfig {
            samples_per_pixel: 2,
            ..RenderConfig::default()
        };
        let scene_buffer = SceneBuffer::try_from(&scene).expect("ten spheres");
        let camera_buffer = CameraBuffer::from(&camera);

        let from_buffers =
            render_from_buffers(scene_buffer.as_bytes(), camera_buffer.as_bytes(), &config)
                .expect("valid buffers");
        let direct = render(&scene, &camera, &config).expect("valid render");
        assert_eq!(from_buffers, direct);
    }

    #[test]
    fn test_render_from_short_buffer() {
        let result = render_from_buffers(&[0u8; 12], &[0u8; 20], &RenderConfig::default());
        assert!(matches!(
            result,
            Err(RenderError::Buffer(BufferError::SizeMismatch { name: "scene", .. }))
        ));
    }

    #[test]
    fn test_framebuffer_access() {
        let mut image = Framebuffer::new(3, 2);
        image.pixels[4] = 0x00112233;

        assert_eq!(image.get(1, 1), 0x00112233);
        assert_eq!(image.rgb8(1, 1), [0x11, 0x22, 0x33]);
        assert_eq!(image.as_bytes().len(), 24);
    }
}
