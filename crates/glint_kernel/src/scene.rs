//! Scene description: the sphere list and the output image size.

use crate::{SceneError, Sphere};
use glint_math::Vec3;
use serde::{Deserialize, Serialize};

/// Sphere count of the reference scene and of the fixed wire layout.
pub const REFERENCE_SPHERE_COUNT: usize = 10;

/// Read-only scene input shared by every worker of a render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Spheres in tie-break order
    pub spheres: Vec<Sphere>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl Scene {
    pub fn new(spheres: Vec<Sphere>, width: u32, height: u32) -> Self {
        Self {
            spheres,
            width,
            height,
        }
    }

    /// Ten spheres of radius 0.5 lined up along `-Z`, 1.5 apart, the
    /// nearest centered at `z = -1`.
    pub fn reference(width: u32, height: u32) -> Self {
        let spheres = (0..REFERENCE_SPHERE_COUNT)
            .map(|i| Sphere::new(Vec3::new(0.0, 0.0, -1.0 - i as f32 * 1.5), 0.5))
            .collect();
        Self::new(spheres, width, height)
    }

    /// Number of pixels (and of framebuffer slots).
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check the host-side preconditions of the kernel.
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.width < 2 || self.height < 2 {
            return Err(SceneError::ImageTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if self.width as u64 * self.height as u64 > u32::MAX as u64 {
            return Err(SceneError::ImageTooLarge {
                width: self.width,
                height: self.height,
            });
        }

        for (index, sphere) in self.spheres.iter().enumerate() {
            if !sphere.center.is_finite() {
                return Err(SceneError::InvalidCenter { index });
            }
            if !(sphere.radius.is_finite() && sphere.radius > 0.0) {
                return Err(SceneError::InvalidRadius {
                    index,
                    radius: sphere.radius,
                });
            }
        }

        Ok(())
    }
}
