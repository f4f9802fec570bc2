//! Pinhole camera for ray generation.
//!
//! The forward axis is fixed to `-Z`; there is no rotation or tilt.

use crate::{Ray, SceneError};
use glint_math::Vec3;
use serde::{Deserialize, Serialize};

/// Host-supplied camera parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// World-space eye position
    pub position: Vec3,
    /// Height of the viewport plane (vertical field-of-view proxy)
    pub viewport_height: f32,
    /// Distance from the eye to the viewport plane
    pub focal_length: f32,
}

impl CameraConfig {
    /// Check that the viewport is non-degenerate.
    pub fn validate(&self) -> Result<(), SceneError> {
        for (field, value) in [
            ("viewport_height", self.viewport_height),
            ("focal_length", self.focal_length),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SceneError::InvalidCamera { field, value });
            }
        }
        Ok(())
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            viewport_height: 2.0,
            focal_length: 1.0,
        }
    }
}

/// View frustum derived from [`CameraConfig`] and the image size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub origin: Vec3,
    pub lower_left_corner: Vec3,
    pub horizontal: Vec3,
    pub vertical: Vec3,
    pub num_samples: u32,
}

impl Camera {
    /// Derive the frustum. Pure function of its inputs.
    pub fn new(config: &CameraConfig, width: u32, height: u32, num_samples: u32) -> Self {
        let aspect_ratio = width as f32 / height as f32;
        let viewport_width = aspect_ratio * config.viewport_height;

        let origin = config.position;
        let horizontal = Vec3::new(viewport_width, 0.0, 0.0);
        let vertical = Vec3::new(0.0, config.viewport_height, 0.0);
        let lower_left_corner = origin
            - horizontal / 2.0
            - vertical / 2.0
            - Vec3::new(0.0, 0.0, config.focal_length);

        Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            num_samples,
        }
    }

    /// Ray through normalized screen coordinates `(u, v)`, `(0, 0)` being
    /// the lower-left corner of the viewport.
    pub fn get_ray(&self, u: f32, v: f32) -> Ray {
        let direction =
            self.lower_left_corner + u * self.horizontal + v * self.vertical - self.origin;
        Ray::new(self.origin, direction)
    }
}
