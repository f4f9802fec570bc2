//! Fixed wire layouts for host uploads.
//!
//! Plain `#[repr(C)]` records of 32-bit fields with no padding, so they can
//! be copied to and from raw bytes with bytemuck.

use std::mem::size_of;

use crate::{BufferError, CameraConfig, Scene, Sphere, REFERENCE_SPHERE_COUNT};
use bytemuck::{Pod, Zeroable};
use glint_math::Vec3;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SphereRecord {
    pub center: [f32; 3],
    pub radius: f32,
}

impl From<&Sphere> for SphereRecord {
    fn from(sphere: &Sphere) -> Self {
        Self {
            center: sphere.center.to_array(),
            radius: sphere.radius,
        }
    }
}

impl From<SphereRecord> for Sphere {
    fn from(record: SphereRecord) -> Self {
        Sphere::new(Vec3::from_array(record.center), record.radius)
    }
}

/// Scene buffer: exactly [`REFERENCE_SPHERE_COUNT`] spheres, then the image size.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SceneBuffer {
    pub spheres: [SphereRecord; REFERENCE_SPHERE_COUNT],
    pub width: u32,
    pub height: u32,
}

impl SceneBuffer {
    pub const SIZE: usize = size_of::<Self>();

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Copy a scene buffer out of `bytes`, which need not be aligned.
    pub fn decode(bytes: &[u8]) -> Result<Self, BufferError> {
        check_size("scene", Self::SIZE, bytes)?;
        Ok(bytemuck::pod_read_unaligned(bytes))
    }

    pub fn to_scene(&self) -> Scene {
        let spheres = self.spheres.iter().copied().map(Sphere::from).collect();
        Scene::new(spheres, self.width, self.height)
    }
}

impl TryFrom<&Scene> for SceneBuffer {
    type Error = BufferError;

    fn try_from(scene: &Scene) -> Result<Self, Self::Error> {
        if scene.spheres.len() != REFERENCE_SPHERE_COUNT {
            return Err(BufferError::SphereCount {
                expected: REFERENCE_SPHERE_COUNT,
                actual: scene.spheres.len(),
            });
        }

        let mut buffer = SceneBuffer::zeroed();
        for (record, sphere) in buffer.spheres.iter_mut().zip(&scene.spheres) {
            *record = SphereRecord::from(sphere);
        }
        buffer.width = scene.width;
        buffer.height = scene.height;
        Ok(buffer)
    }
}

/// Camera buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraBuffer {
    pub position: [f32; 3],
    pub viewport_height: f32,
    pub focal_length: f32,
}

impl CameraBuffer {
    pub const SIZE: usize = size_of::<Self>();

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Copy a camera buffer out of `bytes`, which need not be aligned.
    pub fn decode(bytes: &[u8]) -> Result<Self, BufferError> {
        check_size("camera", Self::SIZE, bytes)?;
        Ok(bytemuck::pod_read_unaligned(bytes))
    }
}

impl From<&CameraConfig> for CameraBuffer {
    fn from(config: &CameraConfig) -> Self {
        Self {
            position: config.position.to_array(),
            viewport_height: config.viewport_height,
            focal_length: config.focal_length,
        }
    }
}

impl From<CameraBuffer> for CameraConfig {
    fn from(buffer: CameraBuffer) -> Self {
        CameraConfig {
            position: Vec3::from_array(buffer.position),
            viewport_height: buffer.viewport_height,
            focal_length: buffer.focal_length,
        }
    }
}

fn check_size(name: &'static str, expected: usize, bytes: &[u8]) -> Result<(), BufferError> {
    if bytes.len() != expected {
        return Err(BufferError::SizeMismatch {
            name,
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}
