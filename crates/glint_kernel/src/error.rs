//! Error types for host-side validation, wire buffers, and job files.
//!
//! The per-pixel kernel itself never fails; everything here is reported
//! before a dispatch starts.

use thiserror::Error;

/// Precondition violations in scene, camera, or render configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("sphere {index} has invalid radius {radius} (must be finite and > 0)")]
    InvalidRadius { index: usize, radius: f32 },

    #[error("sphere {index} has a non-finite center")]
    InvalidCenter { index: usize },

    #[error("image must be at least 2x2 pixels, got {width}x{height}")]
    ImageTooSmall { width: u32, height: u32 },

    #[error("image of {width}x{height} pixels exceeds the addressable invocation range")]
    ImageTooLarge { width: u32, height: u32 },

    #[error("samples_per_pixel must be at least 1")]
    NoSamples,

    #[error("group_size must be at least 1")]
    EmptyWorkGroup,

    #[error("reflectance channels must lie in [0, 1], got {0:?}")]
    InvalidReflectance([f32; 3]),

    #[error("fuzz must be finite and >= 0, got {0}")]
    InvalidFuzz(f32),

    #[error("surface_epsilon must be finite and >= 0, got {0}")]
    InvalidEpsilon(f32),

    #[error("invalid ray range [{min}, {max}]")]
    InvalidRayRange { min: f32, max: f32 },

    #[error("camera {field} must be finite and > 0, got {value}")]
    InvalidCamera { field: &'static str, value: f32 },
}

/// Errors converting to and from the fixed wire layouts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BufferError {
    #[error("{name} buffer has {actual} bytes, expected {expected}")]
    SizeMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("scene buffer holds exactly {expected} spheres, scene has {actual}")]
    SphereCount { expected: usize, actual: usize },
}

/// Errors loading a render job file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors surfaced by a full-image render.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Invalid render input: {0}")]
    Scene(#[from] SceneError),

    #[error("Invalid wire buffer: {0}")]
    Buffer(#[from] BufferError),
}

pub type RenderResult<T> = Result<T, RenderError>;
