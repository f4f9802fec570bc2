//! Render configuration and JSON job files.
//!
//! Every constant of the bounce loop is host-settable; defaults reproduce
//! the reference render.

use std::path::Path;

use crate::{CameraConfig, Color, ConfigError, Scene, SceneError, SkyGradient};
use glint_math::Interval;
use serde::{Deserialize, Serialize};

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Fixed bounce budget per sample
    pub max_bounces: u32,
    /// Per-channel energy kept at each mirror bounce
    pub reflectance: Color,
    /// Perturbation of mirror directions (0 is a perfect mirror)
    pub fuzz: f32,
    /// Offset along the normal for bounce origins
    pub surface_epsilon: f32,
    /// Background for escaping rays
    pub sky: SkyGradient,
    /// Lower bound of accepted hit distances
    pub t_min: f32,
    /// Upper bound of accepted hit distances
    pub t_max: f32,
    /// Invocations per work group
    pub group_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 10,
            max_bounces: 3,
            reflectance: Color::splat(0.6),
            fuzz: 0.0,
            surface_epsilon: 0.001,
            sky: SkyGradient::default(),
            t_min: 0.0,
            t_max: 1000.0,
            group_size: 48,
        }
    }
}

impl RenderConfig {
    /// Accepted hit distance range.
    pub fn ray_range(&self) -> Interval {
        Interval::new(self.t_min, self.t_max)
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        if self.samples_per_pixel == 0 {
            return Err(SceneError::NoSamples);
        }
        if self.group_size == 0 {
            return Err(SceneError::EmptyWorkGroup);
        }
        let unit = Interval::new(0.0, 1.0);
        if !self.reflectance.to_array().iter().all(|&c| unit.contains(c)) {
            return Err(SceneError::InvalidReflectance(self.reflectance.to_array()));
        }
        if !(self.fuzz.is_finite() && self.fuzz >= 0.0) {
            return Err(SceneError::InvalidFuzz(self.fuzz));
        }
        if !(self.surface_epsilon.is_finite() && self.surface_epsilon >= 0.0) {
            return Err(SceneError::InvalidEpsilon(self.surface_epsilon));
        }
        if self.ray_range().is_empty() || self.t_min.is_nan() || self.t_max.is_nan() {
            return Err(SceneError::InvalidRayRange {
                min: self.t_min,
                max: self.t_max,
            });
        }
        Ok(())
    }
}

/// Everything needed for one full-image render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderJob {
    pub scene: Scene,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

impl RenderJob {
    pub fn new(scene: Scene, camera: CameraConfig, render: RenderConfig) -> Self {
        Self {
            scene,
            camera,
            render,
        }
    }

    /// Parse a job from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a JSON job file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate scene, camera, and render settings.
    pub fn validate(&self) -> Result<(), SceneError> {
        self.scene.validate()?;
        self.camera.validate()?;
        self.render.validate()
    }
}
