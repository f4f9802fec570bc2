//! Glint kernel - per-pixel mirror-sphere ray tracing
//!
//! Traces one camera ray per sample through a small scene of mirror
//! spheres, bounces it a fixed number of times, and resolves escaping rays
//! to a sky gradient. Every pixel is an independent pure computation, so
//! the dispatcher can run them in any order or all at once.

mod ray;
mod hittable;
mod sphere;
mod camera;
mod scene;
mod config;
mod error;
pub mod sampler;
pub mod shading;
pub mod integrator;
pub mod kernel;
pub mod dispatch;
pub mod buffers;

pub use ray::Ray;
pub use hittable::{HitRecord, Hittable};
pub use sphere::Sphere;
pub use camera::{Camera, CameraConfig};
pub use scene::{Scene, REFERENCE_SPHERE_COUNT};
pub use config::{RenderConfig, RenderJob};
pub use error::{BufferError, ConfigError, RenderError, RenderResult, SceneError};
pub use sampler::SampleKey;
pub use shading::{shade, Color, SkyGradient};
pub use integrator::ray_color;
pub use kernel::{pack_rgb, resolve_color, unpack_rgb, Kernel, PixelWrite};
pub use dispatch::{render, render_from_buffers, render_sequential, Framebuffer};

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Interval, Vec2, Vec3};
