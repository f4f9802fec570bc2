use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glint_kernel::{CameraConfig, RenderConfig, RenderJob, Scene};
use log::LevelFilter;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(about = "Render a scene of mirror spheres under a sky gradient")]
pub struct Args {
    /// JSON render job (scene, camera, render settings); defaults to the reference scene
    #[arg(long)]
    pub job: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Bounce budget per sample
    #[arg(long, short = 'b')]
    pub bounces: Option<u32>,

    /// Invocations per work group
    #[arg(long)]
    pub group_size: Option<u32>,

    /// Mirror roughness (0 is a perfect mirror)
    #[arg(long)]
    pub fuzz: Option<f32>,

    /// Output PNG path
    #[arg(short, long, default_value = "glint.png")]
    pub output: PathBuf,

    /// Also write the packed framebuffer as raw native-endian u32 words
    #[arg(long)]
    pub raw: Option<PathBuf>,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

impl Args {
    /// Load the job file (or build the reference job) and apply overrides.
    pub fn render_job(&self) -> Result<RenderJob> {
        let mut job = match &self.job {
            Some(path) => RenderJob::load(path)
                .with_context(|| format!("failed to load job {}", path.display()))?,
            None => RenderJob::new(
                Scene::reference(DEFAULT_WIDTH, DEFAULT_HEIGHT),
                CameraConfig::default(),
                RenderConfig::default(),
            ),
        };
        self.apply_overrides(&mut job);
        Ok(job)
    }

    fn apply_overrides(&self, job: &mut RenderJob) {
        if let Some(width) = self.width {
            job.scene.width = width;
        }
        if let Some(height) = self.height {
            job.scene.height = height;
        }
        if let Some(samples) = self.samples {
            job.render.samples_per_pixel = samples;
        }
        if let Some(bounces) = self.bounces {
            job.render.max_bounces = bounces;
        }
        if let Some(group_size) = self.group_size {
            job.render.group_size = group_size;
        }
        if let Some(fuzz) = self.fuzz {
            job.render.fuzz = fuzz;
        }
    }
}
