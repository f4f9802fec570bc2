use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};

mod cli;
mod output;

use cli::Args;

/// Initialize the logger; `RUST_LOG` still refines per-module levels.
fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let job = args.render_job()?;
    info!(
        "Rendering {}x{} with {} spheres, {} spp, {} bounces",
        job.scene.width,
        job.scene.height,
        job.scene.spheres.len(),
        job.render.samples_per_pixel,
        job.render.max_bounces
    );

    let framebuffer =
        glint_kernel::render(&job.scene, &job.camera, &job.render).context("render failed")?;

    output::save_png(&framebuffer, &args.output)?;
    if let Some(raw) = &args.raw {
        output::save_raw(&framebuffer, raw)?;
    }

    Ok(())
}
