use std::path::Path;

use anyhow::{Context, Result};
use glint_kernel::Framebuffer;
use image::{Rgb, RgbImage};
use log::info;

/// Convert to an upright 8-bit image.
///
/// Framebuffer row 0 is the bottom of the viewport, image row 0 the top.
pub fn to_rgb_image(framebuffer: &Framebuffer) -> RgbImage {
    let last_row = framebuffer.height - 1;
    RgbImage::from_fn(framebuffer.width, framebuffer.height, |x, y| {
        Rgb(framebuffer.rgb8(x, last_row - y))
    })
}

/// Save the framebuffer as PNG.
pub fn save_png(framebuffer: &Framebuffer, path: &Path) -> Result<()> {
    to_rgb_image(framebuffer)
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("Image saved as {}", path.display());
    Ok(())
}

/// Save the packed framebuffer words as-is.
pub fn save_raw(framebuffer: &Framebuffer, path: &Path) -> Result<()> {
    std::fs::write(path, framebuffer.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("Raw framebuffer saved as {}", path.display());
    Ok(())
}
