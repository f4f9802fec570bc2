//! Simple render example.
//!
//! Renders the reference mirror-sphere scene and saves it in PPM format.

use glint_kernel::{render, CameraConfig, Framebuffer, RenderConfig, Scene, Sphere, Vec3};
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() {
    println!("Glint - Simple Example");
    println!("======================");

    let mut scene = Scene::reference(400, 300);
    // One off-axis sphere so the reflections have something to show
    scene.spheres[9] = Sphere::new(Vec3::new(1.2, 0.3, -2.0), 0.6);

    let camera = CameraConfig {
        position: Vec3::new(0.0, 0.2, 0.5),
        ..CameraConfig::default()
    };
    let config = RenderConfig::default();

    println!(
        "Rendering {}x{} @ {} spp, {} bounces...",
        scene.width, scene.height, config.samples_per_pixel, config.max_bounces
    );

    let start = std::time::Instant::now();
    let image = render(&scene, &camera, &config).expect("Invalid scene");
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    save_ppm(&image, filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn save_ppm(image: &Framebuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    // PPM rows run top to bottom
    for y in (0..image.height).rev() {
        for x in 0..image.width {
            let [r, g, b] = image.rgb8(x, y);
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
    }

    Ok(())
}
