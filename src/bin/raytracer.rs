use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use whitted_raytracer::config::{load_camera, load_scene};
use whitted_raytracer::constants::{DEFAULT_CAMERA, DEFAULT_DEPTH, DEFAULT_GAMMA, DEFAULT_IMAGE, DEFAULT_SCENE};
use whitted_raytracer::{RenderOptions, Vec3};

/// Renders a scene described by `.ini` files to an image file.
#[derive(Parser, Debug)]
#[clap(author, about, long_about = None)]
struct Args {
    /// Path to the scene's config file
    #[clap(short, long, default_value = DEFAULT_SCENE)]
    scene: PathBuf,

    /// Path to the camera's config file
    #[clap(short, long, default_value = DEFAULT_CAMERA)]
    camera: PathBuf,

    /// Path to the output image (format is derived from the file extension)
    #[clap(short, long, default_value = DEFAULT_IMAGE)]
    output: PathBuf,

    /// Recursion depth for reflection/refraction
    #[clap(short, long, default_value_t = DEFAULT_DEPTH)]
    depth: u32,

    /// Gamma used for the final gamma-correction pass
    #[clap(long, default_value_t = DEFAULT_GAMMA)]
    gamma: f64,

    /// Render scanlines across a worker pool instead of sequentially
    #[clap(short, long)]
    parallel: bool,

    /// Number of worker threads to use when --parallel is set (default: CPU count - 1)
    #[clap(long)]
    workers: Option<usize>,

    /// Hide the progress bar
    #[clap(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let scene = load_scene(&args.scene)
        .with_context(|| format!("failed to load scene from {}", args.scene.display()))?;
    let cam_options = load_camera(&args.camera)
        .with_context(|| format!("failed to load camera from {}", args.camera.display()))?;

    let options = RenderOptions {
        background: Vec3::zero(),
        depth: args.depth,
        parallel: args.parallel,
        num_workers: args.workers,
        gamma: args.gamma,
        progress: !args.quiet,
    };

    let image = scene.render(&cam_options, &options);
    let bytes = image.quantize();

    image::save_buffer(
        &args.output,
        bytes.as_rgb_bytes(),
        bytes.width(),
        bytes.height(),
        image::ColorType::Rgb8,
    )
    .with_context(|| format!("failed to write image to {}", args.output.display()))?;

    eprintln!(
        "wrote {}x{} image to {}",
        bytes.width(),
        bytes.height(),
        args.output.display()
    );

    Ok(())
}
