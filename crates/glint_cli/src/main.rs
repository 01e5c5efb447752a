//! Glint - offline path tracer
//!
//! Renders one of the built-in scenes and writes the frame to disk.

mod scenes;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use glint_core::OutputFormat;
use glint_renderer::{RenderConfig, RenderSession};

use scenes::ScenePreset;

#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(about = "Render a built-in scene with a CPU path tracer")]
struct Args {
    /// Scene to render
    #[arg(long, value_enum, default_value_t = ScenePreset::CornellBox)]
    scene: ScenePreset,

    /// Image width in pixels; the height follows the scene's aspect ratio
    #[arg(long, default_value_t = 600)]
    width: u32,

    /// Samples per pixel
    #[arg(long, short = 's', default_value_t = 1000)]
    samples: u32,

    /// Maximum number of bounces per path
    #[arg(long, default_value_t = 100)]
    max_depth: u32,

    /// Seed for scene generation and sampling
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output file; `.ppm` is written as text, other extensions are encoded
    #[arg(short, long, default_value = "image.ppm")]
    output: PathBuf,

    /// Image mapped onto the earth scene
    #[arg(long, default_value = "earthmap.jpg")]
    texture: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let format = check_output(&args.output)?;
    log::debug!("Output format {:?}", format);

    log::info!("Building scene {:?}", args.scene);
    let scene = args.scene.build(args.seed, &args.texture);
    let camera = scene.camera.build();

    let config = RenderConfig::default()
        .with_width_and_aspect(args.width, scene.camera.aspect_ratio)
        .with_quality(args.samples, args.max_depth)
        .with_background(scene.background)
        .with_seed(args.seed);

    let mut session = RenderSession::new(config);
    let stats = session.render(&camera, &scene.world);
    log::info!("{} pixels, {} samples", stats.pixels, stats.samples);

    glint_core::save(session.frame(), &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}

/// Fail before rendering when the output can't be written.
fn check_output(output: &Path) -> Result<OutputFormat> {
    let format = OutputFormat::from_path(output)
        .with_context(|| format!("Cannot write {}", output.display()))?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            bail!("Output directory {} does not exist", parent.display());
        }
    }
    Ok(format)
}
