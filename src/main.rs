use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{LevelFilter, info};
use raycaster::{
    render::{canvas::ImageFormat, renderer::Renderer},
    scene::{environment::Environment, io::yaml},
};

const DEFAULT_WIDTH: usize = 800;
const DEFAULT_HEIGHT: usize = 800;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
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

/// Simple ray casting renderer
/// Renders scenes of spheres and planes from yaml files
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// The scene file to render
    scene_file: PathBuf,

    /// The format of the output image
    #[clap(short = 'f', long, default_value = "png")]
    image_format: ImageFormat,

    /// The output path of the rendered image.
    /// By default it's `./<scene_filename>.<image_format>`
    #[clap(short, long)]
    output_path: Option<PathBuf>,

    #[clap(long, help = format!("Width (in pixels) of the output image.
Overrides the one in the scene file. If not specified anywhere, defaults to {}", DEFAULT_WIDTH))]
    width: Option<usize>,

    #[clap(long, help = format!("Height (in pixels) of the output image.
Overrides the one in the scene file. If not specified anywhere, defaults to {}", DEFAULT_HEIGHT))]
    height: Option<usize>,

    /// Vertical field of view in degrees.
    /// Overrides the one in the scene file
    /// If not specified anywhere, defaults to 60
    #[clap(long)]
    fov: Option<f64>,

    /// Show a progress bar while rendering
    #[clap(long)]
    progress: bool,

    /// Set the logging level
    #[clap(long, default_value = "info")]
    log_level: LogLevel,
}

fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn default_output_path(args: &Args) -> Result<PathBuf> {
    let mut path: PathBuf = args
        .scene_file
        .file_name()
        .with_context(|| format!("{} is not a file", args.scene_file.display()))?
        .into();
    path.set_extension(args.image_format.to_string());
    Ok(path)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let config = yaml::parse_file(&args.scene_file)
        .with_context(|| format!("failed to parse scene {}", args.scene_file.display()))?;

    let mut builder = config.renderer_builder();
    builder
        .width(args.width.or(config.width).unwrap_or(DEFAULT_WIDTH))
        .height(args.height.or(config.height).unwrap_or(DEFAULT_HEIGHT))
        .use_progress_bar(args.progress);
    let mut projection = config.projection.unwrap_or_default();
    if let Some(fov) = args.fov {
        projection.fov_degrees = fov;
    }
    builder.projection(projection);
    let renderer_config = builder.build().context("invalid renderer options")?;

    let mut renderer = Renderer::new(renderer_config, config.scene, config.camera);
    renderer.set_environment(
        config
            .environment
            .map(|texture| Box::new(texture) as Box<dyn Environment>),
    );
    let canvas = renderer.render();

    let output_path = match &args.output_path {
        Some(path) => path.clone(),
        None => default_output_path(&args)?,
    };
    canvas
        .save_to_file(&output_path, args.image_format)
        .with_context(|| format!("failed to save image to {}", output_path.display()))?;
    info!("image saved to {}", output_path.display());
    Ok(())
}
