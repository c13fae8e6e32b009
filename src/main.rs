use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use pathtracer::{RenderSettings, Renderer, Scene};
use std::path::PathBuf;

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

/// Renders the random sphere scene to an image file
#[derive(Parser)]
#[command(name = "pathtracer")]
struct Args {
    /// TOML render settings; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Width of image
    #[arg(long)]
    width: Option<u32>,

    /// Height of image
    #[arg(long)]
    height: Option<u32>,

    /// Samples for antialiasing
    #[arg(short, long)]
    samples: Option<u32>,

    /// Maximum number of bounces per ray
    #[arg(long)]
    max_depth: Option<u32>,

    /// Seed for reproducible renders
    #[arg(long)]
    seed: Option<u64>,

    /// Output path, the format follows the extension
    #[arg(short, long, default_value = "out.png")]
    output: PathBuf,

    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

impl Args {
    fn settings(&self) -> anyhow::Result<RenderSettings> {
        let mut settings = match &self.config {
            Some(path) => RenderSettings::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => RenderSettings::default(),
        };

        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(samples) = self.samples {
            settings.samples = samples;
        }
        if let Some(max_depth) = self.max_depth {
            settings.max_depth = max_depth;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }

        Ok(settings)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let renderer = Renderer::new(args.settings()?)?;
    let scene = Scene::random(&mut renderer.settings().rng())?;
    let camera = renderer.camera()?;

    let output = renderer.render(&scene, &camera);

    output
        .image
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    log::info!("Saved {}", args.output.display());

    Ok(())
}
