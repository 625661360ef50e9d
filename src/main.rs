//! Command-line host for the morph-sphere scenes.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use morph_sphere::prelude::*;
use morph_sphere::{ConfigError, DisplayError, ExportError};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Demo {
    /// Merge/explosion morphing sphere.
    Morph,
    /// Swirling flow-field cloud.
    Flow,
}

#[derive(Debug, Parser)]
#[command(name = "morph-sphere", version, about = "Drifting, merging and exploding particle clouds")]
struct Cli {
    /// Which scene to run.
    #[arg(long, value_enum, default_value_t = Demo::Morph)]
    demo: Demo,

    /// JSON configuration for the chosen scene.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Fixed random seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Render to PNG files instead of opening a window.
    #[arg(long)]
    headless: bool,

    /// Number of frames to simulate when headless.
    #[arg(long, default_value_t = 600, help_heading = "Headless")]
    frames: u64,

    /// Simulated milliseconds per frame when headless.
    #[arg(long, default_value_t = 16.0, help_heading = "Headless")]
    frame_ms: f64,

    /// Canvas width when headless.
    #[arg(long, default_value_t = 800, help_heading = "Headless")]
    width: u32,

    /// Canvas height when headless.
    #[arg(long, default_value_t = 600, help_heading = "Headless")]
    height: u32,

    /// Directory PNG frames are written to.
    #[arg(long, default_value = "frames", help_heading = "Headless")]
    out: PathBuf,

    /// Write every K-th frame.
    #[arg(long, default_value_t = 30, help_heading = "Headless", value_parser = clap::value_parser!(u64).range(1..))]
    every: u64,

    /// Increase verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Display(#[from] DisplayError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

fn build_scene(cli: &Cli) -> Result<Box<dyn Scene>, ConfigError> {
    match cli.demo {
        Demo::Morph => {
            let mut config = match &cli.config {
                Some(path) => EngineConfig::from_json_file(path)?,
                None => EngineConfig::default(),
            };
            if let Some(seed) = cli.seed {
                config = config.with_seed(seed);
            }
            Ok(Box::new(Engine::new(config)?))
        }
        Demo::Flow => {
            let mut config = match &cli.config {
                Some(path) => FlowConfig::from_json_file(path)?,
                None => FlowConfig::default(),
            };
            if cli.seed.is_some() {
                config.seed = cli.seed;
            }
            Ok(Box::new(FlowCloud::new(config)?))
        }
    }
}

fn run_headless(cli: &Cli, mut scene: Box<dyn Scene>) -> Result<(), ExportError> {
    std::fs::create_dir_all(&cli.out)?;
    let mut canvas = FrameBuffer::new(cli.width, cli.height);
    let mut clock = FrameClock::fixed(cli.frame_ms);
    let mut written = 0;

    for frame in 1..=cli.frames {
        let report = scene.tick(clock.tick(), &mut canvas, PointerState::away());
        if frame % cli.every == 0 {
            let path = cli.out.join(format!("frame_{:05}.png", frame));
            canvas.save_png(&path)?;
            written += 1;
            log::debug!(
                "wrote {} ({} dots, phase {:?})",
                path.display(),
                report.drawn,
                report.phase
            );
        }
    }

    log::info!(
        "{} frames simulated, {} written to {}",
        cli.frames,
        written,
        cli.out.display()
    );
    Ok(())
}

fn run(cli: &Cli) -> Result<(), RunError> {
    let scene = build_scene(cli)?;
    if cli.headless {
        run_headless(cli, scene)?;
    } else {
        morph_sphere::run_windowed(scene, "morph-sphere")?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG still wins over -v.
    let default_filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
