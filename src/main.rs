use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};

use sigpad::draw::Background;
use sigpad::export::{ExportManager, ExportRequest};
use sigpad::{Config, PadSettings, SignaturePad};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SIGPAD_GIT_HASH"), ")");

#[derive(Parser, Debug)]
#[command(name = "sigpad")]
#[command(version = VERSION, about = "Render freehand signatures to print-quality PNG")]
struct Cli {
    /// JSON file with strokes: an array of strokes, each an array of [x, y] points
    #[arg(long, short = 's', value_name = "FILE")]
    strokes: Option<PathBuf>,

    /// Image file to place on the pad instead of strokes
    #[arg(long, short = 'i', value_name = "FILE", conflicts_with = "strokes")]
    overlay: Option<PathBuf>,

    /// Destination PNG (default: generated name in the configured directory)
    #[arg(long, short = 'o', value_name = "PATH")]
    output: Option<PathBuf>,

    /// Export scale relative to the canvas size
    #[arg(long, value_name = "FACTOR")]
    scale: Option<f64>,

    /// Export with a transparent background
    #[arg(long, action = ArgAction::SetTrue)]
    transparent: bool,

    /// Configuration file (default: ~/.config/sigpad/config.toml)
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write a documented default configuration file and exit
    #[arg(long, action = ArgAction::SetTrue)]
    init_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::get_config_path()?,
    };

    if cli.init_config {
        Config::create_default_file(&config_path)?;
        println!("{}", config_path.display());
        return Ok(());
    }

    if cli.strokes.is_none() && cli.overlay.is_none() {
        bail!("No input given: pass --strokes FILE or --overlay FILE");
    }

    let config = Config::load_from(&config_path)?;
    let mut pad =
        SignaturePad::new(PadSettings::from(&config)).context("Failed to create signature pad")?;

    if let Some(path) = &cli.strokes {
        replay_strokes(&mut pad, path)?;
    }
    if let Some(path) = &cli.overlay {
        pad.load_overlay_path(path)
            .with_context(|| format!("Failed to load overlay {}", path.display()))?;
    }

    let scale = cli.scale.unwrap_or(config.export.scale);
    let background = if cli.transparent {
        Background::Transparent
    } else {
        config.export.background.to_background()
    };
    let request = match cli.output {
        Some(path) => ExportRequest::new(path, scale, background),
        None => ExportRequest::in_directory(
            &config.export.directory,
            &config.export.filename_template,
            scale,
            background,
        ),
    };

    let runtime = tokio::runtime::Runtime::new().context("Failed to start export runtime")?;
    let manager = ExportManager::new(runtime.handle());

    log::info!(
        "Exporting signature to {} (scale {})",
        request.destination().display(),
        scale
    );
    let ticket = pad.request_export(&manager, request)?;
    let written = ticket.blocking_wait()?;

    println!("{}", written.display());
    Ok(())
}

/// Feeds recorded strokes through the pad as if they were pointer input.
fn replay_strokes(pad: &mut SignaturePad, path: &Path) -> Result<()> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read strokes from {}", path.display()))?;
    let strokes: Vec<Vec<[f64; 2]>> = serde_json::from_str(&source)
        .with_context(|| format!("Failed to parse strokes from {}", path.display()))?;

    for (index, points) in strokes.iter().enumerate() {
        let Some(([x, y], rest)) = points.split_first() else {
            log::warn!("Skipping empty stroke #{index}");
            continue;
        };
        pad.begin(*x, *y);
        for [x, y] in rest {
            pad.extend(*x, *y);
        }
        pad.end();
    }

    log::debug!("Replayed {} stroke(s) from {}", pad.stroke_count(), path.display());
    Ok(())
}
