//! Configuration file support for sigpad.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/sigpad/config.toml`. Settings include canvas geometry,
//! pen appearance, overlay placement and export defaults.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::{BackgroundMode, ColorSpec};
pub use types::{CanvasConfig, ExportConfig, OverlayConfig, PenConfig};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// width = 400.0
/// height = 200.0
///
/// [pen]
/// color = "black"
/// width = 2.5
/// smoothing = 0.5
///
/// [overlay]
/// padding = 8.0
///
/// [export]
/// scale = 3.0
/// background = "white"
/// ```
#[derive(Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Canvas geometry and preview settings
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Pen defaults for new strokes
    #[serde(default)]
    pub pen: PenConfig,

    /// Overlay image placement
    #[serde(default)]
    pub overlay: OverlayConfig,

    /// Export defaults
    #[serde(default)]
    pub export: ExportConfig,
}

/// Clamps `value` into `range`, logging a warning when it had to change.
fn clamp_setting(name: &str, value: &mut f64, min: f64, max: f64) {
    if !value.is_finite() {
        warn!("Invalid {name} {value}, using {min:.1}");
        *value = min;
    } else if !(min..=max).contains(value) {
        warn!("Invalid {name} {value:.2}, clamping to {min:.1}-{max:.1} range");
        *value = value.clamp(min, max);
    }
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `canvas.width` / `canvas.height`: 16.0 - 4096.0
    /// - `canvas.preview_scale`: 0.5 - 4.0
    /// - `pen.width`: 0.5 - 20.0
    /// - `pen.smoothing`: 0.0 - 1.0
    /// - `overlay.padding`: 0.0 - a quarter of the shorter canvas side
    /// - `export.scale`: 1.0 - 8.0
    pub(crate) fn validate_and_clamp(&mut self) {
        clamp_setting("canvas width", &mut self.canvas.width, 16.0, 4096.0);
        clamp_setting("canvas height", &mut self.canvas.height, 16.0, 4096.0);
        clamp_setting("preview_scale", &mut self.canvas.preview_scale, 0.5, 4.0);
        clamp_setting("pen width", &mut self.pen.width, 0.5, 20.0);
        clamp_setting("smoothing", &mut self.pen.smoothing, 0.0, 1.0);

        let max_padding = self.canvas.width.min(self.canvas.height) / 4.0;
        clamp_setting("overlay padding", &mut self.overlay.padding, 0.0, max_padding);

        clamp_setting("export scale", &mut self.export.scale, 1.0, 8.0);

        if self.export.filename_template.trim().is_empty() {
            warn!("Empty export filename_template, falling back to default");
            self.export.filename_template = ExportConfig::default().filename_template;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/sigpad/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("sigpad");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from file, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path; a missing file yields defaults.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;
        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Creates a default configuration file with documentation comments.
    ///
    /// Writes the example config from `config.example.toml` to `path`.
    ///
    /// # Errors
    /// Returns an error if:
    /// - A config file already exists at the target path
    /// - The config directory cannot be created
    /// - The file cannot be written
    pub fn create_default_file(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                path.display()
            ));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(path, default_config)?;

        info!("Created default config at {}", path.display());
        Ok(())
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
