//! Configuration type definitions.

use super::enums::{BackgroundMode, ColorSpec};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canvas geometry.
///
/// All captured points live in this logical coordinate space; exports are
/// rendered at a multiple of it.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Logical canvas width (valid range: 16 - 4096)
    #[serde(default = "default_canvas_width")]
    pub width: f64,

    /// Logical canvas height (valid range: 16 - 4096)
    #[serde(default = "default_canvas_height")]
    pub height: f64,

    /// Pixel density of the live preview surface (valid range: 0.5 - 4.0)
    #[serde(default = "default_preview_scale")]
    pub preview_scale: f64,

    /// Background of the live preview
    #[serde(default = "default_preview_background")]
    pub preview_background: BackgroundMode,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
            preview_scale: default_preview_scale(),
            preview_background: default_preview_background(),
        }
    }
}

/// Pen settings applied to new strokes.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PenConfig {
    /// Ink color - a named color (black, blue) or an RGB array like `[20, 40, 140]`
    #[serde(default = "default_pen_color")]
    pub color: ColorSpec,

    /// Stroke width in canvas units (valid range: 0.5 - 20.0)
    #[serde(default = "default_pen_width")]
    pub width: f64,

    /// Midpoint blend factor for smoothing (valid range: 0.0 - 1.0)
    /// 0.5 places curve anchors exactly between consecutive samples
    #[serde(default = "default_smoothing")]
    pub smoothing: f64,
}

impl Default for PenConfig {
    fn default() -> Self {
        Self {
            color: default_pen_color(),
            width: default_pen_width(),
            smoothing: default_smoothing(),
        }
    }
}

/// Overlay image placement.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct OverlayConfig {
    /// Margin kept free on every side of a fitted overlay image, in canvas units
    #[serde(default = "default_overlay_padding")]
    pub padding: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            padding: default_overlay_padding(),
        }
    }
}

/// Export defaults used by the command-line tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Export scale relative to the canvas (valid range: 1.0 - 8.0)
    #[serde(default = "default_export_scale")]
    pub scale: f64,

    /// Background of exported PNGs
    #[serde(default = "default_export_background")]
    pub background: BackgroundMode,

    /// Directory for exports when no output path is given (supports `~/`)
    #[serde(default = "default_export_directory")]
    pub directory: String,

    /// Filename template (chrono format specifiers, without extension)
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scale: default_export_scale(),
            background: default_export_background(),
            directory: default_export_directory(),
            filename_template: default_filename_template(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_canvas_width() -> f64 {
    400.0
}

fn default_canvas_height() -> f64 {
    200.0
}

fn default_preview_scale() -> f64 {
    1.0
}

fn default_preview_background() -> BackgroundMode {
    BackgroundMode::White
}

fn default_pen_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_pen_width() -> f64 {
    2.5
}

fn default_smoothing() -> f64 {
    crate::draw::DEFAULT_SMOOTHING
}

fn default_overlay_padding() -> f64 {
    8.0
}

fn default_export_scale() -> f64 {
    3.0
}

fn default_export_background() -> BackgroundMode {
    BackgroundMode::White
}

fn default_export_directory() -> String {
    "~/Pictures/Signatures".to_string()
}

fn default_filename_template() -> String {
    "signature_%Y-%m-%d_%H%M%S".to_string()
}
