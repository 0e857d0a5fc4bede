//! Data types for signature export.

use super::file;
use crate::draw::{Background, RenderError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Where and how to rasterize the pad content.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    /// Final PNG path; parent directories are created when missing.
    pub destination: PathBuf,
    /// Multiplier applied to the canvas size and stroke widths.
    pub scale: f64,
    /// Background painted under the signature.
    pub background: Background,
}

impl ExportRequest {
    pub fn new(destination: impl Into<PathBuf>, scale: f64, background: Background) -> Self {
        Self {
            destination: destination.into(),
            scale,
            background,
        }
    }

    /// Builds a request for a generated filename inside `directory`.
    ///
    /// # Arguments
    /// * `directory` - Target directory (a leading `~/` is expanded)
    /// * `template` - Filename template with chrono format specifiers
    pub fn in_directory(
        directory: &str,
        template: &str,
        scale: f64,
        background: Background,
    ) -> Self {
        let directory = file::expand_tilde(directory);
        let filename = file::generate_filename(template, "png");
        Self::new(directory.join(filename), scale, background)
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

/// Errors that can occur while exporting a signature.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export: the signature pad is empty")]
    EmptyCanvas,

    #[error("Failed to render signature: {0}")]
    Render(#[from] RenderError),

    #[error("Failed to encode PNG: {0}")]
    Encode(String),

    #[error("Failed to write signature image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export worker is not running")]
    WorkerUnavailable,

    #[error("Export task failed: {0}")]
    TaskFailed(String),
}

/// Status of the background exporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    /// No export has run yet.
    Idle,
    /// An export is being rendered or written.
    InProgress,
    /// The last export completed.
    Success(PathBuf),
    /// The last export failed.
    Failed(String),
}
