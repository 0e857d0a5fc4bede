//! Freehand signature capture and high-resolution PNG export.
//!
//! The pad records pointer samples as strokes, smooths them into quadratic
//! curves as they arrive, and re-renders the same stroke data at any scale
//! for print-quality output. Cairo does the rasterization.

pub mod config;
pub mod draw;
pub mod export;
pub mod pad;
pub mod util;

pub use config::Config;
pub use pad::{PadSettings, SignaturePad};
