//! Rendering primitives and the stroke model (Cairo-based).
//!
//! This module defines the core drawing types used for signature capture:
//! - [`Point`] and [`Canvas`]: device-independent geometry
//! - [`Stroke`] and [`StrokeModel`]: captured content, or an [`OverlayImage`]
//! - [`Smoother`]: midpoint quadratic smoothing of raw samples
//! - Rendering functions for Cairo-based output at any scale

pub mod color;
pub mod dirty;
pub mod model;
pub mod overlay;
pub mod point;
pub mod preview;
pub mod render;
pub mod smoother;
pub mod stroke;

// Re-export commonly used types at module level
pub use color::Color;
pub use dirty::DirtyTracker;
pub use model::{Content, StrokeModel};
pub use overlay::{OverlayError, OverlayFit, OverlayImage};
pub use point::{Canvas, Point};
pub use preview::PreviewSurface;
pub use render::{Background, RenderError, render, render_to_surface};
pub use smoother::{DEFAULT_SMOOTHING, Segment, Smoother, smooth_points};
pub use stroke::{Pen, Stroke};

pub use color::{BLACK, INK_BLUE, TRANSPARENT, WHITE};
