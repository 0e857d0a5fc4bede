//! Cairo-based rendering of the stroke model.
//!
//! Rendering is a pure function of the model: every call creates its own
//! context state, fills the background and replays each stroke through the
//! smoother at the requested scale.

use super::color::Color;
use super::model::{Content, StrokeModel};
use super::overlay::{MAX_SURFACE_EDGE, OverlayImage};
use super::smoother::{Segment, smooth_points};
use super::stroke::Stroke;
use thiserror::Error;

/// Background painted beneath the content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Background {
    /// Opaque (or translucent) solid fill, typically paper white
    Solid(Color),
    /// Fully transparent, for PNGs used as overlays in documents
    Transparent,
}

impl Background {
    /// Opaque white, the usual choice for printed documents.
    pub const WHITE: Background = Background::Solid(super::color::WHITE);
}

/// Errors raised while preparing a raster surface.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid scale factor {0}; expected a finite value greater than zero")]
    InvalidScale(f64),

    #[error("Surface of {width}x{height} pixels exceeds the supported maximum")]
    SurfaceTooLarge { width: i32, height: i32 },

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),
}

/// Renders the whole model onto `ctx`.
///
/// # Arguments
/// * `ctx` - Cairo drawing context covering the target surface
/// * `model` - Stroke model (usually a snapshot)
/// * `scale` - Multiplier applied to every coordinate and stroke width
/// * `background` - Fill painted first
pub fn render(
    ctx: &cairo::Context,
    model: &StrokeModel,
    scale: f64,
    background: Background,
) -> Result<(), RenderError> {
    ctx.save()?;
    ctx.set_antialias(cairo::Antialias::Best);
    render_background(ctx, background)?;

    match model.content() {
        Content::Empty => {}
        Content::Strokes(strokes) => render_strokes(ctx, strokes, scale),
        Content::Overlay(overlay) => render_overlay(ctx, overlay, scale)?,
    }

    ctx.restore()?;
    Ok(())
}

/// Allocates an ARGB32 surface sized for `scale` and renders into it.
pub fn render_to_surface(
    model: &StrokeModel,
    scale: f64,
    background: Background,
) -> Result<cairo::ImageSurface, RenderError> {
    let (width, height) = surface_size(model, scale)?;
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
    {
        let ctx = cairo::Context::new(&surface)?;
        render(&ctx, model, scale, background)?;
    }
    surface.flush();
    Ok(surface)
}

/// Validates `scale` and returns the pixel size of the target surface.
pub fn surface_size(model: &StrokeModel, scale: f64) -> Result<(i32, i32), RenderError> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(RenderError::InvalidScale(scale));
    }
    let (width, height) = model.canvas().pixel_size(scale);
    if width as u32 > MAX_SURFACE_EDGE || height as u32 > MAX_SURFACE_EDGE {
        return Err(RenderError::SurfaceTooLarge { width, height });
    }
    Ok((width, height))
}

/// Fills the entire surface, replacing whatever was there.
pub fn render_background(ctx: &cairo::Context, background: Background) -> Result<(), RenderError> {
    ctx.save()?;
    ctx.set_operator(cairo::Operator::Source);
    match background {
        Background::Solid(color) => color.apply(ctx),
        Background::Transparent => ctx.set_source_rgba(0.0, 0.0, 0.0, 0.0),
    }
    ctx.paint()?;
    ctx.restore()?;
    Ok(())
}

/// Renders strokes in order (first stroke = bottom layer).
pub fn render_strokes(ctx: &cairo::Context, strokes: &[Stroke], scale: f64) {
    for stroke in strokes {
        render_stroke(ctx, stroke, scale);
    }
}

/// Replays one stroke through the smoother with coordinates and width
/// pre-multiplied by `scale`.
///
/// The whole stroke becomes a single path so translucent ink does not
/// darken where consecutive segments overlap.
pub fn render_stroke(ctx: &cairo::Context, stroke: &Stroke, scale: f64) {
    let pen = stroke.pen();
    let width = pen.width * scale;
    let segments: Vec<Segment> = smooth_points(stroke.points(), pen.smoothing)
        .into_iter()
        .map(|segment| segment.scaled(scale))
        .collect();

    let Some(first) = segments.first() else {
        return;
    };

    pen.color.apply(ctx);
    if let Segment::Dot { .. } = first {
        first.fill_dot(ctx, width);
        return;
    }

    set_pen_style(ctx, width);
    let start = first.start();
    ctx.new_path();
    ctx.move_to(start.x, start.y);
    for segment in &segments {
        segment.append_to_path(ctx);
    }
    let _ = ctx.stroke();
}

/// Strokes a single live segment (used by the preview while capturing).
pub fn render_segment(ctx: &cairo::Context, segment: &Segment, color: Color, width: f64) {
    color.apply(ctx);
    if let Segment::Dot { .. } = segment {
        segment.fill_dot(ctx, width);
        return;
    }

    set_pen_style(ctx, width);
    let start = segment.start();
    ctx.new_path();
    ctx.move_to(start.x, start.y);
    segment.append_to_path(ctx);
    let _ = ctx.stroke();
}

fn set_pen_style(ctx: &cairo::Context, width: f64) {
    ctx.set_line_width(width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);
}

/// Paints the overlay through its fit, scaled, with high-quality sampling.
pub fn render_overlay(
    ctx: &cairo::Context,
    overlay: &OverlayImage,
    scale: f64,
) -> Result<(), RenderError> {
    let surface = overlay.to_surface()?;
    let fit = overlay.fit();

    ctx.save()?;
    ctx.translate(fit.offset_x * scale, fit.offset_y * scale);
    ctx.scale(fit.scale * scale, fit.scale * scale);
    ctx.rectangle(0.0, 0.0, overlay.width() as f64, overlay.height() as f64);
    ctx.clip();
    ctx.set_source_surface(&surface, 0.0, 0.0)?;
    let source = ctx.source();
    source.set_filter(cairo::Filter::Best);
    source.set_extend(cairo::Extend::Pad);
    ctx.paint()?;
    ctx.restore()?;
    Ok(())
}
