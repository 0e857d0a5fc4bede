//! Live on-screen preview surface.
//!
//! Holds an ARGB32 surface at the interactive scale. While capturing, each
//! smoothed segment is stroked directly onto it; after model changes that
//! cannot be drawn incrementally (clear, overlay load) it is repainted from
//! the model.

use super::color::Color;
use super::model::StrokeModel;
use super::render::{self, Background, RenderError};
use super::smoother::Segment;
use crate::util::Rect;

pub struct PreviewSurface {
    surface: cairo::ImageSurface,
    scale: f64,
    background: Background,
}

impl PreviewSurface {
    /// Creates a preview sized for `model`'s canvas at `scale` and paints the
    /// current model onto it.
    pub fn new(
        model: &StrokeModel,
        scale: f64,
        background: Background,
    ) -> Result<Self, RenderError> {
        let surface = render::render_to_surface(model, scale, background)?;
        Ok(Self {
            surface,
            scale,
            background,
        })
    }

    pub fn surface(&self) -> &cairo::ImageSurface {
        &self.surface
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    /// Repaints everything from the model.
    pub fn repaint(&self, model: &StrokeModel) -> Result<(), RenderError> {
        let ctx = cairo::Context::new(&self.surface)?;
        render::render(&ctx, model, self.scale, self.background)?;
        drop(ctx);
        self.surface.flush();
        Ok(())
    }

    /// Strokes one segment given in canvas units and returns the damaged
    /// pixel rectangle.
    pub fn draw_segment(
        &self,
        segment: &Segment,
        color: Color,
        width: f64,
    ) -> Result<Option<Rect>, RenderError> {
        let scaled = segment.scaled(self.scale);
        let scaled_width = width * self.scale;

        let ctx = cairo::Context::new(&self.surface)?;
        ctx.set_antialias(cairo::Antialias::Best);
        render::render_segment(&ctx, &scaled, color, scaled_width);
        drop(ctx);
        self.surface.flush();

        Ok(scaled
            .bounds(scaled_width)
            .and_then(|rect| rect.clamp_to_bounds(self.width(), self.height())))
    }
}
