//! Stroke model: everything the pad currently shows.

use super::overlay::OverlayImage;
use super::point::Canvas;
use super::stroke::Stroke;

/// What the pad holds. Strokes and an overlay image are mutually exclusive.
#[derive(Clone, Debug, Default)]
pub enum Content {
    #[default]
    Empty,
    /// Finalized strokes in drawing order (first = bottom layer)
    Strokes(Vec<Stroke>),
    /// A loaded image replacing hand-drawn strokes
    Overlay(OverlayImage),
}

/// Container for the pad content on a fixed canvas.
///
/// Cloning produces an immutable snapshot that is safe to hand to an export
/// worker: stroke data is copied and overlay pixels are shared.
#[derive(Clone, Debug)]
pub struct StrokeModel {
    canvas: Canvas,
    content: Content,
}

impl StrokeModel {
    /// Creates an empty model for `canvas`.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            content: Content::Empty,
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Finalized strokes; empty when the model is empty or holds an overlay.
    pub fn strokes(&self) -> &[Stroke] {
        match &self.content {
            Content::Strokes(strokes) => strokes,
            _ => &[],
        }
    }

    pub fn overlay(&self) -> Option<&OverlayImage> {
        match &self.content {
            Content::Overlay(overlay) => Some(overlay),
            _ => None,
        }
    }

    pub fn has_content(&self) -> bool {
        match &self.content {
            Content::Empty => false,
            Content::Strokes(strokes) => !strokes.is_empty(),
            Content::Overlay(_) => true,
        }
    }

    /// Appends a finalized stroke on top. Discards an overlay if present.
    ///
    /// Returns `true` when an overlay was discarded.
    pub fn push_stroke(&mut self, stroke: Stroke) -> bool {
        match &mut self.content {
            Content::Strokes(strokes) => {
                strokes.push(stroke);
                false
            }
            other => {
                let had_overlay = matches!(other, Content::Overlay(_));
                *other = Content::Strokes(vec![stroke]);
                had_overlay
            }
        }
    }

    /// Drops an overlay, if any. Returns `true` when one was removed.
    pub fn discard_overlay(&mut self) -> bool {
        if matches!(self.content, Content::Overlay(_)) {
            self.content = Content::Empty;
            true
        } else {
            false
        }
    }

    /// Replaces all content with `overlay`.
    pub fn set_overlay(&mut self, overlay: OverlayImage) {
        self.content = Content::Overlay(overlay);
    }

    /// Removes all strokes and any overlay.
    pub fn clear(&mut self) {
        self.content = Content::Empty;
    }
}
