use crate::draw::{Point, Smoother, Stroke};
use log::debug;

use super::events::{ContentChange, PointerButton, PointerEvent};
use super::{CaptureState, SignaturePad};

impl SignaturePad {
    /// Starts a new stroke at `(x, y)` in canvas units.
    ///
    /// # Behavior
    /// - Coordinates outside the canvas are clamped to its edges
    /// - A stroke still in progress is finalized first
    /// - A loaded overlay is discarded (listeners get `OverlayDiscarded`)
    pub fn begin(&mut self, x: f64, y: f64) {
        if self.is_capturing() {
            debug!("begin() while capturing; finalizing previous stroke");
            self.end();
        }

        if self.model.discard_overlay() {
            self.repaint_preview();
            self.notify(ContentChange::OverlayDiscarded);
        }

        let point = self.settings.canvas.clamp(Point::new(x, y));
        let pen = self.settings.pen;
        self.smoother = Smoother::new(pen.smoothing);
        let dot = self.smoother.begin(point);
        self.draw_preview_segment(&dot, pen);

        self.state = CaptureState::Capturing {
            stroke: Stroke::new(point, pen),
        };
    }

    /// Adds a sample to the stroke in progress. Ignored while idle.
    pub fn extend(&mut self, x: f64, y: f64) {
        let point = self.settings.canvas.clamp(Point::new(x, y));
        let CaptureState::Capturing { stroke } = &mut self.state else {
            debug!("extend() ignored: no stroke in progress");
            return;
        };
        stroke.push(point);
        let pen = *stroke.pen();
        if let Some(segment) = self.smoother.advance(point) {
            self.draw_preview_segment(&segment, pen);
        }
    }

    /// Finalizes the stroke in progress and adds it to the model.
    /// Ignored while idle.
    pub fn end(&mut self) {
        let CaptureState::Capturing { stroke } =
            std::mem::replace(&mut self.state, CaptureState::Idle)
        else {
            debug!("end() ignored: no stroke in progress");
            return;
        };

        if let Some(tail) = self.smoother.finish() {
            self.draw_preview_segment(&tail, *stroke.pen());
        }

        debug!("Finalized stroke with {} point(s)", stroke.len());
        let damage = stroke
            .bounding_box(self.preview.scale())
            .and_then(|rect| rect.clamp_to_bounds(self.preview.width(), self.preview.height()));
        self.dirty.mark_optional_rect(damage);
        if self.model.push_stroke(stroke) {
            self.notify(ContentChange::OverlayDiscarded);
        }
        self.notify(ContentChange::StrokeAdded);
    }

    /// Drops the stroke in progress without adding it to the model.
    pub fn cancel(&mut self) {
        if !self.is_capturing() {
            return;
        }
        debug!("Stroke cancelled");
        self.state = CaptureState::Idle;
        self.smoother.finish();
        self.repaint_preview();
    }

    /// Translates a raw host pointer event into capture calls.
    ///
    /// # Behavior
    /// - Primary down: `begin`
    /// - Motion: `extend` (ignored while idle)
    /// - Primary up: `extend` to the release position (unless the last
    ///   sample is already there), then `end`
    /// - Cancel: drops the stroke in progress
    /// - Other buttons are ignored
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down {
                button: PointerButton::Primary,
                x,
                y,
            } => self.begin(x, y),
            PointerEvent::Motion { x, y } => self.extend(x, y),
            PointerEvent::Up {
                button: PointerButton::Primary,
                x,
                y,
            } => {
                if let CaptureState::Capturing { stroke } = &self.state {
                    let release = self.settings.canvas.clamp(Point::new(x, y));
                    if stroke.last() != release {
                        self.extend(x, y);
                    }
                    self.end();
                }
            }
            PointerEvent::Cancel => self.cancel(),
            PointerEvent::Down { button, .. } | PointerEvent::Up { button, .. } => {
                debug!("Ignoring pointer button {:?}", button);
            }
        }
    }
}
