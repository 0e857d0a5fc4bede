//! Capture state machine and pad state management.

use super::events::{ContentChange, ContentEvent, ListenerId};
use crate::config::Config;
use crate::draw::{
    Background, Canvas, DirtyTracker, Pen, PreviewSurface, RenderError, Segment, Smoother,
    Stroke, StrokeModel, color::BLACK, smooth_points, smoother::DEFAULT_SMOOTHING,
};
use crate::util::Rect;

/// Capture state machine: `Idle → Capturing → Idle`.
#[derive(Debug)]
pub enum CaptureState {
    /// Not drawing - waiting for pointer down
    Idle,
    /// Pointer held down; samples accumulate into the in-progress stroke
    Capturing {
        /// Stroke being drawn (not yet part of the model)
        stroke: Stroke,
    },
}

/// Settings a pad is created with.
#[derive(Debug, Clone, PartialEq)]
pub struct PadSettings {
    /// Logical drawing area
    pub canvas: Canvas,
    /// Pen applied to new strokes
    pub pen: Pen,
    /// Free margin around fitted overlay images
    pub overlay_padding: f64,
    /// Pixel density of the live preview
    pub preview_scale: f64,
    /// Background of the live preview
    pub preview_background: Background,
}

impl Default for PadSettings {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            pen: Pen {
                color: BLACK,
                width: 2.5,
                smoothing: DEFAULT_SMOOTHING,
            },
            overlay_padding: 8.0,
            preview_scale: 1.0,
            preview_background: Background::WHITE,
        }
    }
}

impl From<&Config> for PadSettings {
    fn from(config: &Config) -> Self {
        Self {
            canvas: Canvas::new(config.canvas.width, config.canvas.height),
            pen: Pen {
                color: config.pen.color.to_color(),
                width: config.pen.width,
                smoothing: config.pen.smoothing,
            },
            overlay_padding: config.overlay.padding,
            preview_scale: config.canvas.preview_scale,
            preview_background: config.canvas.preview_background.to_background(),
        }
    }
}

type ContentListener = Box<dyn FnMut(&ContentEvent)>;

/// Freehand signature pad.
///
/// Owns the stroke model, the capture state machine and the live preview.
/// All methods are meant to be called from the host's UI thread; none of
/// them block or touch the filesystem except the synchronous export.
pub struct SignaturePad {
    pub(super) settings: PadSettings,
    pub(super) model: StrokeModel,
    pub(super) state: CaptureState,
    pub(super) smoother: Smoother,
    pub(super) preview: PreviewSurface,
    pub(super) dirty: DirtyTracker,
    listeners: Vec<(ListenerId, ContentListener)>,
    next_listener_id: u64,
}

impl SignaturePad {
    /// Creates an empty pad.
    ///
    /// # Errors
    /// Fails when the preview surface cannot be allocated (e.g. a preview
    /// scale that makes it exceed Cairo's size limit).
    pub fn new(settings: PadSettings) -> Result<Self, RenderError> {
        let model = StrokeModel::new(settings.canvas);
        let preview =
            PreviewSurface::new(&model, settings.preview_scale, settings.preview_background)?;
        let smoother = Smoother::new(settings.pen.smoothing);

        log::debug!(
            "Created signature pad {}x{} (preview {}x{})",
            settings.canvas.width,
            settings.canvas.height,
            preview.width(),
            preview.height()
        );

        let mut dirty = DirtyTracker::new();
        dirty.mark_full();

        Ok(Self {
            settings,
            model,
            state: CaptureState::Idle,
            smoother,
            preview,
            dirty,
            listeners: Vec::new(),
            next_listener_id: 0,
        })
    }

    pub fn settings(&self) -> &PadSettings {
        &self.settings
    }

    pub fn canvas(&self) -> Canvas {
        self.settings.canvas
    }

    /// Changes the pen used for strokes started from now on.
    pub fn set_pen(&mut self, pen: Pen) {
        self.settings.pen = pen;
    }

    /// Whether there is anything to export (finalized strokes or an overlay).
    ///
    /// A stroke still being drawn does not count until `end()`.
    pub fn has_content(&self) -> bool {
        self.model.has_content()
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.state, CaptureState::Capturing { .. })
    }

    pub fn stroke_count(&self) -> usize {
        self.model.strokes().len()
    }

    pub fn model(&self) -> &StrokeModel {
        &self.model
    }

    /// Immutable copy of the current model for rendering elsewhere.
    pub fn snapshot(&self) -> StrokeModel {
        self.model.clone()
    }

    /// The live preview surface.
    pub fn preview(&self) -> &PreviewSurface {
        &self.preview
    }

    /// Whether the preview changed since damage was last taken.
    pub fn needs_redraw(&self) -> bool {
        !self.dirty.is_clean()
    }

    /// Preview regions changed since the last call, in preview pixels.
    pub fn take_damage(&mut self) -> Vec<Rect> {
        self.dirty
            .take_regions(self.preview.width(), self.preview.height())
    }

    /// Removes all strokes, any overlay and any stroke in progress.
    pub fn clear(&mut self) {
        if self.is_capturing() {
            log::debug!("Clear during capture; dropping in-progress stroke");
        }
        self.state = CaptureState::Idle;
        self.model.clear();
        self.repaint_preview();
        self.notify(ContentChange::Cleared);
    }

    /// Registers a listener invoked synchronously after every content change.
    pub fn on_content_changed(
        &mut self,
        listener: impl FnMut(&ContentEvent) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unregisters a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub(super) fn notify(&mut self, change: ContentChange) {
        let event = ContentEvent {
            change,
            has_content: self.model.has_content(),
        };
        log::debug!("Content changed: {:?}", event);
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    /// Redraws the whole preview from the model (plus any stroke in progress).
    pub(super) fn repaint_preview(&mut self) {
        if let Err(err) = self.preview.repaint(&self.model) {
            log::warn!("Failed to repaint signature preview: {}", err);
        }
        let pending = match &self.state {
            CaptureState::Capturing { stroke } => Some((
                smooth_points(stroke.points(), stroke.pen().smoothing),
                *stroke.pen(),
            )),
            CaptureState::Idle => None,
        };
        if let Some((segments, pen)) = pending {
            for segment in &segments {
                self.draw_preview_segment(segment, pen);
            }
        }
        self.dirty.mark_full();
    }

    /// Draws one live segment and records its damage.
    pub(super) fn draw_preview_segment(&mut self, segment: &Segment, pen: Pen) {
        match self.preview.draw_segment(segment, pen.color, pen.width) {
            Ok(damage) => self.dirty.mark_optional_rect(damage),
            Err(err) => {
                log::warn!("Failed to draw preview segment: {}", err);
                self.dirty.mark_full();
            }
        }
    }
}
