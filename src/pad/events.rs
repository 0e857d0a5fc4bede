//! Host-facing event types: pointer input in, content notifications out.

/// Pointer buttons as reported by the host toolkit.
///
/// Touch and pen contacts should be reported as [`PointerButton::Primary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other(u32),
}

/// Raw pointer event in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { button: PointerButton, x: f64, y: f64 },
    Motion { x: f64, y: f64 },
    Up { button: PointerButton, x: f64, y: f64 },
    /// The host lost the pointer (grab broken, window hidden).
    Cancel,
}

/// What changed in the pad content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentChange {
    /// A stroke was finalized and added to the model
    StrokeAdded,
    /// An overlay image replaced the content
    OverlayLoaded,
    /// A new stroke discarded the overlay image
    OverlayDiscarded,
    /// The pad was cleared
    Cleared,
}

/// Notification delivered to content listeners after a model mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentEvent {
    pub change: ContentChange,
    /// Whether the pad has exportable content after the change
    pub has_content: bool,
}

/// Identifies a registered content listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);
