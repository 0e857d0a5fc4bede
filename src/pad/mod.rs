//! Signature pad: capture controller, overlay loading and export entry points.
//!
//! [`SignaturePad`] is driven from the host's UI thread, either directly
//! through `begin`/`extend`/`end` or by feeding raw [`PointerEvent`]s to
//! `handle_pointer`.

mod core;
mod events;
mod export;
mod overlay;
mod pointer;
#[cfg(test)]
mod tests;

pub use core::{CaptureState, PadSettings, SignaturePad};
pub use events::{ContentChange, ContentEvent, ListenerId, PointerButton, PointerEvent};
