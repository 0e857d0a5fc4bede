//! High-resolution PNG export of the signature pad.
//!
//! This module provides:
//! - Rendering a model snapshot at an arbitrary scale and PNG encoding
//! - Atomic file writing with directory creation
//! - A background manager so exports never block the interaction thread

pub mod dependencies;
pub mod file;
pub mod types;

mod manager;
pub(crate) mod pipeline;

pub use dependencies::{ExportDependencies, ExportFileSaver};
pub use manager::{ExportManager, ExportTicket};
pub use pipeline::encode_png;
pub use types::{ExportError, ExportRequest, ExportStatus};
