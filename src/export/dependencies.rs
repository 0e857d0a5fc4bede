use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::export::{file, types::ExportError};

/// Abstraction over persisting encoded PNG bytes.
pub trait ExportFileSaver: Send + Sync {
    fn save(&self, png: &[u8], destination: &Path) -> Result<PathBuf, ExportError>;
}

/// Bundle of dependencies used by the export pipeline. Each component can be mocked in tests.
#[derive(Clone)]
pub struct ExportDependencies {
    pub saver: Arc<dyn ExportFileSaver>,
}

impl Default for ExportDependencies {
    fn default() -> Self {
        Self {
            saver: Arc::new(AtomicFileSaver),
        }
    }
}

/// Writes through a temporary sibling and renames into place.
struct AtomicFileSaver;

impl ExportFileSaver for AtomicFileSaver {
    fn save(&self, png: &[u8], destination: &Path) -> Result<PathBuf, ExportError> {
        file::save_png(png, destination)
    }
}
