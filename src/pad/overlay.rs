use std::path::Path;

use log::{info, warn};

use crate::draw::{OverlayError, OverlayImage};

use super::events::ContentChange;
use super::{CaptureState, SignaturePad};

impl SignaturePad {
    /// Replaces the pad content with an image fitted into the canvas.
    ///
    /// On failure the content is left untouched.
    pub fn load_overlay(&mut self, bytes: &[u8]) -> Result<(), OverlayError> {
        let overlay = OverlayImage::decode(
            bytes,
            self.settings.canvas,
            self.settings.overlay_padding,
        )
        .inspect_err(|err| warn!("Rejected overlay image: {}", err))?;

        info!(
            "Loaded overlay image {}x{} (fit scale {:.3})",
            overlay.width(),
            overlay.height(),
            overlay.fit().scale
        );
        self.install_overlay(overlay);
        Ok(())
    }

    /// Reads an image file and loads it as overlay.
    pub fn load_overlay_path(&mut self, path: &Path) -> Result<(), OverlayError> {
        let bytes = std::fs::read(path).inspect_err(|err| {
            warn!("Failed to read overlay image {}: {}", path.display(), err)
        })?;
        self.load_overlay(&bytes)
    }

    fn install_overlay(&mut self, overlay: OverlayImage) {
        if self.is_capturing() {
            warn!("Overlay loaded during capture; dropping in-progress stroke");
            self.state = CaptureState::Idle;
            self.smoother.finish();
        }
        self.model.set_overlay(overlay);
        self.repaint_preview();
        self.notify(ContentChange::OverlayLoaded);
    }
}
