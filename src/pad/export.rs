use std::path::{Path, PathBuf};

use crate::draw::{Background, render};
use crate::export::{
    ExportDependencies, ExportError, ExportManager, ExportRequest, ExportTicket,
    pipeline::{ExportJob, perform_export},
};

use super::SignaturePad;

impl SignaturePad {
    /// Renders the current content at `scale` and writes it to `destination`.
    ///
    /// Runs on the calling thread. Hosts with a UI loop should prefer
    /// [`SignaturePad::request_export`].
    pub fn export_png(
        &self,
        destination: &Path,
        scale: f64,
        background: Background,
    ) -> Result<PathBuf, ExportError> {
        let job = self.prepare_export(ExportRequest::new(destination, scale, background))?;
        perform_export(job, &ExportDependencies::default()).inspect_err(|err| {
            log::error!("Export to {} failed: {}", destination.display(), err)
        })
    }

    /// Queues an export of the current content on `manager`.
    ///
    /// The snapshot is taken before returning; later edits (including
    /// `clear()`) do not affect the written file.
    pub fn request_export(
        &self,
        manager: &ExportManager,
        request: ExportRequest,
    ) -> Result<ExportTicket, ExportError> {
        let job = self.prepare_export(request)?;
        manager.submit(job)
    }

    fn prepare_export(&self, request: ExportRequest) -> Result<ExportJob, ExportError> {
        if !self.has_content() {
            log::info!("Export skipped: signature pad is empty");
            return Err(ExportError::EmptyCanvas);
        }
        render::surface_size(&self.model, request.scale)?;

        Ok(ExportJob {
            snapshot: self.snapshot(),
            request,
        })
    }
}
