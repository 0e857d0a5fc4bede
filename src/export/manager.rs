use std::{path::PathBuf, sync::Arc};

use tokio::sync::{Mutex, mpsc, oneshot};
use tokio::task;

use crate::export::{
    dependencies::ExportDependencies,
    pipeline::{ExportJob, perform_export},
    types::{ExportError, ExportStatus},
};

type ExportReply = oneshot::Sender<Result<PathBuf, ExportError>>;

struct QueuedExport {
    job: ExportJob,
    reply: ExportReply,
}

/// Handle to the result of a background export.
///
/// Dropping the ticket does not cancel the export; the result is discarded.
#[derive(Debug)]
pub struct ExportTicket {
    destination: PathBuf,
    result_rx: oneshot::Receiver<Result<PathBuf, ExportError>>,
}

impl ExportTicket {
    /// Path the export was requested for.
    pub fn destination(&self) -> &PathBuf {
        &self.destination
    }

    /// Waits for the export to finish.
    pub async fn wait(self) -> Result<PathBuf, ExportError> {
        self.result_rx
            .await
            .map_err(|_| ExportError::WorkerUnavailable)?
    }

    /// Blocks the current thread until the export finishes.
    ///
    /// Must not be called from within an async context.
    pub fn blocking_wait(self) -> Result<PathBuf, ExportError> {
        self.result_rx
            .blocking_recv()
            .map_err(|_| ExportError::WorkerUnavailable)?
    }
}

/// Shared state for running exports off the interaction thread.
///
/// Jobs carry their own model snapshot, so nothing the UI does after
/// submitting can change what gets written.
#[derive(Clone)]
pub struct ExportManager {
    /// Channel for submitting export jobs.
    job_tx: mpsc::UnboundedSender<QueuedExport>,
    /// Shared status of the most recent export.
    status: Arc<Mutex<ExportStatus>>,
}

impl ExportManager {
    /// Create a new export manager.
    ///
    /// This spawns a background task that renders and writes queued exports.
    ///
    /// # Arguments
    /// * `runtime_handle` - Tokio runtime handle for spawning async tasks
    pub fn new(runtime_handle: &tokio::runtime::Handle) -> Self {
        Self::with_dependencies(runtime_handle, ExportDependencies::default())
    }

    /// Create an export manager with custom dependencies (useful for testing).
    pub fn with_dependencies(
        runtime_handle: &tokio::runtime::Handle,
        dependencies: ExportDependencies,
    ) -> Self {
        let (job_tx, mut job_rx) = mpsc::unbounded_channel::<QueuedExport>();
        let status = Arc::new(Mutex::new(ExportStatus::Idle));
        let dependencies = Arc::new(dependencies);

        let status_clone = status.clone();

        runtime_handle.spawn(async move {
            while let Some(QueuedExport { job, reply }) = job_rx.recv().await {
                log::debug!("Processing export job: {:?}", job);
                *status_clone.lock().await = ExportStatus::InProgress;

                let deps = Arc::clone(&dependencies);
                let result = task::spawn_blocking(move || perform_export(job, &deps))
                    .await
                    .unwrap_or_else(|e| Err(ExportError::TaskFailed(e.to_string())));

                match &result {
                    Ok(path) => {
                        log::info!("Export successful: {}", path.display());
                        *status_clone.lock().await = ExportStatus::Success(path.clone());
                    }
                    Err(e) => {
                        let error_message = e.to_string();
                        log::error!("Export failed: {}", error_message);
                        *status_clone.lock().await = ExportStatus::Failed(error_message);
                    }
                }

                if reply.send(result).is_err() {
                    log::debug!("Export result dropped: ticket no longer held");
                }
            }
        });

        Self { job_tx, status }
    }

    /// Queue a job. Returns immediately; the export happens in the background.
    pub(crate) fn submit(&self, job: ExportJob) -> Result<ExportTicket, ExportError> {
        let destination = job.request.destination.clone();
        let (reply, result_rx) = oneshot::channel();

        self.job_tx
            .send(QueuedExport { job, reply })
            .map_err(|_| ExportError::WorkerUnavailable)?;

        Ok(ExportTicket {
            destination,
            result_rx,
        })
    }

    /// Get the status of the most recent export.
    pub async fn status(&self) -> ExportStatus {
        self.status.lock().await.clone()
    }

    #[cfg(test)]
    pub(crate) fn with_closed_channel_for_test() -> Self {
        let (job_tx, job_rx) = mpsc::unbounded_channel::<QueuedExport>();
        drop(job_rx);
        Self {
            job_tx,
            status: Arc::new(Mutex::new(ExportStatus::Idle)),
        }
    }
}
