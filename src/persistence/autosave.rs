use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use super::HomeStore;
use crate::errors::{Result, StoreyError};
use crate::scene::Home;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOrigin {
    /// Snapshot taken after an edit.
    Auto,
    /// User-requested "save as".
    Explicit,
}

#[derive(Debug)]
pub struct SaveOutcome {
    pub filename: String,
    pub origin: SaveOrigin,
    pub result: Result<()>,
}

struct SaveJob {
    filename: String,
    origin: SaveOrigin,
    home: Home,
}

/// Background writer for home snapshots.
///
/// Jobs are processed in submission order on a dedicated thread. Dropping the
/// saver finishes the queued jobs and joins the thread.
pub struct AutoSaver {
    jobs: Option<flume::Sender<SaveJob>>,
    outcomes: flume::Receiver<SaveOutcome>,
    worker: Option<JoinHandle<()>>,
}

impl AutoSaver {
    pub fn spawn(store: Arc<dyn HomeStore>) -> Result<Self> {
        let (job_tx, job_rx) = flume::unbounded::<SaveJob>();
        let (outcome_tx, outcome_rx) = flume::unbounded();

        let worker = std::thread::Builder::new()
            .name("storey-autosave".to_string())
            .spawn(move || {
                for job in job_rx.iter() {
                    let result = store.save_home(&job.filename, &job.home);
                    if let Err(err) = &result {
                        log::error!("Saving {} failed: {err}", job.filename);
                    }
                    let outcome = SaveOutcome {
                        filename: job.filename,
                        origin: job.origin,
                        result,
                    };
                    if outcome_tx.send(outcome).is_err() {
                        break;
                    }
                }
                log::debug!("Autosave worker stopped");
            })?;

        Ok(Self {
            jobs: Some(job_tx),
            outcomes: outcome_rx,
            worker: Some(worker),
        })
    }

    /// Queues a snapshot. Never waits for the write.
    pub fn submit(&self, filename: impl Into<String>, home: Home, origin: SaveOrigin) -> Result<()> {
        let jobs = self.jobs.as_ref().ok_or(StoreyError::WorkerUnavailable)?;
        jobs.send(SaveJob {
            filename: filename.into(),
            origin,
            home,
        })
        .map_err(|_| StoreyError::WorkerUnavailable)
    }

    /// Outcomes finished since the last call.
    #[must_use]
    pub fn drain(&self) -> Vec<SaveOutcome> {
        self.outcomes.try_iter().collect()
    }

    /// Waits up to `timeout` for the next outcome.
    #[must_use]
    pub fn recv_timeout(&self, timeout: Duration) -> Option<SaveOutcome> {
        self.outcomes.recv_timeout(timeout).ok()
    }
}

impl Drop for AutoSaver {
    fn drop(&mut self) {
        self.jobs.take();
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            log::error!("Autosave worker panicked");
        }
    }
}
