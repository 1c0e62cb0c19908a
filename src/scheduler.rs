//! Periodic database refresh job.
//!
//! A thin binding between the update pipeline and the runtime's timer: the
//! scheduler owns at most one background task that calls
//! [`crate::updater::update`] on a fixed cadence, starting one full period
//! after activation. Registration is idempotent and reversible, mirroring an
//! activate/deactivate lifecycle.

use std::time::Duration;

use tokio::task::JoinHandle;

use crate::config::{Config, UPDATE_JOB_NAME};
use crate::updater;

/// Owns the periodic refresh job.
///
/// Holds at most one live task. Dropping the scheduler cancels the job, so
/// a host embedding the library cannot leak refresh loops.
pub struct UpdateScheduler {
    config: Config,
    handle: Option<JoinHandle<()>>,
}

impl UpdateScheduler {
    /// Creates a scheduler for the given configuration. No job is registered
    /// until [`activate`](Self::activate) is called.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            handle: None,
        }
    }

    /// Registers the periodic job.
    ///
    /// Idempotent: if the job is already registered, this does nothing and
    /// returns `false`. The first refresh fires one full period after this
    /// call, then repeats every period.
    pub fn activate(&mut self) -> bool {
        if self.is_active() {
            log::debug!("{} already scheduled, leaving existing job in place", UPDATE_JOB_NAME);
            return false;
        }

        let config = self.config.clone();
        let period = Duration::from_secs(self.config.update_period_secs);
        log::info!(
            "{} scheduled: first run in {}s, then every {}s",
            UPDATE_JOB_NAME,
            period.as_secs(),
            period.as_secs()
        );

        self.handle = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(period).await;
                match updater::update(&config).await {
                    Ok(report) => log::info!(
                        "{}: installed {} bytes at {}",
                        UPDATE_JOB_NAME,
                        report.bytes_written,
                        report.path.display()
                    ),
                    // The old database stays in service; next period retries
                    Err(e) => log::warn!("{}: {}", UPDATE_JOB_NAME, e),
                }
            }
        }));
        true
    }

    /// Removes the periodic job.
    ///
    /// Returns `false` when no job was registered. Safe to call any number
    /// of times.
    pub fn deactivate(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                log::info!("{} deregistered", UPDATE_JOB_NAME);
                true
            }
            None => false,
        }
    }

    /// Whether the periodic job is currently registered.
    pub fn is_active(&self) -> bool {
        self.handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for UpdateScheduler {
    fn drop(&mut self) {
        self.deactivate();
    }
}
