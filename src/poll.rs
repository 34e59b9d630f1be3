//! Periodic reloading, owned by whoever shows the reloaded data.
//!
//! There is no global timer: the [`Refresher`] lives as long as its owner
//! and the job stops with it.

use std::{future::Future, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};

/// A job running on a fixed period in the background.
///
/// Dropping the value cancels the job.
#[derive(Debug)]
pub struct Refresher {
    handle: JoinHandle<()>,
    period: Duration,
}

impl Refresher {
    /// Run `job` right away and then every `period`.
    ///
    /// The next run never overlaps the previous one: a slow run pushes the
    /// schedule back instead of firing the missed runs in a burst.
    ///
    /// # Panics
    /// `period` is zero, or there is no tokio runtime.
    pub fn spawn<F, Fut>(period: Duration, mut job: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut ticks = time::interval(period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let handle = tokio::spawn(async move {
            loop {
                let _ = ticks.tick().await;
                job().await;
            }
        });

        Self { handle, period }
    }

    /// Time between the runs
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// The job has not been cancelled yet
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Cancel the job. A run in progress is interrupted at its next await point.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for Refresher {
    fn drop(&mut self) {
        tracing::debug!(period = ?self.period, "Stopping the refresher");
        self.handle.abort();
    }
}
