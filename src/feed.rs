//! Cancellable repeating task that drives the simulator.
//!
//! [`UpdateFeed`] does not touch the store. It posts a [`FeedTick`] into the
//! application's event channel once per interval. The event loop asks
//! [`UpdateFeed::accepts`] before applying a tick, so a tick that was
//! already queued when the feed was stopped or restarted is dropped.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// One firing of the feed timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedTick {
    /// Start counter of the feed run that produced this tick.
    pub epoch: u64,
}

/// Handle to the background timer task.
#[derive(Debug)]
pub struct UpdateFeed {
    interval: Duration,
    epoch: u64,
    task: Option<JoinHandle<()>>,
}

impl UpdateFeed {
    /// Creates a stopped feed.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            epoch: 0,
            task: None,
        }
    }

    /// Starts posting ticks to `tx`, restarting if already running.
    ///
    /// The first tick arrives one full interval after the call. The task
    /// exits by itself once the receiver is dropped.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn start<M>(&mut self, tx: mpsc::UnboundedSender<M>)
    where
        M: From<FeedTick> + Send + 'static,
    {
        self.stop();
        self.epoch += 1;
        let epoch = self.epoch;
        let period = self.interval;

        self.task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick of a tokio interval completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(M::from(FeedTick { epoch })).is_err() {
                    debug!(epoch, "feed receiver dropped");
                    break;
                }
            }
        }));

        info!(epoch, interval_ms = period.as_millis() as u64, "update feed started");
    }

    /// Stops the timer task. Does nothing when the feed is not running.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            info!(epoch = self.epoch, "update feed stopped");
        }
    }

    /// Whether a tick should still be applied.
    ///
    /// Only ticks from the current run of a running feed are accepted.
    pub fn accepts(&self, tick: FeedTick) -> bool {
        self.task.is_some() && tick.epoch == self.epoch
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Drop for UpdateFeed {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
