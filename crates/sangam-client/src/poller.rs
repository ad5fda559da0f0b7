//! Fixed-interval polling scheduler.
//!
//! Each server resource a view keeps fresh gets its own poll task.  The
//! task is owned by a [`PollHandle`]; dropping the handle aborts the task,
//! so a tick can never run against a torn-down view.
//!
//! There is deliberately no backoff: a failed tick is retried at the next
//! scheduled interval, matching the platform's freshness contract.  The
//! first tick fires immediately so a view renders fetched state on mount.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use sangam_api::ApiError;

/// What to do when a poll tick fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollErrorPolicy {
    /// Log a warning; the next tick retries.  Used for message and
    /// notification polls.
    WarnAndRetry,
    /// Swallow silently (debug log only).  Used for the subscription probe
    /// so a flaky endpoint does not nag the user.
    Silent,
}

/// Owner handle for a running poll task.  Dropping it cancels the task.
pub struct PollHandle {
    topic: &'static str,
    handle: JoinHandle<()>,
}

impl PollHandle {
    /// Stop polling explicitly (equivalent to dropping the handle).
    pub fn stop(self) {}

    pub fn topic(&self) -> &'static str {
        self.topic
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        debug!(topic = self.topic, "stopping poll");
        self.handle.abort();
    }
}

/// Spawn a fixed-interval poll task.
///
/// `tick` runs once immediately, then once per interval.  Overlapping work
/// delays the next tick rather than bursting to catch up.
pub fn spawn_poll<F, Fut>(
    topic: &'static str,
    every: Duration,
    policy: PollErrorPolicy,
    mut tick: F,
) -> PollHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), ApiError>> + Send,
{
    debug!(topic, interval_ms = every.as_millis() as u64, "starting poll");

    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            if let Err(e) = tick().await {
                match policy {
                    PollErrorPolicy::WarnAndRetry => {
                        warn!(topic, error = %e, "poll failed, retrying next tick");
                    }
                    PollErrorPolicy::Silent => {
                        debug!(topic, error = %e, "poll failed (silent)");
                    }
                }
            }
        }
    });

    PollHandle { topic, handle }
}
