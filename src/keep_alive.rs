//! Periodic health pings that keep a sleeping backend awake.
//!
//! Hosted backends on free tiers spin down after a few minutes without
//! traffic. [`KeepAlive`] runs a background task that hits the health
//! endpoint on a fixed interval until stopped or dropped.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::client::FinanzasClient;

/// Interval used by [`KeepAlive::start_default`] (ten minutes).
pub const DEFAULT_PING_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Shortest interval the ping loop accepts.
pub const MIN_PING_INTERVAL: Duration = Duration::from_millis(1);

/// Handle to a running keep-alive task.
///
/// The first ping fires immediately. Failed pings are logged and the loop
/// keeps going. Dropping the handle aborts the task.
#[derive(Debug)]
pub struct KeepAlive {
    /// Signals the task to stop, abandoning any ping in flight.
    stop: Option<oneshot::Sender<()>>,
    /// The spawned ping loop.
    task: Option<JoinHandle<()>>,
}

impl KeepAlive {
    /// Spawns the ping loop on the current tokio runtime.
    ///
    /// A zero `interval` is raised to [`MIN_PING_INTERVAL`]. A ping still
    /// in flight is abandoned as soon as the loop is stopped.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn start(client: Arc<FinanzasClient>, interval: Duration) -> Self {
        let period = interval.max(MIN_PING_INTERVAL);
        let (stop_tx, mut stop_rx) = oneshot::channel();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            tracing::debug!(?period, "keep-alive started");
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        tokio::select! {
                            _ = &mut stop_rx => break,
                            result = client.ping() => match result {
                                Ok(()) => tracing::trace!("keep-alive ping ok"),
                                Err(err) => tracing::warn!(error = %err, "keep-alive ping failed"),
                            },
                        }
                    }
                }
            }
            tracing::debug!("keep-alive stopped");
        });
        Self {
            stop: Some(stop_tx),
            task: Some(task),
        }
    }

    /// [`KeepAlive::start`] with [`DEFAULT_PING_INTERVAL`].
    #[inline]
    #[must_use]
    pub fn start_default(client: Arc<FinanzasClient>) -> Self {
        Self::start(client, DEFAULT_PING_INTERVAL)
    }

    /// Returns `true` while the ping loop is still running.
    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stops the loop and waits for the task to finish.
    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            _ = stop.send(());
        }
        if let Some(task) = self.task.take()
            && let Err(err) = task.await
        {
            tracing::warn!(error = %err, "keep-alive task failed");
        }
    }
}

impl Drop for KeepAlive {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
