//! Periodic metric flushing.
//!
//! The flusher owns the only timer in the system. Ticks flush on a
//! best-effort basis; cancellation triggers exactly one final flush whose
//! error, unlike tick errors, is returned to the caller. A tick failure
//! has a next tick to retry on, the shutdown flush does not.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use metrod_core::{MetricStore, MetrodError, Result};

use crate::sink::MetricSink;

pub struct Flusher {
    interval: Duration,
    store: Arc<MetricStore>,
    sink: Arc<dyn MetricSink>,
}

impl Flusher {
    pub fn new(interval: Duration, store: Arc<MetricStore>, sink: Arc<dyn MetricSink>) -> Self {
        Self { interval, store, sink }
    }

    /// Run until `shutdown` is cancelled.
    ///
    /// A tick-path flush failure is logged and swallowed: the data is still
    /// in the store, so the next tick naturally retries it. Values
    /// overwritten in between are an accepted loss window of one interval.
    pub async fn run(&self, shutdown: CancellationToken) -> Result<()> {
        let mut tick = interval_at(Instant::now() + self.interval, self.interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    return self.flush().await;
                }
                _ = tick.tick() => {
                    if let Err(e) = self.flush().await {
                        tracing::error!(error = %e, "flush failed, metrics stay buffered until next tick");
                    }
                }
            }
        }
    }

    /// Copy the store out and hand it to the sink. An empty snapshot is a
    /// success without a sink round trip. The store is never cleared, so
    /// every flush re-sends the latest value for every name ever seen.
    async fn flush(&self) -> Result<()> {
        let snapshot = self.store.snapshot();

        if snapshot.is_empty() {
            tracing::debug!("nothing to flush");
            return Ok(());
        }

        let count = snapshot.len();
        self.sink
            .save(&snapshot)
            .await
            .map_err(|e| MetrodError::Storage(format!("failed to save metrics: {e}")))?;

        tracing::info!(count, "flushed metrics");
        Ok(())
    }
}
