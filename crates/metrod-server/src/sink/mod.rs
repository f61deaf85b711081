//! Persistent storage boundary consumed by the flusher.

pub mod postgres;

use std::collections::HashMap;

use async_trait::async_trait;
use metrod_core::Result;

pub use postgres::PostgresSink;

/// Durable latest-value-per-name storage.
///
/// `save` must apply the whole snapshot atomically and be idempotent under
/// repeated identical batches: the flusher re-sends every known name on
/// every flush.
#[async_trait]
pub trait MetricSink: Send + Sync {
    /// Upsert every `(name, value)` pair as one transaction. On failure the
    /// persisted state is unchanged from before the call.
    async fn save(&self, snapshot: &HashMap<String, f64>) -> Result<()>;

    /// Release pooled resources. Idempotent; called once at shutdown, never
    /// concurrently with an in-flight `save`.
    async fn close(&self);
}
