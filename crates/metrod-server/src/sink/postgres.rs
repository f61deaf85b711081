//! Postgres-backed sink.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use metrod_core::{MetrodError, Result};

use crate::config::DatabaseSection;
use crate::sink::MetricSink;

const UPSERT: &str = "INSERT INTO metrics (name, value) VALUES ($1, $2) \
     ON CONFLICT (name) DO UPDATE SET value = EXCLUDED.value";

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS metrics (\
     name TEXT PRIMARY KEY, \
     value DOUBLE PRECISION NOT NULL)";

/// Connection-pooled Postgres sink. The flusher is its only caller.
pub struct PostgresSink {
    pool: PgPool,
}

impl PostgresSink {
    /// Establish the pool, verify connectivity, and bootstrap the schema.
    ///
    /// Any failure here is fatal at startup: the server must not begin
    /// accepting metrics it cannot eventually persist.
    pub async fn connect(cfg: &DatabaseSection) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(cfg.max_connections)
            .min_connections(cfg.min_connections)
            .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
            .connect(&cfg.url)
            .await
            .map_err(|e| MetrodError::Storage(format!("connect to postgres failed: {e}")))?;

        // min_connections is satisfied lazily; force one real round trip
        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .map_err(|e| MetrodError::Storage(format!("postgres ping failed: {e}")))?;

        sqlx::query(SCHEMA)
            .execute(&pool)
            .await
            .map_err(|e| MetrodError::Storage(format!("schema bootstrap failed: {e}")))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl MetricSink for PostgresSink {
    async fn save(&self, snapshot: &HashMap<String, f64>) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| MetrodError::Storage(format!("begin transaction failed: {e}")))?;

        // dropping the transaction on an early return rolls it back
        for (name, value) in snapshot {
            sqlx::query(UPSERT)
                .bind(name.as_str())
                .bind(*value)
                .execute(&mut *tx)
                .await
                .map_err(|e| MetrodError::Storage(format!("upsert {name} failed: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| MetrodError::Storage(format!("commit failed: {e}")))
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("closed connection pool to postgres");
    }
}
