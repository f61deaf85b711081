//! Concurrent in-memory metric store.

use std::collections::HashMap;

use dashmap::DashMap;

/// Thread-safe name -> latest value map shared by every request task.
///
/// `set` overwrites per entry and is safe under arbitrary concurrency;
/// `snapshot` copies the current entries out without clearing anything.
/// A snapshot may interleave with concurrent sets. It is a best-effort
/// point-in-time view, never a torn one: each entry is read atomically.
#[derive(Debug, Default)]
pub struct MetricStore {
    data: DashMap<String, f64>,
}

impl MetricStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `name`, overwriting any previous value.
    /// A same-name race resolves to whichever write lands second; callers
    /// must not depend on which one wins.
    pub fn set(&self, name: impl Into<String>, value: f64) {
        self.data.insert(name.into(), value);
    }

    /// Copy out all current entries. The returned map is independent of
    /// subsequent mutations of the store.
    pub fn snapshot(&self) -> HashMap<String, f64> {
        self.data
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    /// Number of distinct metric names seen so far.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
