//! metrod core: metric model, shared error type, and the in-memory store.
//!
//! This crate defines the domain contracts shared by the server and its
//! tests. It intentionally carries no transport or runtime dependencies so
//! the store can be exercised from plain threads.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `MetrodError`/`Result` so the serving
//! process does not crash on bad traffic or a flaky database.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metric;
pub mod store;

pub use error::{MetrodError, Result};
pub use metric::Metric;
pub use store::MetricStore;
