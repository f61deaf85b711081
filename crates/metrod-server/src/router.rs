//! Axum router wiring.
//!
//! Exposes a single `POST /update` route for metric batches. Request bodies
//! carrying `Content-Encoding: gzip` are decompressed by middleware before
//! the handler runs.

use axum::{middleware::from_fn, routing::post, Router};

use crate::{app_state::AppState, http, middleware::gzip};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/update", post(http::ingest::handle_update))
        .layer(from_fn(gzip::decompress_request))
        .with_state(state)
}
