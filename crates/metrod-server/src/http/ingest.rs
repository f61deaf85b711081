//! Metric ingest handler.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use metrod_core::Metric;

use crate::app_state::AppState;

/// `POST /update`: store every metric in a JSON batch.
///
/// A malformed body is rejected before anything touches the store. A valid
/// batch is applied in payload order; the response carries no body.
pub async fn handle_update(State(state): State<AppState>, body: Bytes) -> Response {
    let metrics: Vec<Metric> = match serde_json::from_slice(&body) {
        Ok(metrics) => metrics,
        Err(e) => {
            tracing::debug!(error = %e, "rejected ingest payload");
            return (StatusCode::BAD_REQUEST, "invalid payload").into_response();
        }
    };

    for metric in metrics {
        state.store().set(metric.name, metric.value);
    }

    StatusCode::OK.into_response()
}
