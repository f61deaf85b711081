//! Request-body gzip decompression.

use std::io::Read;

use axum::{
    body::Body,
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use flate2::read::GzDecoder;

/// Bodies are buffered before decoding; anything larger is a client error.
const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Gunzip request bodies carrying `Content-Encoding: gzip` so handlers
/// always see plain bytes. A corrupt stream never reaches the handler.
pub async fn decompress_request(req: Request, next: Next) -> Response {
    let is_gzip = req
        .headers()
        .get(header::CONTENT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("gzip"))
        .unwrap_or(false);

    if !is_gzip {
        return next.run(req).await;
    }

    let (mut parts, body) = req.into_parts();

    let compressed = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(error = %e, "failed to read request body");
            return (StatusCode::BAD_REQUEST, "failed to read request body").into_response();
        }
    };

    let mut decoded = Vec::new();
    if let Err(e) = GzDecoder::new(compressed.as_ref()).read_to_end(&mut decoded) {
        tracing::debug!(error = %e, "failed to decompress request");
        return (StatusCode::BAD_REQUEST, "failed to decompress request").into_response();
    }

    // downstream extractors must see the decoded body, not the gzip frame
    parts.headers.remove(header::CONTENT_ENCODING);
    parts.headers.remove(header::CONTENT_LENGTH);

    next.run(Request::from_parts(parts, Body::from(decoded))).await
}
