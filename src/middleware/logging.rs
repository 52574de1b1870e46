//! Logging middleware
//!
//! Records method, path, status, and latency for each HTTP request.
//! Request bodies are never read here: submitted resumes and job
//! descriptions must not reach the logs.

use axum::{
    extract::Request,
    http::{Method, Uri},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Request logging middleware
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let request_id = Uuid::new_v4().to_string();
    let method: Method = request.method().clone();
    let uri: Uri = request.uri().clone();

    let span = tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %method,
        path = %uri.path(),
    );
    let _enter = span.enter();

    info!("Request started: {} {}", method, uri.path());

    let response = next.run(request).await;

    let duration = start_time.elapsed();
    let status = response.status();

    if status.is_success() {
        info!(
            "Request completed: {} - Duration: {:.2}ms",
            status,
            duration.as_secs_f64() * 1000.0
        );
    } else if status.is_client_error() {
        warn!(
            "Client error: {} - Duration: {:.2}ms",
            status,
            duration.as_secs_f64() * 1000.0
        );
    } else {
        warn!(
            "Server error: {} - Duration: {:.2}ms",
            status,
            duration.as_secs_f64() * 1000.0
        );
    }

    // Generation calls should finish well inside the provider timeout;
    // anything slower means the retry path was taken or the provider is
    // degraded.
    if duration.as_secs() > 20 {
        warn!(
            "Slow request: {} {} - Duration: {:.2}s",
            method,
            uri.path(),
            duration.as_secs_f64()
        );
    }

    response
}
