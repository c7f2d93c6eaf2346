//! Request logging middleware.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};

/// Logs one line per request once the response is ready.
///
/// Server errors are logged at `warn` so failed upstream fetches stand out;
/// everything else goes to `info`.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let query = request.uri().query().map(str::to_owned);
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = start.elapsed().as_millis();
    let query = query.unwrap_or_default();

    if status.is_server_error() {
        warn!(
            target: "http",
            method = %method,
            path = %path,
            query = %query,
            status = status.as_u16(),
            duration_ms,
            "HTTP request failed"
        );
    } else {
        info!(
            target: "http",
            method = %method,
            path = %path,
            query = %query,
            status = status.as_u16(),
            duration_ms,
            "HTTP request completed"
        );
    }

    response
}
