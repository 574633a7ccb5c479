//! Access logging middleware.
//!
//! Outermost layer: records every request under `/api`, including those
//! rejected by the guards.

use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

pub async fn log_access(req: Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    if response.status().is_server_error() {
        tracing::error!(%method, %path, status, "API request");
    } else {
        tracing::info!(%method, %path, status, "API request");
    }

    response
}
