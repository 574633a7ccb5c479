//! God key middleware for administrative routes.

use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::api::error::ApiError;

/// Admit only requests carrying the configured `X-GODKEY`.
/// No hub identity is required.
pub async fn require_god_key(req: Request<axum::body::Body>, next: Next) -> Response {
    match require_god_key_inner(req, next).await {
        Ok(resp) => resp,
        Err(err) => err.into_response(),
    }
}

async fn require_god_key_inner(
    req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx = super::api_context(&req)?;
    ctx.core.god_key.check(req.headers())?;
    tracing::info!(path = %req.uri().path(), "God key request");
    Ok(next.run(req).await)
}
