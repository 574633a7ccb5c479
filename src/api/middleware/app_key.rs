//! Application key middleware.

use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::api::error::ApiError;

/// Reject any request whose `X-APPKEY` does not match the configured key.
pub async fn require_app_key(req: Request<axum::body::Body>, next: Next) -> Response {
    match require_app_key_inner(req, next).await {
        Ok(resp) => resp,
        Err(err) => err.into_response(),
    }
}

async fn require_app_key_inner(
    req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx = super::api_context(&req)?;
    ctx.core.app_key.check(req.headers())?;
    Ok(next.run(req).await)
}
