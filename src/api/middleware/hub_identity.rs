//! Hub identity middleware.
//!
//! Authenticates `X-HUB-UUID`, persists the liveness update, then injects
//! `AuthenticatedHub` for downstream handlers. The update is committed
//! before the handler runs, so it survives handler failures.

use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::api::error::ApiError;
use crate::api::types::AuthenticatedHub;

pub async fn require_hub(req: Request<axum::body::Body>, next: Next) -> Response {
    match require_hub_inner(req, next).await {
        Ok(resp) => resp,
        Err(err) => err.into_response(),
    }
}

async fn require_hub_inner(
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx = super::api_context(&req)?;
    let hub = ctx.core.hub_identity.authenticate(req.headers())?;
    req.extensions_mut().insert(AuthenticatedHub(hub));
    Ok(next.run(req).await)
}
