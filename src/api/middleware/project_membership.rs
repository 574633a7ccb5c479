//! Project membership middleware.
//!
//! Must be attached with `route_layer` on routes that declare a
//! `:project_key` parameter; the path is only matched at that point.

use std::collections::HashMap;

use axum::extract::{FromRequestParts, Path};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::api::error::ApiError;

/// Path parameter naming the project a request is scoped to.
pub const PROJECT_KEY_PARAM: &str = "project_key";

pub async fn require_project_member(req: Request<axum::body::Body>, next: Next) -> Response {
    match require_project_member_inner(req, next).await {
        Ok(resp) => resp,
        Err(err) => err.into_response(),
    }
}

async fn require_project_member_inner(
    req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx = super::api_context(&req)?;

    let (mut parts, body) = req.into_parts();
    let Path(params) = Path::<HashMap<String, String>>::from_request_parts(&mut parts, &())
        .await
        .map_err(|e| ApiError::Internal(format!("path parameters unavailable: {e}")))?;
    let project_key = params
        .get(PROJECT_KEY_PARAM)
        .ok_or_else(|| ApiError::Internal("route has no project_key parameter".into()))?;

    let access = ctx.core.membership.authorize(&parts.headers, project_key)?;
    parts.extensions.insert(access);

    Ok(next.run(Request::from_parts(parts, body)).await)
}
