//! API middleware stack.
//!
//! Execution order (outermost → innermost):
//! 1. Access log: method, path and final status of every request
//! 2. App key: gates everything under `/api`, including unknown routes
//! 3. Route guards: god key, hub identity, project membership
//!
//! Every middleware reads `ApiContext` from request extensions and turns
//! guard refusals into `ApiError` responses.

pub mod app_key;
pub mod audit;
pub mod god_key;
pub mod hub_identity;
pub mod project_membership;

use axum::http::Request;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;

fn api_context<B>(req: &Request<B>) -> Result<ApiContext, ApiError> {
    req.extensions()
        .get::<ApiContext>()
        .cloned()
        .ok_or(ApiError::Internal("missing API context".into()))
}
