//! API endpoint handlers.
//!
//! Handlers assume the guards on their route already ran; they read the
//! admitted hub or access decision from request extensions.

pub mod health;
pub mod hubs;
pub mod projects;

use axum::http::Uri;

use crate::api::error::ApiError;

/// Fallback for unmatched paths under `/api`.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
