//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::auth::AuthError;
use crate::registry::RegistryError;

/// Structured error response body for hub clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Application key missing or invalid")]
    BadAppKey,
    #[error("God key missing or invalid")]
    Forbidden,
    #[error("Hub not found")]
    HubNotFound,
    #[error("Hub is not a member of project {0}")]
    NotProjectMember(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::BadAppKey => (
                StatusCode::BAD_REQUEST,
                "BAD_APP_KEY",
                "Missing or invalid application key".to_string(),
            ),
            ApiError::Forbidden => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "Missing or invalid god key".to_string(),
            ),
            ApiError::HubNotFound => (
                StatusCode::NOT_FOUND,
                "HUB_NOT_FOUND",
                "Hub not found".to_string(),
            ),
            ApiError::NotProjectMember(project_key) => (
                StatusCode::UNAUTHORIZED,
                "NOT_PROJECT_MEMBER",
                format!("Hub is not a member of project {project_key}"),
            ),
            ApiError::NotFound(path) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("No route for {path}"),
            ),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AppKey(_) => ApiError::BadAppKey,
            AuthError::GodKey(_) => ApiError::Forbidden,
            AuthError::IdentityUnknown => ApiError::HubNotFound,
            AuthError::MembershipMismatch { project_key, .. } => {
                ApiError::NotProjectMember(project_key)
            }
            AuthError::Registry(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
