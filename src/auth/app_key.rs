use axum::http::HeaderMap;

use super::credential::{self, SharedSecret};
use super::error::AuthError;
use super::headers;

/// Gate for general API access: `X-APPKEY` must equal the configured key.
#[derive(Debug, Clone)]
pub struct AppKeyGuard {
    secret: SharedSecret,
}

impl AppKeyGuard {
    pub fn new(secret: SharedSecret) -> Self {
        Self { secret }
    }

    pub fn check(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        credential::verify(headers.get(headers::APP_KEY), &self.secret).map_err(|fault| {
            tracing::warn!(%fault, "Rejected application key");
            AuthError::AppKey(fault)
        })
    }
}
