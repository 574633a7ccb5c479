use axum::http::HeaderMap;

use super::credential::{self, SharedSecret};
use super::error::AuthError;
use super::headers;

/// Master override: `X-GODKEY` must equal the configured god key.
///
/// `check` guards god-only endpoints; `is_god` is the bare comparison other
/// guards use for their bypass.
#[derive(Debug, Clone)]
pub struct GodKeyGuard {
    secret: SharedSecret,
}

impl GodKeyGuard {
    pub fn new(secret: SharedSecret) -> Self {
        Self { secret }
    }

    pub fn is_god(&self, headers: &HeaderMap) -> bool {
        credential::matches(headers.get(headers::GOD_KEY), &self.secret)
    }

    pub fn check(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        credential::verify(headers.get(headers::GOD_KEY), &self.secret).map_err(|fault| {
            tracing::warn!(%fault, "Rejected god key");
            AuthError::GodKey(fault)
        })
    }
}
