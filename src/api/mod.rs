//! Hub API over HTTP.
//!
//! Exposes the authorization guards as axum middleware and mounts a small
//! set of routes under `/api/` that exercise each guard combination.
//! `hub_api_router()` returns a `Router` that can be mounted on any axum
//! server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::hub_api_router;
pub use server::{start_api_server, ApiServer, ApiSession, ServerError};
pub use types::{ApiContext, AuthenticatedHub};
