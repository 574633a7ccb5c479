//! Request guards for the hub API.
//!
//! Each guard works on a `HeaderMap` and returns an [`AuthError`] on refusal.
//! The axum wiring lives in `api::middleware`.

pub mod app_key;
pub mod credential;
pub mod error;
pub mod god_key;
pub mod headers;
pub mod hub_identity;
pub mod project_membership;

pub use app_key::AppKeyGuard;
pub use credential::{CredentialFault, SharedSecret};
pub use error::AuthError;
pub use god_key::GodKeyGuard;
pub use hub_identity::HubIdentityGuard;
pub use project_membership::{ProjectAccess, ProjectMembershipGuard};
