//! Shared types for the API layer.

use std::sync::Arc;

use serde::Serialize;

use crate::core_state::CoreState;
use crate::models::Hub;

/// Shared context for all API routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self { core }
    }
}

/// Hub injected into request extensions by the identity middleware.
/// Reflects the record after this request's liveness update.
#[derive(Debug, Clone)]
pub struct AuthenticatedHub(pub Hub);

/// Wire shape of a hub in API responses.
#[derive(Debug, Serialize)]
pub struct HubView {
    pub uuid: String,
    pub name: String,
    pub project_key: String,
    pub last_seen_ts: i64,
    pub last_hub_time: Option<String>,
}

impl From<Hub> for HubView {
    fn from(hub: Hub) -> Self {
        Self {
            project_key: hub.project_key.to_string(),
            uuid: hub.uuid,
            name: hub.name,
            last_seen_ts: hub.last_seen_ts,
            last_hub_time: hub.last_hub_time,
        }
    }
}
