use std::sync::Arc;

use axum::http::HeaderMap;

use super::error::AuthError;
use super::god_key::GodKeyGuard;
use super::headers;
use crate::models::Hub;
use crate::registry::HubRegistry;

/// How a request was admitted to a project-scoped route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectAccess {
    /// The god key bypassed identity and membership.
    God,
    /// A hub that belongs to the project.
    Member(Hub),
}

/// Admits requests for `project_key` from the god key or from hubs owned
/// by that project.
///
/// Decision order: god key, then hub identity (404 when missing or
/// unknown), then project comparison on string renderings (401 on
/// mismatch). Reads the registry but never writes liveness.
#[derive(Clone)]
pub struct ProjectMembershipGuard {
    god: GodKeyGuard,
    registry: Arc<dyn HubRegistry>,
}

impl ProjectMembershipGuard {
    pub fn new(god: GodKeyGuard, registry: Arc<dyn HubRegistry>) -> Self {
        Self { god, registry }
    }

    pub fn authorize(&self, headers: &HeaderMap, project_key: &str) -> Result<ProjectAccess, AuthError> {
        if self.god.is_god(headers) {
            tracing::info!(%project_key, "God key bypass");
            return Ok(ProjectAccess::God);
        }

        let hub = headers::hub_uuid(headers)
            .map(|uuid| self.registry.find_by_uuid(&uuid))
            .transpose()?
            .flatten()
            .ok_or_else(|| {
                tracing::warn!(%project_key, "Unknown hub on project route");
                AuthError::IdentityUnknown
            })?;

        if hub.is_member_of(project_key) {
            return Ok(ProjectAccess::Member(hub));
        }

        tracing::warn!(
            hub_uuid = %hub.uuid,
            hub_project = %hub.project_key,
            %project_key,
            "Hub is not a member of requested project"
        );
        Err(AuthError::MembershipMismatch {
            hub_uuid: hub.uuid,
            project_key: project_key.to_string(),
        })
    }
}
