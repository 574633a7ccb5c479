//! Project-scoped endpoints.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, AuthenticatedHub, HubView};
use crate::auth::ProjectAccess;

#[derive(Serialize)]
pub struct ProjectHubsResponse {
    pub project_key: String,
    /// `"god"` or `"member"`.
    pub access: &'static str,
    pub hubs: Vec<HubView>,
}

/// `GET /api/projects/:project_key/hubs`: hubs belonging to the project.
pub async fn hubs(
    State(ctx): State<ApiContext>,
    Path(project_key): Path<String>,
    Extension(access): Extension<ProjectAccess>,
) -> Result<Json<ProjectHubsResponse>, ApiError> {
    let hubs = ctx.core.registry().list_hubs(Some(&project_key))?;
    let access = match access {
        ProjectAccess::God => "god",
        ProjectAccess::Member(_) => "member",
    };

    Ok(Json(ProjectHubsResponse {
        project_key,
        access,
        hubs: hubs.into_iter().map(HubView::from).collect(),
    }))
}

/// `GET /api/projects/:project_key/hub`: the calling hub, after both the
/// identity and membership guards admitted it.
pub async fn own_hub(
    Extension(AuthenticatedHub(hub)): Extension<AuthenticatedHub>,
) -> Json<HubView> {
    Json(hub.into())
}
