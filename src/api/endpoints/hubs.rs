//! Hub endpoints.

use axum::extract::State;
use axum::{Extension, Json};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, AuthenticatedHub, HubView};

/// `GET /api/hubs`: every registered hub. God key only.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<HubView>>, ApiError> {
    let hubs = ctx.core.registry().list_hubs(None)?;
    Ok(Json(hubs.into_iter().map(HubView::from).collect()))
}

/// `GET /api/hubs/me`: the calling hub as just recorded by the identity guard.
pub async fn me(Extension(AuthenticatedHub(hub)): Extension<AuthenticatedHub>) -> Json<HubView> {
    Json(hub.into())
}
