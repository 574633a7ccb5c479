//! Hub API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.
//!
//! Middleware stack (outermost → innermost):
//! 1. Access log → 2. App key → 3. Per-route guards → Handler

use std::sync::Arc;

use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the hub API router.
///
/// Middleware uses `Extension<ApiContext>` (injected as the outermost layer).
/// Endpoint handlers use `State<ApiContext>` (provided via `with_state`).
pub fn hub_api_router(core: Arc<CoreState>) -> Router {
    build_router(ApiContext::new(core))
}

fn build_router(ctx: ApiContext) -> Router {
    // Guards are attached with `route_layer` so they only run on matched
    // routes and can read path parameters. The explicit fallback keeps
    // unmatched paths inside this router so they still pass the app key.
    //
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let open: Router<ApiContext> = Router::new().route("/health", get(endpoints::health::check));

    let admin: Router<ApiContext> = Router::new()
        .route("/hubs", get(endpoints::hubs::list))
        .route_layer(from_fn(middleware::god_key::require_god_key));

    let identified: Router<ApiContext> = Router::new()
        .route("/hubs/me", get(endpoints::hubs::me))
        .route_layer(from_fn(middleware::hub_identity::require_hub));

    let project_scoped: Router<ApiContext> = Router::new()
        .route(
            "/projects/:project_key/hubs",
            get(endpoints::projects::hubs),
        )
        .route_layer(from_fn(
            middleware::project_membership::require_project_member,
        ));

    // Identity runs first so the touch is recorded even when membership
    // then refuses the request.
    let identified_project_scoped: Router<ApiContext> = Router::new()
        .route(
            "/projects/:project_key/hub",
            get(endpoints::projects::own_hub),
        )
        .route_layer(from_fn(
            middleware::project_membership::require_project_member,
        ))
        .route_layer(from_fn(middleware::hub_identity::require_hub));

    let api = Router::new()
        .merge(open)
        .merge(admin)
        .merge(identified)
        .merge(project_scoped)
        .merge(identified_project_scoped)
        .fallback(endpoints::not_found)
        .with_state(ctx.clone())
        // Middleware stack (innermost first, outermost last):
        .layer(from_fn(middleware::app_key::require_app_key))
        .layer(from_fn(middleware::audit::log_access))
        // Extension must be outermost so middleware can extract ApiContext
        .layer(axum::Extension(ctx));

    Router::new().nest("/api", api)
}
