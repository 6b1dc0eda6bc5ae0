//! Router assembly.

use axum::{
    middleware,
    routing::{any, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::auth::{self, AdminToken};
use crate::api::{admin, request_id, server_info, teams};
use crate::config::Config;
use crate::state::AppState;

/// Create the API router.
pub fn create_router(config: &Config) -> Router<Arc<AppState>> {
    let admin_token = AdminToken(Arc::new(config.admin_token.clone()));

    // Team routes authenticate per handler through the `AuthenticatedUser`
    // extractor. The status route takes every method and lets the resolver
    // decide, so that unauthenticated callers are refused before the method
    // is looked at.
    let team_routes = Router::new()
        .route("/api/server_info", any(server_info::get_server_info))
        .route("/api/telemetry", post(teams::post_telemetry))
        .route("/api/obstacles", get(teams::get_obstacles))
        .route("/api/missions", get(teams::list_missions))
        .route(
            "/api/targets",
            post(teams::post_target).get(teams::list_targets),
        )
        .route("/api/targets/:id", get(teams::get_target));

    let admin_routes = Router::new()
        .route("/api/admin/users", post(admin::create_user))
        .route("/api/admin/server_info", put(admin::set_server_info))
        .route("/api/admin/missions", post(admin::upsert_mission))
        .route("/api/admin/obstacles", put(admin::replace_obstacles))
        .route("/api/admin/access_log", get(admin::list_access_log))
        .layer(middleware::from_fn_with_state(admin_token, auth::require_admin));

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .merge(team_routes)
        .merge(admin_routes)
        .layer(middleware::from_fn(request_id::tag_request))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
