//! Team-facing endpoints: telemetry upload, obstacles, missions, targets.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use interop_core::{Mission, ObstacleSet, Target, Telemetry, WireRecord};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::state::{AppState, AuthenticatedUser};

/// Record one telemetry report for the caller.
pub async fn post_telemetry(
    State(state): State<Arc<AppState>>,
    caller: AuthenticatedUser,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let telemetry = Telemetry::from_wire(&payload)?;
    state
        .store()
        .record_telemetry(caller.id(), &telemetry, Utc::now())
        .await?;
    Ok(Json(json!({ "message": "UAS Telemetry Successfully Posted." })))
}

pub async fn get_obstacles(
    State(state): State<Arc<AppState>>,
    _caller: AuthenticatedUser,
) -> Result<Json<ObstacleSet>, ApiError> {
    Ok(Json(state.store().obstacles().await?))
}

pub async fn list_missions(
    State(state): State<Arc<AppState>>,
    _caller: AuthenticatedUser,
) -> Result<Json<Vec<Mission>>, ApiError> {
    Ok(Json(state.store().missions().await?))
}

/// Store a target report. Any `id` or `user` in the payload is replaced.
pub async fn post_target(
    State(state): State<Arc<AppState>>,
    caller: AuthenticatedUser,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Target>), ApiError> {
    let target = Target::from_wire(&payload)?;
    let stored = state.store().insert_target(caller.id(), &target).await?;
    tracing::info!(
        user = %caller.username(),
        target_id = ?stored.id,
        target_type = %stored.target_type(),
        "Stored target report"
    );
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn list_targets(
    State(state): State<Arc<AppState>>,
    caller: AuthenticatedUser,
) -> Result<Json<Vec<Target>>, ApiError> {
    Ok(Json(state.store().targets_for_user(caller.id()).await?))
}

/// A team can only see its own reports; others look absent.
pub async fn get_target(
    State(state): State<Arc<AppState>>,
    caller: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Json<Target>, ApiError> {
    state
        .store()
        .target(id)
        .await?
        .filter(|target| target.user == Some(caller.id()))
        .map(Json)
        .ok_or(ApiError::NotFound("target"))
}
