//! Judge/admin endpoints. All routes sit behind `require_admin`.

use axum::{extract::State, http::StatusCode, Json};
use interop_core::{AccessLogEntry, Mission, ObstacleSet, ServerInfo, WireRecord};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::persistence::TeamUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<TeamUser>), ApiError> {
    let username = req.username.trim();
    if username.is_empty() {
        return Err(ApiError::BadRequest("username must not be empty".into()));
    }
    let exists = state
        .store()
        .users()
        .await?
        .iter()
        .any(|user| user.username == username);
    if exists {
        return Err(ApiError::Conflict(format!("user `{}` already exists", username)));
    }

    let user = state.register_user(username).await?;
    tracing::info!("Registered team '{}' ({})", user.username, user.id);
    Ok((StatusCode::CREATED, Json(user)))
}

#[derive(Debug, Deserialize)]
pub struct ServerInfoRequest {
    pub message: String,
}

pub async fn set_server_info(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ServerInfoRequest>,
) -> Result<Json<ServerInfo>, ApiError> {
    let info = state.store().set_server_info(&req.message).await?;
    tracing::info!("Server message updated");
    Ok(Json(info))
}

/// Insert or replace a mission. Activating one mission does not
/// deactivate the others.
pub async fn upsert_mission(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<Json<Mission>, ApiError> {
    let mission = Mission::from_wire(&payload)?;
    state.store().upsert_mission(&mission).await?;
    tracing::info!(mission_id = mission.id, active = mission.active, "Stored mission");
    Ok(Json(mission))
}

pub async fn replace_obstacles(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<Json<ObstacleSet>, ApiError> {
    let obstacles: ObstacleSet = serde_json::from_value(payload)
        .map_err(|err| ApiError::BadRequest(format!("invalid obstacle set: {}", err)))?;
    state.store().replace_obstacles(&obstacles).await?;
    tracing::info!(
        stationary = obstacles.stationary_obstacles.len(),
        moving = obstacles.moving_obstacles.len(),
        "Replaced obstacles"
    );
    Ok(Json(obstacles))
}

pub async fn list_access_log(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AccessLogEntry>>, ApiError> {
    Ok(Json(state.store().access_log().await?))
}
