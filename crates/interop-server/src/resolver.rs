//! Status query resolution.
//!
//! A status query passes the auth gate, the method check and the
//! active-mission lookup, in that order, before anything is written. Only
//! then is the access recorded and the payload assembled.

use axum::http::Method;
use chrono::Utc;
use interop_core::{AccessLogEntry, MissionSummary, ServerStatus};
use thiserror::Error;

use crate::persistence::InteropStore;
use crate::state::AuthenticatedUser;

#[derive(Debug, Error)]
pub enum StatusQueryError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("status queries must use GET, got {0}")]
    BadRequest(String),

    #[error("no active mission")]
    NoActiveMission,

    /// More than one mission is flagged active. Treated as a
    /// misconfiguration rather than guessing which one is meant.
    #[error("{0} missions are flagged active, expected exactly one")]
    MultipleActiveMissions(usize),

    #[error("store failure: {0}")]
    Store(#[from] anyhow::Error),
}

/// Resolve one status query for `caller`.
///
/// No store call is made unless the caller is authenticated and the method
/// is GET. The access entry is appended exactly once, and only after the
/// single active mission has been found.
pub async fn resolve_status(
    store: &dyn InteropStore,
    caller: Option<&AuthenticatedUser>,
    method: &Method,
) -> Result<ServerStatus, StatusQueryError> {
    let user = caller.ok_or(StatusQueryError::Unauthenticated)?;

    if *method != Method::GET {
        return Err(StatusQueryError::BadRequest(method.to_string()));
    }

    let mut active = store.active_missions().await?;
    let mission = match active.len() {
        0 => return Err(StatusQueryError::NoActiveMission),
        1 => active.remove(0),
        n => return Err(StatusQueryError::MultipleActiveMissions(n)),
    };

    let entry = AccessLogEntry {
        user_id: user.id(),
        username: user.username().to_string(),
        timestamp: Utc::now(),
    };
    store.append_access(&entry).await?;

    let server_info = store.server_info().await?;
    tracing::debug!(user = %user.username(), mission_id = mission.id, "served status query");

    Ok(ServerStatus {
        server_info,
        server_time: Utc::now(),
        mission: MissionSummary::from(&mission),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, TeamUser};
    use interop_core::{GpsPosition, Mission};

    fn mission(id: i64, active: bool) -> Mission {
        let pos = GpsPosition::new(0, 0).unwrap();
        Mission {
            id,
            active,
            air_drop_pos: pos,
            home_pos: pos,
            off_axis_target_pos: pos,
            sric_pos: pos,
            fly_zones: vec![],
            mission_waypoints: vec![],
            search_grid_points: vec![],
        }
    }

    fn caller() -> AuthenticatedUser {
        AuthenticatedUser::from_user(&TeamUser {
            id: 1,
            username: "testuser".into(),
            session_token: "token".into(),
        })
    }

    async fn store_with(missions: &[Mission]) -> MemoryStore {
        let store = MemoryStore::new();
        for m in missions {
            store.upsert_mission(m).await.unwrap();
        }
        store.set_server_info("test message").await.unwrap();
        store
    }

    #[tokio::test]
    async fn unauthenticated_caller_touches_nothing() {
        let store = store_with(&[mission(1, true)]).await;
        let err = resolve_status(&store, None, &Method::GET).await.unwrap_err();
        assert!(matches!(err, StatusQueryError::Unauthenticated));
        assert_eq!(store.mission_lookups(), 0);
        assert!(store.access_log().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn wrong_method_is_bad_request() {
        let store = store_with(&[mission(1, true)]).await;
        let user = caller();
        let err = resolve_status(&store, Some(&user), &Method::POST)
            .await
            .unwrap_err();
        assert!(matches!(err, StatusQueryError::BadRequest(ref m) if m == "POST"));
        assert_eq!(store.mission_lookups(), 0);
        assert!(store.access_log().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn no_active_mission_writes_no_audit() {
        let store = store_with(&[mission(1, false)]).await;
        let user = caller();
        let err = resolve_status(&store, Some(&user), &Method::GET)
            .await
            .unwrap_err();
        assert!(matches!(err, StatusQueryError::NoActiveMission));
        assert!(store.access_log().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn multiple_active_missions_are_rejected() {
        let store = store_with(&[mission(1, true), mission(2, true)]).await;
        let user = caller();
        let err = resolve_status(&store, Some(&user), &Method::GET)
            .await
            .unwrap_err();
        assert!(matches!(err, StatusQueryError::MultipleActiveMissions(2)));
        assert!(store.access_log().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn each_success_appends_one_entry() {
        let store = store_with(&[mission(3, true), mission(4, false)]).await;
        let user = caller();

        let status = resolve_status(&store, Some(&user), &Method::GET).await.unwrap();
        assert_eq!(status.server_info.message, "test message");
        assert_eq!(status.mission.id, 3);

        resolve_status(&store, Some(&user), &Method::GET).await.unwrap();
        let log = store.access_log().await.unwrap();
        assert_eq!(log.len(), 2);
        assert!(log.iter().all(|e| e.user_id == 1 && e.username == "testuser"));
        assert!(log[0].timestamp <= log[1].timestamp);
    }
}
