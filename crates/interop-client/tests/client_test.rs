//! Client against an in-process interop server on a loopback port.

use interop_client::{ClientError, InteropClient};
use interop_core::{Characteristics, GpsPosition, Mission, Target, TargetKind, Telemetry};
use interop_server::{
    api,
    config::Config,
    persistence::{InteropStore, MemoryStore},
    state::AppState,
};
use reqwest::StatusCode;
use std::sync::Arc;

async fn spawn_server(active_mission: bool) -> (String, String, Arc<AppState>) {
    let store = Arc::new(MemoryStore::new());
    let pos = GpsPosition::new(38.14, -76.43).unwrap();
    store
        .upsert_mission(&Mission {
            id: 1,
            active: active_mission,
            air_drop_pos: pos,
            home_pos: pos,
            off_axis_target_pos: pos,
            sric_pos: pos,
            fly_zones: vec![],
            mission_waypoints: vec![],
            search_grid_points: vec![],
        })
        .await
        .unwrap();

    let config = Config::from_env();
    let state = Arc::new(AppState::new(store, config.clone()));
    let user = state.register_user("testuser").await.unwrap();
    let app = api::routes(&config).with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), user.session_token, state)
}

#[tokio::test]
async fn team_session_round_trip() {
    let (url, token, state) = spawn_server(true).await;
    let client = InteropClient::new(url).with_session_token(token);

    let status = client.server_info().await.unwrap();
    assert_eq!(status.mission.id, 1);
    assert_eq!(state.store().access_log().await.unwrap().len(), 1);

    let telemetry = Telemetry::new(38.15, -76.42, 120, 270).unwrap();
    client.post_telemetry(&telemetry).await.unwrap();

    let obstacles = client.obstacles().await.unwrap();
    assert!(obstacles.stationary_obstacles.is_empty());
    assert_eq!(client.missions().await.unwrap().len(), 1);

    let target = Target::new(
        TargetKind::Standard(Characteristics::new("n", "circle", "white", "A", "black")),
        38.145,
        -76.425,
    )
    .unwrap();
    let stored = client.post_target(&target).await.unwrap();
    let id = stored.id.unwrap();
    assert_eq!(client.target(id).await.unwrap().characteristics(), target.characteristics());
    assert_eq!(client.targets().await.unwrap().len(), 1);
}

#[tokio::test]
async fn server_errors_carry_status_and_message() {
    let (url, token, _state) = spawn_server(false).await;

    let client = InteropClient::new(url.clone()).with_session_token(token);
    let err = client.server_info().await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert!(matches!(err, ClientError::Server { ref message, .. } if message == "no active mission"));

    let stranger = InteropClient::new(url).with_session_token("not-a-token");
    let err = stranger.target(1).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
}
