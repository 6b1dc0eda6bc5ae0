//! Status query integration tests against both store backends.
//!
//! The load test is ignored by default. Run with:
//! cargo test --test server_info_test -- --ignored

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use futures::future::join_all;
use interop_core::{FlyZone, GpsPosition, Mission, Waypoint};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceExt;

use interop_server::api;
use interop_server::config::Config;
use interop_server::persistence::{init_database, InteropStore, MemoryStore};
use interop_server::state::AppState;

fn mission(id: i64) -> Mission {
    let wp = Waypoint::new(1, 38.14, -76.43).unwrap().with_altitude(50).unwrap();
    Mission {
        id,
        active: true,
        air_drop_pos: GpsPosition::new(38.141, -76.430).unwrap(),
        home_pos: GpsPosition::new(38.146, -76.428).unwrap(),
        off_axis_target_pos: GpsPosition::new(38.142, -76.434).unwrap(),
        sric_pos: GpsPosition::new(38.145, -76.427).unwrap(),
        fly_zones: vec![FlyZone::new(vec![wp], 100, 750).unwrap()],
        mission_waypoints: vec![wp],
        search_grid_points: vec![wp],
    }
}

/// Router over `store` with one active mission and one team. Returns the
/// team's session token.
async fn app_with(store: Arc<dyn InteropStore>) -> (Router, Arc<AppState>, String) {
    store.upsert_mission(&mission(1)).await.expect("mission");
    store.set_server_info("Fly safe").await.expect("server info");

    let config = Config::from_env();
    let state = Arc::new(AppState::new(store, config.clone()));
    let user = state.register_user("testuser").await.expect("register");
    let router = api::routes(&config).with_state(state.clone());
    (router, state, user.session_token)
}

fn status_request(token: &str) -> Request<Body> {
    Request::builder()
        .uri("/api/server_info")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

async fn fire_concurrently(router: &Router, token: &str, count: usize) -> Vec<StatusCode> {
    let requests = (0..count).map(|_| {
        let router = router.clone();
        let req = status_request(token);
        async move { router.oneshot(req).await.unwrap().status() }
    });
    join_all(requests).await
}

fn temp_db_path() -> String {
    std::env::temp_dir()
        .join(format!("interop-test-{}.db", uuid::Uuid::new_v4()))
        .to_string_lossy()
        .to_string()
}

#[tokio::test]
async fn concurrent_queries_each_log_once_in_memory() {
    let (router, state, token) = app_with(Arc::new(MemoryStore::new())).await;

    let statuses = fire_concurrently(&router, &token, 32).await;
    assert!(statuses.iter().all(|s| *s == StatusCode::OK));

    let log = state.store().access_log().await.unwrap();
    assert_eq!(log.len(), 32);
    assert!(log.iter().all(|entry| entry.username == "testuser"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_queries_each_log_once_in_sqlite() {
    let path = temp_db_path();
    let db = init_database(&path, 4).await.expect("init db");
    let (router, state, token) = app_with(Arc::new(db)).await;

    let handles: Vec<_> = (0..24)
        .map(|_| {
            let router = router.clone();
            let req = status_request(&token);
            tokio::spawn(async move { router.oneshot(req).await.unwrap().status() })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }

    let log = state.store().access_log().await.unwrap();
    assert_eq!(log.len(), 24);
    assert!(log.iter().all(|entry| entry.user_id == log[0].user_id));

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn sessions_survive_a_restart() {
    let path = temp_db_path();
    let token = {
        let db = init_database(&path, 2).await.expect("init db");
        let (_router, _state, token) = app_with(Arc::new(db)).await;
        token
    };

    let db = init_database(&path, 2).await.expect("reopen db");
    let state = Arc::new(AppState::new(Arc::new(db), Config::from_env()));
    assert_eq!(state.load_sessions().await.unwrap(), 1);
    let router = api::routes(state.config()).with_state(state.clone());

    let res = router.oneshot(status_request(&token)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
#[ignore] // Throughput check, run explicitly
async fn status_query_throughput() {
    let (router, state, token) = app_with(Arc::new(MemoryStore::new())).await;
    let min_rate = state.config().loadtest_min_rate;
    let total = 1000;

    let started = Instant::now();
    let statuses = fire_concurrently(&router, &token, total).await;
    let elapsed = started.elapsed().as_secs_f64();

    assert!(statuses.iter().all(|s| *s == StatusCode::OK));
    let rate = total as f64 / elapsed;
    println!("{} status queries in {:.3}s ({:.0}/s)", total, elapsed, rate);
    assert!(rate >= min_rate, "rate {:.0}/s below minimum {:.0}/s", rate, min_rate);
}
