//! Interop server - mission status, telemetry and target reports for
//! competing teams.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use interop_server::api;
use interop_server::config::{Config, LogFormat, DEFAULT_ADMIN_TOKEN};
use interop_server::persistence::{init_database, InteropStore};
use interop_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"))
        .add_directive("interop_server=debug".parse()?);
    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Plain => registry.with(fmt::layer()).init(),
    }

    tracing::info!("Starting interop server...");

    if config.admin_token == DEFAULT_ADMIN_TOKEN {
        tracing::warn!("INTEROP_ADMIN_TOKEN is not set; the admin API uses the default token");
    }

    let db = init_database(&config.database_path, config.database_max_connections).await?;
    let store: Arc<dyn InteropStore> = Arc::new(db);

    if let Some(message) = &config.server_message {
        store.set_server_info(message).await?;
        tracing::info!("Server message set from environment");
    }

    let state = Arc::new(AppState::new(store, config.clone()));
    let sessions = state.load_sessions().await?;
    tracing::info!("Loaded {} team session(s)", sessions);

    let app = api::routes(&config).with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
