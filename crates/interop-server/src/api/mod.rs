//! HTTP surface of the interop server.

pub mod admin;
pub mod auth;
pub mod error;
pub mod request_id;
mod routes;
pub mod server_info;
pub mod teams;

use crate::config::Config;
use axum::Router;

pub fn routes(config: &Config) -> Router<std::sync::Arc<crate::state::AppState>> {
    routes::create_router(config)
}
