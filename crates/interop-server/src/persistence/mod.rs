//! Persistence layer for the interop server.
//!
//! Handlers and the status resolver only see the [`InteropStore`] trait.
//! `Database` backs it with SQLite; `MemoryStore` keeps everything in
//! process and is used by tests.

pub mod access_log;
pub mod db;
pub mod memory;
pub mod missions;
pub mod obstacles;
pub mod server_info;
pub mod targets;
pub mod telemetry;
pub mod users;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use interop_core::{AccessLogEntry, Mission, ObstacleSet, ServerInfo, Target, Telemetry};

pub use db::{init_database, Database};
pub use memory::MemoryStore;
pub use telemetry::TelemetryRecord;
pub use users::TeamUser;

/// Operations the server needs from its backing store.
///
/// Implementations must make each call atomic on its own. Access-log
/// appends in particular must never be lost or merged under concurrent
/// callers.
#[async_trait]
pub trait InteropStore: Send + Sync {
    /// Every mission flagged active. Zero or one is expected.
    async fn active_missions(&self) -> Result<Vec<Mission>>;

    async fn missions(&self) -> Result<Vec<Mission>>;

    /// Insert the mission or replace the one with the same id.
    async fn upsert_mission(&self, mission: &Mission) -> Result<()>;

    async fn server_info(&self) -> Result<ServerInfo>;

    async fn set_server_info(&self, message: &str) -> Result<ServerInfo>;

    async fn append_access(&self, entry: &AccessLogEntry) -> Result<()>;

    /// Access log in insertion order.
    async fn access_log(&self) -> Result<Vec<AccessLogEntry>>;

    /// Create a team account with a fresh session token.
    async fn create_user(&self, username: &str) -> Result<TeamUser>;

    async fn users(&self) -> Result<Vec<TeamUser>>;

    async fn record_telemetry(
        &self,
        user_id: i64,
        telemetry: &Telemetry,
        timestamp: DateTime<Utc>,
    ) -> Result<()>;

    async fn telemetry_for_user(&self, user_id: i64) -> Result<Vec<TelemetryRecord>>;

    async fn obstacles(&self) -> Result<ObstacleSet>;

    /// Replace the whole obstacle set.
    async fn replace_obstacles(&self, obstacles: &ObstacleSet) -> Result<()>;

    /// Store a reported target, assigning its id and owner.
    async fn insert_target(&self, user_id: i64, target: &Target) -> Result<Target>;

    async fn target(&self, id: i64) -> Result<Option<Target>>;

    async fn targets_for_user(&self, user_id: i64) -> Result<Vec<Target>>;
}
