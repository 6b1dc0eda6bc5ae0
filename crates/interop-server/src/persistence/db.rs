//! Database connection and initialization.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use interop_core::{AccessLogEntry, Mission, ObstacleSet, ServerInfo, Target, Telemetry};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

use super::{
    access_log, missions, obstacles, server_info, targets, telemetry, users, InteropStore,
    TeamUser, TelemetryRecord,
};

const IN_MEMORY: &str = ":memory:";

/// Database connection wrapper.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Initialize the SQLite database.
///
/// Creates the database file if it doesn't exist, runs migrations,
/// and returns a connection pool. `:memory:` opens a private in-memory
/// database held by a single long-lived connection.
pub async fn init_database(db_path: &str, max_connections: u32) -> Result<Database> {
    let in_memory = db_path == IN_MEMORY;

    if !in_memory {
        if let Some(parent) = Path::new(db_path).parent() {
            std::fs::create_dir_all(parent)?;
        }
    }

    info!("Connecting to database: {}", db_path);

    let mut options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path))?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5));
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let mut pool_options = SqlitePoolOptions::new().max_connections(max_connections.max(1));
    if in_memory {
        pool_options = pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }
    let pool = pool_options.connect_with(options).await?;

    run_migrations(&pool).await?;

    Ok(Database { pool })
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    let migration_sql = include_str!("../../migrations/001_init.sql");

    info!("Running database migrations...");

    for statement in migration_sql.split(';') {
        let statement: String = statement
            .lines()
            .filter(|line| !line.trim().starts_with("--"))
            .collect::<Vec<_>>()
            .join("\n");
        let statement = statement.trim();
        if statement.is_empty() {
            continue;
        }

        if let Err(e) = sqlx::query(statement).execute(pool).await {
            let err_str = e.to_string();
            if err_str.contains("already exists") {
                continue;
            }
            if statement.to_uppercase().starts_with("CREATE") {
                anyhow::bail!("Migration failed on CREATE statement: {}", e);
            }
            warn!("Migration statement failed: {}", e);
        }
    }

    info!("Database migrations complete");
    Ok(())
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}

#[async_trait]
impl InteropStore for Database {
    async fn active_missions(&self) -> Result<Vec<Mission>> {
        missions::load_active_missions(&self.pool).await
    }

    async fn missions(&self) -> Result<Vec<Mission>> {
        missions::load_all_missions(&self.pool).await
    }

    async fn upsert_mission(&self, mission: &Mission) -> Result<()> {
        missions::upsert_mission(&self.pool, mission).await
    }

    async fn server_info(&self) -> Result<ServerInfo> {
        server_info::load_server_info(&self.pool).await
    }

    async fn set_server_info(&self, message: &str) -> Result<ServerInfo> {
        server_info::store_server_info(&self.pool, message).await
    }

    async fn append_access(&self, entry: &AccessLogEntry) -> Result<()> {
        access_log::append_access(&self.pool, entry).await
    }

    async fn access_log(&self) -> Result<Vec<AccessLogEntry>> {
        access_log::load_access_log(&self.pool).await
    }

    async fn create_user(&self, username: &str) -> Result<TeamUser> {
        users::create_user(&self.pool, username).await
    }

    async fn users(&self) -> Result<Vec<TeamUser>> {
        users::load_all_users(&self.pool).await
    }

    async fn record_telemetry(
        &self,
        user_id: i64,
        telemetry: &Telemetry,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        telemetry::insert_telemetry(&self.pool, user_id, telemetry, timestamp).await
    }

    async fn telemetry_for_user(&self, user_id: i64) -> Result<Vec<TelemetryRecord>> {
        telemetry::load_user_telemetry(&self.pool, user_id).await
    }

    async fn obstacles(&self) -> Result<ObstacleSet> {
        obstacles::load_obstacles(&self.pool).await
    }

    async fn replace_obstacles(&self, set: &ObstacleSet) -> Result<()> {
        obstacles::replace_obstacles(&self.pool, set).await
    }

    async fn insert_target(&self, user_id: i64, target: &Target) -> Result<Target> {
        targets::insert_target(&self.pool, user_id, target).await
    }

    async fn target(&self, id: i64) -> Result<Option<Target>> {
        targets::load_target(&self.pool, id).await
    }

    async fn targets_for_user(&self, user_id: i64) -> Result<Vec<Target>> {
        targets::load_user_targets(&self.pool, user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_database() {
        let db = init_database(IN_MEMORY, 1).await.unwrap();

        let result: (i32,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='server_info_access_log'",
        )
        .fetch_one(db.pool())
        .await
        .unwrap();

        assert_eq!(result.0, 1);
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = init_database(IN_MEMORY, 1).await.unwrap();
        run_migrations(db.pool()).await.unwrap();
    }
}
