//! Status-query access log. Insert-only.

use anyhow::Result;
use interop_core::AccessLogEntry;
use sqlx::SqlitePool;

use super::db::parse_timestamp;

/// Append one access row.
pub async fn append_access(pool: &SqlitePool, entry: &AccessLogEntry) -> Result<()> {
    sqlx::query(
        "INSERT INTO server_info_access_log (user_id, username, timestamp) VALUES (?1, ?2, ?3)",
    )
    .bind(entry.user_id)
    .bind(&entry.username)
    .bind(entry.timestamp.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Load the whole log in insertion order.
pub async fn load_access_log(pool: &SqlitePool) -> Result<Vec<AccessLogEntry>> {
    let rows = sqlx::query_as::<_, AccessLogRow>(
        "SELECT user_id, username, timestamp FROM server_info_access_log ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
}

#[derive(sqlx::FromRow)]
struct AccessLogRow {
    user_id: i64,
    username: String,
    timestamp: String,
}

impl TryFrom<AccessLogRow> for AccessLogEntry {
    type Error = anyhow::Error;

    fn try_from(row: AccessLogRow) -> Result<Self> {
        Ok(AccessLogEntry {
            user_id: row.user_id,
            username: row.username,
            timestamp: parse_timestamp(&row.timestamp)?,
        })
    }
}
