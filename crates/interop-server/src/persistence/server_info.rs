//! Server message persistence. A single row, created on first write.

use anyhow::Result;
use chrono::Utc;
use interop_core::ServerInfo;
use sqlx::SqlitePool;

use super::db::parse_timestamp;

/// Load the current message; empty until one has been set.
pub async fn load_server_info(pool: &SqlitePool) -> Result<ServerInfo> {
    let row = sqlx::query_as::<_, ServerInfoRow>(
        "SELECT message, message_timestamp FROM server_info WHERE id = 1",
    )
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => row.try_into(),
        None => Ok(ServerInfo::default()),
    }
}

/// Replace the message and stamp it with the current time.
pub async fn store_server_info(pool: &SqlitePool, message: &str) -> Result<ServerInfo> {
    let info = ServerInfo {
        message: message.to_string(),
        message_timestamp: Some(Utc::now()),
    };

    sqlx::query(
        r#"
        INSERT INTO server_info (id, message, message_timestamp)
        VALUES (1, ?1, ?2)
        ON CONFLICT(id) DO UPDATE SET
            message = ?1, message_timestamp = ?2
        "#,
    )
    .bind(&info.message)
    .bind(info.message_timestamp.map(|t| t.to_rfc3339()))
    .execute(pool)
    .await?;

    Ok(info)
}

#[derive(sqlx::FromRow)]
struct ServerInfoRow {
    message: String,
    message_timestamp: Option<String>,
}

impl TryFrom<ServerInfoRow> for ServerInfo {
    type Error = anyhow::Error;

    fn try_from(row: ServerInfoRow) -> Result<Self> {
        Ok(ServerInfo {
            message: row.message,
            message_timestamp: row
                .message_timestamp
                .as_deref()
                .map(parse_timestamp)
                .transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::init_database;

    #[tokio::test]
    async fn message_defaults_empty_then_updates() {
        let db = init_database(":memory:", 1).await.unwrap();
        assert_eq!(load_server_info(db.pool()).await.unwrap(), ServerInfo::default());

        store_server_info(db.pool(), "first").await.unwrap();
        let stored = store_server_info(db.pool(), "test message").await.unwrap();
        let loaded = load_server_info(db.pool()).await.unwrap();
        assert_eq!(loaded.message, "test message");
        assert_eq!(loaded.message_timestamp, stored.message_timestamp);
    }
}
