//! Team accounts and their session tokens.

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct TeamUser {
    pub id: i64,
    pub username: String,
    pub session_token: String,
}

pub(crate) fn new_session_token() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Create a team with a freshly issued session token.
pub async fn create_user(pool: &SqlitePool, username: &str) -> Result<TeamUser> {
    let session_token = new_session_token();
    let result = sqlx::query(
        "INSERT INTO users (username, session_token, created_at) VALUES (?1, ?2, ?3)",
    )
    .bind(username)
    .bind(&session_token)
    .bind(Utc::now().to_rfc3339())
    .execute(pool)
    .await?;

    Ok(TeamUser {
        id: result.last_insert_rowid(),
        username: username.to_string(),
        session_token,
    })
}

/// Load all teams.
pub async fn load_all_users(pool: &SqlitePool) -> Result<Vec<TeamUser>> {
    let rows = sqlx::query_as::<_, TeamUser>(
        "SELECT id, username, session_token FROM users ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::init_database;

    #[tokio::test]
    async fn usernames_are_unique() {
        let db = init_database(":memory:", 1).await.unwrap();
        let user = create_user(db.pool(), "testuser").await.unwrap();
        assert!(create_user(db.pool(), "testuser").await.is_err());

        let users = load_all_users(db.pool()).await.unwrap();
        assert_eq!(users, vec![user]);
    }
}
