//! Target report persistence.
//!
//! The payload column holds the wire form without `id` and `user`; those
//! live in their own columns and are applied on load.

use anyhow::Result;
use chrono::Utc;
use interop_core::Target;
use sqlx::SqlitePool;

/// Store a report and return it with its assigned id and owner.
pub async fn insert_target(pool: &SqlitePool, user_id: i64, target: &Target) -> Result<Target> {
    let mut stored = target.clone();
    stored.id = None;
    stored.user = None;
    let payload = serde_json::to_string(&stored)?;

    let result = sqlx::query("INSERT INTO targets (user_id, payload, created_at) VALUES (?1, ?2, ?3)")
        .bind(user_id)
        .bind(&payload)
        .bind(Utc::now().to_rfc3339())
        .execute(pool)
        .await?;

    Ok(stored.with_id(result.last_insert_rowid()).with_user(user_id))
}

pub async fn load_target(pool: &SqlitePool, id: i64) -> Result<Option<Target>> {
    let row = sqlx::query_as::<_, TargetRow>("SELECT id, user_id, payload FROM targets WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.map(|r| r.try_into()).transpose()
}

/// Load a team's reports, oldest first.
pub async fn load_user_targets(pool: &SqlitePool, user_id: i64) -> Result<Vec<Target>> {
    let rows = sqlx::query_as::<_, TargetRow>(
        "SELECT id, user_id, payload FROM targets WHERE user_id = ?1 ORDER BY id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
}

#[derive(sqlx::FromRow)]
struct TargetRow {
    id: i64,
    user_id: i64,
    payload: String,
}

impl TryFrom<TargetRow> for Target {
    type Error = anyhow::Error;

    fn try_from(row: TargetRow) -> Result<Self> {
        let target: Target = serde_json::from_str(&row.payload)?;
        Ok(target.with_id(row.id).with_user(row.user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::init_database;
    use interop_core::TargetKind;

    #[tokio::test]
    async fn insert_assigns_id_and_owner() {
        let db = init_database(":memory:", 1).await.unwrap();
        let report = Target::new(
            TargetKind::Qrc {
                description: "http://test.com".into(),
            },
            38.1,
            -76.4,
        )
        .unwrap()
        .with_user(99);

        let stored = insert_target(db.pool(), 4, &report).await.unwrap();
        assert_eq!(stored.user, Some(4));
        let id = stored.id.unwrap();

        assert_eq!(load_target(db.pool(), id).await.unwrap(), Some(stored.clone()));
        assert_eq!(load_user_targets(db.pool(), 4).await.unwrap(), vec![stored]);
        assert!(load_user_targets(db.pool(), 5).await.unwrap().is_empty());
        assert_eq!(load_target(db.pool(), id + 1).await.unwrap(), None);
    }
}
