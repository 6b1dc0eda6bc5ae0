//! Mission persistence operations.
//!
//! Missions are stored as their JSON wire form, so loading re-runs the
//! same validation as an inbound payload.

use anyhow::Result;
use chrono::Utc;
use interop_core::Mission;
use sqlx::SqlitePool;

/// Upsert a mission into the database.
pub async fn upsert_mission(pool: &SqlitePool, mission: &Mission) -> Result<()> {
    let payload = serde_json::to_string(mission)?;

    sqlx::query(
        r#"
        INSERT INTO missions (id, active, payload, updated_at)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT(id) DO UPDATE SET
            active = ?2, payload = ?3, updated_at = ?4
        "#,
    )
    .bind(mission.id)
    .bind(mission.active)
    .bind(&payload)
    .bind(Utc::now().to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Load every mission flagged active, lowest id first.
pub async fn load_active_missions(pool: &SqlitePool) -> Result<Vec<Mission>> {
    let rows = sqlx::query_as::<_, MissionRow>(
        "SELECT payload FROM missions WHERE active = 1 ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
}

/// Load all missions, lowest id first.
pub async fn load_all_missions(pool: &SqlitePool) -> Result<Vec<Mission>> {
    let rows = sqlx::query_as::<_, MissionRow>("SELECT payload FROM missions ORDER BY id")
        .fetch_all(pool)
        .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
}

#[derive(sqlx::FromRow)]
struct MissionRow {
    payload: String,
}

impl TryFrom<MissionRow> for Mission {
    type Error = anyhow::Error;

    fn try_from(row: MissionRow) -> Result<Self> {
        Ok(serde_json::from_str(&row.payload)?)
    }
}
