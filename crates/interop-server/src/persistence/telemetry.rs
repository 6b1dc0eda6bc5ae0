//! UAS telemetry persistence.

use anyhow::Result;
use chrono::{DateTime, Utc};
use interop_core::Telemetry;
use serde::Serialize;
use sqlx::SqlitePool;

use super::db::parse_timestamp;

/// One telemetry upload, stamped with the uploading team and server time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryRecord {
    pub user_id: i64,
    pub timestamp: DateTime<Utc>,
    pub telemetry: Telemetry,
}

pub async fn insert_telemetry(
    pool: &SqlitePool,
    user_id: i64,
    telemetry: &Telemetry,
    timestamp: DateTime<Utc>,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO uas_telemetry (user_id, latitude, longitude, altitude_msl, uas_heading, timestamp)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(user_id)
    .bind(telemetry.latitude)
    .bind(telemetry.longitude)
    .bind(telemetry.altitude_msl)
    .bind(telemetry.uas_heading)
    .bind(timestamp.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Load a team's uploads, oldest first.
pub async fn load_user_telemetry(pool: &SqlitePool, user_id: i64) -> Result<Vec<TelemetryRecord>> {
    let rows = sqlx::query_as::<_, TelemetryRow>(
        r#"
        SELECT user_id, latitude, longitude, altitude_msl, uas_heading, timestamp
        FROM uas_telemetry WHERE user_id = ?1 ORDER BY id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
}

#[derive(sqlx::FromRow)]
struct TelemetryRow {
    user_id: i64,
    latitude: f64,
    longitude: f64,
    altitude_msl: f64,
    uas_heading: f64,
    timestamp: String,
}

impl TryFrom<TelemetryRow> for TelemetryRecord {
    type Error = anyhow::Error;

    fn try_from(row: TelemetryRow) -> Result<Self> {
        Ok(TelemetryRecord {
            user_id: row.user_id,
            timestamp: parse_timestamp(&row.timestamp)?,
            telemetry: Telemetry {
                latitude: row.latitude,
                longitude: row.longitude,
                altitude_msl: row.altitude_msl,
                uas_heading: row.uas_heading,
            },
        })
    }
}
