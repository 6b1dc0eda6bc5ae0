//! Obstacle persistence. The set is replaced as a whole.

use anyhow::Result;
use interop_core::{MovingObstacle, ObstacleSet, StationaryObstacle};
use sqlx::SqlitePool;

const STATIONARY: &str = "stationary";
const MOVING: &str = "moving";

pub async fn replace_obstacles(pool: &SqlitePool, set: &ObstacleSet) -> Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM obstacles").execute(&mut *tx).await?;

    for obstacle in &set.stationary_obstacles {
        sqlx::query("INSERT INTO obstacles (kind, payload) VALUES (?1, ?2)")
            .bind(STATIONARY)
            .bind(serde_json::to_string(obstacle)?)
            .execute(&mut *tx)
            .await?;
    }
    for obstacle in &set.moving_obstacles {
        sqlx::query("INSERT INTO obstacles (kind, payload) VALUES (?1, ?2)")
            .bind(MOVING)
            .bind(serde_json::to_string(obstacle)?)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}

pub async fn load_obstacles(pool: &SqlitePool) -> Result<ObstacleSet> {
    let rows = sqlx::query_as::<_, ObstacleRow>("SELECT kind, payload FROM obstacles ORDER BY id")
        .fetch_all(pool)
        .await?;

    let mut set = ObstacleSet::default();
    for row in rows {
        match row.kind.as_str() {
            STATIONARY => set
                .stationary_obstacles
                .push(serde_json::from_str::<StationaryObstacle>(&row.payload)?),
            MOVING => set
                .moving_obstacles
                .push(serde_json::from_str::<MovingObstacle>(&row.payload)?),
            other => anyhow::bail!("unknown obstacle kind `{}`", other),
        }
    }
    Ok(set)
}

#[derive(sqlx::FromRow)]
struct ObstacleRow {
    kind: String,
    payload: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::init_database;

    #[tokio::test]
    async fn replace_swaps_the_whole_set() {
        let db = init_database(":memory:", 1).await.unwrap();
        let first = ObstacleSet {
            stationary_obstacles: vec![StationaryObstacle::new(38, -76, 50, 300).unwrap()],
            moving_obstacles: vec![MovingObstacle::new(38, -76, 200, 30).unwrap()],
        };
        replace_obstacles(db.pool(), &first).await.unwrap();
        assert_eq!(load_obstacles(db.pool()).await.unwrap(), first);

        let second = ObstacleSet {
            stationary_obstacles: vec![],
            moving_obstacles: vec![MovingObstacle::new(39, -77, 150, 20).unwrap()],
        };
        replace_obstacles(db.pool(), &second).await.unwrap();
        assert_eq!(load_obstacles(db.pool()).await.unwrap(), second);
    }
}
