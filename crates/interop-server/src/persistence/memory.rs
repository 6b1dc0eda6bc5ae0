//! In-process store used by tests and throwaway servers.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use interop_core::{AccessLogEntry, Mission, ObstacleSet, ServerInfo, Target, Telemetry};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::users::new_session_token;
use super::{InteropStore, TeamUser, TelemetryRecord};

#[derive(Default)]
struct Tables {
    missions: Vec<Mission>,
    server_info: ServerInfo,
    access_log: Vec<AccessLogEntry>,
    users: Vec<TeamUser>,
    telemetry: Vec<TelemetryRecord>,
    obstacles: ObstacleSet,
    targets: Vec<Target>,
}

/// Mutex-guarded tables. The lock is only held for the body of a single
/// call, never across an await.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    mission_lookups: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active-mission lookups served so far.
    pub fn mission_lookups(&self) -> usize {
        self.mission_lookups.load(Ordering::SeqCst)
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))
    }
}

#[async_trait]
impl InteropStore for MemoryStore {
    async fn active_missions(&self) -> Result<Vec<Mission>> {
        self.mission_lookups.fetch_add(1, Ordering::SeqCst);
        let tables = self.tables()?;
        let mut active: Vec<Mission> = tables.missions.iter().filter(|m| m.active).cloned().collect();
        active.sort_by_key(|m| m.id);
        Ok(active)
    }

    async fn missions(&self) -> Result<Vec<Mission>> {
        let mut missions = self.tables()?.missions.clone();
        missions.sort_by_key(|m| m.id);
        Ok(missions)
    }

    async fn upsert_mission(&self, mission: &Mission) -> Result<()> {
        let mut tables = self.tables()?;
        match tables.missions.iter_mut().find(|m| m.id == mission.id) {
            Some(existing) => *existing = mission.clone(),
            None => tables.missions.push(mission.clone()),
        }
        Ok(())
    }

    async fn server_info(&self) -> Result<ServerInfo> {
        Ok(self.tables()?.server_info.clone())
    }

    async fn set_server_info(&self, message: &str) -> Result<ServerInfo> {
        let info = ServerInfo {
            message: message.to_string(),
            message_timestamp: Some(Utc::now()),
        };
        self.tables()?.server_info = info.clone();
        Ok(info)
    }

    async fn append_access(&self, entry: &AccessLogEntry) -> Result<()> {
        self.tables()?.access_log.push(entry.clone());
        Ok(())
    }

    async fn access_log(&self) -> Result<Vec<AccessLogEntry>> {
        Ok(self.tables()?.access_log.clone())
    }

    async fn create_user(&self, username: &str) -> Result<TeamUser> {
        let mut tables = self.tables()?;
        if tables.users.iter().any(|u| u.username == username) {
            anyhow::bail!("user `{}` already exists", username);
        }
        let user = TeamUser {
            id: tables.users.len() as i64 + 1,
            username: username.to_string(),
            session_token: new_session_token(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn users(&self) -> Result<Vec<TeamUser>> {
        Ok(self.tables()?.users.clone())
    }

    async fn record_telemetry(
        &self,
        user_id: i64,
        telemetry: &Telemetry,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        self.tables()?.telemetry.push(TelemetryRecord {
            user_id,
            timestamp,
            telemetry: *telemetry,
        });
        Ok(())
    }

    async fn telemetry_for_user(&self, user_id: i64) -> Result<Vec<TelemetryRecord>> {
        Ok(self
            .tables()?
            .telemetry
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn obstacles(&self) -> Result<ObstacleSet> {
        Ok(self.tables()?.obstacles.clone())
    }

    async fn replace_obstacles(&self, obstacles: &ObstacleSet) -> Result<()> {
        self.tables()?.obstacles = obstacles.clone();
        Ok(())
    }

    async fn insert_target(&self, user_id: i64, target: &Target) -> Result<Target> {
        let mut tables = self.tables()?;
        let id = tables.targets.len() as i64 + 1;
        let stored = target.clone().with_id(id).with_user(user_id);
        tables.targets.push(stored.clone());
        Ok(stored)
    }

    async fn target(&self, id: i64) -> Result<Option<Target>> {
        Ok(self
            .tables()?
            .targets
            .iter()
            .find(|t| t.id == Some(id))
            .cloned())
    }

    async fn targets_for_user(&self, user_id: i64) -> Result<Vec<Target>> {
        Ok(self
            .tables()?
            .targets
            .iter()
            .filter(|t| t.user == Some(user_id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_usernames_are_rejected() {
        let store = MemoryStore::new();
        let user = store.create_user("testuser").await.unwrap();
        assert_eq!(user.id, 1);
        assert!(store.create_user("testuser").await.is_err());
        assert_eq!(store.users().await.unwrap(), vec![user]);
    }

    #[tokio::test]
    async fn lookups_are_counted() {
        let store = MemoryStore::new();
        assert_eq!(store.mission_lookups(), 0);
        assert!(store.active_missions().await.unwrap().is_empty());
        assert_eq!(store.mission_lookups(), 1);
    }
}
