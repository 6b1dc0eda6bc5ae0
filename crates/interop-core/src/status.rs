//! Server status payload and access-audit records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::GpsPosition;
use crate::mission::Mission;

/// Free-text message the judges broadcast to every team.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub message: String,
    /// When the message was last changed; unset until the first update.
    #[serde(default)]
    pub message_timestamp: Option<DateTime<Utc>>,
}

/// Mission configuration a team needs from a status query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionSummary {
    pub id: i64,
    pub home_pos: GpsPosition,
    pub air_drop_pos: GpsPosition,
    pub off_axis_target_pos: GpsPosition,
    pub sric_pos: GpsPosition,
    pub fly_zone_count: usize,
    pub mission_waypoint_count: usize,
    pub search_grid_point_count: usize,
}

impl From<&Mission> for MissionSummary {
    fn from(mission: &Mission) -> Self {
        Self {
            id: mission.id,
            home_pos: mission.home_pos,
            air_drop_pos: mission.air_drop_pos,
            off_axis_target_pos: mission.off_axis_target_pos,
            sric_pos: mission.sric_pos,
            fly_zone_count: mission.fly_zones.len(),
            mission_waypoint_count: mission.mission_waypoints.len(),
            search_grid_point_count: mission.search_grid_points.len(),
        }
    }
}

/// Response to a status query. Assembled per request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerStatus {
    pub server_info: ServerInfo,
    pub server_time: DateTime<Utc>,
    pub mission: MissionSummary,
}

/// One successful status query. Entries are only ever appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessLogEntry {
    pub user_id: i64,
    pub username: String,
    pub timestamp: DateTime<Utc>,
}
