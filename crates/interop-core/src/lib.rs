//! Data contracts exchanged between aircraft, ground clients and the
//! interop server.
//!
//! Every entity is validated once, at the wire boundary, and is held as
//! plain typed data afterwards.

pub mod error;
pub mod geo;
pub mod mission;
pub mod obstacles;
pub mod status;
pub mod target;
pub mod telemetry;
pub mod wire;

pub use error::ValidationError;
pub use geo::{GpsPosition, Waypoint};
pub use mission::{FlyZone, Mission};
pub use obstacles::{MovingObstacle, ObstacleSet, StationaryObstacle};
pub use status::{AccessLogEntry, MissionSummary, ServerInfo, ServerStatus};
pub use target::{Characteristics, Target, TargetKind, TargetType};
pub use telemetry::Telemetry;
pub use wire::{WireMap, WireRecord};
