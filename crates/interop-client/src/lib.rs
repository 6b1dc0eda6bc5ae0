//! Interop client - team-side access to the competition interop server.

pub mod client;
pub mod error;

pub use client::InteropClient;
pub use error::ClientError;
pub use interop_core::{Mission, ObstacleSet, ServerStatus, Target, Telemetry};
