//! Competition interop server: status queries, telemetry uploads and
//! target reports over HTTP.

pub mod api;
pub mod config;
pub mod persistence;
pub mod resolver;
pub mod state;
