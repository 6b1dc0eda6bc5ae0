//! Interop CLI - command line helpers for teams.
//!
//! - `orbit`: synthetic telemetry along a circular track

pub mod orbit;

pub use orbit::Orbit;
