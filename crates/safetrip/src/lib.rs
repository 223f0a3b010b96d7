//! Risk scoring, geofence and incident filtering for travel-safety assessments.
//!
//! Every engine entry point is a pure function over an immutable [`catalog::Catalog`]
//! and a caller-owned input snapshot. Callers keep all interaction state themselves.

pub mod assessment;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod error;
pub mod geofence;
pub mod incidents;
pub mod resources;
pub mod router;
pub mod telemetry;
