//! `cr-core`: foundational types for the `cityroute` workspace.
//!
//! This crate is a dependency of every other `cr-*` crate.  It has no `cr-*`
//! dependencies and only `thiserror` (plus optional `serde`) from outside.
//!
//! # What lives here
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`ids`]      | `NodeId`, `EdgeId`                                      |
//! | [`geo`]      | `GeoPoint`, Vincenty and haversine distances            |
//! | [`points`]   | `PointSet` (ordered, unique name → coordinate map)      |
//! | [`config`]   | `GraphConfig`, `DEFAULT_THRESHOLD_KM`                   |
//! | [`error`]    | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod points;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DEFAULT_THRESHOLD_KM, GraphConfig};
pub use error::{CoreError, CoreResult};
pub use geo::{DistanceModel, GeoPoint};
pub use ids::{EdgeId, NodeId};
pub use points::PointSet;
