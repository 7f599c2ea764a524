//! `cr-spatial`: geo-graph construction and routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`network`] | `GeoGraph` (CSR + R-tree), `GeoGraphBuilder`, `build_graph`   |
//! | [`router`]  | `Router` trait, `Route`, `DijkstraRouter`, `shortest_route`   |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod network;
pub mod router;


pub use error::{SpatialError, SpatialResult};
pub use network::{GeoGraph, GeoGraphBuilder, build_graph};
pub use router::{DijkstraRouter, Leg, Route, Router, shortest_route, shortest_route_with};
