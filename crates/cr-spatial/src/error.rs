//! Spatial-subsystem error type.

use thiserror::Error;

use cr_core::NodeId;

/// Errors produced by `cr-spatial`.
///
/// `InvalidInput` and `NoPathFound` are deliberately distinct: the first is
/// a caller mistake, the second a legitimate answer for a disconnected graph.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("unknown city {name:?}")]
    InvalidInput { name: String },

    #[error("no path from {from} to {to}")]
    NoPathFound { from: String, to: String },

    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error("duplicate node name {0:?}")]
    DuplicateNode(String),

    #[error("self-loop on {0}")]
    SelfLoop(NodeId),

    #[error("edge {a}-{b} has invalid weight {km} km")]
    NegativeWeight { a: NodeId, b: NodeId, km: f64 },

    #[error("edge {a}-{b} already exists")]
    DuplicateEdge { a: NodeId, b: NodeId },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
