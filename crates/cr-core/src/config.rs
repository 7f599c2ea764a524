//! Graph construction parameters.

use crate::{CoreError, CoreResult, DistanceModel};

/// Pairs strictly closer than this are joined by an edge.
pub const DEFAULT_THRESHOLD_KM: f64 = 130.0;

/// Parameters for the geo-graph builder.
///
/// The defaults reproduce the shipped behaviour: 130 km cutoff measured on
/// the WGS-84 ellipsoid.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GraphConfig {
    /// Connection cutoff in kilometres (exclusive).
    pub threshold_km: f64,
    /// Distance formula used for both the cutoff test and the edge weight.
    pub model: DistanceModel,
}

impl GraphConfig {
    /// Reject thresholds that would make the graph meaningless.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.threshold_km.is_finite() || self.threshold_km <= 0.0 {
            return Err(CoreError::Config(format!(
                "threshold_km must be a positive finite number, got {}",
                self.threshold_km
            )));
        }
        Ok(())
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            threshold_km: DEFAULT_THRESHOLD_KM,
            model: DistanceModel::default(),
        }
    }
}
