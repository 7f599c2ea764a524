//! Application configuration.
//!
//! Resolution order, lowest to highest precedence:
//!
//! 1. built-in defaults (`GraphConfig::default()`, embedded dataset);
//! 2. the YAML file passed with `--config`;
//! 3. individual command-line flags.
//!
//! ```yaml
//! graph:
//!   threshold_km: 130.0
//!   model: vincenty        # or haversine
//! dataset: data/cities.csv # optional; omit for the embedded table
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use cr_core::{DistanceModel, GraphConfig};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub graph: GraphConfig,
    /// CSV dataset path.  `None` selects the embedded Java table.
    pub dataset: Option<PathBuf>,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_yaml_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: AppConfig = serde_yaml::from_str(text)?;
        Ok(config)
    }

    /// Apply command-line overrides on top of file or default values.
    pub fn apply_overrides(
        &mut self,
        threshold_km: Option<f64>,
        model: Option<DistanceModel>,
        dataset: Option<PathBuf>,
    ) {
        if let Some(t) = threshold_km {
            self.graph.threshold_km = t;
        }
        if let Some(m) = model {
            self.graph.model = m;
        }
        if dataset.is_some() {
            self.dataset = dataset;
        }
    }
}
