//! Per-invocation state handed explicitly to every subcommand.

use anyhow::{Context, Result};
use tracing::info;

use cr_dataset::Dataset;
use cr_spatial::{GeoGraph, build_graph};

use crate::config::AppConfig;

pub struct AppContext {
    pub config:  AppConfig,
    pub dataset: Dataset,
    pub graph:   GeoGraph,
}

impl AppContext {
    /// Load the configured dataset and build the graph over it.
    pub fn load(config: AppConfig) -> Result<Self> {
        let dataset = match &config.dataset {
            Some(path) => Dataset::from_path(path)
                .with_context(|| format!("loading dataset {}", path.display()))?,
            None => Dataset::embedded().context("loading embedded dataset")?,
        };
        Self::from_parts(config, dataset)
    }

    pub fn from_parts(config: AppConfig, dataset: Dataset) -> Result<Self> {
        config.graph.validate()?;
        let points = dataset.points()?;
        let graph = build_graph(&points, &config.graph);
        info!(
            regions = dataset.region_count(),
            cities = graph.node_count(),
            edges = graph.edge_count(),
            "graph ready"
        );
        Ok(Self { config, dataset, graph })
    }

    /// The requested region, or the first one in the dataset.
    pub fn region_or_default<'a>(&'a self, region: Option<&'a str>) -> Result<&'a str> {
        match region {
            Some(r) => Ok(self.dataset.region(r)?.name()),
            None => self
                .dataset
                .region_names()
                .next()
                .context("dataset has no regions"),
        }
    }
}
