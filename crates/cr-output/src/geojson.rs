//! GeoJSON output backend.
//!
//! Features are buffered in memory and written as a single
//! `FeatureCollection` to `map.geojson` on [`finish`](OutputWriter::finish).
//! Each feature carries a `kind` property (`edge`, `city` or `route`) and
//! simplestyle `stroke`/`stroke-width`/`stroke-opacity` hints.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tracing::debug;

use cr_core::GeoPoint;
use cr_spatial::{GeoGraph, Route};

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

const EDGE_STROKE:  &str = "#808080";
const ROUTE_STROKE: &str = "#ff0000";
const CITY_MARKER:  &str = "#0000ff";

pub struct GeoJsonWriter {
    path:     PathBuf,
    features: Vec<Value>,
    finished: bool,
}

impl GeoJsonWriter {
    /// Prepare to write `map.geojson` into `dir`.  Nothing touches disk
    /// until [`finish`](OutputWriter::finish).
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join("map.geojson"),
            features: Vec::new(),
            finished: false,
        })
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }
}

/// GeoJSON positions are `[lon, lat]`.
fn position(p: GeoPoint) -> Value {
    json!([p.lon, p.lat])
}

impl OutputWriter for GeoJsonWriter {
    fn write_graph(&mut self, graph: &GeoGraph) -> OutputResult<()> {
        for (a, b, km) in graph.edges() {
            self.features.push(json!({
                "type": "Feature",
                "geometry": {
                    "type": "LineString",
                    "coordinates": [position(graph.node_pos(a)), position(graph.node_pos(b))],
                },
                "properties": {
                    "kind": "edge",
                    "from": graph.node_name(a),
                    "to": graph.node_name(b),
                    "distance_km": km,
                    "stroke": EDGE_STROKE,
                    "stroke-width": 1,
                    "stroke-opacity": 0.3,
                },
            }));
        }
        Ok(())
    }

    fn write_cities(&mut self, graph: &GeoGraph, cities: &[&str]) -> OutputResult<()> {
        for &name in cities {
            let id = graph
                .node_id(name)
                .ok_or_else(|| OutputError::UnknownCity(name.to_owned()))?;
            self.features.push(json!({
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": position(graph.node_pos(id)) },
                "properties": {
                    "kind": "city",
                    "name": name,
                    "degree": graph.degree(id),
                    "marker-color": CITY_MARKER,
                },
            }));
        }
        Ok(())
    }

    fn write_route(&mut self, graph: &GeoGraph, route: &Route) -> OutputResult<()> {
        let coordinates: Vec<Value> = route
            .nodes
            .iter()
            .map(|&n| position(graph.node_pos(n)))
            .collect();
        self.features.push(json!({
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": coordinates },
            "properties": {
                "kind": "route",
                "path": route.names(graph),
                "total_km": route.total_km,
                "stroke": ROUTE_STROKE,
                "stroke-width": 4,
                "stroke-opacity": 1.0,
            },
        }));
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        let collection = json!({
            "type": "FeatureCollection",
            "features": std::mem::take(&mut self.features),
        });
        let mut file = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut file, &collection)?;
        file.flush()?;
        debug!(path = %self.path.display(), "wrote GeoJSON");
        Ok(())
    }
}
