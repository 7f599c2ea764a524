//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `cities.csv`  (`city,lat,lon,degree`)
//! - `edges.csv`   (`from,to,distance_km`)
//! - `route.csv`   (`step,from,to,leg_km,cumulative_km`)

use std::fs::File;
use std::path::Path;

use csv::Writer;
use tracing::debug;

use cr_spatial::{GeoGraph, Route};

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

pub struct CsvWriter {
    cities:   Writer<File>,
    edges:    Writer<File>,
    route:    Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut cities = Writer::from_path(dir.join("cities.csv"))?;
        cities.write_record(["city", "lat", "lon", "degree"])?;

        let mut edges = Writer::from_path(dir.join("edges.csv"))?;
        edges.write_record(["from", "to", "distance_km"])?;

        let mut route = Writer::from_path(dir.join("route.csv"))?;
        route.write_record(["step", "from", "to", "leg_km", "cumulative_km"])?;

        debug!(dir = %dir.display(), "opened CSV output");
        Ok(Self { cities, edges, route, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_graph(&mut self, graph: &GeoGraph) -> OutputResult<()> {
        for (a, b, km) in graph.edges() {
            self.edges.write_record(&[
                graph.node_name(a).to_owned(),
                graph.node_name(b).to_owned(),
                format!("{km:.3}"),
            ])?;
        }
        Ok(())
    }

    fn write_cities(&mut self, graph: &GeoGraph, cities: &[&str]) -> OutputResult<()> {
        for &name in cities {
            let id = graph
                .node_id(name)
                .ok_or_else(|| OutputError::UnknownCity(name.to_owned()))?;
            let pos = graph.node_pos(id);
            self.cities.write_record(&[
                name.to_owned(),
                pos.lat.to_string(),
                pos.lon.to_string(),
                graph.degree(id).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_route(&mut self, graph: &GeoGraph, route: &Route) -> OutputResult<()> {
        let mut cumulative = 0.0;
        for (step, leg) in route.legs(graph).iter().enumerate() {
            cumulative += leg.km;
            self.route.write_record(&[
                (step + 1).to_string(),
                leg.from.to_owned(),
                leg.to.to_owned(),
                format!("{:.3}", leg.km),
                format!("{cumulative:.3}"),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.cities.flush()?;
        self.edges.flush()?;
        self.route.flush()?;
        Ok(())
    }
}
