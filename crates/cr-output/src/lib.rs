//! `cr-output`: export writers for city graphs and routes.
//!
//! Two backends are provided:
//!
//! | Backend     | Files created                             |
//! |-------------|-------------------------------------------|
//! | CSV         | `cities.csv`, `edges.csv`, `route.csv`    |
//! | GeoJSON     | `map.geojson`                             |
//!
//! Both implement [`OutputWriter`].  The GeoJSON layer mirrors a web map:
//! thin gray lines for every edge, markers for the selected cities, and a
//! thick red line for the route.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cr_output::{CsvWriter, OutputWriter};
//!
//! let mut w = CsvWriter::new(Path::new("./out"))?;
//! w.write_graph(&graph)?;
//! w.write_route(&graph, &route)?;
//! w.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod geojson;
pub mod writer;


pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use geojson::GeoJsonWriter;
pub use writer::OutputWriter;
