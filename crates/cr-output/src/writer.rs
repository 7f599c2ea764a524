//! The `OutputWriter` trait implemented by all backend writers.

use cr_spatial::{GeoGraph, Route};

use crate::OutputResult;

/// Trait implemented by the CSV and GeoJSON writers.
pub trait OutputWriter {
    /// Write every undirected edge of `graph`.
    fn write_graph(&mut self, graph: &GeoGraph) -> OutputResult<()>;

    /// Write the named cities as point features / rows.  Names not present
    /// in `graph` fail with [`OutputError::UnknownCity`](crate::OutputError::UnknownCity).
    fn write_cities(&mut self, graph: &GeoGraph, cities: &[&str]) -> OutputResult<()>;

    /// Write one route, hop by hop.
    fn write_route(&mut self, graph: &GeoGraph, route: &Route) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
