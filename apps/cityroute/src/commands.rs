//! Subcommand handlers.
//!
//! Each handler writes human-readable output to `out` and returns the
//! process exit code.  Errors bubble up as `anyhow::Error` and exit with 1.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};
use tracing::{info, warn};

use cr_core::GeoPoint;
use cr_output::{CsvWriter, GeoJsonWriter, OutputWriter};
use cr_spatial::{Route, SpatialError, shortest_route};

use crate::context::AppContext;

pub const EXIT_OK: u8 = 0;
/// Both cities exist but lie in different components.
pub const EXIT_NO_PATH: u8 = 2;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Geojson,
}

// ── Arguments ─────────────────────────────────────────────────────────────────

#[derive(Args, Debug, Default)]
pub struct CitiesArgs {
    /// Only list this region.
    #[arg(long)]
    pub region: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct RouteArgs {
    /// Region whose alphabetical first/last cities are the default endpoints.
    #[arg(long)]
    pub region: Option<String>,

    /// Origin city.
    #[arg(long)]
    pub from: Option<String>,

    /// Destination city.
    #[arg(long)]
    pub to: Option<String>,

    /// Write the graph, region markers and route here.
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t)]
    pub format: ExportFormat,
}

#[derive(Args, Debug, Default)]
pub struct GraphArgs {
    /// Write every edge and city here.
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t)]
    pub format: ExportFormat,
}

#[derive(Args, Debug)]
pub struct NearestArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,
}

// ── Handlers ──────────────────────────────────────────────────────────────────

pub fn run_regions(ctx: &AppContext, out: &mut impl Write) -> Result<u8> {
    for region in ctx.dataset.regions() {
        writeln!(out, "{:<16} {:>3} cities", region.name(), region.cities().len())?;
    }
    Ok(EXIT_OK)
}

pub fn run_cities(ctx: &AppContext, args: &CitiesArgs, out: &mut impl Write) -> Result<u8> {
    let regions: Vec<&str> = match &args.region {
        Some(r) => vec![ctx.dataset.region(r)?.name()],
        None => ctx.dataset.region_names().collect(),
    };
    for region in regions {
        writeln!(out, "{region}")?;
        for name in ctx.dataset.sorted_city_names(region)? {
            let pos = ctx.dataset.city(name).context("city vanished from dataset")?;
            writeln!(out, "  {name:<16} {pos}")?;
        }
    }
    Ok(EXIT_OK)
}

pub fn run_route(ctx: &AppContext, args: &RouteArgs, out: &mut impl Write) -> Result<u8> {
    let region = ctx.region_or_default(args.region.as_deref())?;
    let (default_from, default_to) = ctx.dataset.default_endpoints(region)?;
    let from = args.from.as_deref().unwrap_or(default_from);
    let to = args.to.as_deref().unwrap_or(default_to);

    match shortest_route(&ctx.graph, from, to) {
        Ok(route) => {
            writeln!(out, "Total distance: {:.2} km", route.total_km)?;
            writeln!(out, "Route path: {}", route.names(&ctx.graph).join(" -> "))?;
            if let Some(dir) = &args.export_dir {
                let markers = ctx.dataset.sorted_city_names(region)?;
                export(ctx, dir, args.format, &markers, Some(&route))?;
                writeln!(out, "Exported to {}", dir.display())?;
            }
            Ok(EXIT_OK)
        }
        Err(SpatialError::NoPathFound { from, to }) => {
            warn!(%from, %to, "no path");
            writeln!(out, "Path not connected: {from} -> {to}")?;
            Ok(EXIT_NO_PATH)
        }
        Err(e) => Err(e.into()),
    }
}

pub fn run_graph(ctx: &AppContext, args: &GraphArgs, out: &mut impl Write) -> Result<u8> {
    let g = &ctx.graph;
    let components = g.connected_components();
    writeln!(out, "Cities:     {}", g.node_count())?;
    writeln!(out, "Edges:      {}", g.edge_count())?;
    writeln!(out, "Components: {}", components.len())?;
    writeln!(
        out,
        "Threshold:  {} km ({})",
        ctx.config.graph.threshold_km, ctx.config.graph.model
    )?;
    if components.len() > 1 {
        for (i, comp) in components.iter().enumerate() {
            let names: Vec<&str> = comp.iter().map(|&n| g.node_name(n)).collect();
            writeln!(out, "  [{}] {} cities: {}", i + 1, comp.len(), names.join(", "))?;
        }
    }

    if let Some(dir) = &args.export_dir {
        let all: Vec<&str> = g.nodes().map(|n| g.node_name(n)).collect();
        export(ctx, dir, args.format, &all, None)?;
        writeln!(out, "Exported to {}", dir.display())?;
    }
    Ok(EXIT_OK)
}

pub fn run_nearest(ctx: &AppContext, args: &NearestArgs, out: &mut impl Write) -> Result<u8> {
    let pos = GeoPoint::try_new(args.lat, args.lon)?;
    let Some(id) = ctx.graph.nearest_node(pos) else {
        bail!("dataset has no cities");
    };
    let name = ctx.graph.node_name(id);
    let km = pos.distance_km(ctx.graph.node_pos(id), ctx.config.graph.model);
    let region = ctx.dataset.region_of(name).unwrap_or("?");
    writeln!(out, "{name} ({region}), {km:.2} km away")?;
    Ok(EXIT_OK)
}

// ── Export ────────────────────────────────────────────────────────────────────

fn export(
    ctx: &AppContext,
    dir: &Path,
    format: ExportFormat,
    markers: &[&str],
    route: Option<&Route>,
) -> Result<()> {
    let mut writer: Box<dyn OutputWriter> = match format {
        ExportFormat::Csv => Box::new(CsvWriter::new(dir)?),
        ExportFormat::Geojson => Box::new(GeoJsonWriter::new(dir)?),
    };
    writer.write_graph(&ctx.graph)?;
    writer.write_cities(&ctx.graph, markers)?;
    if let Some(route) = route {
        writer.write_route(&ctx.graph, route)?;
    }
    writer.finish()?;
    info!(dir = %dir.display(), ?format, "export complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use cr_core::GeoPoint;
    use cr_dataset::Dataset;
    use cr_spatial::SpatialError;

    use super::*;
    use crate::config::AppConfig;

    fn synthetic() -> AppContext {
        // A-B-D-C: a chain of ~111 km hops, no direct edge spans two hops.
        let csv = "region,city,lat,lon\nLine,A,0.0,0.0\nLine,B,0.0,1.0\nLine,C,0.0,3.0\nOther,D,0.0,2.0\n";
        let ds = Dataset::from_reader(csv.as_bytes()).unwrap();
        AppContext::from_parts(AppConfig::default(), ds).unwrap()
    }

    fn embedded() -> AppContext {
        AppContext::from_parts(AppConfig::default(), Dataset::embedded().unwrap()).unwrap()
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn route_through_intermediate() {
        let ctx = synthetic();
        let args = RouteArgs { from: Some("A".into()), to: Some("C".into()), ..Default::default() };
        let mut buf = Vec::new();
        assert_eq!(run_route(&ctx, &args, &mut buf).unwrap(), EXIT_OK);
        let text = output(buf);
        assert!(text.contains("Route path: A -> B -> D -> C"), "{text}");
        assert!(text.contains("Total distance: 333.9"), "{text}");
    }

    #[test]
    fn disconnected_exit_code() {
        let csv = "region,city,lat,lon\nLine,A,0.0,0.0\nLine,B,0.0,1.0\nLine,C,0.0,3.0\n";
        let ds = Dataset::from_reader(csv.as_bytes()).unwrap();
        let ctx = AppContext::from_parts(AppConfig::default(), ds).unwrap();

        // Defaults: alphabetically first and last of "Line" → A and C.
        let mut buf = Vec::new();
        let code = run_route(&ctx, &RouteArgs::default(), &mut buf).unwrap();
        assert_eq!(code, EXIT_NO_PATH);
        assert!(output(buf).contains("Path not connected: A -> C"));
    }

    #[test]
    fn unknown_city_is_error() {
        let ctx = synthetic();
        let args = RouteArgs { from: Some("Atlantis".into()), ..Default::default() };
        let err = run_route(&ctx, &args, &mut Vec::new()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SpatialError>(),
            Some(SpatialError::InvalidInput { name }) if name == "Atlantis"
        ));
    }

    #[test]
    fn unknown_region_is_error() {
        let ctx = synthetic();
        let args = RouteArgs { region: Some("Bali".into()), ..Default::default() };
        assert!(run_route(&ctx, &args, &mut Vec::new()).is_err());
    }

    #[test]
    fn embedded_bandung_to_surabaya() {
        let ctx = embedded();
        let route = shortest_route(&ctx.graph, "Bandung", "Surabaya").unwrap();
        let names = route.names(&ctx.graph);
        assert_eq!(names.first(), Some(&"Bandung"));
        assert_eq!(names.last(), Some(&"Surabaya"));
        assert!(names.len() > 2, "no direct edge exists over ~570 km");

        let direct = GeoPoint::new(-6.9175, 107.6191).vincenty_km(GeoPoint::new(-7.2575, 112.7521));
        assert!(route.total_km >= direct);
        let legs: f64 = route.legs(&ctx.graph).iter().map(|l| l.km).sum();
        assert!((legs - route.total_km).abs() < 1e-9);
        for leg in route.legs(&ctx.graph) {
            assert!(leg.km < 130.0);
        }
    }

    #[test]
    fn embedded_graph_is_connected() {
        let ctx = embedded();
        assert_eq!(ctx.graph.node_count(), 83);
        assert_eq!(ctx.graph.connected_components().len(), 1);
    }

    #[test]
    fn route_export_geojson() {
        let ctx = embedded();
        let dir = tempfile::tempdir().unwrap();
        let args = RouteArgs {
            region: Some("Jawa Timur".into()),
            export_dir: Some(dir.path().to_path_buf()),
            format: ExportFormat::Geojson,
            ..Default::default()
        };
        let mut buf = Vec::new();
        assert_eq!(run_route(&ctx, &args, &mut buf).unwrap(), EXIT_OK);
        assert!(output(buf).starts_with("Total distance: "));
        assert!(dir.path().join("map.geojson").is_file());
    }

    #[test]
    fn graph_summary_and_csv_export() {
        let ctx = synthetic();
        let dir = tempfile::tempdir().unwrap();
        let args = GraphArgs { export_dir: Some(dir.path().to_path_buf()), format: ExportFormat::Csv };
        let mut buf = Vec::new();
        run_graph(&ctx, &args, &mut buf).unwrap();
        let text = output(buf);
        assert!(text.contains("Cities:     4"));
        assert!(text.contains("Edges:      3"));
        assert!(text.contains("Components: 1"));
        for file in ["cities.csv", "edges.csv", "route.csv"] {
            assert!(dir.path().join(file).is_file(), "{file} missing");
        }
    }

    #[test]
    fn regions_and_cities_listing() {
        let ctx = embedded();
        let mut buf = Vec::new();
        run_regions(&ctx, &mut buf).unwrap();
        let text = output(buf);
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("Jawa Barat"));

        let mut buf = Vec::new();
        run_cities(&ctx, &CitiesArgs { region: Some("Jawa Barat".into()) }, &mut buf).unwrap();
        let text = output(buf);
        assert_eq!(text.lines().count(), 1 + 21);
        assert!(text.lines().nth(1).unwrap().trim_start().starts_with("Bandung "));
    }

    #[test]
    fn nearest_city() {
        let ctx = embedded();
        let mut buf = Vec::new();
        run_nearest(&ctx, &NearestArgs { lat: -7.25, lon: 112.75 }, &mut buf).unwrap();
        assert!(output(buf).starts_with("Surabaya (Jawa Timur)"));

        let bad = NearestArgs { lat: 120.0, lon: 0.0 };
        assert!(run_nearest(&ctx, &bad, &mut Vec::new()).is_err());
    }
}
