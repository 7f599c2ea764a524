//! cityroute: shortest geodesic routes between Javanese cities.
//!
//! Loads the region/city table (embedded, or a CSV given with `--dataset`),
//! joins every pair of cities closer than the threshold (130 km by default),
//! and answers shortest-path queries over that graph.

mod commands;
mod config;
mod context;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cr_core::DistanceModel;

use commands::{CitiesArgs, GraphArgs, NearestArgs, RouteArgs};
use config::AppConfig;
use context::AppContext;

/// Shortest routes over a city proximity graph.
#[derive(Parser, Debug)]
#[command(name = "cityroute", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// CSV dataset (`region,city,lat,lon`) instead of the embedded table.
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Connection cutoff in kilometres.
    #[arg(long, global = true)]
    threshold_km: Option<f64>,

    /// Distance formula: vincenty or haversine.
    #[arg(long, global = true)]
    model: Option<DistanceModel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List regions and their city counts.
    Regions,

    /// List cities alphabetically with coordinates.
    Cities(CitiesArgs),

    /// Shortest route between two cities.
    Route(RouteArgs),

    /// Graph summary and optional full export.
    Graph(GraphArgs),

    /// City closest to a coordinate.
    Nearest(NearestArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<u8> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    config.apply_overrides(cli.threshold_km, cli.model, cli.dataset);
    tracing::debug!(?config, "resolved configuration");

    let ctx = AppContext::load(config)?;
    let mut out = std::io::stdout().lock();

    match &cli.command {
        Commands::Regions => commands::run_regions(&ctx, &mut out),
        Commands::Cities(args) => commands::run_cities(&ctx, args, &mut out),
        Commands::Route(args) => commands::run_route(&ctx, args, &mut out),
        Commands::Graph(args) => commands::run_graph(&ctx, args, &mut out),
        Commands::Nearest(args) => commands::run_nearest(&ctx, args, &mut out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commands::ExportFormat;

    #[test]
    fn cli_parse_route_defaults() {
        let cli = Cli::try_parse_from(["cityroute", "route"]).unwrap();
        let Commands::Route(args) = cli.command else { panic!("expected route") };
        assert!(args.region.is_none());
        assert!(args.from.is_none());
        assert!(args.to.is_none());
        assert_eq!(args.format, ExportFormat::Csv);
    }

    #[test]
    fn cli_parse_route_with_endpoints() {
        let cli = Cli::try_parse_from([
            "cityroute", "route", "--from", "Bandung Barat", "--to", "Surabaya",
            "--export-dir", "out", "--format", "geojson",
        ])
        .unwrap();
        let Commands::Route(args) = cli.command else { panic!("expected route") };
        assert_eq!(args.from.as_deref(), Some("Bandung Barat"));
        assert_eq!(args.to.as_deref(), Some("Surabaya"));
        assert_eq!(args.export_dir, Some(PathBuf::from("out")));
        assert_eq!(args.format, ExportFormat::Geojson);
    }

    #[test]
    fn cli_parse_global_overrides() {
        let cli = Cli::try_parse_from([
            "cityroute", "graph", "-vv", "--threshold-km", "100", "--model", "haversine",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.threshold_km, Some(100.0));
        assert_eq!(cli.model, Some(DistanceModel::Haversine));
        assert!(matches!(cli.command, Commands::Graph(_)));
    }

    #[test]
    fn cli_parse_nearest_negative_latitude() {
        let cli = Cli::try_parse_from(["cityroute", "nearest", "--lat", "-7.25", "--lon", "112.75"]).unwrap();
        let Commands::Nearest(args) = cli.command else { panic!("expected nearest") };
        assert_eq!(args.lat, -7.25);
    }

    #[test]
    fn cli_rejects_unknown_model() {
        assert!(Cli::try_parse_from(["cityroute", "regions", "--model", "manhattan"]).is_err());
    }

    #[test]
    fn run_rejects_bad_threshold() {
        let cli = Cli::try_parse_from(["cityroute", "regions", "--threshold-km", "0"]).unwrap();
        assert!(run(cli).is_err());
    }
}
