//! Batch pipeline entry point: frozen snapshot in, graph artifacts out.
//!
//! A fatal error terminates the process before any output file is
//! written; a successful run always leaves a self-consistent set of
//! artifacts behind.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use metrograph_core::{NetworkAssumptions, RailSnapshot, build_network};

mod export;

/// Derive a multimodal metro network graph from a frozen geospatial
/// snapshot.
#[derive(Parser, Debug)]
#[command(name = "metrograph", version, about)]
struct Args {
    /// Snapshot JSON produced by the acquisition step
    snapshot: PathBuf,

    /// Directory receiving stations.csv, lines.json, graph.json and
    /// graph.geojson
    #[arg(short, long, default_value = "output")]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let snapshot = RailSnapshot::from_path(&args.snapshot)
        .with_context(|| format!("reading snapshot {}", args.snapshot.display()))?;

    let build = build_network(&snapshot, &NetworkAssumptions::default())?;

    let diagnostics = &build.diagnostics;
    info!(
        "registry: {} features, {} duplicates, {} centroid fallbacks, {} dropped",
        diagnostics.registry.features,
        diagnostics.registry.duplicates,
        diagnostics.registry.centroid_fallbacks,
        diagnostics.registry.dropped_geometries
    );
    info!(
        "routes: {} included, {} skipped",
        diagnostics.lines_included(),
        diagnostics.routes_skipped()
    );
    info!(
        "walking: {} linked, {} rejected, {} beyond threshold, {} without a path",
        diagnostics.walk.linked,
        diagnostics.walk.rejected,
        diagnostics.walk.beyond_threshold,
        diagnostics.walk.no_path + diagnostics.walk.unanchored
    );

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;
    export::write_station_table(&args.out_dir.join("stations.csv"), build.graph.stations())?;
    export::write_lines(&args.out_dir.join("lines.json"), &build.lines)?;
    export::write_graph(&args.out_dir.join("graph.json"), &build.graph)?;
    export::write_graph_geojson(&args.out_dir.join("graph.geojson"), &build.graph)?;

    info!(
        "wrote {} stations and {} directed edges to {}",
        build.graph.node_count(),
        build.graph.edge_count(),
        args.out_dir.display()
    );
    Ok(())
}
