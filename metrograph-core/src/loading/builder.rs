use geo::{Geometry, LineString, Point};
use hashbrown::HashMap;
use itertools::Itertools;
use log::info;

use crate::config::NetworkAssumptions;
use crate::diagnostics::BuildDiagnostics;
use crate::error::Error;
use crate::geometry::{LocalPlane, TrackProjector};
use crate::loading::snapshot::{self, RailSnapshot, TrackFeature};
use crate::loading::{lines, pedestrian, stations, walk_links};
use crate::model::{EdgeMode, GraphEdge, Line, RailGraph, Station};

/// Result of a full pipeline run: the graph, the assembled line
/// definitions, and the report of everything that was skipped.
pub struct NetworkBuild {
    pub graph: RailGraph,
    pub lines: HashMap<String, Line>,
    pub diagnostics: BuildDiagnostics,
}

/// Build the multimodal network graph from a frozen snapshot.
///
/// Everything recoverable is absorbed into the diagnostics report; an
/// error return means no self-consistent graph could be produced and
/// nothing should be written downstream.
///
/// # Errors
///
/// Returns an error when a metro segment has to be measured but no
/// usable track geometry exists.
pub fn build_network(
    snapshot: &RailSnapshot,
    assumptions: &NetworkAssumptions,
) -> Result<NetworkBuild, Error> {
    info!(
        "Registering stations from {} point features",
        snapshot.stations.len()
    );
    let (station_records, registry) = stations::register_stations(&snapshot.stations);
    info!("{} canonical stations", station_records.len());

    let (line_map, route_outcomes) = lines::assemble_lines(&snapshot.routes, &station_records);
    info!(
        "Assembled {} lines from {} route features",
        line_map.len(),
        snapshot.routes.len()
    );

    // One planar frame for all track work, centered on the network
    let plane = LocalPlane::centered_on(station_records.iter().map(Station::location));
    let (track_geometries, nonlinear_tracks) = collect_track_geometries(&snapshot.tracks);
    let projector = TrackProjector::new(plane, &track_geometries);
    info!(
        "{} usable track geometries ({} discarded)",
        projector.track_count(),
        nonlinear_tracks + projector.discarded_count()
    );

    let (walk_graph, pedestrian_stats) = pedestrian::build_walk_graph(&snapshot.pedestrian);
    info!(
        "Pedestrian network: {} nodes, {} edges",
        pedestrian_stats.nodes, pedestrian_stats.edges
    );

    let locations: Vec<Point<f64>> = station_records.iter().map(Station::location).collect();
    let mut graph = RailGraph::with_stations(station_records);

    // Metro edges: consecutive pairs per line, both orientations with
    // identical weights. Lines sharing a pair each contribute their own
    // parallel edges.
    let mut line_ids: Vec<&String> = line_map.keys().collect();
    line_ids.sort();
    for line_id in line_ids {
        let line = &line_map[line_id];
        for (a, b) in line.stations.iter().copied().tuple_windows() {
            let distance_m = projector
                .segment_distance(locations[a], locations[b])
                .ok_or(Error::NoTrackGeometry { from: a, to: b })?;
            let time_s = assumptions.metro_segment_time_s(distance_m);

            graph.upsert_edge(GraphEdge {
                from: a,
                to: b,
                mode: EdgeMode::Metro,
                line: Some(line_id.clone()),
                distance_m,
                time_s,
            });
            graph.upsert_edge(GraphEdge {
                from: b,
                to: a,
                mode: EdgeMode::Metro,
                line: Some(line_id.clone()),
                distance_m,
                time_s,
            });
        }
    }

    let (links, walk_stats) =
        walk_links::link_walking_pairs(graph.stations(), &walk_graph, assumptions);
    for link in links {
        graph.upsert_edge(GraphEdge {
            from: link.a,
            to: link.b,
            mode: EdgeMode::Walk,
            line: None,
            distance_m: link.distance_m,
            time_s: link.time_s,
        });
        graph.upsert_edge(GraphEdge {
            from: link.b,
            to: link.a,
            mode: EdgeMode::Walk,
            line: None,
            distance_m: link.distance_m,
            time_s: link.time_s,
        });
    }

    info!(
        "Graph built: {} stations, {} directed edges",
        graph.node_count(),
        graph.edge_count()
    );

    Ok(NetworkBuild {
        graph,
        lines: line_map,
        diagnostics: BuildDiagnostics {
            registry,
            routes: route_outcomes,
            discarded_tracks: nonlinear_tracks + projector.discarded_count(),
            pedestrian: pedestrian_stats,
            walk: walk_stats,
        },
    })
}

/// Keep the linear parts of the track features; anything else is
/// counted and dropped.
fn collect_track_geometries(tracks: &[TrackFeature]) -> (Vec<LineString<f64>>, usize) {
    let mut geometries = Vec::with_capacity(tracks.len());
    let mut dropped = 0;

    for track in tracks {
        match snapshot::to_geo_geometry(&track.geometry) {
            Some(Geometry::LineString(line)) => geometries.push(line),
            Some(Geometry::MultiLineString(multi)) => geometries.extend(multi.0),
            _ => dropped += 1,
        }
    }

    (geometries, dropped)
}
