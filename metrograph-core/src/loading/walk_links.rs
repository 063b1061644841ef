//! Walking-connection admissibility between nearby stations.
//!
//! Every unordered station pair within the great-circle prefilter
//! threshold gets a routed walking distance over the pedestrian
//! network. The pair is linked only when walking cannot possibly be
//! slower than an unrealistically fast metro trip between the same two
//! points plus a fixed dwell and platform-access allowance; otherwise
//! no routing consumer would ever prefer the walk.

use geo::{Distance, Haversine};
use log::info;
use petgraph::graph::NodeIndex;
use rayon::prelude::*;

use crate::StationId;
use crate::config::{NetworkAssumptions, WALK_LINK_THRESHOLD_M};
use crate::diagnostics::WalkLinkStats;
use crate::model::{Station, WalkGraph};
use crate::routing::walk_distances;

/// An admissible walking connection between two stations, carrying the
/// routed (not straight-line) distance and time.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WalkLink {
    pub a: StationId,
    pub b: StationId,
    pub distance_m: f64,
    pub time_s: f64,
}

/// Scan all station pairs for admissible walking connections. The
/// per-station scans are independent and run in parallel; the result
/// set does not depend on their order.
pub(crate) fn link_walking_pairs(
    stations: &[Station],
    walk: &WalkGraph,
    assumptions: &NetworkAssumptions,
) -> (Vec<WalkLink>, WalkLinkStats) {
    let anchors: Vec<Option<NodeIndex>> = stations
        .iter()
        .map(|station| walk.nearest_anchor(&station.location()))
        .collect();

    // Largest routed distance any pair at the prefilter limit could
    // still admit; longer walks are inadmissible for every pair, so
    // each Dijkstra can stop there.
    let horizon_m = (WALK_LINK_THRESHOLD_M * assumptions.metro_seconds_per_meter()
        + assumptions.min_walk_overhead_s())
        / assumptions.walk_seconds_per_meter();

    let (links, stats) = (0..stations.len())
        .into_par_iter()
        .map(|source| scan_from(source, stations, &anchors, walk, assumptions, horizon_m))
        .reduce(
            || (Vec::new(), WalkLinkStats::default()),
            |(mut links, stats), (other_links, other_stats)| {
                links.extend(other_links);
                (links, stats.merged(&other_stats))
            },
        );

    info!(
        "{} walking connections admitted out of {} candidate pairs",
        stats.linked, stats.pairs
    );
    (links, stats)
}

fn scan_from(
    source: StationId,
    stations: &[Station],
    anchors: &[Option<NodeIndex>],
    walk: &WalkGraph,
    assumptions: &NetworkAssumptions,
    horizon_m: f64,
) -> (Vec<WalkLink>, WalkLinkStats) {
    let mut stats = WalkLinkStats::default();
    let mut links = Vec::new();
    let origin = stations[source].location();

    // Straight-line prefilter first; pairs beyond the threshold are
    // never considered at all
    let mut candidates: Vec<(StationId, f64)> = Vec::new();
    for target in (source + 1)..stations.len() {
        stats.pairs += 1;
        let euclid_m = Haversine.distance(origin, stations[target].location());
        if euclid_m > WALK_LINK_THRESHOLD_M {
            stats.beyond_threshold += 1;
        } else {
            candidates.push((target, euclid_m));
        }
    }
    if candidates.is_empty() {
        return (links, stats);
    }

    let Some(source_anchor) = anchors[source] else {
        stats.unanchored += candidates.len();
        return (links, stats);
    };

    let routed = walk_distances(walk, source_anchor, None, Some(horizon_m));

    for (target, euclid_m) in candidates {
        let Some(target_anchor) = anchors[target] else {
            stats.unanchored += 1;
            continue;
        };
        // Unreachable pairs are simply not linked; they never abort
        // the build
        let Some(&walk_distance_m) = routed.get(&target_anchor) else {
            stats.no_path += 1;
            continue;
        };

        let walk_time_s = walk_distance_m * assumptions.walk_seconds_per_meter();
        let optimistic_metro_s = euclid_m * assumptions.metro_seconds_per_meter();

        if walk_time_s < optimistic_metro_s + assumptions.min_walk_overhead_s() {
            stats.linked += 1;
            links.push(WalkLink {
                a: source,
                b: target,
                distance_m: walk_distance_m,
                time_s: walk_time_s,
            });
        } else {
            stats.rejected += 1;
        }
    }

    (links, stats)
}

#[cfg(test)]
mod tests {
    use geo::Point;
    use petgraph::graph::UnGraph;

    use super::*;
    use crate::model::{WalkEdge, WalkNode};

    // ~500 m apart on a meridian
    const LAT_A: f64 = 31.2300;
    const LAT_B: f64 = 31.2345;
    const LON: f64 = 121.47;

    fn station(station_id: StationId, lat: f64) -> Station {
        Station {
            station_id,
            source_id: station_id as i64,
            name: format!("s{station_id}"),
            lat,
            lon: LON,
        }
    }

    /// Two pedestrian nodes at the stations, joined by one edge of the
    /// given length.
    fn walk_graph(routed_m: f64) -> WalkGraph {
        let mut graph = UnGraph::new_undirected();
        let a = graph.add_node(WalkNode {
            id: 1,
            geometry: Point::new(LON, LAT_A),
        });
        let b = graph.add_node(WalkNode {
            id: 2,
            geometry: Point::new(LON, LAT_B),
        });
        graph.add_edge(a, b, WalkEdge { length_m: routed_m });
        WalkGraph::new(graph)
    }

    #[test]
    fn slow_walk_is_rejected() {
        // 650 m routed: walk_time 487.5 s against a bound near
        // 500 * 0.09 + 150 = 195 s
        let stations = vec![station(0, LAT_A), station(1, LAT_B)];
        let (links, stats) = link_walking_pairs(
            &stations,
            &walk_graph(650.0),
            &NetworkAssumptions::default(),
        );

        assert!(links.is_empty());
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.linked, 0);
    }

    #[test]
    fn short_walk_is_admitted_with_routed_values() {
        // 100 m routed: walk_time 75 s beats the ~195 s bound
        let stations = vec![station(0, LAT_A), station(1, LAT_B)];
        let (links, stats) = link_walking_pairs(
            &stations,
            &walk_graph(100.0),
            &NetworkAssumptions::default(),
        );

        assert_eq!(stats.linked, 1);
        assert_eq!(links.len(), 1);
        let link = &links[0];
        assert_eq!((link.a, link.b), (0, 1));
        // Routed distance and time, not the straight-line prefilter values
        assert_eq!(link.distance_m, 100.0);
        assert_eq!(link.time_s, 75.0);
    }

    #[test]
    fn pairs_beyond_the_threshold_are_never_routed() {
        // ~2 km apart: even a 1 m routed path must not create a link
        let stations = vec![station(0, 31.23), station(1, 31.248)];
        let (links, stats) = link_walking_pairs(
            &stations,
            &walk_graph(1.0),
            &NetworkAssumptions::default(),
        );

        assert!(links.is_empty());
        assert_eq!(stats.beyond_threshold, 1);
        assert_eq!(stats.no_path + stats.rejected + stats.linked, 0);
    }

    #[test]
    fn disconnected_anchors_skip_the_pair() {
        let mut graph = UnGraph::new_undirected();
        graph.add_node(WalkNode {
            id: 1,
            geometry: Point::new(LON, LAT_A),
        });
        graph.add_node(WalkNode {
            id: 2,
            geometry: Point::new(LON, LAT_B),
        });
        let walk = WalkGraph::new(graph);

        let stations = vec![station(0, LAT_A), station(1, LAT_B)];
        let (links, stats) =
            link_walking_pairs(&stations, &walk, &NetworkAssumptions::default());

        assert!(links.is_empty());
        assert_eq!(stats.no_path, 1);
    }

    #[test]
    fn empty_pedestrian_network_leaves_every_pair_unanchored() {
        let walk = WalkGraph::new(UnGraph::new_undirected());
        let stations = vec![station(0, LAT_A), station(1, LAT_B)];

        let (links, stats) =
            link_walking_pairs(&stations, &walk, &NetworkAssumptions::default());

        assert!(links.is_empty());
        assert_eq!(stats.unanchored, 1);
    }
}
