//! Pedestrian network assembly from the raw snapshot dump.

use geo::Point;
use hashbrown::HashMap;
use log::warn;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::diagnostics::PedestrianStats;
use crate::loading::snapshot::PedestrianNetwork;
use crate::model::{WalkEdge, WalkGraph, WalkNode};

/// Build the routable walking graph. Edges referencing unknown nodes
/// or carrying unusable lengths are dropped and counted.
pub(crate) fn build_walk_graph(raw: &PedestrianNetwork) -> (WalkGraph, PedestrianStats) {
    let mut graph = UnGraph::with_capacity(raw.nodes.len(), raw.edges.len());
    let mut by_id: HashMap<i64, NodeIndex> = HashMap::with_capacity(raw.nodes.len());
    let mut stats = PedestrianStats::default();

    for node in &raw.nodes {
        if by_id.contains_key(&node.id) {
            stats.duplicate_nodes += 1;
            continue;
        }
        let idx = graph.add_node(WalkNode {
            id: node.id,
            geometry: Point::new(node.lon, node.lat),
        });
        by_id.insert(node.id, idx);
    }

    for edge in &raw.edges {
        let (Some(&from), Some(&to)) = (by_id.get(&edge.from), by_id.get(&edge.to)) else {
            stats.dropped_edges += 1;
            continue;
        };
        if !edge.length_m.is_finite() || edge.length_m < 0.0 {
            stats.dropped_edges += 1;
            continue;
        }
        graph.add_edge(from, to, WalkEdge {
            length_m: edge.length_m,
        });
    }

    stats.nodes = graph.node_count();
    stats.edges = graph.edge_count();
    if stats.dropped_edges > 0 {
        warn!(
            "{} pedestrian edges referenced unknown nodes or carried bad lengths",
            stats.dropped_edges
        );
    }

    (WalkGraph::new(graph), stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::snapshot::{RawWalkEdge, RawWalkNode};

    fn node(id: i64) -> RawWalkNode {
        RawWalkNode {
            id,
            lat: 31.0,
            lon: 121.0 + id as f64 * 0.001,
        }
    }

    #[test]
    fn bad_edges_are_dropped_and_counted() {
        let raw = PedestrianNetwork {
            nodes: vec![node(1), node(2)],
            edges: vec![
                RawWalkEdge { from: 1, to: 2, length_m: 80.0 },
                RawWalkEdge { from: 1, to: 99, length_m: 10.0 },
                RawWalkEdge { from: 1, to: 2, length_m: f64::NAN },
                RawWalkEdge { from: 2, to: 1, length_m: -5.0 },
            ],
        };

        let (walk, stats) = build_walk_graph(&raw);

        assert_eq!(walk.node_count(), 2);
        assert_eq!(walk.edge_count(), 1);
        assert_eq!(stats.dropped_edges, 3);
    }

    #[test]
    fn duplicate_node_ids_keep_the_first() {
        let mut duplicate = node(1);
        duplicate.lon = 0.0;
        let raw = PedestrianNetwork {
            nodes: vec![node(1), duplicate],
            edges: vec![],
        };

        let (walk, stats) = build_walk_graph(&raw);

        assert_eq!(walk.node_count(), 1);
        assert_eq!(stats.duplicate_nodes, 1);
        assert_eq!(walk.graph[NodeIndex::new(0)].geometry.x(), 121.001);
    }
}
