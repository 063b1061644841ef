use std::{cmp::Ordering, collections::BinaryHeap};

use hashbrown::HashMap;
use petgraph::{graph::NodeIndex, visit::EdgeRef};

use crate::model::WalkGraph;

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: NodeIndex,
}

impl Eq for State {}

// Implement Ord for State to use in BinaryHeap. Segment lengths are
// finite, so total_cmp gives a total order.
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap)
        other.cost.total_cmp(&self.cost)
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra's algorithm over the pedestrian network weighted by
/// segment length. Returns a map of node indices to walking distances
/// in meters.
///
/// Nodes whose settled distance stays within `max_distance` are exact;
/// entries beyond it may be unexpanded overestimates, which callers
/// treat as unreachable.
pub(crate) fn walk_distances(
    graph: &WalkGraph,
    start: NodeIndex,
    target: Option<NodeIndex>,
    max_distance: Option<f64>,
) -> HashMap<NodeIndex, f64> {
    let mut distances: HashMap<NodeIndex, f64> = HashMap::new();
    let mut heap = BinaryHeap::new();

    // Start node has distance 0
    heap.push(State {
        cost: 0.0,
        node: start,
    });
    distances.insert(start, 0.0);

    while let Some(State { cost, node }) = heap.pop() {
        // Check if we've reached the target
        if let Some(target_node) = target {
            if node == target_node {
                break;
            }
        }

        // Skip if we've found a better path
        if let Some(&best) = distances.get(&node) {
            if cost > best {
                continue;
            }
        }

        // Check max cost constraint
        if let Some(max) = max_distance {
            if cost > max {
                continue;
            }
        }

        // Examine neighbors
        for edge in graph.edges(node) {
            let next = edge.target();
            let next_cost = cost + edge.weight().length_m;

            // Add or update distance if better using Entry API
            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    distances
}

#[cfg(test)]
mod tests {
    use geo::Point;
    use petgraph::graph::UnGraph;

    use super::*;
    use crate::model::{WalkEdge, WalkNode};

    fn chain_graph(lengths: &[f64]) -> (WalkGraph, Vec<NodeIndex>) {
        let mut graph = UnGraph::new_undirected();
        let nodes: Vec<NodeIndex> = (0..=lengths.len())
            .map(|i| {
                graph.add_node(WalkNode {
                    id: i as i64,
                    geometry: Point::new(i as f64 * 0.001, 0.0),
                })
            })
            .collect();
        for (i, &length_m) in lengths.iter().enumerate() {
            graph.add_edge(nodes[i], nodes[i + 1], WalkEdge { length_m });
        }
        (WalkGraph::new(graph), nodes)
    }

    #[test]
    fn sums_segment_lengths() {
        let (walk, nodes) = chain_graph(&[100.0, 250.0, 50.0]);
        let distances = walk_distances(&walk, nodes[0], None, None);

        assert_eq!(distances[&nodes[0]], 0.0);
        assert_eq!(distances[&nodes[1]], 100.0);
        assert_eq!(distances[&nodes[3]], 400.0);
    }

    #[test]
    fn prefers_the_shorter_of_two_routes() {
        let mut graph = UnGraph::new_undirected();
        let a = graph.add_node(WalkNode {
            id: 0,
            geometry: Point::new(0.0, 0.0),
        });
        let b = graph.add_node(WalkNode {
            id: 1,
            geometry: Point::new(0.001, 0.0),
        });
        let c = graph.add_node(WalkNode {
            id: 2,
            geometry: Point::new(0.002, 0.0),
        });
        graph.add_edge(a, c, WalkEdge { length_m: 500.0 });
        graph.add_edge(a, b, WalkEdge { length_m: 100.0 });
        graph.add_edge(b, c, WalkEdge { length_m: 150.0 });
        let network = WalkGraph::new(graph);

        let distances = walk_distances(&network, a, None, None);
        assert_eq!(distances[&c], 250.0);
    }

    #[test]
    fn disconnected_nodes_are_absent() {
        let mut graph = UnGraph::new_undirected();
        let a = graph.add_node(WalkNode {
            id: 0,
            geometry: Point::new(0.0, 0.0),
        });
        let island = graph.add_node(WalkNode {
            id: 1,
            geometry: Point::new(1.0, 1.0),
        });
        let network = WalkGraph::new(graph);

        let distances = walk_distances(&network, a, None, None);
        assert!(!distances.contains_key(&island));
    }

    #[test]
    fn settled_distances_within_the_bound_are_exact() {
        let (walk, nodes) = chain_graph(&[100.0, 100.0, 100.0, 100.0]);
        let distances = walk_distances(&walk, nodes[0], None, Some(250.0));

        assert_eq!(distances[&nodes[2]], 200.0);
        // Beyond the bound nothing is guaranteed except absence or overestimate
        assert!(distances.get(&nodes[4]).is_none_or(|&d| d > 250.0));
    }
}
