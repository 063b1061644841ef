use geo::Point;
use petgraph::graph::{NodeIndex, UnGraph};
use rstar::{RTree, primitives::GeomWithData};

use super::{WalkEdge, WalkNode};

/// R-tree entry tying a node location to its graph index.
pub type IndexedPoint = GeomWithData<Point<f64>, NodeIndex>;

/// Pedestrian routability graph with a spatial index for anchor
/// lookups.
#[derive(Clone)]
pub struct WalkGraph {
    pub graph: UnGraph<WalkNode, WalkEdge>,
    rtree: RTree<IndexedPoint>,
}

impl WalkGraph {
    pub fn new(graph: UnGraph<WalkNode, WalkEdge>) -> Self {
        let points = graph
            .node_indices()
            .map(|idx| IndexedPoint::new(graph[idx].geometry, idx))
            .collect();
        Self {
            graph,
            rtree: RTree::bulk_load(points),
        }
    }

    /// Nearest pedestrian node to the given location. `None` only when
    /// the network has no nodes at all.
    pub fn nearest_anchor(&self, point: &Point<f64>) -> Option<NodeIndex> {
        self.rtree.nearest_neighbor(point).map(|entry| entry.data)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub(crate) fn edges(
        &self,
        node: NodeIndex,
    ) -> petgraph::graph::Edges<'_, WalkEdge, petgraph::Undirected> {
        self.graph.edges(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_anchor_picks_the_closest_node() {
        let mut graph = UnGraph::new_undirected();
        let near = graph.add_node(WalkNode {
            id: 1,
            geometry: Point::new(121.47, 31.23),
        });
        graph.add_node(WalkNode {
            id: 2,
            geometry: Point::new(121.60, 31.30),
        });
        let walk = WalkGraph::new(graph);

        let anchor = walk.nearest_anchor(&Point::new(121.471, 31.231));
        assert_eq!(anchor, Some(near));
    }

    #[test]
    fn empty_network_has_no_anchor() {
        let walk = WalkGraph::new(UnGraph::new_undirected());
        assert_eq!(walk.nearest_anchor(&Point::new(0.0, 0.0)), None);
    }
}
