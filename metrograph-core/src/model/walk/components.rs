//! Pedestrian network components - nodes and edges

use geo::Point;

/// Pedestrian graph node
#[derive(Debug, Clone)]
pub struct WalkNode {
    /// Upstream id of the node
    pub id: i64,
    /// Node coordinates
    pub geometry: Point<f64>,
}

/// Pedestrian graph edge (street segment)
#[derive(Debug, Clone)]
pub struct WalkEdge {
    /// Physical segment length in meters
    pub length_m: f64,
}
