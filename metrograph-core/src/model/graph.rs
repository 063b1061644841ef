//! The output graph: station nodes plus a directed edge multiset.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::StationId;
use crate::model::Station;

/// Travel mode carried by an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMode {
    Metro,
    Walk,
}

/// Directed edge with physical distance and nominal travel time.
///
/// Metro edges carry the identifier of the line realizing them;
/// walking edges carry no line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: StationId,
    pub to: StationId,
    pub mode: EdgeMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
    pub distance_m: f64,
    pub time_s: f64,
}

impl GraphEdge {
    fn key(&self) -> EdgeKey {
        EdgeKey {
            from: self.from,
            to: self.to,
            mode: self.mode,
            line: self.line.clone(),
        }
    }
}

/// Identity of an edge within the multiset. Parallel edges between the
/// same station pair are distinct as long as they come from different
/// lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct EdgeKey {
    from: StationId,
    to: StationId,
    mode: EdgeMode,
    line: Option<String>,
}

/// Weighted, directed, multimodal graph over canonical stations.
///
/// Station ids double as node indices into the station table. Every
/// physical connection is represented by two directed edges with
/// identical weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RailGraphData")]
pub struct RailGraph {
    stations: Vec<Station>,
    edges: Vec<GraphEdge>,
    #[serde(skip)]
    edge_index: HashMap<EdgeKey, usize>,
}

impl RailGraph {
    pub(crate) fn with_stations(stations: Vec<Station>) -> Self {
        Self {
            stations,
            edges: Vec::new(),
            edge_index: HashMap::new(),
        }
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(id)
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.stations.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Look up an edge by its `(from, to, mode, line)` identity.
    pub fn edge(
        &self,
        from: StationId,
        to: StationId,
        mode: EdgeMode,
        line: Option<&str>,
    ) -> Option<&GraphEdge> {
        let key = EdgeKey {
            from,
            to,
            mode,
            line: line.map(str::to_owned),
        };
        self.edge_index.get(&key).map(|&idx| &self.edges[idx])
    }

    /// Insert an edge, replacing any previous edge with the same
    /// identity (a line visiting the same pair twice keeps one edge).
    pub(crate) fn upsert_edge(&mut self, edge: GraphEdge) {
        match self.edge_index.entry(edge.key()) {
            hashbrown::hash_map::Entry::Occupied(slot) => {
                self.edges[*slot.get()] = edge;
            }
            hashbrown::hash_map::Entry::Vacant(slot) => {
                slot.insert(self.edges.len());
                self.edges.push(edge);
            }
        }
    }
}

/// Serialized shape of the graph; the key index is rebuilt on load.
#[derive(Deserialize)]
struct RailGraphData {
    stations: Vec<Station>,
    edges: Vec<GraphEdge>,
}

impl From<RailGraphData> for RailGraph {
    fn from(data: RailGraphData) -> Self {
        let mut graph = RailGraph::with_stations(data.stations);
        for edge in data.edges {
            graph.upsert_edge(edge);
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: StationId) -> Station {
        Station {
            station_id: id,
            source_id: id as i64 + 100,
            name: format!("s{id}"),
            lat: 31.0,
            lon: 121.0 + id as f64 * 0.01,
        }
    }

    fn metro_edge(from: StationId, to: StationId, line: &str, distance_m: f64) -> GraphEdge {
        GraphEdge {
            from,
            to,
            mode: EdgeMode::Metro,
            line: Some(line.to_owned()),
            distance_m,
            time_s: distance_m * 0.09 + 30.0,
        }
    }

    #[test]
    fn parallel_edges_from_different_lines_coexist() {
        let mut graph = RailGraph::with_stations(vec![station(0), station(1)]);
        graph.upsert_edge(metro_edge(0, 1, "2", 800.0));
        graph.upsert_edge(metro_edge(0, 1, "7", 820.0));

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(
            graph.edge(0, 1, EdgeMode::Metro, Some("2")).unwrap().distance_m,
            800.0
        );
        assert_eq!(
            graph.edge(0, 1, EdgeMode::Metro, Some("7")).unwrap().distance_m,
            820.0
        );
    }

    #[test]
    fn same_identity_overwrites() {
        let mut graph = RailGraph::with_stations(vec![station(0), station(1)]);
        graph.upsert_edge(metro_edge(0, 1, "2", 800.0));
        graph.upsert_edge(metro_edge(0, 1, "2", 900.0));

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(
            graph.edge(0, 1, EdgeMode::Metro, Some("2")).unwrap().distance_m,
            900.0
        );
    }

    #[test]
    fn round_trip_preserves_everything_and_rebuilds_the_index() {
        let mut graph = RailGraph::with_stations(vec![station(0), station(1)]);
        graph.upsert_edge(metro_edge(0, 1, "2", 800.0));
        graph.upsert_edge(metro_edge(1, 0, "2", 800.0));
        graph.upsert_edge(GraphEdge {
            from: 0,
            to: 1,
            mode: EdgeMode::Walk,
            line: None,
            distance_m: 120.0,
            time_s: 90.0,
        });

        let json = serde_json::to_string(&graph).unwrap();
        let restored: RailGraph = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.stations(), graph.stations());
        assert_eq!(restored.edges(), graph.edges());
        assert_eq!(
            restored.edge(0, 1, EdgeMode::Walk, None).unwrap().time_s,
            90.0
        );
    }
}
