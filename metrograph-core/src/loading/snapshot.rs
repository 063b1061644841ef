//! Typed frozen-snapshot input handed over by the acquisition step.
//!
//! The snapshot is one JSON document. Whole-document parse failure is
//! fatal; per-feature oddities (wrong-shaped member lists, unusable
//! geometries) are absorbed feature by feature so one bad record never
//! aborts a build.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::Error;

/// Raw point-like feature tagged as a station.
#[derive(Debug, Clone, Deserialize)]
pub struct StationFeature {
    pub source_id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub geometry: geojson::Geometry,
}

/// Ordered reference from a route to another feature.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteMember {
    #[serde(default, rename = "type")]
    pub member_type: String,
    #[serde(rename = "ref")]
    pub ref_id: i64,
}

/// Raw route relation with its ordered membership list.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteFeature {
    pub source_id: i64,
    /// Short line code, preferred over the display name as identifier.
    #[serde(default, rename = "ref")]
    pub ref_tag: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// `None` when absent or of the wrong shape; such routes are skipped.
    #[serde(default, deserialize_with = "lenient_members")]
    pub members: Option<Vec<RouteMember>>,
}

/// Raw linear track feature.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackFeature {
    pub source_id: i64,
    pub geometry: geojson::Geometry,
}

/// Raw pedestrian routability dump: nodes plus length-weighted edges.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PedestrianNetwork {
    #[serde(default)]
    pub nodes: Vec<RawWalkNode>,
    #[serde(default)]
    pub edges: Vec<RawWalkEdge>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawWalkNode {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawWalkEdge {
    pub from: i64,
    pub to: i64,
    pub length_m: f64,
}

/// One frozen source snapshot, the pipeline's entire input.
///
/// Array order is preserved as-is; station id assignment therefore
/// inherits whatever order the acquisition step froze.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RailSnapshot {
    #[serde(default)]
    pub stations: Vec<StationFeature>,
    #[serde(default)]
    pub routes: Vec<RouteFeature>,
    #[serde(default)]
    pub tracks: Vec<TrackFeature>,
    #[serde(default)]
    pub pedestrian: PedestrianNetwork,
}

impl RailSnapshot {
    /// Deserialize a snapshot; any parse failure is fatal for the build.
    pub fn from_reader(reader: impl Read) -> Result<Self, Error> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let file = File::open(path).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("Failed to open snapshot '{}': {}", path.display(), e),
            )
        })?;
        Self::from_reader(BufReader::new(file))
    }
}

/// Accept a well-formed member array, turn anything else into `None`
/// instead of failing the whole snapshot.
fn lenient_members<'de, D>(deserializer: D) -> Result<Option<Vec<RouteMember>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Convert a raw GeoJSON geometry into a `geo` geometry, if possible.
pub(crate) fn to_geo_geometry(geometry: &geojson::Geometry) -> Option<geo::Geometry<f64>> {
    geo::Geometry::<f64>::try_from(geometry.clone()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_members_become_none_not_a_parse_error() {
        let json = r#"{
            "routes": [
                { "source_id": 1, "ref": "2", "members": "oops" },
                { "source_id": 2, "ref": "3",
                  "members": [ { "type": "node", "ref": 42 } ] }
            ]
        }"#;

        let snapshot = RailSnapshot::from_reader(json.as_bytes()).unwrap();
        assert!(snapshot.routes[0].members.is_none());
        let members = snapshot.routes[1].members.as_ref().unwrap();
        assert_eq!(members[0].ref_id, 42);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let snapshot = RailSnapshot::from_reader("{}".as_bytes()).unwrap();
        assert!(snapshot.stations.is_empty());
        assert!(snapshot.pedestrian.nodes.is_empty());
    }

    #[test]
    fn top_level_garbage_is_fatal() {
        assert!(RailSnapshot::from_reader("not json".as_bytes()).is_err());
    }
}
