//! Station identity resolution.

use geo::{Centroid, Geometry, Point};
use hashbrown::HashMap;
use log::debug;

use crate::StationId;
use crate::diagnostics::RegistryStats;
use crate::loading::snapshot::{self, StationFeature};
use crate::model::Station;

/// Deduplicate raw point features into canonical station records.
///
/// First occurrence of a `source_id` wins and later duplicates are
/// ignored outright, not merged. Ids are assigned densely in
/// first-seen order. A non-point geometry collapses to its centroid
/// and a missing name becomes `station_<id>`.
pub(crate) fn register_stations(features: &[StationFeature]) -> (Vec<Station>, RegistryStats) {
    let mut stats = RegistryStats {
        features: features.len(),
        ..Default::default()
    };
    let mut seen: HashMap<i64, StationId> = HashMap::with_capacity(features.len());
    let mut stations: Vec<Station> = Vec::with_capacity(features.len());

    for feature in features {
        if seen.contains_key(&feature.source_id) {
            stats.duplicates += 1;
            continue;
        }

        let Some(geometry) = snapshot::to_geo_geometry(&feature.geometry) else {
            stats.dropped_geometries += 1;
            debug!("station {}: unusable geometry, dropped", feature.source_id);
            continue;
        };
        let Some(location) = feature_point(&geometry, &mut stats) else {
            stats.dropped_geometries += 1;
            debug!("station {}: no centroid, dropped", feature.source_id);
            continue;
        };

        let station_id = stations.len();
        seen.insert(feature.source_id, station_id);

        let name = match &feature.name {
            Some(name) => name.clone(),
            None => {
                stats.synthesized_names += 1;
                format!("station_{station_id}")
            }
        };

        stations.push(Station {
            station_id,
            source_id: feature.source_id,
            name,
            lat: location.y(),
            lon: location.x(),
        });
    }

    (stations, stats)
}

fn feature_point(geometry: &Geometry<f64>, stats: &mut RegistryStats) -> Option<Point<f64>> {
    match geometry {
        Geometry::Point(point) => Some(*point),
        other => {
            let centroid = other.centroid()?;
            stats.centroid_fallbacks += 1;
            Some(centroid)
        }
    }
}
