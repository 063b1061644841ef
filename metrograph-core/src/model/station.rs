use geo::Point;
use serde::{Deserialize, Serialize};

use crate::StationId;

/// Canonical station record produced by the registry.
///
/// Exactly one record exists per distinct upstream `source_id`;
/// `station_id` values form the contiguous range `0..N` in first-seen
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub station_id: StationId,
    /// The acquisition system's own identifier for the feature.
    pub source_id: i64,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Station {
    /// Location as an `(lon, lat)` point.
    pub fn location(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}
