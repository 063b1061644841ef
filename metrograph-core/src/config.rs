//! Fixed modeling assumptions shared by every pipeline stage.

use serde::Serialize;

/// Station pairs farther apart than this (great-circle meters) are
/// never considered for a walking connection.
pub const WALK_LINK_THRESHOLD_M: f64 = 1500.0;

/// Seconds needed to cover one meter at the given speed.
pub fn seconds_per_meter(speed_kmh: f64) -> f64 {
    3600.0 / (speed_kmh * 1000.0)
}

/// Process-wide modeling constants, passed explicitly into every
/// component that needs them.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NetworkAssumptions {
    pub metro_cruise_speed_kmh: f64,
    pub avg_walk_speed_kmh: f64,
    /// Time a train spends stopped at a station, added per metro segment.
    pub dwell_time_s: f64,
    pub minimum_platform_access_time_s: f64,
    /// Reserved for transfer modeling; not applied to any edge here.
    pub minimum_transfer_overhead_s: f64,
    /// Reserved for terminal turnbacks; not applied to any edge here.
    pub terminal_turnback_penalty_s: f64,
}

impl Default for NetworkAssumptions {
    fn default() -> Self {
        Self {
            metro_cruise_speed_kmh: 40.0,
            avg_walk_speed_kmh: 4.8,
            dwell_time_s: 30.0,
            minimum_platform_access_time_s: 120.0,
            minimum_transfer_overhead_s: 180.0,
            terminal_turnback_penalty_s: 300.0,
        }
    }
}

impl NetworkAssumptions {
    pub fn metro_seconds_per_meter(&self) -> f64 {
        seconds_per_meter(self.metro_cruise_speed_kmh)
    }

    pub fn walk_seconds_per_meter(&self) -> f64 {
        seconds_per_meter(self.avg_walk_speed_kmh)
    }

    /// Nominal travel time for a metro segment of the given length.
    pub fn metro_segment_time_s(&self, distance_m: f64) -> f64 {
        distance_m * self.metro_seconds_per_meter() + self.dwell_time_s
    }

    /// Fixed allowance a walking connection must beat on top of the
    /// optimistic train time: dwell plus platform access.
    pub fn min_walk_overhead_s(&self) -> f64 {
        self.dwell_time_s + self.minimum_platform_access_time_s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_per_meter_matches_speeds() {
        assert_eq!(seconds_per_meter(40.0), 0.09);
        assert_eq!(seconds_per_meter(4.8), 0.75);
    }

    #[test]
    fn default_overhead_is_dwell_plus_access() {
        let assumptions = NetworkAssumptions::default();
        assert_eq!(assumptions.min_walk_overhead_s(), 150.0);
        assert_eq!(assumptions.metro_segment_time_s(1000.0), 120.0);
    }
}
