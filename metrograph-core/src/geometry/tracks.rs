//! Metro segment measurement via track-geometry projection.

use geo::{Closest, ClosestPoint, Distance, Euclidean, LineString, Point};

use crate::geometry::LocalPlane;

/// Track geometries held in a common plane and queried per segment.
///
/// Selection and measurement are pure functions over the projected
/// collection; nothing is mutated between queries.
pub struct TrackProjector {
    tracks: Vec<LineString<f64>>,
    plane: LocalPlane,
    discarded: usize,
}

impl TrackProjector {
    /// Project the usable track geometries into the plane. Degenerate
    /// geometries (fewer than two coordinates) are dropped and counted.
    pub fn new(plane: LocalPlane, tracks: &[LineString<f64>]) -> Self {
        let mut discarded = 0;
        let projected = tracks
            .iter()
            .filter(|track| {
                if track.0.len() >= 2 {
                    true
                } else {
                    discarded += 1;
                    false
                }
            })
            .map(|track| plane.project_line(track))
            .collect();
        Self {
            tracks: projected,
            plane,
            discarded,
        }
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn discarded_count(&self) -> usize {
        self.discarded
    }

    /// Approximate physical distance between two stations: both are
    /// projected onto the track nearest to `a`, and the straight-line
    /// distance between the two projections is returned.
    ///
    /// The reference track is chosen by `a` alone, so it need not also
    /// be nearest to `b`, and the measure ignores track curvature.
    /// Both are accepted properties of this approximation; do not
    /// "fix" them without revisiting every downstream consumer.
    pub fn segment_distance(&self, a: Point<f64>, b: Point<f64>) -> Option<f64> {
        let pa = self.plane.project(a);
        let pb = self.plane.project(b);

        let track = self.nearest_track(pa)?;
        let proj_a = closest_on(track, pa)?;
        let proj_b = closest_on(track, pb)?;

        Some(Euclidean.distance(proj_a, proj_b))
    }

    fn nearest_track(&self, point: Point<f64>) -> Option<&LineString<f64>> {
        self.tracks.iter().min_by(|lhs, rhs| {
            distance_to(lhs, point).total_cmp(&distance_to(rhs, point))
        })
    }
}

fn distance_to(track: &LineString<f64>, point: Point<f64>) -> f64 {
    match closest_on(track, point) {
        Some(projected) => Euclidean.distance(point, projected),
        None => f64::INFINITY,
    }
}

fn closest_on(track: &LineString<f64>, point: Point<f64>) -> Option<Point<f64>> {
    match track.closest_point(&point) {
        Closest::Intersection(projected) | Closest::SinglePoint(projected) => Some(projected),
        Closest::Indeterminate => None,
    }
}
