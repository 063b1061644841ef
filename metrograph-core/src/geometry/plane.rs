use geo::{Coord, LineString, Point};

/// Equirectangular projection centered on a reference coordinate:
/// `x = R·cos(lat0)·Δlon`, `y = R·Δlat`, both in meters.
///
/// Locally distance-preserving at metropolitan scale, which is all the
/// track projection needs.
#[derive(Debug, Clone, Copy)]
pub struct LocalPlane {
    origin_lon_rad: f64,
    origin_lat_rad: f64,
    cos_lat0: f64,
}

impl LocalPlane {
    const EARTH_RADIUS_M: f64 = 6_371_007.2;

    pub fn new(origin: Point<f64>) -> Self {
        let origin_lat_rad = origin.y().to_radians();
        Self {
            origin_lon_rad: origin.x().to_radians(),
            origin_lat_rad,
            cos_lat0: origin_lat_rad.cos(),
        }
    }

    /// Center the plane on the mean of the given coordinates. An empty
    /// iterator centers on (0, 0), which only happens for snapshots
    /// with no stations.
    pub fn centered_on(points: impl Iterator<Item = Point<f64>>) -> Self {
        let mut count = 0usize;
        let mut sum = (0.0, 0.0);
        for point in points {
            sum.0 += point.x();
            sum.1 += point.y();
            count += 1;
        }
        if count == 0 {
            return Self::new(Point::new(0.0, 0.0));
        }
        let n = count as f64;
        Self::new(Point::new(sum.0 / n, sum.1 / n))
    }

    /// Project a WGS84 `(lon, lat)` point to plane meters.
    pub fn project(&self, point: Point<f64>) -> Point<f64> {
        let dlon = point.x().to_radians() - self.origin_lon_rad;
        let dlat = point.y().to_radians() - self.origin_lat_rad;
        Point::new(
            Self::EARTH_RADIUS_M * self.cos_lat0 * dlon,
            Self::EARTH_RADIUS_M * dlat,
        )
    }

    pub fn project_line(&self, line: &LineString<f64>) -> LineString<f64> {
        line.coords()
            .map(|coord| {
                let projected = self.project(Point::from(*coord));
                Coord {
                    x: projected.x(),
                    y: projected.y(),
                }
            })
            .collect()
    }
}
