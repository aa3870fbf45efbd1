//! Great-circle distance and route sampling

use crate::models::Coordinate;

/// Intermediate points sampled when the caller does not choose
pub const DEFAULT_SAMPLE_POINTS: usize = 5;

/// Great-circle distance in kilometers (Haversine, R = 6371 km)
#[must_use]
pub fn distance_km(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine::distance(to_haversine(from), to_haversine(to), haversine::Units::Kilometers)
}

fn to_haversine(coordinate: &Coordinate) -> haversine::Location {
    haversine::Location {
        latitude: coordinate.latitude,
        longitude: coordinate.longitude,
    }
}

/// Sample `n + 2` points from `start` to `end`, both endpoints included.
///
/// Intermediate point `i` sits at fraction `i / (n + 1)`, interpolated
/// independently in latitude and longitude. This is a straight line in
/// degree space, not a geodesic, and does not wrap across the antimeridian.
#[must_use]
pub fn sample_path(start: &Coordinate, end: &Coordinate, n: usize) -> Vec<Coordinate> {
    let mut points = Vec::with_capacity(n + 2);
    points.push(*start);

    let segments = (n + 1) as f64;
    for i in 1..=n {
        let fraction = i as f64 / segments;
        points.push(Coordinate {
            latitude: start.latitude + (end.latitude - start.latitude) * fraction,
            longitude: start.longitude + (end.longitude - start.longitude) * fraction,
        });
    }

    points.push(*end);
    points
}
