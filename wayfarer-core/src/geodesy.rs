//! Great-circle distance between WGS84 coordinates.
//!
//! Coordinates follow the `geo` convention used across the crate:
//! `x = longitude` and `y = latitude`, both in degrees.

use geo::Coord;

/// Mean Earth radius used by [`haversine_distance`], in metres.
pub const EARTH_RADIUS_METRES: f64 = 6_371_000.0;

/// Build a coordinate from latitude and longitude in degrees.
///
/// # Examples
/// ```
/// use wayfarer_core::geodesy::lat_lng;
///
/// let toronto = lat_lng(43.6532, -79.3832);
/// assert_eq!(toronto.y, 43.6532);
/// assert_eq!(toronto.x, -79.3832);
/// ```
#[must_use]
pub const fn lat_lng(latitude: f64, longitude: f64) -> Coord<f64> {
    Coord {
        x: longitude,
        y: latitude,
    }
}

/// Haversine distance between `a` and `b` in metres.
///
/// Identical points yield `0.0` and the result is symmetric in its
/// arguments.
///
/// # Examples
/// ```
/// use wayfarer_core::geodesy::{haversine_distance, lat_lng};
///
/// let here = lat_lng(43.6532, -79.3832);
/// assert_eq!(haversine_distance(here, here), 0.0);
///
/// let rom = lat_lng(43.6677, -79.3948);
/// let metres = haversine_distance(here, rom);
/// assert!((1_800.0..1_900.0).contains(&metres));
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "haversine is defined in terms of floating-point trigonometry"
)]
pub fn haversine_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat_a = a.y.to_radians();
    let lat_b = b.y.to_radians();
    let half_d_lat = (lat_b - lat_a) / 2.0;
    let half_d_lon = (b.x - a.x).to_radians() / 2.0;

    let raw = half_d_lat.sin().powi(2) + lat_a.cos() * lat_b.cos() * half_d_lon.sin().powi(2);
    // Rounding can push the term fractionally outside the unit interval.
    let h = raw.clamp(0.0, 1.0);
    let central_angle = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_METRES * central_angle
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "tests compare floating-point distances"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(lat_lng(0.0, 0.0))]
    #[case(lat_lng(43.6532, -79.3832))]
    #[case(lat_lng(-33.8688, 151.2093))]
    fn identical_points_are_zero_apart(#[case] point: Coord<f64>) {
        assert_eq!(haversine_distance(point, point), 0.0);
    }

    #[rstest]
    fn one_degree_of_latitude_is_about_111_km() {
        let metres = haversine_distance(lat_lng(0.0, 0.0), lat_lng(1.0, 0.0));
        assert!((metres - 111_194.9).abs() < 1.0, "got {metres}");
    }

    #[rstest]
    fn antipodes_are_half_the_circumference_apart() {
        let metres = haversine_distance(lat_lng(0.0, 0.0), lat_lng(0.0, 180.0));
        let expected = std::f64::consts::PI * EARTH_RADIUS_METRES;
        assert!((metres - expected).abs() < 1e-6, "got {metres}");
    }

    #[rstest]
    fn distance_is_symmetric() {
        let a = lat_lng(43.6532, -79.3832);
        let b = lat_lng(43.6426, -79.3871);
        let forward = haversine_distance(a, b);
        let backward = haversine_distance(b, a);
        assert!((forward - backward).abs() < 1e-9);
    }
}
