//! Great-circle geometry on the spherical Earth model.
//!
//! All functions here are pure and deterministic: distance, bearing,
//! destination point (the direct geodesic problem), geodesic midpoint, and
//! spherical polygon area. Everything works in degrees at the boundary and
//! radians internally, on a sphere of [`EARTH_RADIUS_METERS`].

use super::core::{EARTH_RADIUS_METERS, LatLng};

/// Great-circle distance between two coordinates in meters (haversine).
#[must_use]
pub fn haversine_distance(a: LatLng, b: LatLng) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat_rad().cos() * b.lat_rad().cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_METERS * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Sum of the great-circle lengths of consecutive segments.
///
/// Returns 0 for fewer than two points. No closing segment is implied; a
/// closed ring must carry its closing vertex explicitly.
#[must_use]
pub fn path_length(points: &[LatLng]) -> f64 {
    points
        .windows(2)
        .map(|pair| haversine_distance(pair[0], pair[1]))
        .fold(0.0, |total, segment| total + segment)
}

/// Initial bearing from `a` towards `b`, in degrees within `[0, 360)`.
#[must_use]
pub fn initial_bearing(a: LatLng, b: LatLng) -> f64 {
    let d_lng = (b.lng - a.lng).to_radians();
    let y = d_lng.sin() * b.lat_rad().cos();
    let x = a.lat_rad().cos() * b.lat_rad().sin()
        - a.lat_rad().sin() * b.lat_rad().cos() * d_lng.cos();

    y.atan2(x).to_degrees().rem_euclid(360.0)
}

/// Destination point at `distance_m` meters from `origin` along
/// `bearing_deg` (spherical direct geodesic problem).
///
/// The resulting longitude is normalized into `[-180, 180)`.
#[must_use]
pub fn destination_point(origin: LatLng, distance_m: f64, bearing_deg: f64) -> LatLng {
    let delta = distance_m / EARTH_RADIUS_METERS;
    let theta = bearing_deg.to_radians();
    let phi1 = origin.lat_rad();
    let lambda1 = origin.lng_rad();

    let phi2 = (phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos()).asin();
    let lambda2 = lambda1
        + (theta.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * phi2.sin());

    let lng = (lambda2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0;
    LatLng::new(phi2.to_degrees(), lng)
}

/// True geodesic midpoint of the segment `a`–`b`: the destination at half
/// the haversine distance along the initial bearing from `a`.
///
/// This is not the naive component average; the two diverge noticeably on
/// long segments and at high latitude.
#[must_use]
pub fn geodesic_midpoint(a: LatLng, b: LatLng) -> LatLng {
    let distance = haversine_distance(a, b);
    if distance == 0.0 {
        return a;
    }
    destination_point(a, distance / 2.0, initial_bearing(a, b))
}

/// Spherical polygon area in square meters, as a non-negative magnitude.
///
/// Uses the spherical-excess formulation over per-edge polar triangles (the
/// algorithm behind the familiar `computeArea` in mapping SDKs): each edge
/// contributes a signed term computed from the tangents of the endpoint
/// half-colatitudes, and the absolute total is scaled by the squared Earth
/// radius. Both winding orders yield the same result. Returns 0 for fewer
/// than three points. A duplicated closing vertex contributes a zero term,
/// so rings may be passed with or without it.
#[must_use]
pub fn spherical_polygon_area(points: &[LatLng]) -> f64 {
    spherical_polygon_signed_area(points).abs()
}

/// Signed spherical polygon area; the sign follows the ring winding and
/// flips when the vertex order is reversed.
#[must_use]
pub fn spherical_polygon_signed_area(points: &[LatLng]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let last = points[points.len() - 1];
    let mut prev_tan = half_colatitude_tan(last);
    let mut prev_lng = last.lng_rad();

    let mut total = 0.0;
    for point in points {
        let tan = half_colatitude_tan(*point);
        let lng = point.lng_rad();
        total += polar_triangle_area(tan, lng, prev_tan, prev_lng);
        prev_tan = tan;
        prev_lng = lng;
    }

    total * EARTH_RADIUS_METERS * EARTH_RADIUS_METERS
}

/// `tan((π/2 − φ) / 2)` for latitude φ.
fn half_colatitude_tan(p: LatLng) -> f64 {
    (std::f64::consts::FRAC_PI_4 - p.lat_rad() / 2.0).tan()
}

/// Signed excess of the polar triangle spanned by two vertices and the pole.
fn polar_triangle_area(tan1: f64, lng1: f64, tan2: f64, lng2: f64) -> f64 {
    let delta_lng = lng1 - lng2;
    let t = tan1 * tan2;
    2.0 * (t * delta_lng.sin()).atan2(1.0 + t * delta_lng.cos())
}
