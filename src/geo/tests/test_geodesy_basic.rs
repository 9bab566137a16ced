use crate::geo::{
    LatLng, Tolerance, destination_point, geodesic_midpoint, haversine_distance, initial_bearing,
    path_length, spherical_polygon_area, spherical_polygon_signed_area,
};

/// One degree of arc on the spherical model, in meters.
const ONE_DEGREE_METERS: f64 = 111_194.926_644_558_74;

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual} (tolerance {tolerance})"
    );
}

#[test]
fn one_degree_along_the_equator() {
    let d = haversine_distance(LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0));
    assert_close(d, ONE_DEGREE_METERS, 0.01);
}

#[test]
fn one_degree_along_a_meridian() {
    let d = haversine_distance(LatLng::new(0.0, 0.0), LatLng::new(1.0, 0.0));
    assert_close(d, ONE_DEGREE_METERS, 0.01);
}

#[test]
fn distance_is_symmetric_and_zero_for_identical_points() {
    let a = LatLng::new(52.37, 4.89);
    let b = LatLng::new(48.86, 2.35);
    assert_eq!(haversine_distance(a, b), haversine_distance(b, a));
    assert_eq!(haversine_distance(a, a), 0.0);
}

#[test]
fn path_length_sums_consecutive_segments() {
    let points = [
        LatLng::new(0.0, 0.0),
        LatLng::new(0.0, 0.001),
        LatLng::new(0.001, 0.001),
    ];
    let expected = haversine_distance(points[0], points[1])
        + haversine_distance(points[1], points[2]);
    assert_close(path_length(&points), expected, 1e-9);
}

#[test]
fn path_length_is_zero_below_two_points() {
    assert_eq!(path_length(&[]), 0.0);
    assert_eq!(path_length(&[LatLng::new(1.0, 1.0)]), 0.0);
}

#[test]
fn cardinal_bearings() {
    let origin = LatLng::new(0.0, 0.0);
    assert_close(initial_bearing(origin, LatLng::new(1.0, 0.0)), 0.0, 1e-9);
    assert_close(initial_bearing(origin, LatLng::new(0.0, 1.0)), 90.0, 1e-9);
    assert_close(initial_bearing(origin, LatLng::new(-1.0, 0.0)), 180.0, 1e-9);
    assert_close(initial_bearing(origin, LatLng::new(0.0, -1.0)), 270.0, 1e-9);
}

#[test]
fn destination_east_along_the_equator() {
    let p = destination_point(LatLng::new(0.0, 0.0), ONE_DEGREE_METERS, 90.0);
    assert_close(p.lat, 0.0, 1e-9);
    assert_close(p.lng, 1.0, 1e-9);
}

#[test]
fn destination_round_trips_through_distance() {
    let origin = LatLng::new(52.0, 5.0);
    let target = destination_point(origin, 1234.5, 37.0);
    assert_close(haversine_distance(origin, target), 1234.5, 1e-3);
}

#[test]
fn destination_normalizes_longitude() {
    let p = destination_point(LatLng::new(0.0, 179.5), ONE_DEGREE_METERS, 90.0);
    assert_close(p.lng, -179.5, 1e-9);
}

#[test]
fn midpoint_of_an_equatorial_segment() {
    let mid = geodesic_midpoint(LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0));
    let tol = Tolerance::new(1e-9);
    assert!(tol.approx_eq_latlng(mid, LatLng::new(0.0, 0.5)));
}

#[test]
fn midpoint_of_a_degenerate_segment_is_the_point_itself() {
    let p = LatLng::new(52.0, 5.0);
    assert_eq!(geodesic_midpoint(p, p), p);
}

#[test]
fn midpoint_splits_the_distance_evenly() {
    let a = LatLng::new(50.0, 4.0);
    let b = LatLng::new(51.0, 6.0);
    let mid = geodesic_midpoint(a, b);
    let half = haversine_distance(a, b) / 2.0;
    assert_close(haversine_distance(a, mid), half, 1e-3);
    assert_close(haversine_distance(mid, b), half, 1e-3);
}

#[test]
fn area_of_a_small_equatorial_square() {
    // ±0.001° square centered on the origin; small enough that the planar
    // approximation (side ≈ 222.39 m) is accurate to well under 0.5%.
    let square = [
        LatLng::new(0.001, -0.001),
        LatLng::new(0.001, 0.001),
        LatLng::new(-0.001, 0.001),
        LatLng::new(-0.001, -0.001),
    ];
    let side = 0.002 * ONE_DEGREE_METERS;
    let expected = side * side;
    let area = spherical_polygon_area(&square);
    assert!(
        (area - expected).abs() / expected < 0.005,
        "area {area} deviates from planar estimate {expected}"
    );
}

#[test]
fn area_is_winding_order_independent() {
    let ring = [
        LatLng::new(0.001, -0.001),
        LatLng::new(0.001, 0.001),
        LatLng::new(-0.001, 0.001),
    ];
    let reversed: Vec<LatLng> = ring.iter().rev().copied().collect();
    let forward = spherical_polygon_area(&ring);
    assert!(forward > 0.0);
    assert_close(spherical_polygon_area(&reversed), forward, 1e-6);
}

#[test]
fn signed_area_flips_with_winding() {
    let ring = [
        LatLng::new(0.001, -0.001),
        LatLng::new(0.001, 0.001),
        LatLng::new(-0.001, 0.001),
    ];
    let reversed: Vec<LatLng> = ring.iter().rev().copied().collect();
    let forward = spherical_polygon_signed_area(&ring);
    let backward = spherical_polygon_signed_area(&reversed);
    assert_close(forward + backward, 0.0, 1e-6);
}

#[test]
fn area_is_zero_below_three_points() {
    assert_eq!(spherical_polygon_area(&[]), 0.0);
    assert_eq!(
        spherical_polygon_area(&[LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0)]),
        0.0
    );
}

#[test]
fn duplicated_closing_vertex_does_not_change_the_area() {
    let open = [
        LatLng::new(0.001, -0.001),
        LatLng::new(0.001, 0.001),
        LatLng::new(-0.001, 0.001),
    ];
    let closed = [open[0], open[1], open[2], open[0]];
    assert_close(
        spherical_polygon_area(&closed),
        spherical_polygon_area(&open),
        1e-6,
    );
}
