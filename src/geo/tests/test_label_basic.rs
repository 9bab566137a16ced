use crate::geo::{DEFAULT_ZOOM, LabelPlacer, LatLng, geodesic_midpoint, haversine_distance};

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual} (tolerance {tolerance})"
    );
}

#[test]
fn default_offset_for_a_medium_segment() {
    // ~222 m segment: base offset band, default zoom, so 25 m exactly.
    let placer = LabelPlacer::new();
    let p1 = LatLng::new(0.0, 0.0);
    let p2 = LatLng::new(0.0, 0.002);
    let label = placer.place_edge_label(0, p1, p2);

    let mid = geodesic_midpoint(p1, p2);
    assert_close(haversine_distance(mid, label.anchor), 25.0, 0.05);
}

#[test]
fn offset_band_follows_segment_length() {
    let placer = LabelPlacer::new();
    assert_close(placer.scaled_offset(50.0), 15.0, 1e-9);
    assert_close(placer.scaled_offset(500.0), 25.0, 1e-9);
    assert_close(placer.scaled_offset(5000.0), 40.0, 1e-9);
}

#[test]
fn offset_scales_with_zoom() {
    let mut placer = LabelPlacer::new();
    placer.set_zoom(13.0);
    assert_close(placer.scaled_offset(500.0), 25.0 * 1.3 * 1.3, 1e-9);
    placer.set_zoom(16.0);
    assert_close(placer.scaled_offset(500.0), 25.0 / 1.3, 1e-9);
}

#[test]
fn missing_zoom_falls_back_to_default() {
    assert_close(LabelPlacer::with_zoom(None).zoom(), DEFAULT_ZOOM, 1e-12);
    assert_close(LabelPlacer::with_zoom(Some(12.0)).zoom(), 12.0, 1e-12);
}

#[test]
fn non_finite_zoom_is_ignored() {
    let mut placer = LabelPlacer::new();
    placer.set_zoom(f64::NAN);
    assert_close(placer.zoom(), DEFAULT_ZOOM, 1e-12);
}

#[test]
fn anchor_sits_right_of_the_edge_direction() {
    // Eastbound edge on the equator: perpendicular is due south.
    let placer = LabelPlacer::new();
    let label = placer.place_edge_label(0, LatLng::new(0.0, 0.0), LatLng::new(0.0, 0.002));
    assert!(label.anchor.lat < 0.0);
    assert!(label.anchor.lng > 0.0 && label.anchor.lng < 0.002);
}

#[test]
fn label_text_matches_segment_length() {
    let placer = LabelPlacer::new();
    let label = placer.place_edge_label(3, LatLng::new(0.0, 0.0), LatLng::new(0.0, 0.001));
    assert_eq!(label.edge_index, 3);
    assert_eq!(label.text, "111.195m");
}

#[test]
fn planar_fallback_stays_close_to_geodesic_near_the_equator() {
    let geodesic = LabelPlacer::new();
    let planar = LabelPlacer::new().planar_fallback();
    let p1 = LatLng::new(0.0, 0.0);
    let p2 = LatLng::new(0.0, 0.002);

    let a = geodesic.place_edge_label(0, p1, p2).anchor;
    let b = planar.place_edge_label(0, p1, p2).anchor;
    assert!(haversine_distance(a, b) < 1.0);
}
