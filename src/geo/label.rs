//! Placement of distance labels next to path edges.
//!
//! A label is anchored at the geodesic midpoint of its edge, pushed out
//! perpendicular to the edge so the text does not sit on the line. The
//! perpendicular offset is a ground distance chosen from the segment length
//! and then scaled for the current zoom level, which keeps the label at a
//! roughly constant pixel distance from the line across zoom levels.

use serde::Serialize;

use super::core::LatLng;
use super::format::format_distance;
use super::geodesy::{destination_point, geodesic_midpoint, haversine_distance, initial_bearing};

/// Zoom level assumed when the display surface supplies none.
pub const DEFAULT_ZOOM: f64 = 15.0;

/// Base perpendicular offset in meters.
const BASE_OFFSET_METERS: f64 = 25.0;
/// Offset for segments longer than [`LONG_SEGMENT_METERS`].
const LONG_OFFSET_METERS: f64 = 40.0;
/// Offset for segments shorter than [`SHORT_SEGMENT_METERS`].
const SHORT_OFFSET_METERS: f64 = 15.0;

const LONG_SEGMENT_METERS: f64 = 1000.0;
const SHORT_SEGMENT_METERS: f64 = 100.0;

/// Per-zoom-step growth factor of the ground offset. One zoom step halves
/// the meters-per-pixel scale roughly; 1.3 tracks the label sizes used by
/// the measuring overlay closely enough in the zoom range that matters.
const ZOOM_SCALE_BASE: f64 = 1.3;

/// Meters per degree of latitude on the spherical model, for the planar
/// fallback only.
const METERS_PER_DEGREE: f64 = 111_194.926_644_558_74;

/// How the perpendicular anchor is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffsetMode {
    /// Geodesic bearing + destination point. The default.
    #[default]
    Geodesic,
    /// Planar trigonometry in degree space. Lower precision, degrades at
    /// high latitude; only for hosts without the geodesic helpers.
    PlanarFallback,
}

/// A renderable distance label for one edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeLabel {
    pub edge_index: usize,
    pub text: String,
    pub anchor: LatLng,
}

/// Computes label anchors for path edges at a given zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacer {
    zoom: f64,
    mode: OffsetMode,
}

impl LabelPlacer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            mode: OffsetMode::Geodesic,
        }
    }

    /// Placer for a display surface that reports its zoom level; `None`
    /// falls back to [`DEFAULT_ZOOM`] rather than failing.
    #[must_use]
    pub fn with_zoom(zoom: Option<f64>) -> Self {
        let mut placer = Self::new();
        if let Some(zoom) = zoom {
            placer.set_zoom(zoom);
        }
        placer
    }

    /// Switch to the lower-precision planar offset computation.
    #[must_use]
    pub const fn planar_fallback(mut self) -> Self {
        self.mode = OffsetMode::PlanarFallback;
        self
    }

    #[must_use]
    pub const fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Update the zoom level. Non-finite values are ignored and the current
    /// zoom is kept.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom;
        }
    }

    /// Compute the label for edge `edge_index` with endpoints `p1`, `p2`.
    #[must_use]
    pub fn place_edge_label(&self, edge_index: usize, p1: LatLng, p2: LatLng) -> EdgeLabel {
        let segment_length = haversine_distance(p1, p2);
        let mid = geodesic_midpoint(p1, p2);
        let offset = self.scaled_offset(segment_length);
        let perp_bearing = (initial_bearing(p1, p2) + 90.0).rem_euclid(360.0);

        let anchor = match self.mode {
            OffsetMode::Geodesic => destination_point(mid, offset, perp_bearing),
            OffsetMode::PlanarFallback => planar_offset(mid, offset, perp_bearing),
        };

        EdgeLabel {
            edge_index,
            text: format_distance(segment_length),
            anchor,
        }
    }

    /// Ground offset in meters for a segment of the given length, scaled to
    /// the current zoom.
    #[must_use]
    pub fn scaled_offset(&self, segment_length: f64) -> f64 {
        let base = if segment_length > LONG_SEGMENT_METERS {
            LONG_OFFSET_METERS
        } else if segment_length < SHORT_SEGMENT_METERS {
            SHORT_OFFSET_METERS
        } else {
            BASE_OFFSET_METERS
        };
        base * ZOOM_SCALE_BASE.powf(DEFAULT_ZOOM - self.zoom)
    }
}

impl Default for LabelPlacer {
    fn default() -> Self {
        Self::new()
    }
}

/// Degree-space approximation of a perpendicular offset. Keeps labels usable
/// when the geodesic path is unavailable, at reduced precision.
fn planar_offset(origin: LatLng, distance_m: f64, bearing_deg: f64) -> LatLng {
    let theta = bearing_deg.to_radians();
    let d_lat = distance_m * theta.cos() / METERS_PER_DEGREE;
    let lat_scale = origin.lat_rad().cos().max(1e-12);
    let d_lng = distance_m * theta.sin() / (METERS_PER_DEGREE * lat_scale);
    LatLng::new(origin.lat + d_lat, origin.lng + d_lng)
}
