use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters, used by every spherical approximation in
/// this crate.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

// ─────────────────────────────────────────────────────────────────────────────
// LatLng
// ─────────────────────────────────────────────────────────────────────────────

/// A geographic coordinate in degrees (WGS84 range expected).
///
/// Values are not normalized or clamped; callers are responsible for
/// supplying coordinates in range. Non-finite components are rejected by the
/// mutating path operations, not here.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Create a LatLng from a `[lat, lng]` array.
    #[must_use]
    pub const fn from_array(arr: [f64; 2]) -> Self {
        Self::new(arr[0], arr[1])
    }

    /// Convert to a `[lat, lng]` array.
    #[must_use]
    pub const fn to_array(self) -> [f64; 2] {
        [self.lat, self.lng]
    }

    /// Both components are finite (neither NaN nor infinite).
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Latitude in radians.
    #[must_use]
    pub fn lat_rad(self) -> f64 {
        self.lat.to_radians()
    }

    /// Longitude in radians.
    #[must_use]
    pub fn lng_rad(self) -> f64 {
        self.lng.to_radians()
    }
}

impl From<[f64; 2]> for LatLng {
    fn from(arr: [f64; 2]) -> Self {
        Self::from_array(arr)
    }
}

impl From<LatLng> for [f64; 2] {
    fn from(p: LatLng) -> Self {
        p.to_array()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tolerance
// ─────────────────────────────────────────────────────────────────────────────

/// Comparison tolerance for coordinate-space checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub epsilon: f64,
}

impl Tolerance {
    #[must_use]
    pub const fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Default tolerance for degree-space comparisons (~0.1 mm at the
    /// equator).
    #[must_use]
    pub const fn default_geo() -> Self {
        Self::new(1e-9)
    }

    #[must_use]
    pub fn approx_eq(self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.epsilon
    }

    #[must_use]
    pub fn approx_eq_latlng(self, a: LatLng, b: LatLng) -> bool {
        self.approx_eq(a.lat, b.lat) && self.approx_eq(a.lng, b.lng)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_geo()
    }
}
