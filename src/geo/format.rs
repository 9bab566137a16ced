//! Human-readable formatting for measured quantities.
//!
//! One rule for segment labels and cumulative distance, one rule for area;
//! the numbers on a snapshot and the strings rendered next to them always
//! come from the same source values.

/// Distances below this many meters are rendered in meters.
pub const KILOMETER_THRESHOLD_METERS: f64 = 1000.0;

/// Areas below this many square meters are rendered in m²; above, hectares.
pub const HECTARE_THRESHOLD_SQ_METERS: f64 = 10_000.0;

/// Format a distance: meters with 3 decimals under a kilometer, kilometers
/// with 2 decimals from there on.
#[must_use]
pub fn format_distance(meters: f64) -> String {
    if meters < KILOMETER_THRESHOLD_METERS {
        format!("{meters:.3}m")
    } else {
        format!("{:.2}km", meters / 1000.0)
    }
}

/// Format an area: m² with 2 decimals under a hectare, hectares with 2
/// decimals from there on.
#[must_use]
pub fn format_area(sq_meters: f64) -> String {
    if sq_meters < HECTARE_THRESHOLD_SQ_METERS {
        format!("{sq_meters:.2} m²")
    } else {
        format!("{:.2} ha", sq_meters / 10_000.0)
    }
}
