mod cache;
mod core;
mod format;
mod geodesy;
mod label;

pub use cache::{Clock, LookupCache, LookupCacheStats, ManualClock};
#[cfg(not(target_arch = "wasm32"))]
pub use cache::SystemClock;
pub use self::core::{EARTH_RADIUS_METERS, LatLng, Tolerance};
pub use format::{
    HECTARE_THRESHOLD_SQ_METERS, KILOMETER_THRESHOLD_METERS, format_area, format_distance,
};
pub use geodesy::{
    destination_point, geodesic_midpoint, haversine_distance, initial_bearing, path_length,
    spherical_polygon_area, spherical_polygon_signed_area,
};
pub use label::{DEFAULT_ZOOM, EdgeLabel, LabelPlacer, OffsetMode};

#[cfg(test)]
mod tests;
