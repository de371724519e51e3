// Reverse geocoding seam with a coordinate-only fallback

use tracing::warn;

use crate::models::Coordinate;

/// Address lookup provided by an external service
pub trait ReverseGeocoder {
    type Error: std::fmt::Display;

    /// Returns a formatted address, or `None` when the service has no result
    fn reverse(&self, coordinate: &Coordinate) -> Result<Option<String>, Self::Error>;
}

/// Label for a coordinate. Lookup failures never propagate: they degrade to
/// the coordinate itself.
pub fn display_label<G: ReverseGeocoder>(geocoder: &G, coordinate: &Coordinate) -> String {
    match geocoder.reverse(coordinate) {
        Ok(Some(address)) if !address.trim().is_empty() => address,
        Ok(_) => coordinate.fallback_label(),
        Err(e) => {
            warn!(error = %e, "reverse geocoding failed, using coordinates");
            coordinate.fallback_label()
        }
    }
}
