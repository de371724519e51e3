// Coordinate model representing a point on the Earth's surface

use crate::error::{EngineError, EngineResult};
use crate::models::Degrees;
use serde::{Deserialize, Serialize};

/// Represents a latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: Degrees,
    pub longitude: Degrees,
}

impl Coordinate {
    /// Creates a new coordinate without validation
    pub fn new(latitude: Degrees, longitude: Degrees) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Creates a coordinate, rejecting non-finite or out of range values
    pub fn try_new(latitude: Degrees, longitude: Degrees) -> EngineResult<Self> {
        let coordinate = Self::new(latitude, longitude);
        coordinate.validate()?;
        Ok(coordinate)
    }

    /// Checks that both components are finite and inside the valid ranges
    pub fn validate(&self) -> EngineResult<()> {
        let finite = self.latitude.is_finite() && self.longitude.is_finite();
        if finite && self.latitude.abs() <= 90.0 && self.longitude.abs() <= 180.0 {
            Ok(())
        } else {
            Err(EngineError::InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }

    /// Coordinate-only label used when no address is known
    pub fn fallback_label(&self) -> String {
        format!("GPS: {:.6}, {:.6}", self.latitude, self.longitude)
    }
}

impl From<Coordinate> for geo::Point<f64> {
    fn from(coordinate: Coordinate) -> Self {
        // geo uses (x, y) = (longitude, latitude)
        geo::Point::new(coordinate.longitude, coordinate.latitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_accepts_valid_coordinate() {
        let coordinate = Coordinate::try_new(28.6139, 77.2090).unwrap();
        assert_eq!(coordinate.latitude, 28.6139);
        assert_eq!(coordinate.longitude, 77.2090);
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(Coordinate::try_new(f64::NAN, 77.0).is_err());
        assert!(Coordinate::try_new(28.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(
            Coordinate::try_new(91.0, 0.0),
            Err(EngineError::InvalidCoordinate { .. })
        ));
        assert!(Coordinate::try_new(0.0, -180.5).is_err());
        assert!(Coordinate::try_new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn test_fallback_label() {
        let coordinate = Coordinate::new(28.6139, 77.209);
        assert_eq!(coordinate.fallback_label(), "GPS: 28.613900, 77.209000");
    }

    #[test]
    fn test_into_geo_point() {
        let point: geo::Point<f64> = Coordinate::new(1.5, 2.5).into();
        assert_eq!(point.x(), 2.5);
        assert_eq!(point.y(), 1.5);
    }
}
