// Viewport that fits a set of coordinates, for map collaborators

use geo::{BoundingRect, MultiPoint, Point};
use serde::{Deserialize, Serialize};

use crate::models::{Coordinate, Degrees};

/// Smallest span of a region in either axis
pub const MIN_SPAN_DEG: Degrees = 0.01;

/// Region shown when there is nothing to fit
pub const DEFAULT_CENTER: Coordinate = Coordinate {
    latitude: 28.6139,
    longitude: 77.2090,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    pub center: Coordinate,
    pub latitude_delta: Degrees,
    pub longitude_delta: Degrees,
}

impl Default for MapRegion {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            latitude_delta: MIN_SPAN_DEG,
            longitude_delta: MIN_SPAN_DEG,
        }
    }
}

impl MapRegion {
    /// Fit the bounding box of `coordinates`, widened by `padding` degrees
    pub fn fit(coordinates: &[Coordinate], padding: Degrees) -> Self {
        let points: MultiPoint<f64> = coordinates
            .iter()
            .map(|c| Point::from(*c))
            .collect::<Vec<_>>()
            .into();

        match points.bounding_rect() {
            Some(rect) => {
                let center = rect.center();
                Self {
                    center: Coordinate::new(center.y, center.x),
                    latitude_delta: (rect.height() + padding).max(MIN_SPAN_DEG),
                    longitude_delta: (rect.width() + padding).max(MIN_SPAN_DEG),
                }
            }
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_uses_default() {
        assert_eq!(MapRegion::fit(&[], 0.01), MapRegion::default());
    }

    #[test]
    fn test_fit_bounding_box() {
        let region = MapRegion::fit(
            &[Coordinate::new(28.60, 77.20), Coordinate::new(28.64, 77.26)],
            0.01,
        );
        assert!((region.center.latitude - 28.62).abs() < 1e-9);
        assert!((region.center.longitude - 77.23).abs() < 1e-9);
        assert!((region.latitude_delta - 0.05).abs() < 1e-9);
        assert!((region.longitude_delta - 0.07).abs() < 1e-9);
    }

    #[test]
    fn test_single_point_gets_minimum_span() {
        let region = MapRegion::fit(&[Coordinate::new(10.0, 20.0)], 0.0);
        assert_eq!(region.center, Coordinate::new(10.0, 20.0));
        assert_eq!(region.latitude_delta, MIN_SPAN_DEG);
        assert_eq!(region.longitude_delta, MIN_SPAN_DEG);
    }
}
