// Selection of consumers around the vendor

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{Coordinate, Degrees, Kilometers, Minutes, Node};
use crate::utils::geo_math::{self, TravelMode};

/// Position of a consumer relative to the vendor, for list display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proximity {
    pub distance_km: Kilometers,
    pub bearing: Degrees,
    pub compass_direction: String,
    pub estimated_minutes: Minutes,
}

impl Proximity {
    /// Measures `target` as seen from `origin`
    pub fn measure(origin: &Coordinate, target: &Coordinate, mode: TravelMode) -> Self {
        let distance_km = geo_math::distance(origin, target);
        let bearing = geo_math::bearing(origin, target);
        Self {
            distance_km,
            bearing,
            compass_direction: geo_math::compass_direction(bearing).to_string(),
            estimated_minutes: geo_math::estimate_travel_time(distance_km, mode),
        }
    }

    /// Short summary such as "589m NE, 1 min"
    pub fn summary(&self) -> String {
        format!(
            "{} {}, {}",
            geo_math::format_distance(self.distance_km),
            self.compass_direction,
            geo_math::format_travel_time(self.estimated_minutes)
        )
    }
}

/// A consumer that passed the radius filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub node: Node,
    pub proximity: Proximity,
}

/// Keep the consumers within `radius_km` of the vendor, preserving input order
pub fn filter_by_radius(
    vendor: &Coordinate,
    consumers: &[Node],
    radius_km: Kilometers,
    mode: TravelMode,
) -> Vec<Candidate> {
    consumers
        .par_iter()
        .filter_map(|consumer| {
            let proximity = Proximity::measure(vendor, &consumer.coordinate, mode);
            (proximity.distance_km <= radius_km).then(|| Candidate {
                node: consumer.clone(),
                proximity,
            })
        })
        .collect()
}
