// Great-circle math on latitude/longitude coordinates

use crate::models::{Coordinate, Degrees, Kilometers, Minutes};
use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Sixteen-wind compass rose, clockwise from north
pub const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// How the vendor travels to a consumer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Walking,
    Cycling,
    #[default]
    Driving,
}

impl TravelMode {
    /// Average speed in km/h. Driving assumes city traffic.
    pub fn average_speed_kmh(&self) -> f64 {
        match self {
            TravelMode::Walking => 5.0,
            TravelMode::Cycling => 15.0,
            TravelMode::Driving => 30.0,
        }
    }
}

/// Calculate the haversine distance between two coordinates in kilometers
pub fn distance(a: &Coordinate, b: &Coordinate) -> Kilometers {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Calculate the forward azimuth from `start` to `end`, normalised into [0, 360)
pub fn bearing(start: &Coordinate, end: &Coordinate) -> Degrees {
    let lat_start = start.latitude.to_radians();
    let lat_end = end.latitude.to_radians();
    let d_lon = (end.longitude - start.longitude).to_radians();

    let y = d_lon.sin() * lat_end.cos();
    let x = lat_start.cos() * lat_end.sin() - lat_start.sin() * lat_end.cos() * d_lon.cos();

    let degrees = y.atan2(x).to_degrees().rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if degrees >= 360.0 {
        0.0
    } else {
        degrees
    }
}

/// Map a bearing onto one of the 16 compass points
pub fn compass_direction(bearing: Degrees) -> &'static str {
    let index = (bearing / 22.5).round().rem_euclid(16.0) as usize;
    COMPASS_POINTS[index % COMPASS_POINTS.len()]
}

/// Estimate the travel time in whole minutes at the mode's average speed
pub fn estimate_travel_time(distance_km: Kilometers, mode: TravelMode) -> Minutes {
    (distance_km / mode.average_speed_kmh() * 60.0).round() as Minutes
}

/// Checks if `location` lies within `max_km` of `center`
pub fn is_within_radius(location: &Coordinate, center: &Coordinate, max_km: Kilometers) -> bool {
    distance(location, center) <= max_km
}

/// Human readable distance: metres below 1 km, one decimal below 10 km
pub fn format_distance(distance_km: Kilometers) -> String {
    if distance_km < 1.0 {
        format!("{}m", (distance_km * 1000.0).round())
    } else if distance_km < 10.0 {
        format!("{:.1}km", distance_km)
    } else {
        format!("{}km", distance_km.round())
    }
}

/// Human readable travel time such as "12 min" or "1h 5m"
pub fn format_travel_time(minutes: Minutes) -> String {
    if minutes < 60 {
        return format!("{} min", minutes);
    }
    let hours = minutes / 60;
    let rest = minutes % 60;
    if rest > 0 {
        format!("{}h {}m", hours, rest)
    } else {
        format!("{}h", hours)
    }
}
