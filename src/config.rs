// Engine configuration loaded from JSON

use crate::error::{EngineError, EngineResult};
use crate::models::Kilometers;
use crate::utils::geo_math::TravelMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings for the admission workflow and the demo simulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Consumers farther than this from the vendor never become candidates
    pub radius_km: Kilometers,

    /// Mode used for the ETA annotations
    pub travel_mode: TravelMode,

    pub simulation: SimulationConfig,
}

/// Pacing and movement of the demo simulator, measured in ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Ticks before the first candidate is released
    pub start_delay_ticks: u64,

    /// Ticks between resolving a request and releasing the next candidate
    pub request_interval_ticks: u64,

    /// Maximum number of candidates released in one session
    pub max_requests: usize,

    /// Radius of the circle moving consumers follow around the vendor
    pub orbit_radius_deg: f64,

    /// Seed for randomly scattered consumers
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            radius_km: 10.0,
            travel_mode: TravelMode::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_delay_ticks: 5,
            request_interval_ticks: 5,
            max_requests: 5,
            orbit_radius_deg: 0.004,
            seed: 42,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a configuration from a JSON string
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if !self.radius_km.is_finite() || self.radius_km < 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "radius_km must be a non-negative number, got {}",
                self.radius_km
            )));
        }
        if self.simulation.request_interval_ticks == 0 {
            return Err(EngineError::InvalidConfig(
                "request_interval_ticks must be at least 1".to_string(),
            ));
        }
        if !self.simulation.orbit_radius_deg.is_finite() {
            return Err(EngineError::InvalidConfig(
                "orbit_radius_deg must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
