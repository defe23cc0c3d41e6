//! Planner configuration

use domain::Coordinate;
use serde::{Deserialize, Serialize};

/// Which distance the train-mode info line reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceReport {
    /// Straight-line station-to-station distance only
    #[default]
    RailOnly,
    /// Rail distance plus both walking legs
    Multimodal,
}

/// Settings for route composition and the planner service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Radius of the rail station search in meters
    #[serde(default = "default_station_search_radius")]
    pub station_search_radius_meters: u32,

    /// Geocode bias used while the user location is unknown
    #[serde(default = "Coordinate::mumbai")]
    pub default_location: Coordinate,

    /// Upper bound for one complete route request, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Headline distance in train mode
    #[serde(default)]
    pub distance_report: DistanceReport,
}

const fn default_station_search_radius() -> u32 {
    45_000
}

const fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            station_search_radius_meters: default_station_search_radius(),
            default_location: Coordinate::mumbai(),
            request_timeout_secs: default_request_timeout_secs(),
            distance_report: DistanceReport::default(),
        }
    }
}

impl PlannerConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.station_search_radius_meters == 0 {
            return Err("station_search_radius_meters must be greater than 0".to_string());
        }

        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }

        Coordinate::new(self.default_location.lat(), self.default_location.lon())
            .map_err(|e| e.to_string())?;

        Ok(())
    }
}
