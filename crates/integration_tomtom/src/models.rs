//! TomTom data models
//!
//! Typed representations of geocoding matches and calculated routes, plus the
//! travel profiles the routing client understands.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-ranked geocoding result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeMatch {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Formatted address, when the service provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freeform_address: Option<String>,
}

/// A single point of route geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

/// Aggregate metrics of a calculated route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    /// Route length in meters
    pub length_in_meters: u32,
    /// Estimated travel time in seconds (includes traffic delay when requested)
    pub travel_time_in_seconds: u32,
    /// Delay caused by current traffic, in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traffic_delay_in_seconds: Option<u32>,
}

/// The best route returned by the routing service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatedRoute {
    /// Route geometry, all legs concatenated in order
    pub points: Vec<RoutePoint>,
    /// Summary metrics
    pub summary: RouteSummary,
}

/// Routing profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelProfile {
    /// Fastest car route using live traffic
    DrivingWithTraffic,
    /// Walking route
    Pedestrian,
}

impl TravelProfile {
    /// `travelMode` query value
    #[must_use]
    pub const fn travel_mode(&self) -> &'static str {
        match self {
            Self::DrivingWithTraffic => "car",
            Self::Pedestrian => "pedestrian",
        }
    }

    /// Whether live traffic should be considered
    #[must_use]
    pub const fn uses_traffic(&self) -> bool {
        matches!(self, Self::DrivingWithTraffic)
    }

    /// `routeType` query value
    #[must_use]
    pub const fn route_type(&self) -> &'static str {
        "fastest"
    }
}

impl fmt::Display for TravelProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DrivingWithTraffic => write!(f, "driving-with-traffic"),
            Self::Pedestrian => write!(f, "pedestrian"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_params() {
        assert_eq!(TravelProfile::DrivingWithTraffic.travel_mode(), "car");
        assert!(TravelProfile::DrivingWithTraffic.uses_traffic());
        assert_eq!(TravelProfile::Pedestrian.travel_mode(), "pedestrian");
        assert!(!TravelProfile::Pedestrian.uses_traffic());
        assert_eq!(TravelProfile::Pedestrian.route_type(), "fastest");
    }

    #[test]
    fn test_profile_display() {
        assert_eq!(
            TravelProfile::DrivingWithTraffic.to_string(),
            "driving-with-traffic"
        );
        assert_eq!(TravelProfile::Pedestrian.to_string(), "pedestrian");
    }

    #[test]
    fn test_summary_parsing() {
        let json = r#"{"lengthInMeters": 1520, "travelTimeInSeconds": 300}"#;
        let summary: RouteSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.length_in_meters, 1520);
        assert_eq!(summary.travel_time_in_seconds, 300);
        assert!(summary.traffic_delay_in_seconds.is_none());
    }
}
