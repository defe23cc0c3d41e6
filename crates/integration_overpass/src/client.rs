//! Overpass API client

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::OverpassConfig;
use crate::error::OverpassError;
use crate::query::StationQuery;

/// A rail station node from OpenStreetMap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RailStation {
    /// OSM node id
    pub id: i64,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Value of the `name` tag, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Trait for station index clients
#[async_trait]
pub trait StationIndexClient: Send + Sync {
    /// Find rail stations within `radius_meters` of a point, in server order
    async fn rail_stations_near(
        &self,
        lat: f64,
        lon: f64,
        radius_meters: u32,
    ) -> Result<Vec<RailStation>, OverpassError>;
}

/// Overpass API client
#[derive(Debug)]
pub struct OverpassClient {
    client: Client,
    config: OverpassConfig,
}

impl OverpassClient {
    /// Create a new Overpass client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &OverpassConfig) -> Result<Self, OverpassError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("routeplanner/0.1")
            .build()
            .map_err(|e| OverpassError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Parse an Overpass JSON response into stations
    ///
    /// Elements without coordinates are skipped.
    fn parse_elements_response(body: &str) -> Result<Vec<RailStation>, OverpassError> {
        let raw: RawResponse =
            serde_json::from_str(body).map_err(|e| OverpassError::ParseError(e.to_string()))?;

        Ok(raw
            .elements
            .into_iter()
            .filter_map(|e| {
                let (lat, lon) = match (e.lat, e.lon, e.center) {
                    (Some(lat), Some(lon), _) => (lat, lon),
                    (_, _, Some(c)) => (c.lat, c.lon),
                    _ => return None,
                };
                Some(RailStation {
                    id: e.id,
                    lat,
                    lon,
                    name: e.tags.get("name").cloned(),
                })
            })
            .collect())
    }
}

#[async_trait]
impl StationIndexClient for OverpassClient {
    #[instrument(skip(self))]
    async fn rail_stations_near(
        &self,
        lat: f64,
        lon: f64,
        radius_meters: u32,
    ) -> Result<Vec<RailStation>, OverpassError> {
        if radius_meters == 0 {
            return Err(OverpassError::InvalidQuery(
                "radius must be greater than 0".to_string(),
            ));
        }

        let query = StationQuery {
            lat,
            lon,
            radius_meters,
            excluded_station_types: self.config.excluded_station_types.clone(),
        };
        let url = format!("{}/interpreter", self.config.base_url.trim_end_matches('/'));

        debug!(?url, "Querying rail stations");

        let response = self
            .client
            .get(&url)
            .query(&[("data", query.to_overpass_ql())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OverpassError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    OverpassError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(OverpassError::RateLimitExceeded);
        }
        if status == StatusCode::GATEWAY_TIMEOUT || status == StatusCode::SERVICE_UNAVAILABLE {
            return Err(OverpassError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(OverpassError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| OverpassError::ParseError(e.to_string()))?;

        let stations = Self::parse_elements_response(&body)?;
        if stations.is_empty() {
            warn!("No rail stations in range");
        }

        debug!(count = stations.len(), "Rail stations found");
        Ok(stations)
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    elements: Vec<RawElement>,
}

#[derive(Debug, Deserialize)]
struct RawElement {
    id: i64,
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<RawCenter>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct RawCenter {
    lat: f64,
    lon: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nodes() {
        let json = r#"{
            "version": 0.6,
            "generator": "Overpass API",
            "elements": [
                {
                    "type": "node",
                    "id": 2450,
                    "lat": 18.5289,
                    "lon": 73.8744,
                    "tags": { "railway": "station", "name": "Pune Junction" }
                },
                {
                    "type": "node",
                    "id": 2451,
                    "lat": 18.6,
                    "lon": 73.9,
                    "tags": { "railway": "station" }
                }
            ]
        }"#;

        let stations = OverpassClient::parse_elements_response(json).unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].id, 2450);
        assert_eq!(stations[0].name.as_deref(), Some("Pune Junction"));
        assert!(stations[1].name.is_none());
    }

    #[test]
    fn test_parse_center_and_missing_coords() {
        let json = r#"{
            "elements": [
                { "type": "way", "id": 1, "center": { "lat": 1.0, "lon": 2.0 }, "tags": {} },
                { "type": "node", "id": 2, "tags": { "name": "Ghost" } }
            ]
        }"#;
        let stations = OverpassClient::parse_elements_response(json).unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].id, 1);
        assert!((stations[0].lon - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_empty() {
        let stations = OverpassClient::parse_elements_response(r#"{ "elements": [] }"#).unwrap();
        assert!(stations.is_empty());
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(OverpassClient::parse_elements_response("<html>").is_err());
    }
}
