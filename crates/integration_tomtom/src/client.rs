//! TomTom routing client
//!
//! Calculates routes between two waypoints using the
//! [calculateRoute](https://developer.tomtom.com/routing-api/documentation/routing/calculate-route)
//! endpoint and returns the best route's geometry and summary.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::TomTomConfig;
use crate::error::TomTomError;
use crate::models::{CalculatedRoute, RoutePoint, RouteSummary, TravelProfile};

/// Trait for routing clients
#[async_trait]
pub trait RoutingClient: Send + Sync {
    /// Calculate the best route between two `(lat, lon)` waypoints
    async fn calculate_route(
        &self,
        from: (f64, f64),
        to: (f64, f64),
        profile: TravelProfile,
    ) -> Result<CalculatedRoute, TomTomError>;
}

/// TomTom Routing API client
#[derive(Debug)]
pub struct TomTomRoutingClient {
    client: Client,
    config: TomTomConfig,
    api_key: String,
}

impl TomTomRoutingClient {
    /// Create a new routing client
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client cannot be initialized.
    pub fn new(config: &TomTomConfig) -> Result<Self, TomTomError> {
        let api_key = require_api_key(config)?;
        Ok(Self {
            client: build_http_client(config)?,
            config: config.clone(),
            api_key,
        })
    }

    /// Build the calculateRoute URL for a waypoint pair
    fn route_url(&self, from: (f64, f64), to: (f64, f64)) -> Result<Url, TomTomError> {
        let waypoints = format!("{},{}:{},{}", from.0, from.1, to.0, to.1);
        endpoint(
            &self.config.base_url,
            &["routing", "1", "calculateRoute", &waypoints, "json"],
        )
    }

    /// Parse a calculateRoute response body, keeping only the first route
    fn parse_route_response(body: &str) -> Result<Option<CalculatedRoute>, TomTomError> {
        let raw: RawRouteResponse =
            serde_json::from_str(body).map_err(|e| TomTomError::ParseError(e.to_string()))?;

        Ok(raw.routes.into_iter().next().map(|route| CalculatedRoute {
            points: route
                .legs
                .into_iter()
                .flat_map(|leg| leg.points)
                .collect(),
            summary: route.summary,
        }))
    }
}

#[async_trait]
impl RoutingClient for TomTomRoutingClient {
    #[instrument(skip(self), fields(profile = %profile))]
    async fn calculate_route(
        &self,
        from: (f64, f64),
        to: (f64, f64),
        profile: TravelProfile,
    ) -> Result<CalculatedRoute, TomTomError> {
        let url = self.route_url(from, to)?;

        let mut params: Vec<(&str, String)> = vec![
            ("key", self.api_key.clone()),
            ("travelMode", profile.travel_mode().to_string()),
            ("traffic", profile.uses_traffic().to_string()),
            ("routeType", profile.route_type().to_string()),
        ];

        if self.config.max_alternatives > 0 {
            params.push(("maxAlternatives", self.config.max_alternatives.to_string()));
        }

        debug!(path = %url.path(), "Calculating route");

        let response = self
            .client
            .get(url)
            .query(&params)
            .send()
            .await
            .map_err(|e| map_send_error(&e, self.config.timeout_secs))?;

        let no_route = || TomTomError::NoRouteFound {
            from: format!("{},{}", from.0, from.1),
            to: format!("{},{}", to.0, to.1),
        };

        if response.status() == StatusCode::BAD_REQUEST {
            let body = response.text().await.unwrap_or_default();
            if body.contains("NO_ROUTE_FOUND") {
                return Err(no_route());
            }
            return Err(TomTomError::RequestFailed(format!(
                "HTTP {}",
                StatusCode::BAD_REQUEST
            )));
        }

        let response = check_status(response)?;

        let body = response
            .text()
            .await
            .map_err(|e| TomTomError::ParseError(e.to_string()))?;

        let Some(route) = Self::parse_route_response(&body)? else {
            warn!("Routing service returned no routes");
            return Err(no_route());
        };

        debug!(
            points = route.points.len(),
            length_m = route.summary.length_in_meters,
            "Route calculated"
        );
        Ok(route)
    }
}

/// Extract the API key or fail with a configuration error
pub(crate) fn require_api_key(config: &TomTomConfig) -> Result<String, TomTomError> {
    config
        .api_key
        .clone()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| TomTomError::ConfigurationError("TomTom api_key is not set".to_string()))
}

/// Build the shared reqwest client
pub(crate) fn build_http_client(config: &TomTomConfig) -> Result<Client, TomTomError> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent("routeplanner/0.1")
        .build()
        .map_err(|e| TomTomError::ConnectionFailed(e.to_string()))
}

/// Append percent-encoded path segments to the base URL
pub(crate) fn endpoint(base_url: &str, segments: &[&str]) -> Result<Url, TomTomError> {
    let mut url =
        Url::parse(base_url).map_err(|e| TomTomError::ConfigurationError(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| TomTomError::ConfigurationError(format!("{base_url} cannot be a base")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Map a transport error to a typed error
pub(crate) fn map_send_error(e: &reqwest::Error, timeout_secs: u64) -> TomTomError {
    if e.is_timeout() {
        TomTomError::Timeout { timeout_secs }
    } else {
        TomTomError::ConnectionFailed(e.to_string())
    }
}

/// Reject non-success responses with a typed error
pub(crate) fn check_status(response: Response) -> Result<Response, TomTomError> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(TomTomError::RateLimitExceeded {
            retry_after_secs: response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok()),
        });
    }

    if status == StatusCode::FORBIDDEN || status == StatusCode::UNAUTHORIZED {
        return Err(TomTomError::InvalidApiKey);
    }

    if !status.is_success() {
        return Err(TomTomError::RequestFailed(format!("HTTP {status}")));
    }

    Ok(response)
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawRouteResponse {
    #[serde(default)]
    routes: Vec<RawRoute>,
}

#[derive(Debug, Deserialize)]
struct RawRoute {
    summary: RouteSummary,
    #[serde(default)]
    legs: Vec<RawLeg>,
}

#[derive(Debug, Deserialize)]
struct RawLeg {
    #[serde(default)]
    points: Vec<RoutePoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_api_key() {
        let result = TomTomRoutingClient::new(&TomTomConfig::default());
        assert!(matches!(result, Err(TomTomError::ConfigurationError(_))));
    }

    #[test]
    fn test_route_url() {
        let client = TomTomRoutingClient::new(&TomTomConfig::for_testing()).unwrap();
        let url = client.route_url((19.076, 72.8777), (18.5286, 73.8743)).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.tomtom.com/routing/1/calculateRoute/19.076,72.8777:18.5286,73.8743/json"
        );
    }

    #[test]
    fn test_endpoint_with_trailing_slash() {
        let url = endpoint("http://localhost:8080/", &["a", "b c.json"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/a/b%20c.json");
    }

    #[test]
    fn test_parse_route_response() {
        let json = r#"{
            "formatVersion": "0.0.12",
            "routes": [{
                "summary": {
                    "lengthInMeters": 148512,
                    "travelTimeInSeconds": 10260,
                    "trafficDelayInSeconds": 420
                },
                "legs": [{
                    "summary": { "lengthInMeters": 148512, "travelTimeInSeconds": 10260 },
                    "points": [
                        { "latitude": 19.07600, "longitude": 72.87770 },
                        { "latitude": 19.05000, "longitude": 73.01000 },
                        { "latitude": 18.52860, "longitude": 73.87430 }
                    ]
                }]
            }, {
                "summary": { "lengthInMeters": 160000, "travelTimeInSeconds": 12000 },
                "legs": [{ "points": [] }]
            }]
        }"#;

        let route = TomTomRoutingClient::parse_route_response(json)
            .unwrap()
            .unwrap();
        assert_eq!(route.points.len(), 3);
        assert_eq!(route.summary.length_in_meters, 148_512);
        assert_eq!(route.summary.traffic_delay_in_seconds, Some(420));
        assert!((route.points[2].latitude - 18.5286).abs() < 1e-9);
    }

    #[test]
    fn test_parse_concatenates_legs() {
        let json = r#"{
            "routes": [{
                "summary": { "lengthInMeters": 10, "travelTimeInSeconds": 5 },
                "legs": [
                    { "points": [ { "latitude": 1.0, "longitude": 1.0 } ] },
                    { "points": [ { "latitude": 2.0, "longitude": 2.0 } ] }
                ]
            }]
        }"#;
        let route = TomTomRoutingClient::parse_route_response(json)
            .unwrap()
            .unwrap();
        assert_eq!(route.points.len(), 2);
    }

    #[test]
    fn test_parse_empty_routes() {
        let route = TomTomRoutingClient::parse_route_response(r#"{ "routes": [] }"#).unwrap();
        assert!(route.is_none());
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(TomTomRoutingClient::parse_route_response("not json").is_err());
    }
}
