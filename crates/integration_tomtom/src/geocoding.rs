//! TomTom geocoding client
//!
//! Converts free-form place names to coordinates using the
//! [TomTom Geocode](https://developer.tomtom.com/search-api/documentation/geocoding-service/geocode)
//! endpoint. Results are biased toward a reference point and filtered by country.
//! Only the top-ranked match is returned; there is no caching and no retry.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use crate::client::{build_http_client, check_status, endpoint, map_send_error, require_api_key};
use crate::config::TomTomConfig;
use crate::error::TomTomError;
use crate::models::GeocodeMatch;

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Resolve a free-form place name, biased toward an optional `(lat, lon)`
    ///
    /// Returns `Ok(None)` when the service has no match.
    async fn geocode(
        &self,
        query: &str,
        bias: Option<(f64, f64)>,
    ) -> Result<Option<GeocodeMatch>, TomTomError>;
}

/// TomTom Search API geocoding client
#[derive(Debug)]
pub struct TomTomGeocodingClient {
    client: Client,
    config: TomTomConfig,
    api_key: String,
}

impl TomTomGeocodingClient {
    /// Create a new geocoding client
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

    /// Build the geocode URL; the query becomes a path segment
    fn geocode_url(&self, query: &str) -> Result<Url, TomTomError> {
        let segment = format!("{query}.json");
        endpoint(&self.config.base_url, &["search", "2", "geocode", &segment])
    }

    /// Parse a geocode response body, keeping only the top-ranked result
    fn parse_geocode_response(body: &str) -> Result<Option<GeocodeMatch>, TomTomError> {
        let raw: RawGeocodeResponse =
            serde_json::from_str(body).map_err(|e| TomTomError::ParseError(e.to_string()))?;

        Ok(raw.results.into_iter().next().map(|r| GeocodeMatch {
            lat: r.position.lat,
            lon: r.position.lon,
            freeform_address: r
                .address
                .and_then(|a| a.freeform_address)
                .filter(|a| !a.is_empty()),
        }))
    }
}

#[async_trait]
impl GeocodingClient for TomTomGeocodingClient {
    #[instrument(skip(self))]
    async fn geocode(
        &self,
        query: &str,
        bias: Option<(f64, f64)>,
    ) -> Result<Option<GeocodeMatch>, TomTomError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(TomTomError::InvalidQuery(
                "Geocode query must not be empty".to_string(),
            ));
        }

        let url = self.geocode_url(query)?;

        let mut params: Vec<(&str, String)> = vec![
            ("key", self.api_key.clone()),
            ("limit", self.config.geocode_limit.to_string()),
        ];

        if let Some((lat, lon)) = bias {
            params.push(("lat", lat.to_string()));
            params.push(("lon", lon.to_string()));
        }

        if !self.config.country_set.is_empty() {
            params.push(("countrySet", self.config.country_set.clone()));
        }

        debug!(%query, "Geocoding place");

        let response = self
            .client
            .get(url)
            .query(&params)
            .send()
            .await
            .map_err(|e| map_send_error(&e, self.config.timeout_secs))?;

        let body = check_status(response)?
            .text()
            .await
            .map_err(|e| TomTomError::ParseError(e.to_string()))?;

        let result = Self::parse_geocode_response(&body)?;
        match &result {
            Some(m) => debug!(%query, lat = m.lat, lon = m.lon, "Geocoded place"),
            None => debug!(%query, "No geocoding match"),
        }
        Ok(result)
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawGeocodeResponse {
    #[serde(default)]
    results: Vec<RawGeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct RawGeocodeResult {
    position: RawPosition,
    address: Option<RawAddress>,
}

#[derive(Debug, Deserialize)]
struct RawPosition {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAddress {
    freeform_address: Option<String>,
}
