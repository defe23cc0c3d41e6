//! Overpass service configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Overpass station index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverpassConfig {
    /// Base URL of the Overpass API (the `interpreter` endpoint is appended)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Values of the `station` tag to exclude
    #[serde(default = "default_excluded_station_types")]
    pub excluded_station_types: Vec<String>,
}

fn default_base_url() -> String {
    "https://overpass-api.de/api".to_string()
}

const fn default_timeout_secs() -> u64 {
    25
}

fn default_excluded_station_types() -> Vec<String> {
    ["subway", "metro", "light_rail"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            excluded_station_types: default_excluded_station_types(),
        }
    }
}

impl OverpassConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if let Some(bad) = self
            .excluded_station_types
            .iter()
            .find(|t| t.is_empty() || t.contains('"'))
        {
            return Err(format!("invalid excluded station type: {bad:?}"));
        }

        Ok(())
    }
}
