//! TomTom service configuration

use serde::{Deserialize, Serialize};

/// Configuration shared by the TomTom geocoding and routing clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomTomConfig {
    /// Base URL for the TomTom APIs
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (required; obtain from <https://developer.tomtom.com>)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Comma-separated ISO country codes to restrict geocoding to
    #[serde(default = "default_country_set")]
    pub country_set: String,

    /// Number of geocoding candidates to request (only the first is used)
    #[serde(default = "default_geocode_limit")]
    pub geocode_limit: u8,

    /// Alternative routes to request in addition to the best one
    #[serde(default)]
    pub max_alternatives: u8,
}

fn default_base_url() -> String {
    "https://api.tomtom.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_country_set() -> String {
    "IN".to_string()
}

const fn default_geocode_limit() -> u8 {
    5
}

impl Default for TomTomConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            country_set: default_country_set(),
            geocode_limit: default_geocode_limit(),
            max_alternatives: 0,
        }
    }
}

impl TomTomConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_key: Some("test-key".to_string()),
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

        if self.api_key.as_deref().is_none_or(str::is_empty) {
            return Err("api_key must be set".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.geocode_limit == 0 || self.geocode_limit > 100 {
            return Err("geocode_limit must be between 1 and 100".to_string());
        }

        if self.max_alternatives > 5 {
            return Err("max_alternatives must be 5 or less".to_string());
        }

        Ok(())
    }
}
