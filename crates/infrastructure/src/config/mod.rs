//! Application configuration
//!
//! Sections:
//! - `tomtom`: geocoding and routing service
//! - `overpass`: rail station index
//! - `planner`: search radius, default location, request timeout
//! - `traffic`: simulated congestion profile
//! - `telemetry`: log filter and format
//!
//! Values are layered: built-in defaults, then a TOML file, then environment
//! variables such as `ROUTEPLANNER_TOMTOM__API_KEY`.

use std::path::Path;

use application::PlannerConfig;
use integration_overpass::OverpassConfig;
use integration_tomtom::TomTomConfig;
use serde::{Deserialize, Serialize};

use crate::adapters::TrafficProfile;

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "ROUTEPLANNER";

/// Simulated traffic settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrafficAppConfig {
    /// Threshold profile
    #[serde(default)]
    pub profile: TrafficProfile,

    /// Fixed seed for a reproducible simulation
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryAppConfig {
    /// `EnvFilter` directives, e.g. "info" or "application=debug"
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for TelemetryAppConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            json: false,
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// TomTom configuration
    #[serde(default)]
    pub tomtom: TomTomConfig,

    /// Overpass configuration
    #[serde(default)]
    pub overpass: OverpassConfig,

    /// Planner configuration
    #[serde(default)]
    pub planner: PlannerConfig,

    /// Traffic simulation configuration
    #[serde(default)]
    pub traffic: TrafficAppConfig,

    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: TelemetryAppConfig,
}

impl AppConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// Without `path`, `config.toml` in the working directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with_env(path, config::Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(
        path: Option<&Path>,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        config::Config::builder()
            .add_source(file)
            // Override with environment variables (e.g., ROUTEPLANNER_PLANNER__REQUEST_TIMEOUT_SECS)
            .add_source(
                env.prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Validate everything that does not need a network call
    ///
    /// The TomTom API key is checked when the TomTom adapters are built, so
    /// commands that never call TomTom work without one.
    pub fn validate(&self) -> Result<(), String> {
        self.planner
            .validate()
            .map_err(|e| format!("planner: {e}"))?;
        self.overpass
            .validate()
            .map_err(|e| format!("overpass: {e}"))?;
        if self.tomtom.base_url.is_empty() {
            return Err("tomtom: base_url must not be empty".to_string());
        }
        Ok(())
    }
}
