//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports over the TomTom and Overpass integrations,
//! plus the random traffic classifier, a GeoJSON map surface, configuration
//! loading and tracing setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, TelemetryAppConfig, TrafficAppConfig};
pub use telemetry::{TelemetryError, init_tracing};
