//! Application layer - Use cases and orchestration
//!
//! Defines the ports to geocoding, routing, station and map services and the
//! services that compose them into drive and train route plans.

pub mod config;
pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{DistanceReport, PlannerConfig};
pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
