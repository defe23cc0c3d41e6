//! TomTom integration for the route planner
//!
//! Provides address geocoding via the
//! [TomTom Search API](https://developer.tomtom.com/search-api/documentation) and
//! turn-by-turn route geometry via the
//! [TomTom Routing API](https://developer.tomtom.com/routing-api/documentation).
//!
//! # Architecture
//!
//! [`GeocodingClient`] and [`RoutingClient`] define the client interfaces,
//! implemented by [`TomTomGeocodingClient`] and [`TomTomRoutingClient`]. Both share
//! one [`TomTomConfig`] since they authenticate with the same API key.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_tomtom::{RoutingClient, TomTomConfig, TomTomRoutingClient, TravelProfile};
//!
//! let config = TomTomConfig { api_key: Some("...".into()), ..Default::default() };
//! let client = TomTomRoutingClient::new(&config)?;
//!
//! let route = client.calculate_route(
//!     (19.0760, 72.8777), // Mumbai
//!     (18.5286, 73.8743), // Pune
//!     TravelProfile::DrivingWithTraffic,
//! ).await?;
//! ```

mod client;
mod config;
mod error;
mod geocoding;
mod models;

pub use client::{RoutingClient, TomTomRoutingClient};
pub use config::TomTomConfig;
pub use error::TomTomError;
pub use geocoding::{GeocodingClient, TomTomGeocodingClient};
pub use models::{CalculatedRoute, GeocodeMatch, RoutePoint, RouteSummary, TravelProfile};
