//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod geocoding_port;
mod map_surface_port;
mod routing_port;
mod station_index_port;
mod traffic_port;

#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
pub use geocoding_port::GeocodingPort;
pub use map_surface_port::{LayerHandle, LineStyle, MapSurfacePort};
#[cfg(test)]
pub use routing_port::MockRoutingPort;
pub use routing_port::{RouteProfile, RoutingPort};
#[cfg(test)]
pub use station_index_port::MockStationIndexPort;
pub use station_index_port::StationIndexPort;
pub use traffic_port::{RoadSpan, TrafficClassifier, UniformTrafficClassifier};
