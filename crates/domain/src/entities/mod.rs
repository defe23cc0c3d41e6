//! Domain entities

mod route_segment;

pub use route_segment::{RouteSegment, RouteSummary};
