//! Value objects - Immutable domain primitives

mod bounding_box;
mod congestion;
mod coordinate;
mod place;
mod travel_mode;

pub use bounding_box::BoundingBox;
pub use congestion::CongestionLevel;
pub use coordinate::{Coordinate, EARTH_RADIUS_KM, haversine_km};
pub use place::{Place, Station, UNNAMED_STATION};
pub use travel_mode::{SegmentKind, TravelMode};
