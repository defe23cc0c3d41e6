//! Adapters implementing application ports

mod geojson_surface;
mod overpass_adapter;
mod random_traffic;
mod tomtom_adapter;

pub use geojson_surface::GeoJsonMapSurface;
pub use overpass_adapter::OverpassStationAdapter;
pub use random_traffic::{RandomTrafficClassifier, TrafficProfile};
pub use tomtom_adapter::{TomTomGeocodingAdapter, TomTomRoutingAdapter};
