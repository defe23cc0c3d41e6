//! Overpass integration for the route planner
//!
//! Looks up heavy-rail stations around a coordinate by running an
//! [Overpass QL](https://wiki.openstreetmap.org/wiki/Overpass_API/Overpass_QL) tag
//! query against OpenStreetMap data. Subway, metro and light-rail stations are
//! excluded by default.
//!
//! [`StationIndexClient`] is the client interface, implemented by [`OverpassClient`].

mod client;
mod config;
mod error;
mod query;

pub use client::{OverpassClient, RailStation, StationIndexClient};
pub use config::OverpassConfig;
pub use error::OverpassError;
pub use query::StationQuery;
