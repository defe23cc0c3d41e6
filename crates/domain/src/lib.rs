//! Domain layer for the route planner
//!
//! Contains the coordinates, places, stations and route segments the planner
//! reasons about, plus great-circle distance math. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
