//! Resolved places and rail stations

use serde::{Deserialize, Serialize};
use std::fmt;

use super::coordinate::Coordinate;

/// Name given to stations the index returns without a `name` tag
pub const UNNAMED_STATION: &str = "Railway Station";

/// A coordinate with a human-readable display name
///
/// Produced by geocoding; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    location: Coordinate,
    name: String,
}

impl Place {
    /// Create a new place
    #[must_use]
    pub fn new(location: Coordinate, name: impl Into<String>) -> Self {
        Self {
            location,
            name: name.into(),
        }
    }

    /// Get the coordinate
    #[must_use]
    pub const fn location(&self) -> Coordinate {
        self.location
    }

    /// Get the display name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.location)
    }
}

/// A place known to be a heavy-rail station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Station(Place);

impl Station {
    /// Create a station at a coordinate, falling back to [`UNNAMED_STATION`]
    #[must_use]
    pub fn new(location: Coordinate, name: Option<String>) -> Self {
        let name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| UNNAMED_STATION.to_string());
        Self(Place::new(location, name))
    }

    /// Treat an already resolved place as a station
    #[must_use]
    pub const fn from_place(place: Place) -> Self {
        Self(place)
    }

    /// Get the coordinate
    #[must_use]
    pub const fn location(&self) -> Coordinate {
        self.0.location()
    }

    /// Get the station name
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.name()
    }

    /// View as a plain place
    #[must_use]
    pub const fn as_place(&self) -> &Place {
        &self.0
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.name())
    }
}
