//! Travel modes offered by the planner

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// How the user wants to travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    /// Car route with simulated congestion coloring
    #[default]
    Drive,
    /// Walk to a station, ride rail, walk from the station
    Train,
}

impl TravelMode {
    /// Emoji used in the info line
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Drive => "🚗",
            Self::Train => "🚆",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Drive => write!(f, "drive"),
            Self::Train => write!(f, "train"),
        }
    }
}

impl FromStr for TravelMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "drive" | "car" => Ok(Self::Drive),
            "train" | "rail" => Ok(Self::Train),
            other => Err(DomainError::InvalidTravelMode(other.to_string())),
        }
    }
}

/// What a drawn segment represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Routed driving path
    Drive,
    /// Routed pedestrian path
    Walk,
    /// Straight line between two stations
    Rail,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Drive => write!(f, "drive"),
            Self::Walk => write!(f, "walk"),
            Self::Rail => write!(f, "rail"),
        }
    }
}
