//! Congestion levels for colored traffic segments

use serde::{Deserialize, Serialize};
use std::fmt;

/// Congestion classification of one stretch of road
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CongestionLevel {
    /// Free flowing
    Light,
    /// Slowed down
    Medium,
    /// Stop and go
    Heavy,
}

impl CongestionLevel {
    /// Stroke color for map rendering
    #[must_use]
    pub const fn color(&self) -> &'static str {
        match self {
            Self::Light => "#22c55e",
            Self::Medium => "#ffa500",
            Self::Heavy => "#ff0000",
        }
    }
}

impl fmt::Display for CongestionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Medium => write!(f, "medium"),
            Self::Heavy => write!(f, "heavy"),
        }
    }
}
