//! Map surface port
//!
//! The seam to whatever draws the map. Layers are identified by opaque handles
//! the surface hands out.

use std::fmt;

use domain::{BoundingBox, CongestionLevel, Coordinate};
use serde::{Deserialize, Serialize};

/// Opaque id of a layer on a map surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerHandle(pub u64);

impl fmt::Display for LayerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer-{}", self.0)
    }
}

/// Stroke style of a polyline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStyle {
    /// CSS color
    pub color: String,
    /// Stroke width in pixels
    pub weight: u8,
    /// Dash pattern, solid when `None`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash_array: Option<String>,
}

impl LineStyle {
    /// Driving span colored by congestion
    #[must_use]
    pub fn traffic(level: CongestionLevel) -> Self {
        Self {
            color: level.color().to_string(),
            weight: 6,
            dash_array: None,
        }
    }

    /// Dashed grey walking leg
    #[must_use]
    pub fn walking() -> Self {
        Self {
            color: "#666666".to_string(),
            weight: 4,
            dash_array: Some("6 6".to_string()),
        }
    }

    /// Solid blue rail line
    #[must_use]
    pub fn rail() -> Self {
        Self {
            color: "#1d4ed8".to_string(),
            weight: 6,
            dash_array: None,
        }
    }
}

/// Port for the map rendering surface
pub trait MapSurfacePort: Send {
    /// Draw a polyline and return its handle
    fn add_polyline(&mut self, points: &[Coordinate], style: &LineStyle) -> LayerHandle;

    /// Place a labelled marker and return its handle
    fn add_marker(&mut self, at: Coordinate, label: &str) -> LayerHandle;

    /// Remove a previously added layer
    fn remove_layer(&mut self, handle: LayerHandle);

    /// Move the viewport to show `bounds`
    fn fit_bounds(&mut self, bounds: BoundingBox);

    /// Replace the info text
    fn set_info(&mut self, text: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styles() {
        assert_eq!(LineStyle::traffic(CongestionLevel::Heavy).color, "#ff0000");
        assert_eq!(LineStyle::walking().dash_array.as_deref(), Some("6 6"));
        assert_eq!(LineStyle::walking().weight, 4);
        assert_eq!(LineStyle::rail().color, "#1d4ed8");
        assert!(LineStyle::rail().dash_array.is_none());
    }

    #[test]
    fn handle_display() {
        assert_eq!(LayerHandle(7).to_string(), "layer-7");
    }
}
