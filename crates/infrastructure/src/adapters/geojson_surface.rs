//! GeoJSON map surface - Implements MapSurfacePort as an in-memory layer store
//!
//! Live layers are kept in insertion order and exported as a GeoJSON
//! `FeatureCollection`, with the info text as a foreign member and the
//! viewport as its `bbox`.

use std::collections::BTreeMap;

use application::ports::{LayerHandle, LineStyle, MapSurfacePort};
use domain::{BoundingBox, Coordinate};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::json;
use tracing::{trace, warn};

/// Map surface that renders to GeoJSON
#[derive(Debug, Default)]
pub struct GeoJsonMapSurface {
    next_id: u64,
    layers: BTreeMap<LayerHandle, Feature>,
    bounds: Option<BoundingBox>,
    info: String,
}

/// GeoJSON positions are `[lon, lat]`
fn position(c: Coordinate) -> Vec<f64> {
    vec![c.lon(), c.lat()]
}

fn feature(value: Value, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

impl GeoJsonMapSurface {
    /// Empty surface
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, feature: Feature) -> LayerHandle {
        self.next_id += 1;
        let handle = LayerHandle(self.next_id);
        self.layers.insert(handle, feature);
        trace!(%handle, "Layer added");
        handle
    }

    /// Number of live layers
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Current info text
    pub fn info(&self) -> &str {
        &self.info
    }

    /// Last viewport requested
    pub const fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    /// Export all live layers
    pub fn to_feature_collection(&self) -> FeatureCollection {
        let mut info = JsonObject::new();
        info.insert("info".to_string(), json!(self.info));
        FeatureCollection {
            bbox: self.bounds.map(|b| {
                vec![
                    b.south_west.lon(),
                    b.south_west.lat(),
                    b.north_east.lon(),
                    b.north_east.lat(),
                ]
            }),
            features: self.layers.values().cloned().collect(),
            foreign_members: Some(info),
        }
    }
}

impl MapSurfacePort for GeoJsonMapSurface {
    fn add_polyline(&mut self, points: &[Coordinate], style: &LineStyle) -> LayerHandle {
        let line = Value::LineString(points.iter().copied().map(position).collect());
        let mut properties = JsonObject::new();
        properties.insert("stroke".to_string(), json!(style.color));
        properties.insert("stroke-width".to_string(), json!(style.weight));
        if let Some(dash) = &style.dash_array {
            properties.insert("stroke-dasharray".to_string(), json!(dash));
        }
        self.insert(feature(line, properties))
    }

    fn add_marker(&mut self, at: Coordinate, label: &str) -> LayerHandle {
        let mut properties = JsonObject::new();
        properties.insert("label".to_string(), json!(label));
        self.insert(feature(Value::Point(position(at)), properties))
    }

    fn remove_layer(&mut self, handle: LayerHandle) {
        if self.layers.remove(&handle).is_none() {
            warn!(%handle, "Removing unknown layer");
        }
    }

    fn fit_bounds(&mut self, bounds: BoundingBox) {
        self.bounds = Some(bounds);
    }

    fn set_info(&mut self, text: &str) {
        text.clone_into(&mut self.info);
    }
}
