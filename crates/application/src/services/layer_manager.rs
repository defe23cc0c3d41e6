//! Map layer lifecycle
//!
//! Tracks every route and marker layer drawn on a [`MapSurfacePort`] so a single
//! [`LayerManager::clear`] removes all of them. No layer survives a redraw.

use domain::{BoundingBox, Coordinate};
use tracing::debug;

use crate::ports::{LayerHandle, LineStyle, MapSurfacePort};
use crate::services::route_composer::{PlannedLayer, RoutePlan};

/// Info text shown while no route is drawn
pub const EMPTY_INFO: &str = "Distance: — | Time: —";

/// Owns the map surface and the handles of everything drawn on it
#[derive(Debug)]
pub struct LayerManager<S> {
    surface: S,
    route_layers: Vec<LayerHandle>,
    poi_markers: Vec<LayerHandle>,
}

impl<S: MapSurfacePort> LayerManager<S> {
    /// Wrap a map surface
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            route_layers: Vec::new(),
            poi_markers: Vec::new(),
        }
    }

    /// Remove every tracked layer and reset the info text
    pub fn clear(&mut self) {
        let removed = self.route_layers.len() + self.poi_markers.len();
        for handle in self.route_layers.drain(..).chain(self.poi_markers.drain(..)) {
            self.surface.remove_layer(handle);
        }
        self.surface.set_info(EMPTY_INFO);
        debug!(removed, "Cleared map layers");
    }

    /// Draw and track a polyline
    pub fn add_route_segment(&mut self, points: &[Coordinate], style: &LineStyle) -> LayerHandle {
        let handle = self.surface.add_polyline(points, style);
        self.route_layers.push(handle);
        handle
    }

    /// Draw and track a labelled marker
    pub fn add_marker(&mut self, at: Coordinate, label: &str) -> LayerHandle {
        let handle = self.surface.add_marker(at, label);
        self.poi_markers.push(handle);
        handle
    }

    /// Move the viewport
    pub fn fit_bounds(&mut self, bounds: BoundingBox) {
        self.surface.fit_bounds(bounds);
    }

    /// Replace the info text
    pub fn show_info(&mut self, text: &str) {
        self.surface.set_info(text);
    }

    /// Replace whatever is drawn with `plan`
    pub fn draw_plan(&mut self, plan: &RoutePlan) {
        self.clear();
        for layer in &plan.layers {
            match layer {
                PlannedLayer::Line { points, style, .. } => {
                    self.add_route_segment(points, style);
                },
                PlannedLayer::Marker { at, label } => {
                    self.add_marker(*at, label);
                },
            }
        }
        if let Some(bounds) = plan.fit_bounds {
            self.fit_bounds(bounds);
        }
        self.show_info(&plan.headline);
    }

    /// Number of layers currently tracked
    pub fn tracked_count(&self) -> usize {
        self.route_layers.len() + self.poi_markers.len()
    }

    /// The underlying surface
    pub const fn surface(&self) -> &S {
        &self.surface
    }
}
