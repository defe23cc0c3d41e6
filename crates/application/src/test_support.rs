//! In-memory port fakes shared by the service tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use domain::{
    BoundingBox, CongestionLevel, Coordinate, Place, RouteSegment, RouteSummary, Station,
    haversine_km,
};
use parking_lot::Mutex;

use crate::error::ApplicationError;
use crate::ports::{
    GeocodingPort, LayerHandle, LineStyle, MapSurfacePort, RoadSpan, RouteProfile, RoutingPort,
    StationIndexPort, TrafficClassifier,
};

pub fn dadar() -> Station {
    Station::new(Coordinate::new_unchecked(19.0186, 72.8424), Some("Dadar".into()))
}

pub fn csmt() -> Station {
    Station::new(Coordinate::new_unchecked(18.9398, 72.8355), Some("CSMT".into()))
}

pub fn pune_junction() -> Station {
    Station::new(Coordinate::new_unchecked(18.5289, 73.8744), Some("Pune Junction".into()))
}

pub fn pune_station_place() -> Place {
    Place::new(
        Coordinate::new_unchecked(18.5286, 73.8743),
        "Pune Railway Station",
    )
}

/// Geocoder backed by a fixed table
#[derive(Debug, Default)]
pub struct FakeGeocoder {
    places: HashMap<String, Place>,
    pub biases: Mutex<Vec<Coordinate>>,
}

impl FakeGeocoder {
    pub fn with(mut self, query: &str, place: Place) -> Self {
        self.places.insert(query.to_lowercase(), place);
        self
    }
}

#[async_trait]
impl GeocodingPort for FakeGeocoder {
    async fn geocode(
        &self,
        query: &str,
        bias: Coordinate,
    ) -> Result<Option<Place>, ApplicationError> {
        self.biases.lock().push(bias);
        Ok(self.places.get(&query.trim().to_lowercase()).cloned())
    }
}

/// Router returning a three-point path with a summary derived from its length
#[derive(Debug, Default)]
pub struct FakeRouter {
    delays: Vec<(Coordinate, Duration)>,
    pub calls: Mutex<Vec<(Coordinate, Coordinate, RouteProfile)>>,
}

impl FakeRouter {
    /// Delay every route ending at `to`
    pub fn slow_to(mut self, to: Coordinate, delay: Duration) -> Self {
        self.delays.push((to, delay));
        self
    }

    /// Routes fetched so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl RoutingPort for FakeRouter {
    async fn fetch_route(
        &self,
        from: Coordinate,
        to: Coordinate,
        profile: RouteProfile,
    ) -> Result<RouteSegment, ApplicationError> {
        self.calls.lock().push((from, to, profile));
        if let Some((_, delay)) = self.delays.iter().find(|(c, _)| *c == to) {
            tokio::time::sleep(*delay).await;
        }

        let mid = Coordinate::new_unchecked(
            (from.lat() + to.lat()) / 2.0,
            (from.lon() + to.lon()) / 2.0 + 0.001,
        );
        let meters = (haversine_km(&from, &to) * 1000.0).round() as u32;
        let speed_mps = match profile {
            RouteProfile::DrivingWithTraffic => 10,
            RouteProfile::Pedestrian => 1,
        };
        let summary = RouteSummary {
            length_meters: meters,
            travel_time_seconds: meters / speed_mps,
        };
        Ok(RouteSegment::new(
            vec![from, mid, to],
            profile.segment_kind(),
            Some(summary),
        )?)
    }
}

/// Station index over a fixed list, filtered by radius
#[derive(Debug, Default)]
pub struct FakeStationIndex {
    stations: Vec<Station>,
    pub searches: Mutex<Vec<(Coordinate, u32)>>,
}

impl FakeStationIndex {
    pub fn new(stations: Vec<Station>) -> Self {
        Self {
            stations,
            searches: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl StationIndexPort for FakeStationIndex {
    async fn find_stations_near(
        &self,
        center: Coordinate,
        radius_meters: u32,
    ) -> Result<Vec<Station>, ApplicationError> {
        self.searches.lock().push((center, radius_meters));
        let radius_km = f64::from(radius_meters) / 1000.0;
        Ok(self
            .stations
            .iter()
            .filter(|s| haversine_km(&center, &s.location()) <= radius_km)
            .cloned()
            .collect())
    }
}

/// Classifier cycling light, medium, heavy
#[derive(Debug, Default)]
pub struct CyclingClassifier {
    next: AtomicUsize,
}

impl TrafficClassifier for CyclingClassifier {
    fn classify(&self, _span: &RoadSpan) -> CongestionLevel {
        match self.next.fetch_add(1, Ordering::Relaxed) % 3 {
            0 => CongestionLevel::Light,
            1 => CongestionLevel::Medium,
            _ => CongestionLevel::Heavy,
        }
    }
}

/// Map surface that records what is live and how often each layer was removed
#[derive(Debug, Default)]
pub struct RecordingSurface {
    next_id: u64,
    pub live: Vec<LayerHandle>,
    pub removals: HashMap<LayerHandle, usize>,
    pub info: String,
    pub fitted: Option<BoundingBox>,
}

impl RecordingSurface {
    fn add(&mut self) -> LayerHandle {
        self.next_id += 1;
        let handle = LayerHandle(self.next_id);
        self.live.push(handle);
        handle
    }
}

impl MapSurfacePort for RecordingSurface {
    fn add_polyline(&mut self, _points: &[Coordinate], _style: &LineStyle) -> LayerHandle {
        self.add()
    }

    fn add_marker(&mut self, _at: Coordinate, _label: &str) -> LayerHandle {
        self.add()
    }

    fn remove_layer(&mut self, handle: LayerHandle) {
        self.live.retain(|h| *h != handle);
        *self.removals.entry(handle).or_default() += 1;
    }

    fn fit_bounds(&mut self, bounds: BoundingBox) {
        self.fitted = Some(bounds);
    }

    fn set_info(&mut self, text: &str) {
        self.info = text.to_string();
    }
}

/// A plan holding only `layers`, for layer manager tests
pub fn plan_with_layers(layers: Vec<crate::services::PlannedLayer>) -> crate::services::RoutePlan {
    let start = Place::new(Coordinate::mumbai(), "Start");
    let end = pune_station_place();
    let corners = [start.location(), end.location()];
    crate::services::RoutePlan {
        mode: domain::TravelMode::Train,
        fit_bounds: BoundingBox::from_points(&corners),
        start,
        end,
        segments: Vec::new(),
        layers,
        headline: "🚆 A → B · 1.00 km".to_string(),
        distance_km: 1.0,
        stations: None,
    }
}
