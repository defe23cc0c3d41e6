//! Route composition
//!
//! Turns a travel mode plus two resolved places into a [`RoutePlan`]: the
//! segments, the layers to draw, the viewport and the info headline. Nothing is
//! drawn here, so a failed composition never leaves a half-drawn map.
//!
//! Drive mode is one traffic-aware route, split into one colored line per span.
//! Train mode walks to the nearest station, rides a straight rail line to the
//! destination station and walks on unless the destination is a station.

use std::sync::Arc;

use domain::{
    BoundingBox, Coordinate, Place, RouteSegment, SegmentKind, Station, TravelMode, haversine_km,
};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::config::{DistanceReport, PlannerConfig};
use crate::error::ApplicationError;
use crate::ports::{
    GeocodingPort, LineStyle, RoadSpan, RouteProfile, RoutingPort, StationIndexPort,
    TrafficClassifier,
};
use crate::services::station_locator::StationLocator;

/// One layer a plan wants drawn
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlannedLayer {
    /// A styled polyline
    Line {
        points: Vec<Coordinate>,
        style: LineStyle,
        kind: SegmentKind,
    },
    /// A labelled point
    Marker { at: Coordinate, label: String },
}

/// A fully composed route, ready to draw
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    /// Mode the plan was composed for
    pub mode: TravelMode,
    /// Resolved start
    pub start: Place,
    /// Resolved end
    pub end: Place,
    /// Segments in travel order
    pub segments: Vec<RouteSegment>,
    /// Layers in drawing order
    pub layers: Vec<PlannedLayer>,
    /// Viewport to show
    pub fit_bounds: Option<BoundingBox>,
    /// Info line
    pub headline: String,
    /// Distance reported in the headline
    pub distance_km: f64,
    /// Boarding and alighting stations in train mode
    pub stations: Option<(Station, Station)>,
}

impl RoutePlan {
    /// Number of polylines in the plan
    pub fn line_count(&self) -> usize {
        self.layers
            .iter()
            .filter(|l| matches!(l, PlannedLayer::Line { .. }))
            .count()
    }
}

/// Composes drive and train plans from the geocoding, routing and station ports
#[derive(Clone)]
pub struct RouteComposer {
    geocoder: Arc<dyn GeocodingPort>,
    router: Arc<dyn RoutingPort>,
    stations: StationLocator,
    traffic: Arc<dyn TrafficClassifier>,
    config: PlannerConfig,
}

impl std::fmt::Debug for RouteComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteComposer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RouteComposer {
    /// Create a new composer
    pub fn new(
        geocoder: Arc<dyn GeocodingPort>,
        router: Arc<dyn RoutingPort>,
        station_index: Arc<dyn StationIndexPort>,
        traffic: Arc<dyn TrafficClassifier>,
        config: PlannerConfig,
    ) -> Self {
        Self {
            geocoder,
            router,
            stations: StationLocator::new(station_index),
            traffic,
            config,
        }
    }

    /// Planner settings in use
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Resolve free text to a place, failing with `GeocodeNotFound` on no match
    #[instrument(skip(self))]
    pub async fn geocode(&self, text: &str, bias: Coordinate) -> Result<Place, ApplicationError> {
        let query = text.trim();
        if query.is_empty() {
            return Err(ApplicationError::GeocodeNotFound(String::new()));
        }

        match self.geocoder.geocode(query, bias).await? {
            Some(place) => {
                debug!(name = %place.name(), location = %place.location(), "Geocoded");
                Ok(place)
            },
            None => {
                warn!(query, "Geocoder returned no match");
                Err(ApplicationError::GeocodeNotFound(query.to_string()))
            },
        }
    }

    /// Compose a plan for `mode` between two resolved places
    ///
    /// `end_is_station` skips the destination station search and treats `end`
    /// itself as the alighting station.
    #[instrument(skip(self, start, end), fields(start = %start.name(), end = %end.name()))]
    pub async fn compose(
        &self,
        mode: TravelMode,
        start: &Place,
        end: &Place,
        end_is_station: bool,
    ) -> Result<RoutePlan, ApplicationError> {
        match mode {
            TravelMode::Drive => self.compose_drive(start, end).await,
            TravelMode::Train => self.compose_train(start, end, end_is_station).await,
        }
    }

    async fn compose_drive(&self, start: &Place, end: &Place) -> Result<RoutePlan, ApplicationError> {
        let route = self
            .router
            .fetch_route(
                start.location(),
                end.location(),
                RouteProfile::DrivingWithTraffic,
            )
            .await?;

        let layers: Vec<PlannedLayer> = route
            .spans()
            .map(|(from, to)| {
                let level = self.traffic.classify(&RoadSpan { from, to });
                PlannedLayer::Line {
                    points: vec![from, to],
                    style: LineStyle::traffic(level),
                    kind: SegmentKind::Drive,
                }
            })
            .collect();

        let distance_km = route.length_km();
        let minutes = route.summary().map_or(0, |s| s.travel_time_minutes());
        let headline = format!("🚗 {distance_km:.2} km · {minutes} mins (Traffic-aware)");
        debug!(spans = layers.len(), distance_km, minutes, "Drive plan composed");

        Ok(RoutePlan {
            mode: TravelMode::Drive,
            start: start.clone(),
            end: end.clone(),
            fit_bounds: route.bounds(),
            segments: vec![route],
            layers,
            headline,
            distance_km,
            stations: None,
        })
    }

    async fn compose_train(
        &self,
        start: &Place,
        end: &Place,
        end_is_station: bool,
    ) -> Result<RoutePlan, ApplicationError> {
        let radius = self.config.station_search_radius_meters;

        let boarding = self
            .stations
            .nearest_station(start.location(), radius)
            .await?;
        let alighting = if end_is_station {
            Station::from_place(end.clone())
        } else {
            self.stations.nearest_station(end.location(), radius).await?
        };
        debug!(
            boarding = %boarding.name(),
            alighting = %alighting.name(),
            "Stations selected"
        );

        let walk_in = self
            .router
            .fetch_route(
                start.location(),
                boarding.location(),
                RouteProfile::Pedestrian,
            )
            .await?;
        let rail = RouteSegment::straight_rail(boarding.location(), alighting.location());
        let walk_out = if end_is_station {
            None
        } else {
            Some(
                self.router
                    .fetch_route(
                        alighting.location(),
                        end.location(),
                        RouteProfile::Pedestrian,
                    )
                    .await?,
            )
        };

        let rail_km = haversine_km(&boarding.location(), &alighting.location());
        let distance_km = match self.config.distance_report {
            DistanceReport::RailOnly => rail_km,
            DistanceReport::Multimodal => {
                rail_km + walk_in.length_km() + walk_out.as_ref().map_or(0.0, RouteSegment::length_km)
            },
        };
        let headline = format!(
            "🚆 {} → {} · {distance_km:.2} km",
            boarding.name(),
            alighting.name()
        );

        let fit_bounds = rail.bounds();
        let mut segments = vec![walk_in, rail];
        segments.extend(walk_out);

        let mut layers: Vec<PlannedLayer> = segments
            .iter()
            .map(|segment| PlannedLayer::Line {
                points: segment.points().to_vec(),
                style: match segment.kind() {
                    SegmentKind::Rail => LineStyle::rail(),
                    SegmentKind::Walk | SegmentKind::Drive => LineStyle::walking(),
                },
                kind: segment.kind(),
            })
            .collect();
        for station in [&boarding, &alighting] {
            layers.push(PlannedLayer::Marker {
                at: station.location(),
                label: format!("🚆 {}", station.name()),
            });
        }
        debug!(segments = segments.len(), distance_km, "Train plan composed");

        Ok(RoutePlan {
            mode: TravelMode::Train,
            start: start.clone(),
            end: end.clone(),
            segments,
            layers,
            fit_bounds,
            headline,
            distance_km,
            stations: Some((boarding, alighting)),
        })
    }
}

#[cfg(test)]
mod tests {
    use domain::CongestionLevel;

    use super::*;
    use crate::ports::{MockRoutingPort, MockStationIndexPort, UniformTrafficClassifier};
    use crate::test_support::{
        CyclingClassifier, FakeGeocoder, FakeRouter, FakeStationIndex, csmt, dadar,
        pune_junction, pune_station_place,
    };

    struct Fixture {
        router: Arc<FakeRouter>,
        index: Arc<FakeStationIndex>,
        composer: RouteComposer,
    }

    fn fixture(config: PlannerConfig) -> Fixture {
        let geocoder = Arc::new(
            FakeGeocoder::default().with("Pune Railway Station", pune_station_place()),
        );
        let router = Arc::new(FakeRouter::default());
        let index = Arc::new(FakeStationIndex::new(vec![csmt(), dadar(), pune_junction()]));
        let composer = RouteComposer::new(
            geocoder,
            router.clone(),
            index.clone(),
            Arc::new(UniformTrafficClassifier::default()),
            config,
        );
        Fixture {
            router,
            index,
            composer,
        }
    }

    fn your_location() -> Place {
        Place::new(Coordinate::mumbai(), "Your Location")
    }

    #[tokio::test]
    async fn train_to_named_station_skips_destination_search() {
        let f = fixture(PlannerConfig::default());
        let end = f
            .composer
            .geocode("Pune Railway Station", Coordinate::mumbai())
            .await
            .unwrap();

        let plan = f
            .composer
            .compose(TravelMode::Train, &your_location(), &end, true)
            .await
            .unwrap();

        assert_eq!(f.index.searches.lock().len(), 1);
        assert_eq!(f.router.call_count(), 1);
        assert_eq!(f.router.calls.lock()[0].2, RouteProfile::Pedestrian);

        let kinds: Vec<_> = plan.segments.iter().map(RouteSegment::kind).collect();
        assert_eq!(kinds, vec![SegmentKind::Walk, SegmentKind::Rail]);
        assert_eq!(plan.line_count(), 2);

        let (boarding, alighting) = plan.stations.clone().unwrap();
        assert_eq!(boarding.name(), "Dadar");
        assert_eq!(alighting.name(), "Pune Railway Station");
        assert_eq!(alighting.location(), pune_station_place().location());

        let expected = haversine_km(&dadar().location(), &pune_station_place().location());
        assert!((plan.distance_km - expected).abs() < 1e-9);
        assert_eq!(
            plan.headline,
            format!("🚆 Dadar → Pune Railway Station · {expected:.2} km")
        );
        assert_eq!(plan.fit_bounds, plan.segments[1].bounds());
    }

    #[tokio::test]
    async fn train_to_plain_place_walks_both_ends() {
        let f = fixture(PlannerConfig::default());
        let near_pune = Place::new(Coordinate::new_unchecked(18.52, 73.86), "Shivajinagar");

        let plan = f
            .composer
            .compose(TravelMode::Train, &your_location(), &near_pune, false)
            .await
            .unwrap();

        let kinds: Vec<_> = plan.segments.iter().map(RouteSegment::kind).collect();
        assert_eq!(
            kinds,
            vec![SegmentKind::Walk, SegmentKind::Rail, SegmentKind::Walk]
        );
        assert_eq!(f.index.searches.lock().len(), 2);
        assert_eq!(f.router.call_count(), 2);

        let markers: Vec<_> = plan
            .layers
            .iter()
            .filter_map(|l| match l {
                PlannedLayer::Marker { label, .. } => Some(label.as_str()),
                PlannedLayer::Line { .. } => None,
            })
            .collect();
        assert_eq!(markers, vec!["🚆 Dadar", "🚆 Pune Junction"]);
    }

    #[tokio::test]
    async fn multimodal_distance_includes_walks() {
        let rail_only = fixture(PlannerConfig::default());
        let multimodal = fixture(PlannerConfig {
            distance_report: DistanceReport::Multimodal,
            ..Default::default()
        });
        let end = pune_station_place();

        let a = rail_only
            .composer
            .compose(TravelMode::Train, &your_location(), &end, true)
            .await
            .unwrap();
        let b = multimodal
            .composer
            .compose(TravelMode::Train, &your_location(), &end, true)
            .await
            .unwrap();

        let walk_km = b.segments[0].length_km();
        assert!(walk_km > 0.0);
        assert!((b.distance_km - (a.distance_km + walk_km)).abs() < 1e-9);
    }

    #[tokio::test]
    async fn train_composition_is_idempotent() {
        let f = fixture(PlannerConfig::default());
        let end = pune_station_place();

        let first = f
            .composer
            .compose(TravelMode::Train, &your_location(), &end, true)
            .await
            .unwrap();
        let second = f
            .composer
            .compose(TravelMode::Train, &your_location(), &end, true)
            .await
            .unwrap();

        assert_eq!(first.segments, second.segments);
        assert_eq!(first.layers, second.layers);
        assert_eq!(first.headline, second.headline);
    }

    #[tokio::test]
    async fn drive_colors_each_span() {
        let router = Arc::new(FakeRouter::default());
        let composer = RouteComposer::new(
            Arc::new(FakeGeocoder::default()),
            router,
            Arc::new(FakeStationIndex::default()),
            Arc::new(CyclingClassifier::default()),
            PlannerConfig::default(),
        );
        let start = your_location();
        let end = pune_station_place();

        let plan = composer
            .compose(TravelMode::Drive, &start, &end, true)
            .await
            .unwrap();

        assert_eq!(plan.segments.len(), 1);
        let route = &plan.segments[0];
        assert_eq!(plan.line_count(), route.points().len() - 1);

        let colors: Vec<_> = plan
            .layers
            .iter()
            .filter_map(|l| match l {
                PlannedLayer::Line { style, .. } => Some(style.color.clone()),
                PlannedLayer::Marker { .. } => None,
            })
            .collect();
        assert_eq!(
            colors,
            vec![
                CongestionLevel::Light.color().to_string(),
                CongestionLevel::Medium.color().to_string(),
            ]
        );

        let summary = route.summary().unwrap();
        assert_eq!(
            plan.headline,
            format!(
                "🚗 {:.2} km · {} mins (Traffic-aware)",
                summary.length_km(),
                summary.travel_time_minutes()
            )
        );
        assert_eq!(plan.fit_bounds, route.bounds());
        assert!(plan.stations.is_none());
    }

    #[tokio::test]
    async fn geocode_miss_is_typed() {
        let f = fixture(PlannerConfig::default());
        let err = f
            .composer
            .geocode("Atlantis", Coordinate::mumbai())
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::GeocodeNotFound(q) if q == "Atlantis"));

        let err = f
            .composer
            .geocode("   ", Coordinate::mumbai())
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::GeocodeNotFound(_)));
    }

    #[tokio::test]
    async fn no_station_aborts_before_routing() {
        let mut index = MockStationIndexPort::new();
        index
            .expect_find_stations_near()
            .returning(|_, _| Ok(vec![]));
        let mut router = MockRoutingPort::new();
        router.expect_fetch_route().never();

        let composer = RouteComposer::new(
            Arc::new(FakeGeocoder::default()),
            Arc::new(router),
            Arc::new(index),
            Arc::new(UniformTrafficClassifier::default()),
            PlannerConfig::default(),
        );

        let err = composer
            .compose(
                TravelMode::Train,
                &your_location(),
                &pune_station_place(),
                true,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NoStationFound { .. }));
    }

    #[tokio::test]
    async fn no_route_propagates() {
        let mut router = MockRoutingPort::new();
        router
            .expect_fetch_route()
            .times(1)
            .returning(|from, to, _| Err(ApplicationError::no_route(from, to)));

        let composer = RouteComposer::new(
            Arc::new(FakeGeocoder::default()),
            Arc::new(router),
            Arc::new(FakeStationIndex::default()),
            Arc::new(UniformTrafficClassifier::default()),
            PlannerConfig::default(),
        );

        let err = composer
            .compose(
                TravelMode::Drive,
                &your_location(),
                &pune_station_place(),
                false,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NoRouteFound { .. }));
    }
}
