//! Planner wiring
//!
//! Builds the route planner service from configuration: TomTom for geocoding and
//! routing, Overpass for stations, the random traffic simulation and a GeoJSON
//! map surface.

use std::sync::Arc;

use application::{
    ApplicationError, RouteComposer, RoutePlannerService, RoutePlannerSession, TrafficClassifier,
};
use infrastructure::{
    AppConfig, GeoJsonMapSurface, OverpassStationAdapter, RandomTrafficClassifier,
    TomTomGeocodingAdapter, TomTomRoutingAdapter, TrafficAppConfig,
};
use tracing::debug;

/// Traffic classifier for the configured profile and seed
pub fn traffic_classifier(config: &TrafficAppConfig) -> Arc<dyn TrafficClassifier> {
    match config.seed {
        Some(seed) => Arc::new(RandomTrafficClassifier::seeded(config.profile, seed)),
        None => Arc::new(RandomTrafficClassifier::new(config.profile)),
    }
}

/// Build a planner drawing onto a fresh GeoJSON surface
pub fn build_planner(
    config: &AppConfig,
    session: RoutePlannerSession,
) -> Result<RoutePlannerService<GeoJsonMapSurface>, ApplicationError> {
    let composer = RouteComposer::new(
        Arc::new(TomTomGeocodingAdapter::new(&config.tomtom)?),
        Arc::new(TomTomRoutingAdapter::new(&config.tomtom)?),
        Arc::new(OverpassStationAdapter::new(&config.overpass)?),
        traffic_classifier(&config.traffic),
        config.planner.clone(),
    );
    debug!(?composer, "Planner built");

    Ok(RoutePlannerService::new(
        composer,
        GeoJsonMapSurface::new(),
        session,
    ))
}
