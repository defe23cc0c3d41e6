//! TomTom adapters - Implement GeocodingPort and RoutingPort using integration_tomtom

use application::error::ApplicationError;
use application::ports::{GeocodingPort, RouteProfile, RoutingPort};
use async_trait::async_trait;
use domain::{Coordinate, Place, RouteSegment, RouteSummary};
use integration_tomtom::{
    CalculatedRoute, GeocodingClient, RoutingClient, TomTomConfig, TomTomError,
    TomTomGeocodingClient, TomTomRoutingClient, TravelProfile,
};
use tracing::{debug, instrument};

/// Map a TomTom error onto the application error taxonomy
pub(crate) fn map_tomtom_error(err: TomTomError) -> ApplicationError {
    match err {
        TomTomError::NoRouteFound { from, to } => ApplicationError::NoRouteFound { from, to },
        TomTomError::ConfigurationError(e) => ApplicationError::Configuration(e),
        e @ (TomTomError::ConnectionFailed(_)
        | TomTomError::RequestFailed(_)
        | TomTomError::ParseError(_)
        | TomTomError::RateLimitExceeded { .. }
        | TomTomError::InvalidApiKey
        | TomTomError::InvalidQuery(_)
        | TomTomError::Timeout { .. }) => ApplicationError::NetworkFailure(format!("TomTom: {e}")),
    }
}

const fn to_travel_profile(profile: RouteProfile) -> TravelProfile {
    match profile {
        RouteProfile::DrivingWithTraffic => TravelProfile::DrivingWithTraffic,
        RouteProfile::Pedestrian => TravelProfile::Pedestrian,
    }
}

/// Adapter for place lookups using the TomTom Search API
pub struct TomTomGeocodingAdapter {
    client: Box<dyn GeocodingClient>,
}

impl std::fmt::Debug for TomTomGeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TomTomGeocodingAdapter")
            .field("client", &"TomTomGeocodingClient")
            .finish()
    }
}

impl TomTomGeocodingAdapter {
    /// Create an adapter from configuration
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the API key is missing or the HTTP client fails
    /// to initialize.
    pub fn new(config: &TomTomConfig) -> Result<Self, ApplicationError> {
        let client = TomTomGeocodingClient::new(config).map_err(map_tomtom_error)?;
        Ok(Self::with_client(client))
    }

    /// Wrap an existing client
    pub fn with_client(client: impl GeocodingClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }
}

#[async_trait]
impl GeocodingPort for TomTomGeocodingAdapter {
    #[instrument(skip(self), fields(bias = %bias))]
    async fn geocode(
        &self,
        query: &str,
        bias: Coordinate,
    ) -> Result<Option<Place>, ApplicationError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }

        let Some(found) = self
            .client
            .geocode(query, Some((bias.lat(), bias.lon())))
            .await
            .map_err(map_tomtom_error)?
        else {
            debug!("No geocoding match");
            return Ok(None);
        };

        let location = Coordinate::new(found.lat, found.lon).map_err(|e| {
            ApplicationError::NetworkFailure(format!("TomTom returned an invalid position: {e}"))
        })?;
        let name = found
            .freeform_address
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| query.to_string());
        debug!(%name, %location, "Geocoded place");

        Ok(Some(Place::new(location, name)))
    }
}

/// Adapter for routed paths using the TomTom Routing API
pub struct TomTomRoutingAdapter {
    client: Box<dyn RoutingClient>,
}

impl std::fmt::Debug for TomTomRoutingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TomTomRoutingAdapter")
            .field("client", &"TomTomRoutingClient")
            .finish()
    }
}

impl TomTomRoutingAdapter {
    /// Create an adapter from configuration
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the API key is missing or the HTTP client fails
    /// to initialize.
    pub fn new(config: &TomTomConfig) -> Result<Self, ApplicationError> {
        let client = TomTomRoutingClient::new(config).map_err(map_tomtom_error)?;
        Ok(Self::with_client(client))
    }

    /// Wrap an existing client
    pub fn with_client(client: impl RoutingClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    fn to_segment(
        route: CalculatedRoute,
        profile: RouteProfile,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<RouteSegment, ApplicationError> {
        let points = route
            .points
            .iter()
            .map(|p| Coordinate::new(p.latitude, p.longitude))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                ApplicationError::NetworkFailure(format!("TomTom returned an invalid point: {e}"))
            })?;
        if points.len() < 2 {
            return Err(ApplicationError::no_route(from, to));
        }

        let summary = RouteSummary {
            length_meters: route.summary.length_in_meters,
            travel_time_seconds: route.summary.travel_time_in_seconds,
        };
        Ok(RouteSegment::new(
            points,
            profile.segment_kind(),
            Some(summary),
        )?)
    }
}

#[async_trait]
impl RoutingPort for TomTomRoutingAdapter {
    #[instrument(skip(self), fields(from = %from, to = %to, profile = %profile))]
    async fn fetch_route(
        &self,
        from: Coordinate,
        to: Coordinate,
        profile: RouteProfile,
    ) -> Result<RouteSegment, ApplicationError> {
        let route = self
            .client
            .calculate_route(
                (from.lat(), from.lon()),
                (to.lat(), to.lon()),
                to_travel_profile(profile),
            )
            .await
            .map_err(map_tomtom_error)?;
        debug!(
            points = route.points.len(),
            meters = route.summary.length_in_meters,
            "Route fetched"
        );

        Self::to_segment(route, profile, from, to)
    }
}
