//! Overpass adapter - Implements StationIndexPort using integration_overpass

use application::error::ApplicationError;
use application::ports::StationIndexPort;
use async_trait::async_trait;
use domain::{Coordinate, Station};
use integration_overpass::{
    OverpassClient, OverpassConfig, OverpassError, RailStation, StationIndexClient,
};
use tracing::{debug, instrument, warn};

/// Adapter for rail station lookups against OpenStreetMap data
pub struct OverpassStationAdapter {
    client: Box<dyn StationIndexClient>,
}

impl std::fmt::Debug for OverpassStationAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverpassStationAdapter")
            .field("client", &"OverpassClient")
            .finish()
    }
}

impl OverpassStationAdapter {
    /// Create an adapter from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: &OverpassConfig) -> Result<Self, ApplicationError> {
        let client = OverpassClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::with_client(client))
    }

    /// Wrap an existing client
    pub fn with_client(client: impl StationIndexClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    /// Map integration error to application error
    fn map_error(err: OverpassError) -> ApplicationError {
        ApplicationError::NetworkFailure(format!("Overpass: {err}"))
    }

    fn to_station(raw: RailStation) -> Option<Station> {
        match Coordinate::new(raw.lat, raw.lon) {
            Ok(location) => Some(Station::new(location, raw.name)),
            Err(e) => {
                warn!(id = raw.id, error = %e, "Skipping station with invalid position");
                None
            },
        }
    }
}

#[async_trait]
impl StationIndexPort for OverpassStationAdapter {
    #[instrument(skip(self), fields(center = %center))]
    async fn find_stations_near(
        &self,
        center: Coordinate,
        radius_meters: u32,
    ) -> Result<Vec<Station>, ApplicationError> {
        let raw = self
            .client
            .rail_stations_near(center.lat(), center.lon(), radius_meters)
            .await
            .map_err(Self::map_error)?;

        let stations: Vec<Station> = raw.into_iter().filter_map(Self::to_station).collect();
        debug!(count = stations.len(), "Stations found");
        Ok(stations)
    }
}
