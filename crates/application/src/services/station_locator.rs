//! Station locator
//!
//! Finds candidate rail stations around a point and picks the one closest to a
//! reference point by straight-line distance.

use std::sync::Arc;

use domain::{Coordinate, Station, haversine_km};
use tracing::{debug, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::StationIndexPort;

/// Pick the station nearest to `reference`
///
/// Linear scan; ties go to the first station encountered. Returns `None` for an
/// empty slice.
#[must_use]
pub fn pick_nearest<'a>(reference: &Coordinate, stations: &'a [Station]) -> Option<&'a Station> {
    let mut best: Option<(&Station, f64)> = None;
    for station in stations {
        let d = haversine_km(reference, &station.location());
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((station, d));
        }
    }
    best.map(|(s, _)| s)
}

/// Station lookups over a [`StationIndexPort`]
#[derive(Clone)]
pub struct StationLocator {
    index: Arc<dyn StationIndexPort>,
}

impl std::fmt::Debug for StationLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StationLocator").finish_non_exhaustive()
    }
}

impl StationLocator {
    /// Create a new locator
    pub fn new(index: Arc<dyn StationIndexPort>) -> Self {
        Self { index }
    }

    /// Rail stations within `radius_meters` of `center`
    #[instrument(skip(self))]
    pub async fn find_stations_near(
        &self,
        center: Coordinate,
        radius_meters: u32,
    ) -> Result<Vec<Station>, ApplicationError> {
        let stations = self.index.find_stations_near(center, radius_meters).await?;
        debug!(count = stations.len(), "Candidate stations");
        Ok(stations)
    }

    /// The station nearest to `center` within `radius_meters`
    ///
    /// Fails with `NoStationFound` when the search comes back empty.
    pub async fn nearest_station(
        &self,
        center: Coordinate,
        radius_meters: u32,
    ) -> Result<Station, ApplicationError> {
        let stations = self.find_stations_near(center, radius_meters).await?;
        pick_nearest(&center, &stations).cloned().ok_or_else(|| {
            warn!(%center, radius_meters, "No station in range");
            ApplicationError::NoStationFound {
                near: center.to_string(),
                radius_meters,
            }
        })
    }
}
