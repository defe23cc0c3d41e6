//! Rail station index port

use async_trait::async_trait;
use domain::{Coordinate, Station};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for tag-based geospatial station lookups
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StationIndexPort: Send + Sync {
    /// Heavy-rail stations within `radius_meters` of `center`, in index order
    ///
    /// Subway, metro and light-rail stations are never returned. An empty list
    /// is a valid answer.
    async fn find_stations_near(
        &self,
        center: Coordinate,
        radius_meters: u32,
    ) -> Result<Vec<Station>, ApplicationError>;
}
