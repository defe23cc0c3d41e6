//! Geocoding service port

use async_trait::async_trait;
use domain::{Coordinate, Place};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for resolving free-text place names
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve `query` to its top-ranked place, biased toward `bias`
    ///
    /// Returns `Ok(None)` for an empty query or when the service has no match.
    /// The place name falls back to the query text when the service gives none.
    async fn geocode(
        &self,
        query: &str,
        bias: Coordinate,
    ) -> Result<Option<Place>, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn GeocodingPort>();
    }
}
