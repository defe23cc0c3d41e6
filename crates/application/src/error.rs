//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
///
/// Every external-call failure is converted into one of these before it reaches
/// the planner service.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A place name could not be resolved to a coordinate
    #[error("Location not found: {0}")]
    GeocodeNotFound(String),

    /// The routing service returned no route
    #[error("No route found from {from} to {to}")]
    NoRouteFound {
        /// Origin description
        from: String,
        /// Destination description
        to: String,
    },

    /// No rail station within the search radius
    #[error("No railway stations found within {radius_meters} m of {near}")]
    NoStationFound {
        /// Search center description
        near: String,
        /// Search radius in meters
        radius_meters: u32,
    },

    /// Transport, timeout, HTTP status or payload failure of an external service
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkFailure(_))
    }

    /// Create a no-route error from two displayable endpoints
    pub fn no_route(from: impl ToString, to: impl ToString) -> Self {
        Self::NoRouteFound {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}
