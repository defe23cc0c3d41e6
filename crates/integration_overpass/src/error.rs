//! Overpass error types

use thiserror::Error;

/// Errors that can occur during station lookups
#[derive(Debug, Error)]
pub enum OverpassError {
    /// Connection to the Overpass server failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request failed with a non-success status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse the response body
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Too many concurrent queries for this client (HTTP 429)
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Server is overloaded and rejected the query (HTTP 504)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Invalid search parameters
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl OverpassError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::RateLimitExceeded
                | Self::ServiceUnavailable(_)
                | Self::Timeout { .. }
        )
    }
}
