//! TomTom error types

use thiserror::Error;

/// Errors that can occur when talking to the TomTom APIs
#[derive(Debug, Error)]
pub enum TomTomError {
    /// Connection to the service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request failed with a non-success status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse the response body
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by API)
        retry_after_secs: Option<u64>,
    },

    /// API key missing or rejected
    #[error("Invalid API key")]
    InvalidApiKey,

    /// Query rejected before sending
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The routing engine found no route between the waypoints
    #[error("No route found from {from} to {to}")]
    NoRouteFound {
        /// Origin as "lat,lon"
        from: String,
        /// Destination as "lat,lon"
        to: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl TomTomError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::RequestFailed(_)
                | Self::Timeout { .. }
                | Self::RateLimitExceeded { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(TomTomError::ConnectionFailed("x".to_string()).is_retryable());
        assert!(TomTomError::RequestFailed("x".to_string()).is_retryable());
        assert!(TomTomError::Timeout { timeout_secs: 10 }.is_retryable());
        assert!(
            TomTomError::RateLimitExceeded {
                retry_after_secs: None
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_non_retryable_errors() {
        assert!(!TomTomError::InvalidApiKey.is_retryable());
        assert!(!TomTomError::ParseError("x".to_string()).is_retryable());
        assert!(!TomTomError::InvalidQuery("x".to_string()).is_retryable());
        assert!(
            !TomTomError::NoRouteFound {
                from: "1,2".to_string(),
                to: "3,4".to_string(),
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_error_display() {
        let err = TomTomError::NoRouteFound {
            from: "19.076,72.8777".to_string(),
            to: "18.5286,73.8743".to_string(),
        };
        assert!(err.to_string().contains("19.076,72.8777"));
        assert!(err.to_string().contains("18.5286,73.8743"));

        let err = TomTomError::Timeout { timeout_secs: 7 };
        assert!(err.to_string().contains('7'));
    }
}
