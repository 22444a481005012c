//! Error types for streamlens-transport

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while contacting a catalog endpoint
#[derive(Error, Debug, Clone)]
pub enum TransportError {
    /// Failed to connect to the host
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request exceeded the configured timeout
    #[error("request timed out after {timeout:?}")]
    Timeout {
        /// Timeout duration that was exceeded
        timeout: Duration,
    },

    /// Host responded with a non-success status
    #[error("unexpected HTTP status {status}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
    },

    /// Endpoint URL could not be built
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),

    /// I/O error while reading the response body
    #[error("I/O error: {0}")]
    IoError(String),
}

impl TransportError {
    /// Check if the request is worth retrying
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::ConnectionFailed(_) | TransportError::Timeout { .. } => true,
            TransportError::HttpStatus { status } => *status >= 500,
            TransportError::InvalidUrl(_) | TransportError::IoError(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(TransportError::ConnectionFailed("refused".into()).is_retryable());
        assert!(
            TransportError::Timeout {
                timeout: Duration::from_secs(10)
            }
            .is_retryable()
        );
        assert!(TransportError::HttpStatus { status: 503 }.is_retryable());
        assert!(!TransportError::HttpStatus { status: 404 }.is_retryable());
        assert!(!TransportError::InvalidUrl("bad".into()).is_retryable());
    }
}
