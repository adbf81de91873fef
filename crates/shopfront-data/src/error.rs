//! Error type for catalog fetch operations.

use std::time::Duration;

/// Error type for fetch operations against the catalog API.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error("timeout after {0:?}")]
    Timeout(Duration),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("unexpected response shape: {0}")]
    Deserialization(String),
}

impl FetchError {
    /// Whether this error is a not-found response.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Http { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        let not_found = FetchError::Http {
            status: 404,
            url: "/products/42".to_string(),
        };
        assert!(not_found.is_not_found());

        let server_error = FetchError::Http {
            status: 500,
            url: "/products".to_string(),
        };
        assert!(!server_error.is_not_found());
        assert!(!FetchError::Timeout(Duration::from_secs(10)).is_not_found());
    }

    #[test]
    fn test_error_display() {
        let err = FetchError::Http {
            status: 503,
            url: "https://example.test/products".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP error: 503 for https://example.test/products"
        );
    }
}
