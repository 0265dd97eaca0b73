//! Fetch and normalization errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Upstream returned status {status}")]
    HttpStatus { status: u16 },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl FetchError {
    /// Upstream status, when the failure carries one.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            FetchError::HttpStatus { status } => Some(*status),
            _ => None,
        }
    }
}

/// Failure while normalizing fetched markup.
///
/// Kept apart from [`FetchError`] so callers can tell an unreachable site
/// from markup that could not be processed.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("HTML rewrite failed: {0}")]
    Rewrite(String),

    #[error("Encoding error: {0}")]
    Encoding(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_display() {
        let err = FetchError::HttpStatus { status: 404 };
        assert!(err.to_string().contains("404"));
        assert_eq!(err.upstream_status(), Some(404));
    }

    #[test]
    fn test_transport_has_no_status() {
        let err = FetchError::Transport("dns error".to_string());
        assert!(err.to_string().contains("dns error"));
        assert_eq!(err.upstream_status(), None);
    }

    #[test]
    fn test_invalid_url_display() {
        let err = FetchError::InvalidUrl("relative URL without a base".to_string());
        assert!(err.to_string().starts_with("Invalid URL"));
    }

    #[test]
    fn test_normalize_error_display() {
        let err = NormalizeError::Rewrite("memory limit exceeded".to_string());
        assert!(err.to_string().contains("memory limit exceeded"));
    }
}
