//! Proxy service errors and their HTTP mapping.

use thiserror::Error;

use super::fetch::{FetchError, NormalizeError};

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("URL parameter is required")]
    MissingUrl,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Upstream fetch failed: {0}")]
    Upstream(#[from] FetchError),

    #[error("Normalization failed: {0}")]
    Normalization(#[from] NormalizeError),
}

impl ProxyError {
    /// HTTP status reported to the caller.
    ///
    /// Invalid input is 400, upstream failures reflect the upstream status
    /// when one exists, and everything else is 500.
    pub fn status_code(&self) -> u16 {
        match self {
            ProxyError::MissingUrl | ProxyError::InvalidUrl(_) => 400,
            ProxyError::Upstream(FetchError::InvalidUrl(_)) => 400,
            ProxyError::Upstream(err) => err.upstream_status().unwrap_or(500),
            ProxyError::Normalization(_) => 500,
        }
    }

    /// Message placed in the response body.
    pub fn public_message(&self) -> String {
        match self {
            ProxyError::MissingUrl => "URL parameter is required".to_string(),
            ProxyError::InvalidUrl(reason) | ProxyError::Upstream(FetchError::InvalidUrl(reason)) => {
                format!("Invalid URL: {}", reason)
            }
            ProxyError::Upstream(FetchError::HttpStatus { status }) => {
                format!("Failed to fetch: {}", status)
            }
            ProxyError::Upstream(err) => format!("Failed to fetch website: {}", err),
            ProxyError::Normalization(_) => "Failed to process website".to_string(),
        }
    }
}
