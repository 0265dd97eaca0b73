//! API setup errors.

use thiserror::Error;

use restyle_protocols::FetchError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to build proxy client: {0}")]
    Client(#[from] FetchError),

    #[error("Invalid header value for {name}: {value}")]
    InvalidHeader { name: &'static str, value: String },

    #[error("Invalid listen address {0}")]
    InvalidAddress(String),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}
