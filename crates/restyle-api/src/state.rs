//! Application state.

use std::time::{Duration, Instant};

use axum::http::HeaderValue;

use restyle_config::{FetcherConfig, ProxyConfig};
use restyle_proxy::ProxyService;

use crate::error::ApiError;

/// State shared by every handler.
pub struct AppState {
    pub proxy: ProxyService,
    /// `Access-Control-Allow-Origin` value.
    pub allow_origin: HeaderValue,
    /// `Cache-Control` value for successful proxy responses.
    pub cache_control: HeaderValue,
    start_time: Instant,
}

impl AppState {
    pub fn new(fetcher: &FetcherConfig, proxy: &ProxyConfig) -> Result<Self, ApiError> {
        let allow_origin = HeaderValue::from_str(&proxy.allow_origin).map_err(|_| {
            ApiError::InvalidHeader {
                name: "access-control-allow-origin",
                value: proxy.allow_origin.clone(),
            }
        })?;
        let cache_control = format!("public, max-age={}", proxy.cache_max_age_seconds);
        let cache_control =
            HeaderValue::from_str(&cache_control).map_err(|_| ApiError::InvalidHeader {
                name: "cache-control",
                value: cache_control.clone(),
            })?;

        Ok(Self {
            proxy: ProxyService::new(fetcher)?,
            allow_origin,
            cache_control,
            start_time: Instant::now(),
        })
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}
