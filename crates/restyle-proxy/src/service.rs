//! Proxy service: validation, fetching and normalization behind one call.

use tracing::{info, warn};

use restyle_config::FetcherConfig;
use restyle_protocols::{FetchError, NormalizedPage, ProxyError};

use crate::fetcher::{parse_http_url, Fetcher};
use crate::normalizer::Normalizer;

/// A proxy response: HTTP status plus the page payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyOutcome {
    pub status: u16,
    pub page: NormalizedPage,
}

impl ProxyOutcome {
    pub fn is_success(&self) -> bool {
        self.page.success
    }
}

/// Fetch-and-normalize service. Holds no per-request state.
#[derive(Debug, Clone)]
pub struct ProxyService {
    fetcher: Fetcher,
    normalizer: Normalizer,
}

impl ProxyService {
    pub fn new(config: &FetcherConfig) -> Result<Self, FetchError> {
        Ok(Self {
            fetcher: Fetcher::new(config)?,
            normalizer: Normalizer::new(config.max_stylesheets),
        })
    }

    /// Fetch and normalize `target`.
    pub async fn proxy(&self, target: Option<&str>) -> Result<NormalizedPage, ProxyError> {
        let target = target
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ProxyError::MissingUrl)?;
        let url = parse_http_url(target).map_err(|e| match e {
            FetchError::InvalidUrl(reason) => ProxyError::InvalidUrl(reason),
            other => ProxyError::Upstream(other),
        })?;

        let fetched = self.fetcher.fetch(url.as_str()).await?;
        let page = self
            .normalizer
            .normalize(&self.fetcher, &fetched, url.scheme())
            .await?;

        info!(
            url = %url,
            final_url = %fetched.final_url,
            html_bytes = page.body_html.len(),
            css_bytes = page.css.len(),
            "Proxied page"
        );
        Ok(page)
    }

    /// Proxy `target` and map the result onto the response contract.
    pub async fn handle(&self, target: Option<&str>) -> ProxyOutcome {
        match self.proxy(target).await {
            Ok(page) => ProxyOutcome { status: 200, page },
            Err(err) => {
                warn!(url = target.unwrap_or_default(), error = %err, "Proxy request failed");
                ProxyOutcome {
                    status: err.status_code(),
                    page: NormalizedPage::failure(err.public_message()),
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
