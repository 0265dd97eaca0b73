//! Outbound HTTP fetching.

use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{redirect, Client};
use tracing::{debug, info, warn};
use url::Url;

use restyle_config::FetcherConfig;
use restyle_protocols::{FetchError, FetchResult};

/// HTTP client that presents itself as a desktop browser navigation.
///
/// Transport compression is disabled so bodies arrive as plain text.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    stylesheet_timeout: Duration,
}

impl Fetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .default_headers(browser_headers(config)?)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .redirect(redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| FetchError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            stylesheet_timeout: Duration::from_secs(config.stylesheet_timeout_seconds),
        })
    }

    /// Fetch a page, following redirects.
    ///
    /// The URL is validated before any network activity.
    pub async fn fetch(&self, url: &str) -> Result<FetchResult, FetchError> {
        let url = parse_http_url(url)?;
        info!(url = %url, "Fetching page");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        let final_url = response.url().clone();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Upstream returned an error status");
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
            });
        }
        if final_url != url {
            debug!(from = %url, to = %final_url, "Followed redirect");
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(FetchResult::new(final_url, status.as_u16(), body))
    }

    /// Fetch a linked stylesheet.
    ///
    /// Any failure yields `None`; a missing stylesheet only degrades styling.
    pub async fn fetch_stylesheet(&self, url: &str) -> Option<String> {
        let result = self
            .client
            .get(url)
            .header(header::ACCEPT, "text/css,*/*;q=0.1")
            .timeout(self.stylesheet_timeout)
            .send()
            .await;

        let response = match result {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                debug!(url, status = response.status().as_u16(), "Skipping stylesheet");
                return None;
            }
            Err(e) => {
                debug!(url, error = %e, "Skipping stylesheet");
                return None;
            }
        };

        match response.text().await {
            Ok(css) => Some(css),
            Err(e) => {
                debug!(url, error = %e, "Skipping unreadable stylesheet");
                None
            }
        }
    }
}

/// Parse `url` and require an `http` or `https` scheme.
pub(crate) fn parse_http_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url.trim()).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::InvalidUrl(format!("unsupported scheme: {}", other))),
    }
}

fn browser_headers(config: &FetcherConfig) -> Result<HeaderMap, FetchError> {
    let configured = |name: &str, value: &str| {
        HeaderValue::from_str(value)
            .map_err(|e| FetchError::ClientBuild(format!("invalid {} header: {}", name, e)))
    };

    let mut headers = HeaderMap::new();
    headers.insert(header::USER_AGENT, configured("User-Agent", &config.user_agent)?);
    headers.insert(header::ACCEPT, configured("Accept", &config.accept)?);
    headers.insert(
        header::ACCEPT_LANGUAGE,
        configured("Accept-Language", &config.accept_language)?,
    );
    headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("identity"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("none"));
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    Ok(headers)
}

#[cfg(test)]
#[path = "fetcher_tests.rs"]
mod tests;
