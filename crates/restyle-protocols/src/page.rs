//! Page types produced by the fetcher and the proxy service.

use serde::{Deserialize, Serialize};
use url::Url;

/// Outcome of fetching one document.
///
/// Ephemeral: produced by the fetcher and consumed by the normalizer.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// URL after following redirects.
    pub final_url: Url,
    /// HTTP status of the final response.
    pub status_code: u16,
    /// Decoded response body.
    pub raw_html: String,
    /// Origin of `final_url` (scheme, host and port).
    pub origin: String,
}

impl FetchResult {
    /// Build a fetch result, deriving the origin from the final URL.
    pub fn new(final_url: Url, status_code: u16, raw_html: impl Into<String>) -> Self {
        let origin = final_url.origin().ascii_serialization();
        Self {
            final_url,
            status_code,
            raw_html: raw_html.into(),
            origin,
        }
    }

    /// Hostname of the final URL, empty when the URL has none.
    pub fn hostname(&self) -> &str {
        self.final_url.host_str().unwrap_or_default()
    }
}

/// Normalized page returned by the proxy.
///
/// Field names follow the JSON contract consumed by front ends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedPage {
    /// Body content of the page, scripts removed and URLs absolutized.
    #[serde(rename = "html")]
    pub body_html: String,

    /// Inline and linked stylesheets, concatenated.
    pub css: String,

    /// Origin used to resolve relative references.
    #[serde(rename = "baseUrl")]
    pub base_url: String,

    /// Document title, or the hostname when the page has none.
    pub title: String,

    /// Whether the page was fetched and normalized.
    pub success: bool,

    /// Human-readable failure message.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl NormalizedPage {
    /// A successful page.
    pub fn success(
        body_html: impl Into<String>,
        css: impl Into<String>,
        base_url: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            body_html: body_html.into(),
            css: css.into(),
            base_url: base_url.into(),
            title: title.into(),
            success: true,
            error: None,
        }
    }

    /// A failed page carrying only an error message.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
#[path = "page_tests.rs"]
mod tests;
