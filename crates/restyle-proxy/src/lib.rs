//! # Restyle Proxy
//!
//! Fetches a remote page and turns it into a self-contained
//! [`NormalizedPage`](restyle_protocols::NormalizedPage): body markup with
//! scripts removed and URLs absolutized, plus one CSS blob built from inline
//! and linked stylesheets.
//!
//! - [`Fetcher`] - outbound HTTP with a browser request profile
//! - [`Normalizer`] - markup rewriting and stylesheet inlining
//! - [`ProxyService`] - request validation and orchestration

mod fetcher;
mod normalizer;
mod service;

pub use fetcher::Fetcher;
pub use normalizer::{resolve_stylesheet_href, rewrite_document, Normalizer, RewrittenDocument};
pub use service::{ProxyOutcome, ProxyService};
