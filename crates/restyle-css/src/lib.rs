//! # Restyle CSS
//!
//! Stylesheet handling for proxied pages:
//!
//! - [`Stylesheet`] splits CSS into top-level items (rules, at-rules,
//!   comments) without resolving the cascade.
//! - [`CssScoper`] nests every selector under one container selector.
//! - [`absolutize_stylesheet_urls`] and [`absolutize_root_relative`] rewrite
//!   `url(...)` references against a page origin.

mod scoper;
mod stylesheet;
mod urls;

pub use scoper::{scope_css, CssScoper};
pub use stylesheet::{split_selector_list, CssBlock, CssItem, Stylesheet};
pub use urls::{absolutize_root_relative, absolutize_stylesheet_urls};
