//! `url(...)` rewriting against a page origin.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::stylesheet::{CssItem, Stylesheet};

static CSS_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)url\(\s*(['"]?)([^'")]*?)['"]?\s*\)"#)
        .unwrap_or_else(|e| panic!("invalid CSS url pattern: {}", e))
});

/// Rewrite root-relative references (`url(/x)`) to `origin/x`.
///
/// Used for inline `style` attributes.
pub fn absolutize_root_relative(css: &str, origin: &str) -> String {
    rewrite(css, |value| root_relative(value, origin))
}

/// Rewrite root-relative and parent-relative references in a stylesheet.
///
/// A single leading `../` is replaced by the origin, so `url(../img/a.png)`
/// becomes `origin/img/a.png` regardless of where the stylesheet lived.
/// Protocol-relative (`//cdn/...`), absolute and data URLs are untouched,
/// as are references inside comments.
pub fn absolutize_stylesheet_urls(css: &str, origin: &str) -> String {
    let sheet = Stylesheet::parse(css);
    let mut out = String::with_capacity(css.len());
    for item in &sheet.items {
        match item {
            CssItem::Trivia(text) => out.push_str(text),
            other => out.push_str(&rewrite(&other.to_string(), |value| {
                root_relative(value, origin).or_else(|| {
                    value
                        .strip_prefix("../")
                        .map(|rest| format!("{}/{}", origin, rest))
                })
            })),
        }
    }
    out
}

fn root_relative(value: &str, origin: &str) -> Option<String> {
    if value.starts_with("//") {
        None
    } else if value.starts_with('/') {
        Some(format!("{}{}", origin, value))
    } else {
        None
    }
}

fn rewrite(css: &str, resolve: impl Fn(&str) -> Option<String>) -> String {
    CSS_URL
        .replace_all(css, |caps: &Captures| {
            let quote = &caps[1];
            let value = caps[2].trim();
            match resolve(value) {
                Some(resolved) => format!("url({}{}{})", quote, resolved, quote),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
#[path = "urls_tests.rs"]
mod tests;
