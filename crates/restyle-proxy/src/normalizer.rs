//! Markup normalization.
//!
//! One streaming rewrite pass over the fetched document collects the title,
//! inline styles and stylesheet links, absolutizes resource references,
//! removes scripts and refresh redirects, and marks the body boundaries.
//! Linked stylesheets are then fetched and appended to the CSS blob.

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::join_all;
use lol_html::html_content::ContentType;
use lol_html::{element, text, HtmlRewriter, Settings};
use tracing::debug;

use restyle_css::{absolutize_root_relative, absolutize_stylesheet_urls};
use restyle_protocols::{FetchResult, NormalizeError, NormalizedPage};

use crate::fetcher::Fetcher;

const BODY_START: &str = "<!--restyle:body-start-->";
const BODY_END: &str = "<!--restyle:body-end-->";

/// Result of the rewrite pass, before linked stylesheets are fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewrittenDocument {
    /// First non-empty `<title>`, entity-decoded and trimmed.
    pub title: Option<String>,
    /// Contents of every `<style>` block, each followed by a newline.
    pub inline_css: String,
    /// Raw `href` of every `<link rel="stylesheet">`, in document order.
    pub stylesheet_hrefs: Vec<String>,
    /// Body content, or the whole rewritten document when there is no body.
    pub body_html: String,
}

#[derive(Default)]
struct Collected {
    titles: Vec<String>,
    styles: Vec<String>,
    stylesheet_hrefs: Vec<String>,
    pending_style: String,
}

/// Run the rewrite pass over `raw_html`.
///
/// `origin` prefixes root-relative references and `scheme` (without `:`)
/// prefixes protocol-relative ones.
pub fn rewrite_document(
    raw_html: &str,
    origin: &str,
    scheme: &str,
) -> Result<RewrittenDocument, NormalizeError> {
    let collected = Rc::new(RefCell::new(Collected::default()));
    let title_open = Rc::clone(&collected);
    let title_text = Rc::clone(&collected);
    let style_open = Rc::clone(&collected);
    let style_text = Rc::clone(&collected);
    let links = Rc::clone(&collected);

    let mut output = Vec::with_capacity(raw_html.len());
    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![
                element!("title", move |_| {
                    title_open.borrow_mut().titles.push(String::new());
                    Ok(())
                }),
                text!("title", move |chunk| {
                    if let Some(title) = title_text.borrow_mut().titles.last_mut() {
                        title.push_str(chunk.as_str());
                    }
                    Ok(())
                }),
                element!("style", move |_| {
                    style_open.borrow_mut().styles.push(String::new());
                    Ok(())
                }),
                // Chunks may split a `url(...)`, so the output text is
                // buffered and written once the text node is complete.
                text!("style", move |chunk| {
                    let mut collected = style_text.borrow_mut();
                    if let Some(style) = collected.styles.last_mut() {
                        style.push_str(chunk.as_str());
                    }
                    collected.pending_style.push_str(chunk.as_str());
                    if chunk.last_in_text_node() {
                        let text = std::mem::take(&mut collected.pending_style);
                        let rewritten = absolutize_root_relative(&text, origin);
                        chunk.replace(&rewritten, ContentType::Html);
                    } else {
                        chunk.remove();
                    }
                    Ok(())
                }),
                element!("link[rel][href]", move |el| {
                    let is_stylesheet = el.get_attribute("rel").is_some_and(|rel| {
                        rel.split_ascii_whitespace()
                            .any(|token| token.eq_ignore_ascii_case("stylesheet"))
                    });
                    if is_stylesheet {
                        if let Some(href) = el.get_attribute("href") {
                            links.borrow_mut().stylesheet_hrefs.push(href);
                        }
                    }
                    Ok(())
                }),
                element!("[src]", move |el| {
                    if let Some(value) = el.get_attribute("src") {
                        if let Some(absolute) = absolutize_reference(&value, origin, scheme) {
                            el.set_attribute("src", &absolute)?;
                        }
                    }
                    Ok(())
                }),
                element!("[href]", move |el| {
                    if let Some(value) = el.get_attribute("href") {
                        if let Some(absolute) = absolutize_reference(&value, origin, scheme) {
                            el.set_attribute("href", &absolute)?;
                        }
                    }
                    Ok(())
                }),
                element!("[style]", move |el| {
                    if let Some(style) = el.get_attribute("style") {
                        let rewritten = absolutize_root_relative(&style, origin);
                        if rewritten != style {
                            el.set_attribute("style", &rewritten)?;
                        }
                    }
                    Ok(())
                }),
                element!("script", |el| {
                    el.remove();
                    Ok(())
                }),
                element!("meta[http-equiv]", |el| {
                    let refresh = el
                        .get_attribute("http-equiv")
                        .is_some_and(|v| v.trim().eq_ignore_ascii_case("refresh"));
                    if refresh {
                        el.remove();
                    }
                    Ok(())
                }),
                element!("body", |el| {
                    el.prepend(BODY_START, ContentType::Html);
                    el.append(BODY_END, ContentType::Html);
                    Ok(())
                }),
            ],
            ..Settings::default()
        },
        |chunk: &[u8]| output.extend_from_slice(chunk),
    );

    rewriter
        .write(raw_html.as_bytes())
        .map_err(|e| NormalizeError::Rewrite(e.to_string()))?;
    rewriter
        .end()
        .map_err(|e| NormalizeError::Rewrite(e.to_string()))?;

    let document =
        String::from_utf8(output).map_err(|e| NormalizeError::Encoding(e.to_string()))?;
    let collected = collected.take();

    let title = collected
        .titles
        .iter()
        .map(|raw| html_escape::decode_html_entities(raw).trim().to_string())
        .find(|title| !title.is_empty());

    let mut inline_css = String::new();
    for style in &collected.styles {
        inline_css.push_str(style);
        inline_css.push('\n');
    }

    Ok(RewrittenDocument {
        title,
        inline_css,
        stylesheet_hrefs: collected.stylesheet_hrefs,
        body_html: extract_body(&document),
    })
}

/// Absolute form of a root-relative or protocol-relative reference.
fn absolutize_reference(value: &str, origin: &str, scheme: &str) -> Option<String> {
    if value.starts_with("//") {
        Some(format!("{}:{}", scheme, value))
    } else if value.starts_with('/') {
        Some(format!("{}{}", origin, value))
    } else {
        None
    }
}

/// Resolve a stylesheet `href` for fetching.
pub fn resolve_stylesheet_href(href: &str, origin: &str, scheme: &str) -> String {
    let href = href.trim();
    let lower = href.to_ascii_lowercase();
    if href.starts_with("//") {
        format!("{}:{}", scheme, href)
    } else if href.starts_with('/') {
        format!("{}{}", origin, href)
    } else if lower.starts_with("http://") || lower.starts_with("https://") {
        href.to_string()
    } else {
        format!("{}/{}", origin, href)
    }
}

fn extract_body(document: &str) -> String {
    let Some(start) = document.find(BODY_START) else {
        return document.to_string();
    };
    let content_start = start + BODY_START.len();
    let content_end = document
        .rfind(BODY_END)
        .filter(|end| *end >= content_start)
        .unwrap_or(document.len());
    document[content_start..content_end].to_string()
}

/// Turns fetched documents into normalized pages.
#[derive(Debug, Clone)]
pub struct Normalizer {
    max_stylesheets: usize,
}

impl Normalizer {
    pub fn new(max_stylesheets: usize) -> Self {
        Self { max_stylesheets }
    }

    /// Normalize a fetched page.
    ///
    /// `scheme` is the scheme of the originally requested URL, used for
    /// protocol-relative references.
    pub async fn normalize(
        &self,
        fetcher: &Fetcher,
        fetched: &FetchResult,
        scheme: &str,
    ) -> Result<NormalizedPage, NormalizeError> {
        let document = rewrite_document(&fetched.raw_html, &fetched.origin, scheme)?;

        let stylesheet_urls: Vec<String> = document
            .stylesheet_hrefs
            .iter()
            .take(self.max_stylesheets)
            .map(|href| resolve_stylesheet_href(href, &fetched.origin, scheme))
            .collect();
        if document.stylesheet_hrefs.len() > stylesheet_urls.len() {
            debug!(
                found = document.stylesheet_hrefs.len(),
                limit = self.max_stylesheets,
                "Ignoring stylesheets over the limit"
            );
        }

        let sheets = join_all(
            stylesheet_urls
                .iter()
                .map(|url| fetcher.fetch_stylesheet(url)),
        )
        .await;

        let mut css = document.inline_css;
        for (url, sheet) in stylesheet_urls.iter().zip(sheets) {
            if let Some(text) = sheet {
                css.push_str(&format!("\n/* From: {} */\n{}\n", url, text));
            }
        }
        let css = absolutize_stylesheet_urls(&css, &fetched.origin);

        let title = document
            .title
            .unwrap_or_else(|| fetched.hostname().to_string());

        Ok(NormalizedPage::success(
            document.body_html,
            css,
            fetched.origin.clone(),
            title,
        ))
    }
}

#[cfg(test)]
#[path = "normalizer_tests.rs"]
mod tests;
