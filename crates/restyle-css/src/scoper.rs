//! Selector scoping.
//!
//! Every ordinary rule is nested under a container selector so page styles
//! only reach the rendered preview. Grouping at-rules are scoped
//! recursively, `@import` is dropped, and the remaining at-rules
//! (`@font-face`, keyframes, `@page`, ...) pass through untouched.

use crate::stylesheet::{split_selector_list, CssItem, Stylesheet};

/// At-rules whose body is itself a list of rules.
const GROUPING_RULES: &[&str] = &["media", "supports", "container", "layer", "document"];

/// Nests selectors under a container selector.
#[derive(Debug, Clone)]
pub struct CssScoper {
    container: String,
}

impl CssScoper {
    /// Create a scoper for `container`, e.g. `.html-preview`.
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
        }
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    /// Scope a stylesheet.
    ///
    /// Scoping already-scoped output returns it unchanged.
    pub fn scope(&self, css: &str) -> String {
        let mut out = String::with_capacity(css.len() + css.len() / 4);
        self.scope_into(css, &mut out);
        out
    }

    fn scope_into(&self, css: &str, out: &mut String) {
        for item in Stylesheet::parse(css).items {
            match item {
                CssItem::Trivia(text) | CssItem::Raw(text) => out.push_str(text),
                CssItem::Statement(text) => {
                    if !is_import(text) {
                        out.push_str(text);
                    }
                }
                CssItem::Block(block) => match block.at_keyword() {
                    Some(keyword) if GROUPING_RULES.contains(&keyword.as_str()) => {
                        out.push_str(block.prelude);
                        out.push('{');
                        self.scope_into(block.body, out);
                        if block.closed {
                            out.push('}');
                        }
                    }
                    Some(_) => out.push_str(&CssItem::Block(block).to_string()),
                    None => {
                        out.push_str(&self.scope_prelude(block.prelude));
                        out.push('{');
                        out.push_str(block.body);
                        if block.closed {
                            out.push('}');
                        }
                    }
                },
            }
        }
    }

    /// Prefix each selector of a selector list, keeping surrounding whitespace.
    fn scope_prelude(&self, prelude: &str) -> String {
        let core = prelude.trim();
        if core.is_empty() {
            return prelude.to_string();
        }
        let leading = &prelude[..prelude.len() - prelude.trim_start().len()];
        let trailing = &prelude[prelude.trim_end().len()..];

        let scoped = split_selector_list(core)
            .into_iter()
            .map(str::trim)
            .filter(|selector| !selector.is_empty())
            .map(|selector| {
                if contains_token(selector, &self.container) {
                    selector.to_string()
                } else {
                    format!("{} {}", self.container, selector)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        format!("{}{}{}", leading, scoped, trailing)
    }
}

/// Scope `css` under `container`.
pub fn scope_css(css: &str, container: &str) -> String {
    CssScoper::new(container).scope(css)
}

fn is_import(statement: &str) -> bool {
    crate::stylesheet::at_keyword(statement).as_deref() == Some("import")
}

/// Whether `selector` mentions `container` as a whole simple selector,
/// so `.scoped-list` does not count as containing `.scope`.
fn contains_token(selector: &str, container: &str) -> bool {
    selector.match_indices(container).any(|(index, _)| {
        !selector[index + container.len()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    })
}

#[cfg(test)]
#[path = "scoper_tests.rs"]
mod tests;
