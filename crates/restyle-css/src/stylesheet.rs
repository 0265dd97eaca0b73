//! Block-level stylesheet parser.
//!
//! Only the block structure is parsed: braces, at-rule statements, strings
//! and comments. Declarations and selectors stay as text.

use std::fmt;

/// One top-level item of a stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CssItem<'a> {
    /// Whitespace and comments between items.
    Trivia(&'a str),
    /// Statement at-rule including its `;`, e.g. `@import url(a.css);`.
    Statement(&'a str),
    /// Ordinary rule or block at-rule.
    Block(CssBlock<'a>),
    /// Text that forms no item: a stray `}` or an unterminated prelude.
    Raw(&'a str),
}

/// A prelude followed by a `{}` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssBlock<'a> {
    /// Everything before `{`: a selector list or an at-rule header.
    pub prelude: &'a str,
    /// Everything between the braces.
    pub body: &'a str,
    /// False when the input ended before the matching `}`.
    pub closed: bool,
}

impl CssBlock<'_> {
    /// Lowercased at-rule name without `@`, e.g. `media` or `-webkit-keyframes`.
    pub fn at_keyword(&self) -> Option<String> {
        at_keyword(self.prelude)
    }
}

impl fmt::Display for CssItem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CssItem::Trivia(text) | CssItem::Statement(text) | CssItem::Raw(text) => {
                f.write_str(text)
            }
            CssItem::Block(block) => {
                write!(f, "{}{{{}", block.prelude, block.body)?;
                if block.closed {
                    f.write_str("}")?;
                }
                Ok(())
            }
        }
    }
}

/// A parsed stylesheet borrowing from its source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet<'a> {
    pub items: Vec<CssItem<'a>>,
}

impl<'a> Stylesheet<'a> {
    /// Parse the top-level items of `input`.
    ///
    /// Never fails; malformed input degrades to [`CssItem::Raw`]. Serializing
    /// the items back yields `input` unchanged.
    pub fn parse(input: &'a str) -> Self {
        let bytes = input.as_bytes();
        let mut items = Vec::new();
        let mut pos = 0;

        while pos < bytes.len() {
            let trivia_end = skip_trivia(bytes, pos);
            if trivia_end > pos {
                items.push(CssItem::Trivia(&input[pos..trivia_end]));
                pos = trivia_end;
                continue;
            }

            let (item, next) = parse_item(input, pos);
            items.push(item);
            pos = next;
        }

        Self { items }
    }
}

impl fmt::Display for Stylesheet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}

fn parse_item(input: &str, start: usize) -> (CssItem<'_>, usize) {
    let bytes = input.as_bytes();
    let mut i = start;
    let mut parens = 0usize;

    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => {
                i = end_of_string(bytes, i);
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = end_of_comment(bytes, i);
                continue;
            }
            b'(' => parens += 1,
            b')' => parens = parens.saturating_sub(1),
            b';' if parens == 0 => {
                return (CssItem::Statement(&input[start..=i]), i + 1);
            }
            b'{' if parens == 0 => {
                let prelude = &input[start..i];
                return match matching_brace(bytes, i) {
                    Some(close) => (
                        CssItem::Block(CssBlock {
                            prelude,
                            body: &input[i + 1..close],
                            closed: true,
                        }),
                        close + 1,
                    ),
                    None => (
                        CssItem::Block(CssBlock {
                            prelude,
                            body: &input[i + 1..],
                            closed: false,
                        }),
                        input.len(),
                    ),
                };
            }
            b'}' if parens == 0 => {
                return (CssItem::Raw(&input[start..=i]), i + 1);
            }
            _ => {}
        }
        i += 1;
    }

    (CssItem::Raw(&input[start..]), input.len())
}

fn skip_trivia(bytes: &[u8], mut i: usize) -> usize {
    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if bytes[i..].starts_with(b"/*") {
            i = end_of_comment(bytes, i);
        } else {
            return i;
        }
    }
}

/// Index just past the `*/` closing the comment that starts at `start`.
fn end_of_comment(bytes: &[u8], start: usize) -> usize {
    bytes[start + 2..]
        .windows(2)
        .position(|w| w == b"*/")
        .map(|offset| start + 2 + offset + 2)
        .unwrap_or(bytes.len())
}

/// Index just past the quote closing the string that starts at `start`.
fn end_of_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            c if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Index of the `}` matching the `{` at `open`.
fn matching_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => {
                i = end_of_string(bytes, i);
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = end_of_comment(bytes, i);
                continue;
            }
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

pub(crate) fn at_keyword(text: &str) -> Option<String> {
    let rest = text.trim_start().strip_prefix('@')?;
    let name: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    Some(name.to_ascii_lowercase())
}

/// Split a selector list on top-level commas.
///
/// Commas inside parentheses, brackets or strings (`:is(a, b)`,
/// `[title="a,b"]`) do not split.
pub fn split_selector_list(list: &str) -> Vec<&str> {
    let bytes = list.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => {
                i = end_of_string(bytes, i);
                continue;
            }
            b'(' | b'[' => depth += 1,
            b')' | b']' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                parts.push(&list[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    parts.push(&list[start..]);
    parts
}

#[cfg(test)]
#[path = "stylesheet_tests.rs"]
mod tests;
