//! Selector engine for the render tree.
//!
//! Supported: type and universal selectors, `#id`, `.class`, attribute
//! selectors (`=`, `~=`, `|=`, `^=`, `$=`, `*=`, optional `i` flag),
//! `:first-child`, `:last-child`, `:only-child`, `:nth-child(an+b)`,
//! `:not(...)` over compound selectors, `:scope`, the four combinators and
//! comma-separated lists.

use restyle_protocols::SelectorError;

use crate::tree::{NodeId, RenderTree};

/// A parsed, comma-separated selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    selectors: Vec<ComplexSelector>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ComplexSelector {
    /// Compounds left to right; `combinators[i]` joins `compounds[i]` and
    /// `compounds[i + 1]`.
    compounds: Vec<Compound>,
    combinators: Vec<Combinator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
    NextSibling,
    SubsequentSibling,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    simple: Vec<Simple>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Simple {
    Id(String),
    Class(String),
    Attribute(AttributeSelector),
    FirstChild,
    LastChild,
    OnlyChild,
    NthChild { a: i64, b: i64 },
    Not(Vec<Compound>),
    Scope,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttributeSelector {
    name: String,
    matcher: Option<(AttributeOp, String)>,
    case_insensitive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttributeOp {
    Equals,
    Includes,
    DashMatch,
    Prefix,
    Suffix,
    Substring,
}

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        if input.trim().is_empty() {
            return Err(SelectorError::Empty);
        }
        let mut parser = Parser {
            chars: input.chars().collect(),
            pos: 0,
        };
        let selectors = parser.parse_list()?;
        Ok(Self { selectors })
    }

    /// Whether any selector's subject carries `:scope`.
    pub fn targets_scope(&self) -> bool {
        self.selectors.iter().any(|selector| {
            selector
                .compounds
                .last()
                .is_some_and(|c| c.simple.contains(&Simple::Scope))
        })
    }

    /// Whether `node` matches, with `scope` as the `:scope` element.
    pub fn matches(&self, tree: &RenderTree, node: NodeId, scope: NodeId) -> bool {
        tree.element(node).is_some()
            && self
                .selectors
                .iter()
                .any(|selector| selector.matches(tree, node, scope))
    }
}

impl ComplexSelector {
    fn matches(&self, tree: &RenderTree, node: NodeId, scope: NodeId) -> bool {
        self.matches_at(tree, self.compounds.len() - 1, node, scope)
    }

    fn matches_at(&self, tree: &RenderTree, index: usize, node: NodeId, scope: NodeId) -> bool {
        if !self.compounds[index].matches(tree, node, scope) {
            return false;
        }
        if index == 0 {
            return true;
        }

        let next = index - 1;
        match self.combinators[next] {
            Combinator::Child => tree
                .parent_element(node)
                .is_some_and(|parent| self.matches_at(tree, next, parent, scope)),
            Combinator::Descendant => {
                let mut current = tree.parent_element(node);
                while let Some(ancestor) = current {
                    if self.matches_at(tree, next, ancestor, scope) {
                        return true;
                    }
                    current = tree.parent_element(ancestor);
                }
                false
            }
            Combinator::NextSibling => previous_siblings(tree, node)
                .first()
                .is_some_and(|sibling| self.matches_at(tree, next, *sibling, scope)),
            Combinator::SubsequentSibling => previous_siblings(tree, node)
                .iter()
                .any(|sibling| self.matches_at(tree, next, *sibling, scope)),
        }
    }
}

/// Element siblings before `node`, nearest first.
fn previous_siblings(tree: &RenderTree, node: NodeId) -> Vec<NodeId> {
    if tree.parent(node).is_none() {
        return Vec::new();
    }
    let siblings = tree.element_siblings(node);
    let index = siblings.iter().position(|s| *s == node).unwrap_or(0);
    siblings[..index].iter().rev().copied().collect()
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.simple.is_empty()
    }

    fn matches(&self, tree: &RenderTree, node: NodeId, scope: NodeId) -> bool {
        let Some(element) = tree.element(node) else {
            return false;
        };
        if let Some(tag) = &self.tag {
            if !element.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        self.simple.iter().all(|simple| match simple {
            Simple::Id(id) => element.attr("id") == Some(id.as_str()),
            Simple::Class(class) => element.has_class(class),
            Simple::Attribute(attr) => attr.matches(element.attr(&attr.name)),
            Simple::FirstChild => child_index(tree, node).0 == 1,
            Simple::LastChild => {
                let (index, count) = child_index(tree, node);
                index == count
            }
            Simple::OnlyChild => child_index(tree, node).1 == 1,
            Simple::NthChild { a, b } => nth_matches(*a, *b, child_index(tree, node).0 as i64),
            Simple::Not(compounds) => !compounds.iter().any(|c| c.matches(tree, node, scope)),
            Simple::Scope => node == scope,
        })
    }
}

/// One-based position among element siblings, and the sibling count.
fn child_index(tree: &RenderTree, node: NodeId) -> (usize, usize) {
    let siblings = tree.element_siblings(node);
    let index = siblings.iter().position(|s| *s == node).unwrap_or(0);
    (index + 1, siblings.len())
}

fn nth_matches(a: i64, b: i64, index: i64) -> bool {
    if a == 0 {
        return index == b;
    }
    // Offsets beyond the i64 range match nothing.
    let Some(diff) = index.checked_sub(b) else {
        return false;
    };
    match (diff.checked_rem(a), diff.checked_div(a)) {
        (Some(0), Some(steps)) => steps >= 0,
        _ => false,
    }
}

impl AttributeSelector {
    fn matches(&self, value: Option<&str>) -> bool {
        let Some(value) = value else {
            return false;
        };
        let Some((op, expected)) = &self.matcher else {
            return true;
        };
        let (value, expected) = if self.case_insensitive {
            (value.to_lowercase(), expected.to_lowercase())
        } else {
            (value.to_string(), expected.clone())
        };
        match op {
            AttributeOp::Equals => value == expected,
            AttributeOp::Includes => {
                !expected.is_empty()
                    && !expected.contains(char::is_whitespace)
                    && value.split_whitespace().any(|token| token == expected)
            }
            AttributeOp::DashMatch => {
                value == expected || value.starts_with(&format!("{}-", expected))
            }
            AttributeOp::Prefix => !expected.is_empty() && value.starts_with(&expected),
            AttributeOp::Suffix => !expected.is_empty() && value.ends_with(&expected),
            AttributeOp::Substring => !expected.is_empty() && value.contains(&expected),
        }
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn unexpected(&self) -> SelectorError {
        match self.peek() {
            Some(found) => SelectorError::Unexpected {
                position: self.pos,
                found,
            },
            None => SelectorError::UnexpectedEnd,
        }
    }

    fn expect(&mut self, c: char) -> Result<(), SelectorError> {
        if self.peek() == Some(c) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    /// Skip whitespace, returning whether any was skipped.
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn parse_list(&mut self) -> Result<Vec<ComplexSelector>, SelectorError> {
        let mut list = Vec::new();
        loop {
            self.skip_whitespace();
            list.push(self.parse_complex()?);
            self.skip_whitespace();
            match self.peek() {
                None => return Ok(list),
                Some(',') => self.pos += 1,
                Some(_) => return Err(self.unexpected()),
            }
        }
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector, SelectorError> {
        let mut compounds = vec![self.parse_compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_whitespace = self.skip_whitespace();
            let combinator = match self.peek() {
                Some('>') => Combinator::Child,
                Some('+') => Combinator::NextSibling,
                Some('~') => Combinator::SubsequentSibling,
                None | Some(',') => break,
                Some(_) if had_whitespace => Combinator::Descendant,
                Some(_) => return Err(self.unexpected()),
            };
            if combinator != Combinator::Descendant {
                self.pos += 1;
                self.skip_whitespace();
            }
            combinators.push(combinator);
            compounds.push(self.parse_compound()?);
        }

        Ok(ComplexSelector {
            compounds,
            combinators,
        })
    }

    fn parse_compound(&mut self) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();
        let mut universal = false;

        match self.peek() {
            Some('*') => {
                self.pos += 1;
                universal = true;
            }
            Some(c) if is_ident_start(c) => {
                compound.tag = Some(self.parse_ident()?.to_ascii_lowercase());
            }
            _ => {}
        }

        loop {
            let simple = match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    Simple::Id(self.parse_ident()?)
                }
                Some('.') => {
                    self.pos += 1;
                    Simple::Class(self.parse_ident()?)
                }
                Some('[') => self.parse_attribute()?,
                Some(':') => self.parse_pseudo()?,
                _ => break,
            };
            compound.simple.push(simple);
        }

        if compound.is_empty() && !universal {
            return Err(self.unexpected());
        }
        Ok(compound)
    }

    fn parse_ident(&mut self) -> Result<String, SelectorError> {
        let mut ident = String::new();
        if self.peek() == Some('-') {
            ident.push('-');
            self.pos += 1;
        }
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.pos += 1;
                let escaped = self.peek().ok_or(SelectorError::UnexpectedEnd)?;
                ident.push(escaped);
                self.pos += 1;
            } else if is_ident_char(c) {
                ident.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        if ident.is_empty() || ident == "-" {
            return Err(self.unexpected());
        }
        Ok(ident)
    }

    fn parse_attribute(&mut self) -> Result<Simple, SelectorError> {
        self.expect('[')?;
        self.skip_whitespace();
        let name = self.parse_ident()?.to_ascii_lowercase();
        self.skip_whitespace();

        let op = match self.peek() {
            Some(']') => {
                self.pos += 1;
                return Ok(Simple::Attribute(AttributeSelector {
                    name,
                    matcher: None,
                    case_insensitive: false,
                }));
            }
            Some('=') => AttributeOp::Equals,
            Some('~') => AttributeOp::Includes,
            Some('|') => AttributeOp::DashMatch,
            Some('^') => AttributeOp::Prefix,
            Some('$') => AttributeOp::Suffix,
            Some('*') => AttributeOp::Substring,
            _ => return Err(self.unexpected()),
        };
        self.pos += 1;
        if op != AttributeOp::Equals {
            self.expect('=')?;
        }
        self.skip_whitespace();

        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => self.parse_string(quote)?,
            _ => self.parse_ident()?,
        };
        self.skip_whitespace();

        let mut case_insensitive = false;
        if let Some(flag @ ('i' | 'I' | 's' | 'S')) = self.peek() {
            case_insensitive = flag.eq_ignore_ascii_case(&'i');
            self.pos += 1;
            self.skip_whitespace();
        }
        self.expect(']')?;

        Ok(Simple::Attribute(AttributeSelector {
            name,
            matcher: Some((op, value)),
            case_insensitive,
        }))
    }

    fn parse_string(&mut self, quote: char) -> Result<String, SelectorError> {
        self.pos += 1;
        let mut value = String::new();
        loop {
            match self.peek() {
                None => return Err(SelectorError::UnexpectedEnd),
                Some('\\') => {
                    self.pos += 1;
                    let escaped = self.peek().ok_or(SelectorError::UnexpectedEnd)?;
                    value.push(escaped);
                }
                Some(c) if c == quote => {
                    self.pos += 1;
                    return Ok(value);
                }
                Some(c) => value.push(c),
            }
            self.pos += 1;
        }
    }

    fn parse_pseudo(&mut self) -> Result<Simple, SelectorError> {
        self.expect(':')?;
        if self.peek() == Some(':') {
            self.pos += 1;
            let name = self.parse_ident()?;
            return Err(SelectorError::Unsupported(format!("::{}", name)));
        }
        let name = self.parse_ident()?.to_ascii_lowercase();

        if self.peek() != Some('(') {
            return match name.as_str() {
                "first-child" => Ok(Simple::FirstChild),
                "last-child" => Ok(Simple::LastChild),
                "only-child" => Ok(Simple::OnlyChild),
                "scope" => Ok(Simple::Scope),
                _ => Err(SelectorError::Unsupported(format!(":{}", name))),
            };
        }

        self.pos += 1;
        match name.as_str() {
            "nth-child" => {
                let start = self.pos;
                while self.peek().is_some_and(|c| c != ')') {
                    self.pos += 1;
                }
                let argument: String = self.chars[start..self.pos].iter().collect();
                self.expect(')')?;
                let (a, b) = parse_nth(&argument).ok_or_else(|| {
                    SelectorError::Unsupported(format!(":nth-child({})", argument.trim()))
                })?;
                Ok(Simple::NthChild { a, b })
            }
            "not" => {
                let mut compounds = Vec::new();
                loop {
                    self.skip_whitespace();
                    compounds.push(self.parse_compound()?);
                    self.skip_whitespace();
                    match self.peek() {
                        Some(',') => self.pos += 1,
                        Some(')') => {
                            self.pos += 1;
                            break;
                        }
                        _ => return Err(self.unexpected()),
                    }
                }
                Ok(Simple::Not(compounds))
            }
            _ => Err(SelectorError::Unsupported(format!(":{}()", name))),
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '-' || c == '\\' || !c.is_ascii()
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || !c.is_ascii()
}

/// Parse an `an+b` expression, `odd` or `even`.
fn parse_nth(argument: &str) -> Option<(i64, i64)> {
    let compact: String = argument
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    match compact.as_str() {
        "odd" => return Some((2, 1)),
        "even" => return Some((2, 0)),
        "" => return None,
        _ => {}
    }
    match compact.split_once('n') {
        Some((a, b)) => {
            let a = match a {
                "" | "+" => 1,
                "-" => -1,
                other => other.parse().ok()?,
            };
            let b = if b.is_empty() { 0 } else { b.parse().ok()? };
            Some((a, b))
        }
        None => Some((0, compact.parse().ok()?)),
    }
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
