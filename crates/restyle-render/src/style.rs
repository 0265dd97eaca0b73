//! Inline `style` attribute editing.
//!
//! Property names may arrive camelCase (`backgroundColor`) or kebab-case
//! (`background-color`); both are stored kebab-case.

use restyle_protocols::ApplyError;

use crate::tree::ElementData;

/// Parsed inline declarations, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    pub fn parse(text: &str) -> Self {
        let declarations = split_declarations(text)
            .into_iter()
            .filter_map(|declaration| {
                let (name, value) = declaration.split_once(':')?;
                let name = name.trim();
                let value = value.trim();
                if name.is_empty() || value.is_empty() {
                    return None;
                }
                Some((normalize_name(name), value.to_string()))
            })
            .collect();
        Self { declarations }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    pub fn set(&mut self, property: &str, value: &str) {
        match self.declarations.iter_mut().find(|(name, _)| name == property) {
            Some(entry) => entry.1 = value.to_string(),
            None => self
                .declarations
                .push((property.to_string(), value.to_string())),
        }
    }

    pub fn remove(&mut self, property: &str) -> bool {
        let before = self.declarations.len();
        self.declarations.retain(|(name, _)| name != property);
        self.declarations.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Serialize as `a: b; c: d;`.
    pub fn to_css(&self) -> String {
        self.declarations
            .iter()
            .map(|(name, value)| format!("{}: {};", name, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Set (or, with an empty value, remove) one property on an element.
pub fn set_style_property(
    element: &mut ElementData,
    property: &str,
    value: &str,
) -> Result<(), ApplyError> {
    let name = css_property_name(property)?;
    let value = value.trim();
    if value.contains([';', '{', '}']) {
        return Err(ApplyError::InvalidStyle {
            property: property.to_string(),
            reason: "value may not contain ';', '{' or '}'".to_string(),
        });
    }

    let mut style = InlineStyle::parse(element.attr("style").unwrap_or_default());
    if value.is_empty() {
        style.remove(&name);
    } else {
        style.set(&name, value);
    }

    if style.is_empty() {
        element.remove_attr("style");
    } else {
        element.set_attr("style", style.to_css());
    }
    Ok(())
}

/// Value of one inline property.
pub fn style_property(element: &ElementData, property: &str) -> Option<String> {
    let name = css_property_name(property).ok()?;
    InlineStyle::parse(element.attr("style")?)
        .get(&name)
        .map(str::to_string)
}

/// Canonical kebab-case property name.
///
/// `cssFloat` maps to `float`, vendor prefixes (`WebkitTransform`,
/// `msTransform`) gain a leading dash and custom properties (`--x`) are
/// kept verbatim.
pub fn css_property_name(property: &str) -> Result<String, ApplyError> {
    let property = property.trim();
    let invalid = |reason: &str| ApplyError::InvalidStyle {
        property: property.to_string(),
        reason: reason.to_string(),
    };

    if let Some(custom) = property.strip_prefix("--") {
        if !custom.is_empty()
            && custom
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Ok(property.to_string());
        }
        return Err(invalid("not a custom property name"));
    }

    let name = normalize_name(property);
    let body = name.strip_prefix('-').unwrap_or(&name);
    let valid = body.starts_with(|c: char| c.is_ascii_lowercase())
        && body
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(name)
    } else {
        Err(invalid("not a CSS property name"))
    }
}

fn normalize_name(name: &str) -> String {
    if name.starts_with("--") {
        return name.to_string();
    }
    if name == "cssFloat" {
        return "float".to_string();
    }
    if name.contains('-') || !name.chars().any(|c| c.is_ascii_uppercase()) {
        return name.to_ascii_lowercase();
    }

    let mut out = String::with_capacity(name.len() + 4);
    if name.starts_with("ms") && name[2..].starts_with(|c: char| c.is_ascii_uppercase()) {
        out.push('-');
    }
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn split_declarations(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}
