//! Instruction language consumed by the mutation engine.
//!
//! Instructions come from a language model or from canned UI rules and are
//! treated as untrusted: malformed entries are dropped one by one instead of
//! rejecting the whole set.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// A batch of CSS rules and DOM actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstructionSet {
    /// Style rules, applied first and in order.
    #[serde(default)]
    pub css: Vec<CssInstruction>,

    /// DOM actions, applied after the style rules and in order.
    #[serde(default)]
    pub actions: Vec<ActionInstruction>,

    /// Short description of the change for the end user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl InstructionSet {
    /// Build an instruction set from an untrusted JSON object.
    ///
    /// Non-array `css`/`actions` fields are treated as empty, and entries
    /// that do not fit the instruction shape are logged and skipped.
    pub fn from_value(value: &Value) -> Self {
        let css = array_entries(value.get("css"))
            .iter()
            .filter_map(|entry| parse_entry::<CssInstruction>(entry, "css"))
            .collect();
        let actions = array_entries(value.get("actions"))
            .iter()
            .filter_map(|entry| parse_entry::<ActionInstruction>(entry, "action"))
            .collect();
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);

        Self {
            css,
            actions,
            message,
        }
    }

    /// Whether the set contains no instruction at all.
    pub fn is_empty(&self) -> bool {
        self.css.is_empty() && self.actions.is_empty()
    }

    /// Total number of instructions.
    pub fn len(&self) -> usize {
        self.css.len() + self.actions.len()
    }

    pub fn with_css(mut self, instruction: CssInstruction) -> Self {
        self.css.push(instruction);
        self
    }

    pub fn with_action(mut self, instruction: ActionInstruction) -> Self {
        self.actions.push(instruction);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

fn array_entries(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn parse_entry<T: serde::de::DeserializeOwned>(entry: &Value, kind: &str) -> Option<T> {
    match T::deserialize(entry) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!(kind, error = %e, "Skipping malformed instruction");
            None
        }
    }
}

/// Apply a style map to every node matching a selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CssInstruction {
    pub selector: String,

    /// Property to value, in the order given. Properties may be camelCase
    /// or kebab-case; a later entry for the same CSS property wins.
    #[serde(default)]
    pub styles: Map<String, Value>,
}

impl CssInstruction {
    pub fn new<K, V, I>(selector: impl Into<String>, styles: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            selector: selector.into(),
            styles: styles
                .into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
        }
    }

    /// Style entries with their value rendered as CSS text.
    ///
    /// Numbers are stringified; anything other than a string or number
    /// yields `None`.
    pub fn style_entries(&self) -> impl Iterator<Item = (&str, Option<String>)> {
        self.styles.iter().map(|(property, value)| {
            let text = match value {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            };
            (property.as_str(), text)
        })
    }
}

/// DOM action kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Hide,
    Show,
    Move,
    Text,
    Remove,
    /// Any type string outside the supported set.
    #[serde(other)]
    Unsupported,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Hide => "hide",
            ActionKind::Show => "show",
            ActionKind::Move => "move",
            ActionKind::Text => "text",
            ActionKind::Remove => "remove",
            ActionKind::Unsupported => "unsupported",
        }
    }
}

/// Where a moved node lands relative to its target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertPosition {
    Before,
    After,
    /// Appended as the last child. Unknown positions fall back here.
    #[default]
    #[serde(other)]
    Inside,
}

/// A DOM action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionInstruction {
    #[serde(rename = "type")]
    pub kind: ActionKind,

    #[serde(default)]
    pub selector: String,

    /// Destination selector for `move`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<InsertPosition>,

    /// New text for `text`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ActionInstruction {
    pub fn new(kind: ActionKind, selector: impl Into<String>) -> Self {
        Self {
            kind,
            selector: selector.into(),
            target: None,
            position: None,
            value: None,
        }
    }

    pub fn hide(selector: impl Into<String>) -> Self {
        Self::new(ActionKind::Hide, selector)
    }

    pub fn show(selector: impl Into<String>) -> Self {
        Self::new(ActionKind::Show, selector)
    }

    pub fn remove(selector: impl Into<String>) -> Self {
        Self::new(ActionKind::Remove, selector)
    }

    pub fn text(selector: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::new(ActionKind::Text, selector)
        }
    }

    pub fn move_to(
        selector: impl Into<String>,
        target: impl Into<String>,
        position: InsertPosition,
    ) -> Self {
        Self {
            target: Some(target.into()),
            position: Some(position),
            ..Self::new(ActionKind::Move, selector)
        }
    }
}

#[cfg(test)]
#[path = "instruction_tests.rs"]
mod tests;
