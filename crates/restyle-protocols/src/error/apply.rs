//! Instruction application failures.
//!
//! These are recorded in an application report and logged; they never abort
//! a batch.

use thiserror::Error;

use super::selector::SelectorError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("Invalid selector {selector:?}: {source}")]
    InvalidSelector {
        selector: String,
        #[source]
        source: SelectorError,
    },

    #[error("No elements found for selector: {0}")]
    NoMatch(String),

    #[error("Target not found: {0}")]
    TargetNotFound(String),

    #[error("Move requires a target selector")]
    MissingTarget,

    #[error("Text action requires a value")]
    MissingValue,

    #[error("Invalid style {property:?}: {reason}")]
    InvalidStyle { property: String, reason: String },

    #[error("Unsupported action type")]
    UnsupportedAction,

    #[error("Move target lies inside the moved element")]
    TargetInsideSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_selector_display() {
        let err = ApplyError::InvalidSelector {
            selector: "h1:hover".to_string(),
            source: SelectorError::Unsupported(":hover".to_string()),
        };
        let display = err.to_string();
        assert!(display.contains("h1:hover"));
        assert!(display.contains(":hover"));
    }

    #[test]
    fn test_no_match_display() {
        let err = ApplyError::NoMatch(".missing".to_string());
        assert_eq!(err.to_string(), "No elements found for selector: .missing");
    }

    #[test]
    fn test_invalid_style_display() {
        let err = ApplyError::InvalidStyle {
            property: "col or".to_string(),
            reason: "not a CSS property name".to_string(),
        };
        assert!(err.to_string().contains("col or"));
    }
}
