//! Assistant turn errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssistantError {
    #[error("A reply is still pending")]
    Busy,

    #[error("Prompt is empty")]
    EmptyPrompt,

    #[error("No turn is pending")]
    NotPending,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assistant_error_display() {
        assert!(AssistantError::Busy.to_string().contains("pending"));
        assert!(AssistantError::EmptyPrompt.to_string().contains("empty"));
    }
}
