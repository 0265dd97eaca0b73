//! Selector parsing errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("Empty selector")]
    Empty,

    #[error("Unexpected {found:?} at position {position}")]
    Unexpected { position: usize, found: char },

    #[error("Unexpected end of selector")]
    UnexpectedEnd,

    #[error("Unsupported selector feature: {0}")]
    Unsupported(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_display() {
        let err = SelectorError::Unexpected { position: 3, found: '!' };
        assert!(err.to_string().contains("'!'"));
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_unsupported_display() {
        let err = SelectorError::Unsupported(":hover".to_string());
        assert!(err.to_string().contains(":hover"));
    }
}
