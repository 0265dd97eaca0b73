//! Render layer errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Page failed to load: {0}")]
    PageFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_failed_display() {
        let err = RenderError::PageFailed("Failed to fetch: 404".to_string());
        assert!(err.to_string().contains("404"));
    }
}
