//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Convert the first error into a [`ConfigError`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(ConfigError::InvalidValue {
                field: err.path,
                message: err.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_fetcher(config, &mut result);
        Self::validate_render(config, &mut result);

        result
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port must be non-zero"));
        }
        if config.server.host.trim().is_empty() {
            result.add_error(ValidationError::new("server.host", "Host must not be empty"));
        }
    }

    fn validate_fetcher(config: &Config, result: &mut ValidationResult) {
        let fetcher = &config.fetcher;

        if fetcher.user_agent.trim().is_empty() {
            result.add_error(ValidationError::new(
                "fetcher.user_agent",
                "User agent must not be empty",
            ));
        }
        if fetcher.timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "fetcher.timeout_seconds",
                "Timeout must be greater than 0",
            ));
        }
        if fetcher.stylesheet_timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "fetcher.stylesheet_timeout_seconds",
                "Timeout must be greater than 0",
            ));
        }
        if fetcher.max_stylesheets == 0 {
            result.add_error(ValidationError::new(
                "fetcher.max_stylesheets",
                "At least one stylesheet must be allowed",
            ));
        } else if fetcher.max_stylesheets > 20 {
            result.add_warning(ValidationWarning::new(
                "fetcher.max_stylesheets",
                "Fetching many stylesheets slows down every proxy request",
            ));
        }
    }

    fn validate_render(config: &Config, result: &mut ValidationResult) {
        let render = &config.render;

        if !is_css_identifier(&render.container_class) {
            result.add_error(ValidationError::new(
                "render.container_class",
                format!("'{}' is not a valid CSS class name", render.container_class),
            ));
        }
        if render.reserved_root_id.trim().is_empty() {
            result.add_error(ValidationError::new(
                "render.reserved_root_id",
                "Reserved root id must not be empty",
            ));
        }
        if render.max_path_depth == Some(0) {
            result.add_error(ValidationError::new(
                "render.max_path_depth",
                "Path depth must be at least 1",
            ));
        }
    }
}

fn is_css_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '-' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
