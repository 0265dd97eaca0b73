//! Configuration loader.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a TOML file, or defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();

        for cap in ENV_VAR.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.restyle`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.fetcher.max_stylesheets, 5);
    }

    #[test]
    fn test_load_basic_config() {
        let content = r#"
            [server]
            host = "0.0.0.0"
            port = 8088

            [fetcher]
            timeout_seconds = 5
            max_stylesheets = 3
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.fetcher.timeout_seconds, 5);
        assert_eq!(config.fetcher.max_stylesheets, 3);
        assert_eq!(config.fetcher.stylesheet_timeout_seconds, 10);
    }

    #[test]
    fn test_load_render_section() {
        let content = r#"
            [render]
            container_class = "preview-root"
            max_path_depth = 4
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.render.container_class, "preview-root");
        assert_eq!(config.render.max_path_depth, Some(4));
        assert_eq!(config.render.reserved_root_id, "restyle-root");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[proxy]").unwrap();
        writeln!(file, "cache_max_age_seconds = 60").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.proxy.cache_max_age_seconds, 60);
        assert_eq!(config.proxy.allow_origin, "*");
    }

    #[test]
    fn test_shipped_default_config() {
        let config = ConfigLoader::load_str(include_str!("../../../config/default.toml")).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.render.container_class, "html-preview");
        assert!(crate::ConfigValidator::validate(&config).is_valid());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/restyle.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = ConfigLoader::load_or_default(Path::new("/nonexistent/path/restyle.toml"))
            .unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(result.is_err());
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: This test runs in isolation and sets a unique test-only env var
        unsafe {
            std::env::set_var("RESTYLE_TEST_UA", "TestAgent/1.0");
        }
        let content = "[fetcher]\nuser_agent = \"${RESTYLE_TEST_UA}\"";
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.fetcher.user_agent, "TestAgent/1.0");
        unsafe {
            std::env::remove_var("RESTYLE_TEST_UA");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${RESTYLE_NONEXISTENT_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = ConfigLoader::expand_path("~/logs");
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("/logs"));
    }

    #[test]
    fn test_expand_path_no_tilde() {
        assert_eq!(ConfigLoader::expand_path("/var/log"), "/var/log");
    }
}
