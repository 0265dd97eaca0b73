//! Configuration schema definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::loader::ConfigLoader;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub fetcher: FetcherConfig,

    #[serde(default)]
    pub proxy: ProxyConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Outbound fetch configuration.
///
/// The header defaults mimic a desktop Chrome navigation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_accept")]
    pub accept: String,

    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Timeout for the primary page fetch.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Timeout for each linked stylesheet fetch.
    #[serde(default = "default_stylesheet_timeout_seconds")]
    pub stylesheet_timeout_seconds: u64,

    #[serde(default = "default_max_stylesheets")]
    pub max_stylesheets: usize,

    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            accept: default_accept(),
            accept_language: default_accept_language(),
            timeout_seconds: default_timeout_seconds(),
            stylesheet_timeout_seconds: default_stylesheet_timeout_seconds(),
            max_stylesheets: default_max_stylesheets(),
            max_redirects: default_max_redirects(),
        }
    }
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_accept() -> String {
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8".to_string()
}

fn default_accept_language() -> String {
    "en-US,en;q=0.9".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_stylesheet_timeout_seconds() -> u64 {
    10
}

fn default_max_stylesheets() -> usize {
    5
}

fn default_max_redirects() -> usize {
    10
}

/// Proxy response configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// `max-age` of the public cache hint on successful responses.
    #[serde(default = "default_cache_max_age")]
    pub cache_max_age_seconds: u64,

    #[serde(default = "default_allow_origin")]
    pub allow_origin: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            cache_max_age_seconds: default_cache_max_age(),
            allow_origin: default_allow_origin(),
        }
    }
}

fn default_cache_max_age() -> u64 {
    300
}

fn default_allow_origin() -> String {
    "*".to_string()
}

/// Render layer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Class of the container every scoped selector is nested under.
    #[serde(default = "default_container_class")]
    pub container_class: String,

    /// Id of the control-panel subtree that selection and mutation skip.
    #[serde(default = "default_reserved_root_id")]
    pub reserved_root_id: String,

    /// Class tokens with this prefix never appear in selection paths.
    #[serde(default = "default_reserved_class_prefix")]
    pub reserved_class_prefix: String,

    /// Maximum number of segments in a selection path. Unbounded when unset.
    #[serde(default)]
    pub max_path_depth: Option<usize>,
}

impl RenderConfig {
    /// The container as a class selector, e.g. `.html-preview`.
    pub fn container_selector(&self) -> String {
        format!(".{}", self.container_class)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            container_class: default_container_class(),
            reserved_root_id: default_reserved_root_id(),
            reserved_class_prefix: default_reserved_class_prefix(),
            max_path_depth: None,
        }
    }
}

fn default_container_class() -> String {
    "html-preview".to_string()
}

fn default_reserved_root_id() -> String {
    "restyle-root".to_string()
}

fn default_reserved_class_prefix() -> String {
    "restyle".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to also write daily-rotated log files.
    #[serde(default = "default_file_logging")]
    pub file: bool,

    /// Log directory. Defaults to `~/.restyle/logs`.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl LoggingConfig {
    /// Resolved log directory.
    pub fn directory(&self) -> PathBuf {
        match &self.directory {
            Some(dir) => PathBuf::from(ConfigLoader::expand_path(&dir.to_string_lossy())),
            None => restyle_dir().join("logs"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_file_logging(),
            directory: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_file_logging() -> bool {
    true
}

/// Restyle home directory (`~/.restyle`).
pub fn restyle_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".restyle")
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
