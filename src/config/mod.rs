//! Configuration management for the smwgeo resolver
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::parser::html::RDF_MIME_TYPE;
use crate::utils::error::ConfigError;
use crate::utils::validate_format_url;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Resolver configuration
    pub resolver: ResolverConfig,

    /// HTTP fetcher configuration
    pub fetcher: FetcherConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// What to look up and how
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Page URL template; `%s` is replaced by the normalized query
    pub format_url: String,

    /// Attribute names to search, in priority order
    pub attributes: Vec<String>,

    /// Relation names to follow, in priority order
    pub relations: Vec<String>,

    /// Reserved; accepted and reported but not consulted
    pub prefer_semantic: bool,

    /// MIME type of the RDF alternate link
    pub rdf_mime_type: String,

    /// Maximum relation depth; unbounded when absent
    pub max_depth: Option<usize>,
}

/// HTTP fetcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// User agent string
    pub user_agent: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Rate limit (requests per second), 0 disables limiting
    pub rate_limit: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            format_url: String::from("http://localhost/wiki/%s"),
            attributes: vec![String::from("Coordinates")],
            relations: vec![String::from("Located in")],
            prefer_semantic: false,
            rdf_mime_type: String::from(RDF_MIME_TYPE),
            max_depth: None,
        }
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("smwgeo/{}", env!("CARGO_PKG_VERSION")),
            request_timeout_secs: 30,
            rate_limit: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

/// Split a comma-separated list, dropping empty entries
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let format_url =
            std::env::var("SMWGEO_FORMAT_URL").unwrap_or(defaults.resolver.format_url);

        let attributes = std::env::var("SMWGEO_ATTRIBUTES")
            .map(|v| split_list(&v))
            .unwrap_or(defaults.resolver.attributes);

        let relations = std::env::var("SMWGEO_RELATIONS")
            .map(|v| split_list(&v))
            .unwrap_or(defaults.resolver.relations);

        let prefer_semantic = std::env::var("SMWGEO_PREFER_SEMANTIC")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        let rdf_mime_type =
            std::env::var("SMWGEO_RDF_MIME_TYPE").unwrap_or(defaults.resolver.rdf_mime_type);

        let max_depth = match std::env::var("SMWGEO_MAX_DEPTH") {
            Ok(v) => Some(
                v.parse::<usize>()
                    .with_context(|| format!("Invalid SMWGEO_MAX_DEPTH: {v}"))?,
            ),
            Err(_) => None,
        };

        let user_agent =
            std::env::var("SMWGEO_USER_AGENT").unwrap_or(defaults.fetcher.user_agent);

        let request_timeout_secs = std::env::var("SMWGEO_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.fetcher.request_timeout_secs);

        let rate_limit = std::env::var("SMWGEO_RATE_LIMIT")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(defaults.fetcher.rate_limit);

        let log_level = std::env::var("SMWGEO_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));

        let log_format =
            std::env::var("SMWGEO_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            resolver: ResolverConfig {
                format_url,
                attributes,
                relations,
                prefer_semantic,
                rdf_mime_type,
                max_depth,
            },
            fetcher: FetcherConfig {
                user_agent,
                request_timeout_secs,
                rate_limit,
            },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidFormatUrl` for a bad page URL template
    /// and `ConfigError::Invalid` for other out-of-range values.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        validate_format_url(&self.resolver.format_url)?;

        if self.resolver.rdf_mime_type.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "rdf_mime_type must not be empty".to_string(),
            ));
        }

        if self.fetcher.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl FetcherConfig {
    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_format_url() {
        let mut config = Config::default();
        config.resolver.format_url = String::from("http://localhost/wiki/");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidFormatUrl { found: 0, .. })
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.fetcher.request_timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_empty_mime_type_rejected() {
        let mut config = Config::default();
        config.resolver.rdf_mime_type = String::from("  ");
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_request_timeout_conversion() {
        let config = Config::default();
        assert_eq!(config.fetcher.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [resolver]
            format_url = "https://wiki.example.org/wiki/%s"
            relations = ["Located in", "Part of"]
            "#,
        )
        .unwrap();

        assert_eq!(config.resolver.format_url, "https://wiki.example.org/wiki/%s");
        assert_eq!(config.resolver.attributes, vec!["Coordinates".to_string()]);
        assert_eq!(config.resolver.relations.len(), 2);
        assert_eq!(config.resolver.max_depth, None);
        assert_eq!(config.fetcher.request_timeout_secs, 30);
    }

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list("Coordinates, Location ,,Geo"),
            vec!["Coordinates", "Location", "Geo"]
        );
    }
}
