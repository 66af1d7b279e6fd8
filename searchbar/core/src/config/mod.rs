//! TOML Configuration File Support
//!
//! Centralized configuration loading for the search bar, supporting a TOML
//! configuration file at `~/.config/searchbar/searchbar.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. CLI arguments (via [`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [endpoint]
//! api_base = "https://liveapi.yext.com"
//! api_key = "..."
//! experience_key = "retail-search"
//! experience_version = "PRODUCTION"
//! locale = "en"
//!
//! [typing]
//! type_interval_ms = 65
//! delete_interval_ms = 35
//! hold_ms = 0
//!
//! [autocomplete]
//! verticals = ["products"]
//! max_results = 4
//! image_field = "c_customPhoto"
//!
//! [autocomplete.limits]
//! products = 4
//!
//! [navigation]
//! results_url = "https://search.example.com/"
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::TypingTiming;
use crate::autocomplete::AutocompleteSettings;
use crate::navigation::NavigationConfig;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// Endpoint Configuration
// =============================================================================

/// Connection settings shared by the prompt and autocomplete endpoints
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Scheme and host of the search API (no trailing slash)
    pub api_base: String,
    /// API key sent with every request
    pub api_key: String,
    /// Search experience identifier
    pub experience_key: String,
    /// Experience version label (e.g. `PRODUCTION`, `STAGING`)
    pub experience_version: String,
    /// Locale of the experience
    pub locale: String,
    /// API version date sent as `v`
    pub api_version: String,
    /// Transport-level request timeout
    pub request_timeout: Duration,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            api_base: "https://liveapi.yext.com".to_string(),
            api_key: String::new(),
            experience_key: String::new(),
            experience_version: "PRODUCTION".to_string(),
            locale: "en".to_string(),
            api_version: "20190101".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl EndpointConfig {
    /// Query parameters every Answers request carries
    #[must_use]
    pub fn base_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("v", self.api_version.clone()),
            ("api_key", self.api_key.clone()),
            ("sessionTrackingEnabled", "false".to_string()),
            ("experienceKey", self.experience_key.clone()),
            ("version", self.experience_version.clone()),
            ("locale", self.locale.clone()),
        ]
    }

    /// Full URL of an endpoint under `/v2/accounts/me/answers/`
    #[must_use]
    pub fn answers_url(&self, endpoint: &str) -> String {
        format!(
            "{}/v2/accounts/me/answers/{endpoint}",
            self.api_base.trim_end_matches('/')
        )
    }

    /// Build an HTTP client with this endpoint's timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn http_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Endpoint section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointToml {
    /// Scheme and host of the search API
    pub api_base: Option<String>,
    /// API key
    pub api_key: Option<String>,
    /// Experience key
    pub experience_key: Option<String>,
    /// Experience version label
    pub experience_version: Option<String>,
    /// Locale
    pub locale: Option<String>,
    /// API version date
    pub api_version: Option<String>,
    /// Request timeout in milliseconds
    pub request_timeout_ms: Option<u64>,
}

/// Typing animation section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingToml {
    /// Delay between typed characters in milliseconds
    pub type_interval_ms: Option<u64>,
    /// Delay between deleted characters in milliseconds
    pub delete_interval_ms: Option<u64>,
    /// Hold after a phrase is fully typed, in milliseconds
    pub hold_ms: Option<u64>,
}

/// Autocomplete section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteToml {
    /// Verticals included in the preview, in display order
    pub verticals: Option<Vec<String>>,
    /// Default maximum results per vertical
    pub max_results: Option<usize>,
    /// Per-vertical maximum overrides
    pub limits: Option<HashMap<String, usize>>,
    /// Raw-data field holding the preview image
    pub image_field: Option<String>,
}

/// Navigation section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationToml {
    /// Base URL of the full search results page
    pub results_url: Option<String>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchBarToml {
    /// Endpoint configuration section
    pub endpoint: EndpointToml,
    /// Typing animation section
    pub typing: TypingToml,
    /// Autocomplete section
    pub autocomplete: AutocompleteToml,
    /// Navigation section
    pub navigation: NavigationToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Centralized configuration for the search bar
///
/// Use [`load_config`] to load configuration with proper priority handling.
#[derive(Clone, Debug)]
pub struct SearchBarConfig {
    /// Search API connection settings
    pub endpoint: EndpointConfig,
    /// Placeholder animation timing
    pub typing: TypingTiming,
    /// Preview filtering and limits
    pub autocomplete: AutocompleteSettings,
    /// Full search results page
    pub navigation: NavigationConfig,
    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,
    /// Source of configuration values
    source: ConfigSource,
}

impl Default for SearchBarConfig {
    fn default() -> Self {
        Self {
            endpoint: EndpointConfig::default(),
            typing: TypingTiming::default(),
            autocomplete: AutocompleteSettings::default(),
            navigation: NavigationConfig::default(),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl SearchBarConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Set the configuration source
    pub fn set_source(&mut self, source: ConfigSource) {
        self.source = source;
    }

    /// Reject values the animator or pipeline cannot work with
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.typing.type_interval.is_zero() {
            return Err(ConfigError::ValidationError(
                "typing.type_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.typing.delete_interval.is_zero() {
            return Err(ConfigError::ValidationError(
                "typing.delete_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.autocomplete.verticals.is_empty() {
            return Err(ConfigError::ValidationError(
                "autocomplete.verticals must name at least one vertical".to_string(),
            ));
        }
        if self.autocomplete.max_results == 0 {
            return Err(ConfigError::ValidationError(
                "autocomplete.max_results must be greater than zero".to_string(),
            ));
        }
        if let Some((vertical, _)) = self.autocomplete.limits.iter().find(|(_, &n)| n == 0) {
            return Err(ConfigError::ValidationError(format!(
                "autocomplete.limits.{vertical} must be greater than zero"
            )));
        }
        if self.navigation.results_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "navigation.results_url must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/searchbar/searchbar.toml` or
/// `~/.config/searchbar/searchbar.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("searchbar").join("searchbar.toml"))
}

/// Load configuration from all sources with proper priority
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed.
/// A missing config file is not an error (defaults are used).
pub fn load_config() -> Result<SearchBarConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<SearchBarConfig, ConfigError> {
    let mut config = SearchBarConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: SearchBarToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config, |key| std::env::var(key).ok());

    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut SearchBarConfig, toml: &SearchBarToml) {
    let endpoint = &toml.endpoint;
    if let Some(ref base) = endpoint.api_base {
        config.endpoint.api_base.clone_from(base);
    }
    if let Some(ref key) = endpoint.api_key {
        config.endpoint.api_key.clone_from(key);
    }
    if let Some(ref key) = endpoint.experience_key {
        config.endpoint.experience_key.clone_from(key);
    }
    if let Some(ref version) = endpoint.experience_version {
        config.endpoint.experience_version.clone_from(version);
    }
    if let Some(ref locale) = endpoint.locale {
        config.endpoint.locale.clone_from(locale);
    }
    if let Some(ref version) = endpoint.api_version {
        config.endpoint.api_version.clone_from(version);
    }
    if let Some(ms) = endpoint.request_timeout_ms {
        config.endpoint.request_timeout = Duration::from_millis(ms);
    }

    if let Some(ms) = toml.typing.type_interval_ms {
        config.typing.type_interval = Duration::from_millis(ms);
    }
    if let Some(ms) = toml.typing.delete_interval_ms {
        config.typing.delete_interval = Duration::from_millis(ms);
    }
    if let Some(ms) = toml.typing.hold_ms {
        config.typing.hold = Duration::from_millis(ms);
    }

    if let Some(ref verticals) = toml.autocomplete.verticals {
        config.autocomplete.verticals.clone_from(verticals);
    }
    if let Some(max) = toml.autocomplete.max_results {
        config.autocomplete.max_results = max;
    }
    if let Some(ref limits) = toml.autocomplete.limits {
        config
            .autocomplete
            .limits
            .extend(limits.iter().map(|(k, v)| (k.clone(), *v)));
    }
    if let Some(ref field) = toml.autocomplete.image_field {
        config.autocomplete.image_field.clone_from(field);
    }

    if let Some(ref url) = toml.navigation.results_url {
        config.navigation.results_url.clone_from(url);
    }
}

/// Apply environment variable overrides to the config
///
/// `lookup` is `std::env::var` in production; tests pass a map.
fn apply_env_config(config: &mut SearchBarConfig, lookup: impl Fn(&str) -> Option<String>) {
    let mut touched = false;
    let mut set_string = |key: &str, target: &mut String| {
        if let Some(value) = lookup(key) {
            *target = value;
            touched = true;
        }
    };

    set_string("SEARCHBAR_API_BASE", &mut config.endpoint.api_base);
    set_string("SEARCHBAR_API_KEY", &mut config.endpoint.api_key);
    set_string("SEARCHBAR_EXPERIENCE_KEY", &mut config.endpoint.experience_key);
    set_string(
        "SEARCHBAR_EXPERIENCE_VERSION",
        &mut config.endpoint.experience_version,
    );
    set_string("SEARCHBAR_LOCALE", &mut config.endpoint.locale);
    set_string("SEARCHBAR_RESULTS_URL", &mut config.navigation.results_url);

    let millis = |key: &str| lookup(key).and_then(|v| v.parse::<u64>().ok());
    if let Some(ms) = millis("SEARCHBAR_TYPE_INTERVAL_MS") {
        config.typing.type_interval = Duration::from_millis(ms);
        touched = true;
    }
    if let Some(ms) = millis("SEARCHBAR_DELETE_INTERVAL_MS") {
        config.typing.delete_interval = Duration::from_millis(ms);
        touched = true;
    }
    if let Some(ms) = millis("SEARCHBAR_HOLD_MS") {
        config.typing.hold = Duration::from_millis(ms);
        touched = true;
    }

    if touched {
        config.source = ConfigSource::Env;
    }
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Builder for applying CLI overrides to configuration
///
/// Use this after [`load_config`] to apply command-line argument overrides.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// API key override
    pub api_key: Option<String>,
    /// Experience key override
    pub experience_key: Option<String>,
    /// Locale override
    pub locale: Option<String>,
    /// Results page override
    pub results_url: Option<String>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set API key override
    #[must_use]
    pub fn with_api_key(mut self, key: String) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Set experience key override
    #[must_use]
    pub fn with_experience_key(mut self, key: String) -> Self {
        self.experience_key = Some(key);
        self
    }

    /// Set locale override
    #[must_use]
    pub fn with_locale(mut self, locale: String) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Set results page override
    #[must_use]
    pub fn with_results_url(mut self, url: String) -> Self {
        self.results_url = Some(url);
        self
    }

    /// Apply overrides to a configuration
    pub fn apply(&self, config: &mut SearchBarConfig) {
        if self.api_key.is_some()
            || self.experience_key.is_some()
            || self.locale.is_some()
            || self.results_url.is_some()
        {
            config.source = ConfigSource::Cli;
        }

        if let Some(ref key) = self.api_key {
            config.endpoint.api_key.clone_from(key);
        }
        if let Some(ref key) = self.experience_key {
            config.endpoint.experience_key.clone_from(key);
        }
        if let Some(ref locale) = self.locale {
            config.endpoint.locale.clone_from(locale);
        }
        if let Some(ref url) = self.results_url {
            config.navigation.results_url.clone_from(url);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
