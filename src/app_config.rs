use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::language_utils;
use crate::providers::google::DEFAULT_ENDPOINT;
use crate::translation::rate_limiter::{DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW_SECS};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code, `auto` to let the provider detect it
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Text inserted between the input file stem and `.json`
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Sliding-window request quota
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Cache and request log storage
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    // @provider: Google translate_a/single endpoint
    #[default]
    Google,
    // @provider: Offline mock, echoes tagged text
    Mock,
}

impl ProviderKind {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Google => "Google Translate",
            Self::Mock => "Mock",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Google => write!(f, "google"),
            Self::Mock => write!(f, "mock"),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: ProviderKind,

    // @field: Service URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: Max chars per request
    #[serde(default = "default_max_chars_per_request")]
    pub max_chars_per_request: usize,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Delay in milliseconds between consecutive requests of one file
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Delay in milliseconds between two files
    #[serde(default = "default_file_delay_ms")]
    pub file_delay_ms: u64,

    /// Answer repeated texts from the local cache
    #[serde(default = "default_true")]
    pub cache_enabled: bool,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            endpoint: default_endpoint(),
            max_chars_per_request: default_max_chars_per_request(),
            timeout_secs: default_timeout_secs(),
            request_delay_ms: default_request_delay_ms(),
            file_delay_ms: default_file_delay_ms(),
            cache_enabled: true,
        }
    }
}

/// Sliding-window quota settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RateLimitConfig {
    /// Window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// Requests allowed per window
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
            max_requests: default_max_requests(),
        }
    }
}

/// Persistent storage settings
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct StorageConfig {
    /// SQLite file for the cache and request log; platform data dir when unset
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    language_utils::AUTO_LANGUAGE.to_string()
}

fn default_target_language() -> String {
    "es".to_string()
}

fn default_output_suffix() -> String {
    "_translated".to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_max_chars_per_request() -> usize {
    5000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_request_delay_ms() -> u64 {
    250
}

fn default_file_delay_ms() -> u64 {
    500
}

fn default_true() -> bool {
    true
}

fn default_window_secs() -> u64 {
    DEFAULT_WINDOW_SECS
}

fn default_max_requests() -> u32 {
    DEFAULT_MAX_REQUESTS
}

impl Config {
    /// Load the configuration at `path`, writing a default one first if the
    /// file does not exist. The flag is true when the file was created.
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<(Self, bool)> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let config: Config = serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok((config, false));
        }

        let config = Config::default();
        config.save(path)?;
        Ok((config, true))
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        language_utils::validate_source_language(&self.source_language)
            .context("Invalid source language")?;
        language_utils::validate_target_language(&self.target_language)
            .context("Invalid target language")?;

        if language_utils::language_codes_match(&self.source_language, &self.target_language) {
            return Err(anyhow!(
                "Source and target language are the same: {} / {}",
                self.source_language, self.target_language
            ));
        }

        if self.output_suffix.contains(['/', '\\']) {
            return Err(anyhow!(
                "Output suffix must not contain a path separator: {}",
                self.output_suffix
            ));
        }

        if self.translation.max_chars_per_request == 0 {
            return Err(anyhow!("max_chars_per_request must be greater than zero"));
        }

        if self.rate_limit.window_secs == 0 {
            return Err(anyhow!("Rate limit window must be greater than zero"));
        }

        if self.rate_limit.max_requests == 0 {
            return Err(anyhow!("Rate limit max_requests must be greater than zero"));
        }

        Ok(())
    }

    /// Request pacing within one file
    pub fn request_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.translation.request_delay_ms)
    }

    /// Pacing between files
    pub fn file_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.translation.file_delay_ms)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            output_suffix: default_output_suffix(),
            translation: TranslationConfig::default(),
            rate_limit: RateLimitConfig::default(),
            storage: StorageConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
