//! Configuration management for the news brief tools.
//!
//! Configuration lives in a single file at `~/.newsbrief/config.json`.
//!
//! # Configuration Priority
//!
//! 1. Environment variables (BRIEF_* prefix)
//! 2. Explicit config file values
//! 3. Default values
//!
//! # Environment Variable Mapping
//!
//! - `BRIEF_LOG_LEVEL` → observability.log_level
//! - `BRIEF_LOG_FORMAT` → observability.log_format
//! - `BRIEF_CACHE_DIR` → cache.dir
//! - `BRIEF_CACHE_MAX_AGE_HOURS` → cache.max_age_hours

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Get the configuration directory path.
pub fn config_dir() -> PathBuf {
    directories::UserDirs::new().map_or_else(
        || PathBuf::from(".newsbrief"),
        |dirs| dirs.home_dir().join(".newsbrief"),
    )
}

/// Get the configuration file path.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

// ============================================================================
// Observability
// ============================================================================

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level", alias = "level")]
    pub log_level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format", alias = "format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

// ============================================================================
// Analysis
// ============================================================================

/// Settings for report rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// How many ranked topics the "most frequent topics" views show.
    #[serde(default = "default_top_topics")]
    pub top_topics: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_topics: default_top_topics(),
        }
    }
}

fn default_top_topics() -> usize {
    8
}

// ============================================================================
// Cache
// ============================================================================

/// On-disk article cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether cached article batches may be reused
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Cache directory. Defaults to `~/.newsbrief/cache`.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Entries older than this are ignored
    #[serde(default = "default_max_age_hours")]
    pub max_age_hours: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
            max_age_hours: default_max_age_hours(),
        }
    }
}

impl CacheConfig {
    /// Resolved cache directory.
    pub fn cache_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| config_dir().join("cache"))
    }

    /// Maximum entry age as a duration.
    pub fn max_age(&self) -> Duration {
        hours_to_duration(self.max_age_hours)
    }
}

/// Whole hours as a duration, saturating instead of overflowing.
pub fn hours_to_duration(hours: u64) -> Duration {
    Duration::from_secs(hours.saturating_mul(3600))
}

fn default_true() -> bool {
    true
}

fn default_max_age_hours() -> u64 {
    6
}

// ============================================================================
// Root
// ============================================================================

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub observability: ObservabilityConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Load configuration from the default path.
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            tracing::debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Load configuration (explicit path or default) and apply environment overrides.
    pub fn load_with_env(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::load_from(p)?,
            None => Self::load()?,
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var("BRIEF_LOG_LEVEL") {
            self.observability.log_level = level;
        }
        if let Ok(format) = std::env::var("BRIEF_LOG_FORMAT") {
            self.observability.log_format = format;
        }
        if let Ok(dir) = std::env::var("BRIEF_CACHE_DIR") {
            self.cache.dir = Some(PathBuf::from(dir));
        }
        if let Ok(hours) = std::env::var("BRIEF_CACHE_MAX_AGE_HOURS") {
            match hours.parse() {
                Ok(h) => self.cache.max_age_hours = h,
                Err(_) => tracing::warn!(value = %hours, "Ignoring invalid BRIEF_CACHE_MAX_AGE_HOURS"),
            }
        }
    }
}
