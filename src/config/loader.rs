//! Configuration file loading with precedence handling.

use crate::state::scroll_window::DEFAULT_CAPACITY;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Env var naming an explicit config file.
pub const ENV_CONFIG: &str = "SCROLLCHAT_CONFIG";
/// Env var overriding the log file path.
pub const ENV_LOG_FILE: &str = "SCROLLCHAT_LOG_FILE";
/// Env var overriding the scroll window capacity.
pub const ENV_HISTORY_CAPACITY: &str = "SCROLLCHAT_HISTORY_CAPACITY";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/scrollchat/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Messages kept in the scroll window during normal chat flow.
    #[serde(default)]
    pub history_capacity: Option<usize>,

    /// Recommended display name length shown at the name prompt.
    #[serde(default)]
    pub max_name_len: Option<usize>,

    /// How long a key read blocks before re-checking for termination.
    #[serde(default)]
    pub key_poll_interval_ms: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Scroll window cap. Always at least 1.
    pub history_capacity: usize,
    /// Name length bound shown at the prompt (not enforced).
    pub max_name_len: usize,
    /// Key poll timeout in milliseconds.
    pub key_poll_interval_ms: u64,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_CAPACITY,
            max_name_len: 20,
            key_poll_interval_ms: 100,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// How long a key read may block before the loops re-check for shutdown.
    pub fn key_poll_interval(&self) -> Duration {
        Duration::from_millis(self.key_poll_interval_ms)
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/scrollchat/scrollchat.log` on Linux, the platform
/// equivalent elsewhere, or `./scrollchat.log` when there is no state directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("scrollchat").join("scrollchat.log")
    } else {
        PathBuf::from("scrollchat.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/scrollchat/config.toml` on Unix, appropriate path elsewhere.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("scrollchat").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `SCROLLCHAT_CONFIG` environment variable
/// 3. Default path `~/.config/scrollchat/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        history_capacity: config
            .history_capacity
            .unwrap_or(defaults.history_capacity)
            .max(1),
        max_name_len: config.max_name_len.unwrap_or(defaults.max_name_len),
        key_poll_interval_ms: config
            .key_poll_interval_ms
            .unwrap_or(defaults.key_poll_interval_ms),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `SCROLLCHAT_LOG_FILE`: Override log file path
/// - `SCROLLCHAT_HISTORY_CAPACITY`: Override window cap (ignored unless a positive integer)
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(path) = std::env::var(ENV_LOG_FILE) {
        config.log_file_path = PathBuf::from(path);
    }

    if let Ok(raw) = std::env::var(ENV_HISTORY_CAPACITY) {
        match raw.trim().parse::<usize>() {
            Ok(capacity) if capacity > 0 => config.history_capacity = capacity,
            _ => warn!(value = %raw, "Ignoring invalid {}", ENV_HISTORY_CAPACITY),
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    log_file_override: Option<PathBuf>,
    history_capacity_override: Option<usize>,
) -> ResolvedConfig {
    if let Some(path) = log_file_override {
        config.log_file_path = path;
    }

    if let Some(capacity) = history_capacity_override {
        config.history_capacity = capacity.max(1);
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
