//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.dialer/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//! Credentials and provider identifiers only ever come from here.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DialerConfig {
    #[serde(default)]
    pub vapi: VapiConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct VapiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub assistant_id: Option<String>,
    pub phone_number_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HistoryConfig {
    pub limit: Option<u32>,
    pub fetch_on_start: Option<bool>,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub assistant_id: Option<&'a str>,
    pub phone_number_id: Option<&'a str>,
    pub no_history: bool,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_VAPI_BASE_URL: &str = "https://api.vapi.ai";
pub const DEFAULT_HISTORY_LIMIT: u32 = 20;

// ============================================================================
// Resolved Config (concrete values where a default exists)
// ============================================================================

/// Credentials stay optional here; the provider constructor decides
/// whether what's present is enough.
#[derive(Clone)]
pub struct ResolvedConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub assistant_id: Option<String>,
    pub phone_number_id: Option<String>,
    pub history_limit: u32,
    pub fetch_history_on_start: bool,
}

// Hand-written so the API key never reaches the log file.
impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .field("base_url", &self.base_url)
            .field("assistant_id", &self.assistant_id)
            .field("phone_number_id", &self.phone_number_id)
            .field("history_limit", &self.history_limit)
            .field("fetch_history_on_start", &self.fetch_history_on_start)
            .finish()
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.dialer/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".dialer").join("config.toml"))
}

/// Load config from `~/.dialer/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `DialerConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<DialerConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(DialerConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(DialerConfig::default());
    }

    load_config_from(&path)
}

/// Parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<DialerConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: DialerConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!(
        "Config: base_url={:?}, assistant_id={:?}, history={:?}",
        config.vapi.base_url, config.vapi.assistant_id, config.history
    );
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Dialer Configuration
# All settings are optional here, but a call needs api_key, assistant_id
# and phone_number_id from somewhere.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [vapi]
# api_key = "..."                    # Or set VAPI_API_KEY env var
# base_url = "https://api.vapi.ai"   # Or VAPI_BASE_URL
# assistant_id = "..."               # Or VAPI_ASSISTANT_ID / --assistant-id
# phone_number_id = "..."            # Or VAPI_PHONE_NUMBER_ID / --phone-number-id

# [history]
# limit = 20                         # Calls fetched per refresh
# fetch_on_start = true              # --no-history disables
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &DialerConfig, cli: &CliOverrides<'_>) -> ResolvedConfig {
    resolve_with(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with<F>(config: &DialerConfig, cli: &CliOverrides<'_>, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    // API key: env → config
    let api_key = env("VAPI_API_KEY").or_else(|| config.vapi.api_key.clone());

    // Base URL: env → config → default
    let base_url = env("VAPI_BASE_URL")
        .or_else(|| config.vapi.base_url.clone())
        .unwrap_or_else(|| DEFAULT_VAPI_BASE_URL.to_string());

    // Identifiers: CLI → env → config
    let assistant_id = cli
        .assistant_id
        .map(str::to_string)
        .or_else(|| env("VAPI_ASSISTANT_ID"))
        .or_else(|| config.vapi.assistant_id.clone());

    let phone_number_id = cli
        .phone_number_id
        .map(str::to_string)
        .or_else(|| env("VAPI_PHONE_NUMBER_ID"))
        .or_else(|| config.vapi.phone_number_id.clone());

    // Fetch on start: CLI can only turn it off
    let fetch_history_on_start =
        !cli.no_history && config.history.fetch_on_start.unwrap_or(true);

    ResolvedConfig {
        api_key,
        base_url,
        assistant_id,
        phone_number_id,
        history_limit: config.history.limit.unwrap_or(DEFAULT_HISTORY_LIMIT),
        fetch_history_on_start,
    }
}
