//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Read `.env` from the working directory when present (never overrides
//!    variables already set in the process)
//! 2. Start from the first config file found by [`probe_config_paths`], or
//!    from [`Config::default`]
//! 3. Overlay any `WASTETRACK_*` environment variables that are set
//!
//! ## Environment Variables
//! - `WASTETRACK_API_URL`: REST API base URL
//! - `WASTETRACK_API_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `WASTETRACK_MAPBOX_ENDPOINT`: Reverse-geocoding endpoint
//! - `WASTETRACK_MAPBOX_TOKEN`: Reverse-geocoding access token
//! - `WASTETRACK_GEOCODE_CACHE_CAPACITY`: Maximum cached addresses
//! - `WASTETRACK_ID_SECRET`: Shared secret for obfuscated IDs
//!
//! Empty values count as unset.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use wastetrack_domain::{Config, Result, WasteTrackError};

pub const ENV_API_URL: &str = "WASTETRACK_API_URL";
pub const ENV_API_TIMEOUT_SECS: &str = "WASTETRACK_API_TIMEOUT_SECS";
pub const ENV_MAPBOX_ENDPOINT: &str = "WASTETRACK_MAPBOX_ENDPOINT";
pub const ENV_MAPBOX_TOKEN: &str = "WASTETRACK_MAPBOX_TOKEN";
pub const ENV_GEOCODE_CACHE_CAPACITY: &str = "WASTETRACK_GEOCODE_CACHE_CAPACITY";
pub const ENV_ID_SECRET: &str = "WASTETRACK_ID_SECRET";

const CONFIG_FILE_NAMES: [&str; 2] = ["wastetrack.json", "wastetrack.toml"];

/// Load configuration from `.env`, an optional config file and the
/// environment
///
/// # Errors
/// Returns `WasteTrackError::Config` if a config file exists but cannot be
/// parsed, or if an environment variable holds an invalid number.
pub fn load() -> Result<Config> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Ignoring unreadable .env file"),
    }

    let base = match probe_config_paths() {
        Some(path) => load_from_file(Some(path))?,
        None => Config::default(),
    };

    apply_env(base)
}

/// Load configuration from environment variables only
///
/// Every variable is optional; missing ones keep the built-in default.
///
/// # Errors
/// Returns `WasteTrackError::Config` if a numeric variable cannot be parsed.
pub fn load_from_env() -> Result<Config> {
    apply_env(Config::default())
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. Supports JSON and
/// TOML (detected by file extension). Sections and fields missing from the
/// file keep their defaults.
///
/// # Errors
/// Returns `WasteTrackError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(WasteTrackError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            WasteTrackError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| WasteTrackError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration by file extension (`.json` or `.toml`)
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| WasteTrackError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| WasteTrackError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(WasteTrackError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe for a `wastetrack.{json,toml}` config file
///
/// Searches the current working directory and its parent, then the
/// executable's directory. Returns the first file that exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.join(".."));
        dirs.insert(0, cwd);
    }
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf)) {
        dirs.push(exe_dir);
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

fn apply_env(mut config: Config) -> Result<Config> {
    if let Some(url) = env_string(ENV_API_URL) {
        config.api.base_url = url;
    }
    if let Some(secs) = env_parse::<u64>(ENV_API_TIMEOUT_SECS)? {
        config.api.timeout_secs = secs;
    }
    if let Some(endpoint) = env_string(ENV_MAPBOX_ENDPOINT) {
        config.geocoding.endpoint = endpoint;
    }
    if let Some(token) = env_string(ENV_MAPBOX_TOKEN) {
        config.geocoding.access_token = token;
    }
    if let Some(capacity) = env_parse::<usize>(ENV_GEOCODE_CACHE_CAPACITY)? {
        config.geocoding.cache_capacity = capacity;
    }
    if let Some(secret) = env_string(ENV_ID_SECRET) {
        config.obfuscation.secret = secret;
    }

    Ok(config)
}

/// Read a variable, treating unset, non-unicode and blank values as absent
fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_string(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| WasteTrackError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}
