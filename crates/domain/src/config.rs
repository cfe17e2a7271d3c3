//! Configuration structures
//!
//! Every section implements `Default` with the hardcoded fallbacks from
//! [`crate::constants`], so a partially specified file or environment still
//! produces a usable configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_API_TIMEOUT_SECS, DEFAULT_GEOCODE_CACHE_CAPACITY,
    DEFAULT_GEOCODING_ACCESS_TOKEN, DEFAULT_GEOCODING_ENDPOINT, DEFAULT_OBFUSCATION_SECRET,
};

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub geocoding: GeocodingConfig,
    pub obfuscation: ObfuscationConfig,
}

/// REST API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every request path is appended to (no trailing slash)
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
        }
    }
}

/// Reverse-geocoding provider settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    pub endpoint: String,
    /// Provider credential sent as the `access_token` query parameter
    pub access_token: String,
    /// Maximum number of cached addresses
    pub cache_capacity: usize,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GEOCODING_ENDPOINT.to_string(),
            access_token: DEFAULT_GEOCODING_ACCESS_TOKEN.to_string(),
            cache_capacity: DEFAULT_GEOCODE_CACHE_CAPACITY,
        }
    }
}

/// Shared secret for URL-safe ID tokens
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObfuscationConfig {
    pub secret: String,
}

impl Default for ObfuscationConfig {
    fn default() -> Self {
        Self { secret: DEFAULT_OBFUSCATION_SECRET.to_string() }
    }
}

impl std::fmt::Debug for GeocodingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingConfig")
            .field("endpoint", &self.endpoint)
            .field("access_token", &"<redacted>")
            .field("cache_capacity", &self.cache_capacity)
            .finish()
    }
}

// Keep the secret out of logs.
impl std::fmt::Debug for ObfuscationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObfuscationConfig").field("secret", &"<redacted>").finish()
    }
}
