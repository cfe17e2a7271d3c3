//! Application constants
//!
//! Centralized location for domain-level constants and the hardcoded
//! fallbacks used when configuration values are absent.

// API defaults
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

// Reverse geocoding defaults
pub const DEFAULT_GEOCODING_ENDPOINT: &str = "https://api.mapbox.com/geocoding/v5/mapbox.places";
pub const DEFAULT_GEOCODING_ACCESS_TOKEN: &str = "pk.wastetrack-public-token";
pub const DEFAULT_GEOCODE_CACHE_CAPACITY: usize = 1024;

// ID obfuscation
pub const DEFAULT_OBFUSCATION_SECRET: &str = "wastetrack-default-secret";
pub const OBFUSCATED_ID_SEPARATOR: char = '|';
pub const HASH_ID_PREFIX: &str = "#";
pub const HASH_ID_LENGTH: usize = 8;

// Token lifecycle
pub const DEFAULT_REFRESH_THRESHOLD_SECS: i64 = 300;
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

// User-facing messages
pub const LOCATION_UNAVAILABLE: &str = "Location unavailable";
pub const GENERIC_OPERATION_FAILED: &str = "Operation failed";
pub const GENERIC_TRANSPORT_FAILED: &str = "Unable to reach the server";

// Credential storage
pub const KEYRING_SERVICE_NAME: &str = "wastetrack";
pub const DEFAULT_TOKEN_ACCOUNT: &str = "session";
