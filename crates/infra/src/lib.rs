//! # WasteTrack Infrastructure
//!
//! Infrastructure implementations of core and common ports.
//!
//! This crate contains:
//! - HTTP transport and the authenticated API client
//! - Mapbox reverse geocoding adapter
//! - Keyring token storage and REST token refresh
//! - Configuration loading and tracing setup
//!
//! ## Architecture
//! - Implements traits defined in `wastetrack-core` and `wastetrack-common`
//! - Contains all "impure" code (network, keychain, environment)

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod geocoding;
pub mod http;
pub mod logging;

// Re-export commonly used items
pub use api::{
    AccessTokenProvider, ApiClient, ApiClientBuilder, ApiClientConfig, ApiError, ApiErrorKind,
    ApiRequest, ReauthPolicy,
};
pub use auth::{KeyringTokenStore, RestTokenRefresher};
pub use errors::InfraError;
pub use geocoding::MapboxGeocoder;
pub use http::HttpClient;
pub use logging::{init_tracing, LogFormat};
