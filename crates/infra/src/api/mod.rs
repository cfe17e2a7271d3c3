//! Authenticated REST API client for the WasteTrack backend
//!
//! # Architecture
//!
//! - [`ApiClient`] decorates [`crate::http::HttpClient`]; no interceptor hooks
//! - Tokens come from an [`AccessTokenProvider`] (normally the
//!   `TokenManager`)
//! - A [`ReauthPolicy`] allows one refresh-and-resend on `401`
//! - All failures are [`ApiError`] with a structured [`ApiErrorKind`]

pub mod auth;
pub mod client;
pub mod errors;
pub mod reauth;
pub mod request;

pub use auth::AccessTokenProvider;
pub use client::{ApiClient, ApiClientBuilder, ApiClientConfig};
pub use errors::{extract_error_message, ApiError, ApiErrorKind};
pub use reauth::ReauthPolicy;
pub use request::ApiRequest;
