//! Ports for credential persistence and token refresh
//!
//! The token manager only talks to these traits; the keyring and REST
//! implementations live in the infra crate.

use async_trait::async_trait;
use wastetrack_domain::Result;

use super::types::TokenSet;

/// Persistent storage for session tokens (platform keychain or similar)
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Persist `tokens` under `account`, replacing any previous value
    ///
    /// # Errors
    /// Returns error if the backend rejects the write
    async fn store_tokens(&self, account: &str, tokens: &TokenSet) -> Result<()>;

    /// Load tokens for `account`; `Ok(None)` when nothing is stored
    ///
    /// # Errors
    /// Returns error if the backend is unreachable or the stored value is
    /// corrupt
    async fn retrieve_tokens(&self, account: &str) -> Result<Option<TokenSet>>;

    /// Remove tokens for `account`. Deleting a missing entry succeeds.
    ///
    /// # Errors
    /// Returns error if the backend rejects the delete
    async fn delete_tokens(&self, account: &str) -> Result<()>;

    /// Whether tokens exist for `account`
    async fn has_tokens(&self, account: &str) -> bool;
}

/// Exchanges a refresh token for a new token set
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    /// Obtain a fresh access token
    ///
    /// The returned set may omit `refresh_token` when the server does not
    /// rotate it, and usually omits `user`.
    ///
    /// # Errors
    /// Returns error if the refresh token is rejected or the server is
    /// unreachable
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<TokenSet>;
}
