//! Token manager with on-demand refresh
//!
//! Owns the session token lifecycle:
//! - Loading persisted tokens on startup
//! - Refreshing before expiry (configurable threshold, default 5 min)
//! - Clearing memory and storage on logout

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};
use wastetrack_domain::constants::DEFAULT_REFRESH_THRESHOLD_SECS;
use wastetrack_domain::{CurrentUser, WasteTrackError};

use super::traits::{TokenRefresher, TokenStore};
use super::types::TokenSet;

/// Error type for token manager operations
#[derive(Debug, Error)]
pub enum TokenManagerError {
    /// Token store operation failed
    #[error("token store error: {0}")]
    Store(#[source] WasteTrackError),

    /// Refresh endpoint rejected the request or was unreachable
    #[error("token refresh failed: {0}")]
    RefreshFailed(#[source] WasteTrackError),

    /// No tokens available
    #[error("not authenticated (no tokens)")]
    NotAuthenticated,

    /// Session has no refresh token
    #[error("no refresh token available")]
    NoRefreshToken,
}

impl From<TokenManagerError> for WasteTrackError {
    fn from(err: TokenManagerError) -> Self {
        match err {
            TokenManagerError::Store(inner) | TokenManagerError::RefreshFailed(inner) => inner,
            other => Self::Auth(other.to_string()),
        }
    }
}

/// Session token manager
///
/// Thread-safe; share it behind an `Arc`. Concurrent callers that both see
/// an expiring token trigger a single refresh.
pub struct TokenManager<R: TokenRefresher + 'static, S: TokenStore + 'static> {
    refresher: Arc<R>,
    store: Arc<S>,
    account_name: String,
    current_tokens: Arc<RwLock<Option<TokenSet>>>,
    refresh_lock: Mutex<()>,
    refresh_threshold_seconds: i64,
}

impl<R: TokenRefresher + 'static, S: TokenStore + 'static> TokenManager<R, S> {
    /// Create a token manager with the default refresh threshold
    ///
    /// # Arguments
    /// * `refresher` - Client that exchanges refresh tokens
    /// * `store` - Persistent token storage
    /// * `account_name` - Storage account key (e.g. "session")
    #[must_use]
    pub fn new(refresher: R, store: Arc<S>, account_name: impl Into<String>) -> Self {
        Self {
            refresher: Arc::new(refresher),
            store,
            account_name: account_name.into(),
            current_tokens: Arc::new(RwLock::new(None)),
            refresh_lock: Mutex::new(()),
            refresh_threshold_seconds: DEFAULT_REFRESH_THRESHOLD_SECS,
        }
    }

    /// Refresh tokens this many seconds before expiry
    #[must_use]
    pub fn with_refresh_threshold(mut self, seconds: i64) -> Self {
        self.refresh_threshold_seconds = seconds;
        self
    }

    /// Load persisted tokens into memory
    ///
    /// Returns whether a session was found. Call once on startup.
    ///
    /// # Errors
    /// Returns error if the store cannot be read (not if it is empty)
    pub async fn initialize(&self) -> Result<bool, TokenManagerError> {
        match self.store.retrieve_tokens(&self.account_name).await {
            Ok(Some(tokens)) => {
                *self.current_tokens.write().await = Some(tokens);
                info!(account = %self.account_name, "Token manager initialized with existing tokens");
                Ok(true)
            }
            Ok(None) => {
                debug!(account = %self.account_name, "No existing tokens found in store");
                Ok(false)
            }
            Err(e) => Err(TokenManagerError::Store(e)),
        }
    }

    /// Persist a new session (after login or refresh)
    ///
    /// # Errors
    /// Returns error if the store rejects the write; memory is left unchanged
    pub async fn store_tokens(&self, tokens: TokenSet) -> Result<(), TokenManagerError> {
        self.store
            .store_tokens(&self.account_name, &tokens)
            .await
            .map_err(TokenManagerError::Store)?;

        *self.current_tokens.write().await = Some(tokens);
        debug!(account = %self.account_name, "Tokens stored");
        Ok(())
    }

    /// Current access token, refreshed first when it is near expiry
    ///
    /// Returns `Ok(None)` when not authenticated, or when the token has
    /// expired and cannot be refreshed.
    ///
    /// # Errors
    /// Returns error if a needed refresh fails
    pub async fn get_valid_access_token(&self) -> Result<Option<String>, TokenManagerError> {
        let (needs_refresh, can_refresh, hard_expired, access_token) = {
            let tokens = self.current_tokens.read().await;
            let Some(t) = tokens.as_ref() else {
                return Ok(None);
            };
            (
                t.is_expired(self.refresh_threshold_seconds),
                t.refresh_token.is_some(),
                t.is_expired(0),
                t.access_token.clone(),
            )
        };

        if !needs_refresh {
            return Ok(Some(access_token));
        }

        if !can_refresh {
            if hard_expired {
                debug!("Access token expired and no refresh token is available");
                return Ok(None);
            }
            return Ok(Some(access_token));
        }

        self.refresh_if_stale(&access_token).await.map(Some)
    }

    /// Force a refresh and return the new access token
    ///
    /// The previous refresh token and user are kept when the response omits
    /// them.
    ///
    /// # Errors
    /// Returns error if not authenticated, no refresh token exists, or the
    /// refresh call fails
    pub async fn refresh_tokens(&self) -> Result<String, TokenManagerError> {
        let _guard = self.refresh_lock.lock().await;
        self.refresh_locked().await
    }

    /// The signed-in user, if known
    pub async fn get_current_user(&self) -> Option<CurrentUser> {
        self.current_tokens.read().await.as_ref().and_then(|t| t.user.clone())
    }

    /// Clear the session from memory and storage
    ///
    /// Safe to call repeatedly. Memory is cleared even if the store fails.
    ///
    /// # Errors
    /// Returns error if the store delete fails
    pub async fn logout(&self) -> Result<(), TokenManagerError> {
        *self.current_tokens.write().await = None;

        self.store.delete_tokens(&self.account_name).await.map_err(TokenManagerError::Store)?;

        info!(account = %self.account_name, "Tokens cleared (logged out)");
        Ok(())
    }

    /// Current token set (without refresh)
    pub async fn get_tokens(&self) -> Option<TokenSet> {
        self.current_tokens.read().await.clone()
    }

    /// Whether a session is held in memory
    pub async fn is_authenticated(&self) -> bool {
        self.current_tokens.read().await.is_some()
    }

    /// Seconds until the access token expires
    pub async fn seconds_until_expiry(&self) -> Option<i64> {
        self.current_tokens.read().await.as_ref().and_then(TokenSet::seconds_until_expiry)
    }

    /// Refresh threshold in seconds
    #[must_use]
    pub fn refresh_threshold(&self) -> i64 {
        self.refresh_threshold_seconds
    }

    /// Refresh unless another caller already replaced `seen_token` while we
    /// waited for the lock
    async fn refresh_if_stale(&self, seen_token: &str) -> Result<String, TokenManagerError> {
        let _guard = self.refresh_lock.lock().await;

        {
            let tokens = self.current_tokens.read().await;
            if let Some(t) = tokens.as_ref() {
                if t.access_token != seen_token && !t.is_expired(self.refresh_threshold_seconds) {
                    debug!("Token already refreshed by a concurrent caller");
                    return Ok(t.access_token.clone());
                }
            }
        }

        self.refresh_locked().await
    }

    async fn refresh_locked(&self) -> Result<String, TokenManagerError> {
        let current = self.current_tokens.read().await.clone();
        let current = current.ok_or(TokenManagerError::NotAuthenticated)?;
        let refresh_token =
            current.refresh_token.clone().ok_or(TokenManagerError::NoRefreshToken)?;

        let mut fresh = match self.refresher.refresh_access_token(&refresh_token).await {
            Ok(tokens) => tokens,
            Err(e) => {
                warn!(error = %e, "Token refresh failed");
                return Err(TokenManagerError::RefreshFailed(e));
            }
        };

        if fresh.refresh_token.is_none() {
            fresh.refresh_token = Some(refresh_token);
        }
        if fresh.user.is_none() {
            fresh.user = current.user;
        }

        let access_token = fresh.access_token.clone();
        self.store_tokens(fresh).await?;

        info!("Successfully refreshed access token");
        Ok(access_token)
    }
}

impl<R: TokenRefresher + 'static, S: TokenStore + 'static> std::fmt::Debug for TokenManager<R, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("account_name", &self.account_name)
            .field("refresh_threshold_seconds", &self.refresh_threshold_seconds)
            .finish_non_exhaustive()
    }
}

#[cfg(all(test, feature = "platform"))]
mod tests {
    //! Unit tests for auth::token_manager.
    use wastetrack_domain::UserRole;

    use super::*;
    use crate::testing::{MemoryTokenStore, MockTokenRefresher};

    fn user() -> CurrentUser {
        CurrentUser {
            id: "u-7".to_string(),
            name: "Budi".to_string(),
            email: Some("budi@example.com".to_string()),
            role: UserRole::WasteBankUnit,
        }
    }

    fn create_test_manager(
        refresher: MockTokenRefresher,
    ) -> (TokenManager<MockTokenRefresher, MemoryTokenStore>, Arc<MemoryTokenStore>) {
        let store = Arc::new(MemoryTokenStore::new());
        (TokenManager::new(refresher, Arc::clone(&store), "test.account"), store)
    }

    /// Validates the token manager creation scenario.
    ///
    /// Assertions:
    /// - Ensures `!manager.is_authenticated().await` evaluates to true.
    /// - Confirms `get_valid_access_token` yields `None`.
    #[tokio::test]
    async fn test_token_manager_creation() {
        let (manager, _) = create_test_manager(MockTokenRefresher::new());

        assert!(!manager.is_authenticated().await);
        assert_eq!(manager.get_valid_access_token().await.unwrap(), None);
        assert_eq!(manager.refresh_threshold(), 300);
    }

    /// Validates `TokenManager::initialize` behavior for the persisted
    /// session scenario.
    ///
    /// Assertions:
    /// - Returns `false` on an empty store and `true` once tokens exist.
    /// - Loaded tokens carry the stored user.
    #[tokio::test]
    async fn test_initialize_loads_persisted_tokens() {
        let (manager, store) = create_test_manager(MockTokenRefresher::new());
        assert!(!manager.initialize().await.unwrap());

        let tokens = TokenSet::new("persisted".to_string(), None, 3600).with_user(user());
        store.store_tokens("test.account", &tokens).await.unwrap();

        assert!(manager.initialize().await.unwrap());
        assert_eq!(manager.get_current_user().await, Some(user()));
    }

    #[tokio::test]
    async fn test_valid_token_is_returned_without_refresh() {
        let refresher = MockTokenRefresher::new();
        let (manager, _) = create_test_manager(refresher.clone());
        manager
            .store_tokens(TokenSet::new("fresh".to_string(), Some("r".to_string()), 3600))
            .await
            .unwrap();

        assert_eq!(manager.get_valid_access_token().await.unwrap().as_deref(), Some("fresh"));
        assert_eq!(refresher.call_count(), 0);
    }

    /// Validates `TokenManager::get_valid_access_token` behavior for the near
    /// expiry scenario.
    ///
    /// Assertions:
    /// - Token inside the threshold triggers exactly one refresh.
    /// - The old refresh token and user survive a non-rotating refresh.
    #[tokio::test]
    async fn test_expiring_token_is_refreshed() {
        let refresher = MockTokenRefresher::new()
            .with_response(Ok(TokenSet::new("rotated".to_string(), None, 3600)));
        let (manager, store) = create_test_manager(refresher.clone());
        manager
            .store_tokens(
                TokenSet::new("stale".to_string(), Some("refresh-1".to_string()), 60)
                    .with_user(user()),
            )
            .await
            .unwrap();

        let token = manager.get_valid_access_token().await.unwrap();

        assert_eq!(token.as_deref(), Some("rotated"));
        assert_eq!(refresher.call_count(), 1);
        assert_eq!(refresher.last_refresh_token().as_deref(), Some("refresh-1"));

        let persisted = store.retrieve_tokens("test.account").await.unwrap().unwrap();
        assert_eq!(persisted.refresh_token.as_deref(), Some("refresh-1"));
        assert_eq!(persisted.user, Some(user()));
    }

    #[tokio::test]
    async fn test_expired_token_without_refresh_token_is_dropped() {
        let (manager, _) = create_test_manager(MockTokenRefresher::new());
        let mut tokens = TokenSet::new("old".to_string(), None, 60);
        tokens.expires_at = Some(chrono::Utc::now() - chrono::Duration::seconds(5));
        manager.store_tokens(tokens).await.unwrap();

        assert_eq!(manager.get_valid_access_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_refresh_failure_surfaces_error() {
        let refresher = MockTokenRefresher::new()
            .with_response(Err(WasteTrackError::Auth("refresh token revoked".to_string())));
        let (manager, _) = create_test_manager(refresher);
        manager
            .store_tokens(TokenSet::new("a".to_string(), Some("r".to_string()), 3600))
            .await
            .unwrap();

        let result = manager.refresh_tokens().await;
        assert!(matches!(result, Err(TokenManagerError::RefreshFailed(_))));
    }

    /// Validates `TokenSet::new` behavior for the no refresh token error
    /// scenario.
    ///
    /// Assertions:
    /// - Ensures `matches!(result, Err(TokenManagerError::NoRefreshToken))`
    ///   evaluates to true.
    #[tokio::test]
    async fn test_no_refresh_token_error() {
        let (manager, _) = create_test_manager(MockTokenRefresher::new());
        manager.store_tokens(TokenSet::new("access".to_string(), None, 60)).await.unwrap();

        let result = manager.refresh_tokens().await;
        assert!(matches!(result, Err(TokenManagerError::NoRefreshToken)));
    }

    #[tokio::test]
    async fn test_refresh_without_session_is_not_authenticated() {
        let (manager, _) = create_test_manager(MockTokenRefresher::new());
        let result = manager.refresh_tokens().await;
        assert!(matches!(result, Err(TokenManagerError::NotAuthenticated)));
    }

    /// Validates `TokenManager::logout` behavior for the repeated logout
    /// scenario.
    ///
    /// Assertions:
    /// - Memory and store are both cleared.
    /// - A second logout succeeds.
    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let (manager, store) = create_test_manager(MockTokenRefresher::new());
        manager.store_tokens(TokenSet::new("a".to_string(), None, 3600)).await.unwrap();

        manager.logout().await.unwrap();
        manager.logout().await.unwrap();

        assert!(!manager.is_authenticated().await);
        assert!(!store.has_tokens("test.account").await);
        assert_eq!(manager.get_current_user().await, None);
    }

    #[tokio::test]
    async fn test_error_converts_to_domain_error() {
        let err: WasteTrackError = TokenManagerError::NoRefreshToken.into();
        assert!(matches!(err, WasteTrackError::Auth(_)));
    }
}
