//! Access token port for the API client
//!
//! The client never owns credentials; it asks an [`AccessTokenProvider`]
//! for the current token, a refreshed token after a 401, or a logout once
//! reauthentication has failed.

use async_trait::async_trait;
use tracing::warn;
use wastetrack_common::auth::{TokenManager, TokenRefresher, TokenStore};
use wastetrack_domain::WasteTrackError;

use super::errors::ApiError;

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Current valid access token, `None` when not authenticated
    ///
    /// May refresh first if the token is close to expiry.
    async fn access_token(&self) -> Result<Option<String>, ApiError>;

    /// Force a refresh and return the new access token
    async fn refresh_access_token(&self) -> Result<String, ApiError>;

    /// Drop stored credentials
    async fn logout(&self);
}

#[async_trait]
impl<R, S> AccessTokenProvider for TokenManager<R, S>
where
    R: TokenRefresher + 'static,
    S: TokenStore + 'static,
{
    async fn access_token(&self) -> Result<Option<String>, ApiError> {
        self.get_valid_access_token()
            .await
            .map_err(|e| ApiError::from(WasteTrackError::from(e)))
    }

    async fn refresh_access_token(&self) -> Result<String, ApiError> {
        self.refresh_tokens().await.map_err(|e| ApiError::from(WasteTrackError::from(e)))
    }

    async fn logout(&self) {
        if let Err(e) = TokenManager::logout(self).await {
            warn!(error = %e, "Failed to clear stored credentials during logout");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use wastetrack_common::auth::TokenSet;
    use wastetrack_common::testing::{MemoryTokenStore, MockTokenRefresher};

    use super::*;
    use crate::api::errors::ApiErrorKind;

    fn manager(
        refresher: MockTokenRefresher,
    ) -> TokenManager<MockTokenRefresher, MemoryTokenStore> {
        TokenManager::new(refresher, Arc::new(MemoryTokenStore::new()), "api.test")
    }

    #[tokio::test]
    async fn test_token_manager_provides_current_token() {
        let tm = manager(MockTokenRefresher::new());
        assert_eq!(AccessTokenProvider::access_token(&tm).await.unwrap(), None);

        tm.store_tokens(TokenSet::new("abc".to_string(), Some("r".to_string()), 3600))
            .await
            .unwrap();
        assert_eq!(AccessTokenProvider::access_token(&tm).await.unwrap().as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_refresh_failure_maps_to_api_error() {
        let tm = manager(
            MockTokenRefresher::new()
                .with_response(Err(WasteTrackError::Network("refused".to_string()))),
        );
        tm.store_tokens(TokenSet::new("abc".to_string(), Some("r".to_string()), 3600))
            .await
            .unwrap();

        let err = AccessTokenProvider::refresh_access_token(&tm).await.unwrap_err();
        assert_eq!(err.kind(), ApiErrorKind::Transport);
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let tm = manager(MockTokenRefresher::new());
        tm.store_tokens(TokenSet::new("abc".to_string(), None, 3600)).await.unwrap();

        AccessTokenProvider::logout(&tm).await;

        assert!(!tm.is_authenticated().await);
    }
}
