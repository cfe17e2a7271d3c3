//! Mock implementations of the auth ports

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use wastetrack_domain::{Result, WasteTrackError};

use crate::auth::{TokenRefresher, TokenSet, TokenStore};

/// In-memory [`TokenStore`]
///
/// Clones share storage. Values go through JSON like a real keychain entry
/// would.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    storage: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryTokenStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.lock().len()
    }

    /// Whether nothing is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store raw text under `account`, bypassing serialization
    pub fn insert_raw(&self, account: &str, value: &str) {
        self.storage.lock().insert(account.to_string(), value.to_string());
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn store_tokens(&self, account: &str, tokens: &TokenSet) -> Result<()> {
        let json = serde_json::to_string(tokens)
            .map_err(|e| WasteTrackError::Internal(format!("serialize tokens: {e}")))?;
        self.storage.lock().insert(account.to_string(), json);
        Ok(())
    }

    async fn retrieve_tokens(&self, account: &str) -> Result<Option<TokenSet>> {
        let Some(json) = self.storage.lock().get(account).cloned() else {
            return Ok(None);
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| WasteTrackError::Security(format!("corrupt stored tokens: {e}")))
    }

    async fn delete_tokens(&self, account: &str) -> Result<()> {
        self.storage.lock().remove(account);
        Ok(())
    }

    async fn has_tokens(&self, account: &str) -> bool {
        self.storage.lock().contains_key(account)
    }
}

/// Scripted [`TokenRefresher`]
///
/// Replays queued responses in order; once the queue is empty every call
/// succeeds with `refreshed-<n>` valid for an hour. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockTokenRefresher {
    responses: Arc<Mutex<VecDeque<Result<TokenSet>>>>,
    calls: Arc<AtomicUsize>,
    last_refresh_token: Arc<Mutex<Option<String>>>,
}

impl MockTokenRefresher {
    /// Create a refresher that always succeeds
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next call
    #[must_use]
    pub fn with_response(self, response: Result<TokenSet>) -> Self {
        self.responses.lock().push_back(response);
        self
    }

    /// Number of refresh calls made
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Refresh token passed to the most recent call
    #[must_use]
    pub fn last_refresh_token(&self) -> Option<String> {
        self.last_refresh_token.lock().clone()
    }
}

#[async_trait]
impl TokenRefresher for MockTokenRefresher {
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<TokenSet> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_refresh_token.lock() = Some(refresh_token.to_string());

        let queued = self.responses.lock().pop_front();
        queued.unwrap_or_else(|| Ok(TokenSet::new(format!("refreshed-{call}"), None, 3600)))
    }
}
