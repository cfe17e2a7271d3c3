//! Session token persistence in the platform keychain
//!
//! Each account maps to one keychain entry holding the JSON-encoded
//! [`TokenSet`]. Entries are created once per account and reused, so backends
//! that keep credentials on the entry object (the keyring mock store) behave
//! like the real platform stores.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use keyring::Entry;
use parking_lot::Mutex;
use tracing::debug;
use wastetrack_common::auth::{TokenSet, TokenStore};
use wastetrack_domain::constants::KEYRING_SERVICE_NAME;
use wastetrack_domain::{Result, WasteTrackError};

use crate::errors::InfraError;

/// [`TokenStore`] backed by the `keyring` crate
#[derive(Debug, Clone)]
pub struct KeyringTokenStore {
    service_name: String,
    entries: Arc<Mutex<HashMap<String, Arc<Entry>>>>,
}

impl KeyringTokenStore {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into(), entries: Arc::new(Mutex::new(HashMap::new())) }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    fn entry(&self, account: &str) -> Result<Arc<Entry>> {
        let mut entries = self.entries.lock();
        if let Some(entry) = entries.get(account) {
            return Ok(Arc::clone(entry));
        }

        let entry = Arc::new(Entry::new(&self.service_name, account).map_err(InfraError::from)?);
        entries.insert(account.to_string(), Arc::clone(&entry));
        Ok(entry)
    }
}

impl Default for KeyringTokenStore {
    fn default() -> Self {
        Self::new(KEYRING_SERVICE_NAME)
    }
}

#[async_trait]
impl TokenStore for KeyringTokenStore {
    async fn store_tokens(&self, account: &str, tokens: &TokenSet) -> Result<()> {
        debug!(account = %account, "Storing session tokens");

        let payload = serde_json::to_string(tokens).map_err(InfraError::from)?;
        self.entry(account)?.set_password(&payload).map_err(InfraError::from)?;
        Ok(())
    }

    async fn retrieve_tokens(&self, account: &str) -> Result<Option<TokenSet>> {
        debug!(account = %account, "Retrieving session tokens");

        let payload = match self.entry(account)?.get_password() {
            Ok(payload) => payload,
            Err(keyring::Error::NoEntry) => return Ok(None),
            Err(e) => return Err(InfraError::from(e).into()),
        };

        serde_json::from_str(&payload).map(Some).map_err(|e| {
            WasteTrackError::Security(format!("stored session for '{account}' is corrupt: {e}"))
        })
    }

    async fn delete_tokens(&self, account: &str) -> Result<()> {
        debug!(account = %account, "Deleting session tokens");

        match self.entry(account)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(InfraError::from(e).into()),
        }
    }

    async fn has_tokens(&self, account: &str) -> bool {
        self.entry(account).is_ok_and(|entry| entry.get_password().is_ok())
    }
}
