//! Infrastructure adapters for the token manager ports

mod keyring_store;
mod refresher;

pub use keyring_store::KeyringTokenStore;
pub use refresher::RestTokenRefresher;
