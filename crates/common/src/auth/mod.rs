//! Session token lifecycle
//!
//! - [`TokenSet`]: access/refresh pair with expiry and the signed-in user
//! - [`TokenStore`] / [`TokenRefresher`]: ports implemented by infra
//!   adapters (keyring, REST) and by in-memory doubles in tests
//! - [`TokenManager`]: loads, refreshes, and clears the session

mod token_manager;
mod traits;
mod types;

pub use token_manager::{TokenManager, TokenManagerError};
pub use traits::{TokenRefresher, TokenStore};
pub use types::TokenSet;
