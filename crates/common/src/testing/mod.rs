//! Testing utilities and helpers
//!
//! - **[`mocks`]**: in-memory token store and scripted token refresher
//!
//! Time control lives in [`crate::time::MockClock`] and is re-exported here.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use wastetrack_common::auth::TokenManager;
//! use wastetrack_common::testing::{MemoryTokenStore, MockTokenRefresher};
//!
//! let manager =
//!     TokenManager::new(MockTokenRefresher::new(), Arc::new(MemoryTokenStore::new()), "test");
//! assert_eq!(manager.refresh_threshold(), 300);
//! ```

pub mod mocks;

pub use mocks::{MemoryTokenStore, MockTokenRefresher};

pub use crate::time::MockClock;
