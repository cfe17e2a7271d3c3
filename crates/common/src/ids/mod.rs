//! Reversible identifier obfuscation for URLs plus a one-way display hash.
//!
//! Tokens look like `MTIzfGxzaHc0YTJifHNlY3JldA` and carry the real ID, the
//! encode time in base-36 milliseconds, and the shared secret. Only a codec
//! holding the same secret decodes them.
//!
//! ```
//! use wastetrack_common::ids::IdCodec;
//!
//! let codec = IdCodec::new("shared-secret");
//! let token = codec.encode("pickup-42");
//! assert_eq!(codec.decode(&token).as_deref(), Some("pickup-42"));
//! assert!(codec.hash("pickup-42").starts_with('#'));
//! ```

mod base36;
mod codec;

pub use base36::to_base36;
pub use codec::IdCodec;
