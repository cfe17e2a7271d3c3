//! Integration tests for the ID obfuscation codec

#![cfg(feature = "foundation")]

use wastetrack_common::ids::{to_base36, IdCodec};
use wastetrack_common::time::MockClock;

/// Validates that tokens minted at different times all decode to the same
/// ID while differing on the wire.
#[test]
fn test_tokens_vary_with_time_but_decode_identically() {
    let codec = IdCodec::new("k-1");
    let early = codec.encode_at("order-77", 1_000);
    let late = codec.encode_at("order-77", 2_000_000_000_000);

    assert_ne!(early, late);
    assert_eq!(codec.decode(&early).as_deref(), Some("order-77"));
    assert_eq!(codec.decode(&late).as_deref(), Some("order-77"));
}

#[test]
fn test_secret_rotation_invalidates_old_tokens() {
    let old = IdCodec::new("2023-secret");
    let new = IdCodec::new("2024-secret");
    let token = old.encode("bank-3");

    assert_eq!(new.decode(&token), None);
    assert_ne!(old.hash("bank-3"), new.hash("bank-3"));
}

#[test]
fn test_clock_drives_embedded_timestamp() {
    let clock = MockClock::at_epoch_millis(36);
    let codec = IdCodec::with_clock("k", clock.clone());
    assert_eq!(codec.encode("x"), codec.encode_at("x", 36));

    clock.advance(std::time::Duration::from_millis(1));
    assert_eq!(codec.encode("x"), codec.encode_at("x", 37));
    assert_eq!(to_base36(37), "11");
}

#[test]
fn test_hash_shape() {
    let hash = IdCodec::new("k").hash("pickup-1");
    assert_eq!(hash.len(), 9);
    assert!(hash.starts_with('#'));
    assert!(hash[1..].chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
}
