//! # WasteTrack Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for external providers
//! - Services built on those ports
//!
//! ## Architecture Principles
//! - Only depends on `wastetrack-common` and `wastetrack-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits

pub mod geocoding;

pub use geocoding::ports::{GeocodeError, ReverseGeocoder};
pub use geocoding::GeocodeService;
