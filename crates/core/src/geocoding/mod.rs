//! Reverse geocoding with a bounded address cache
//!
//! [`GeocodeService`] turns coordinates (structured or embedded in legacy
//! free text) into display addresses, calling the [`ReverseGeocoder`] port
//! only on cache misses.

pub mod location;
pub mod ports;
mod service;

pub use location::parse_legacy_coordinates;
pub use ports::{GeocodeError, ReverseGeocoder};
pub use service::GeocodeService;
