//! Port interfaces for reverse geocoding
//!
//! Implemented in infra by the Mapbox adapter; core only sees this trait.

use async_trait::async_trait;
use thiserror::Error;
use wastetrack_domain::GeoPoint;

/// Reverse geocoding failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// Provider answered but had no place for the coordinates
    #[error("no address found for coordinates")]
    NoResults,

    /// Provider call failed (network, HTTP status, malformed body)
    #[error("geocoding provider error: {0}")]
    Provider(String),
}

/// Resolves coordinates to a human-readable place name
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Look up the place name for `point`
    async fn reverse_geocode(&self, point: GeoPoint) -> Result<String, GeocodeError>;
}
