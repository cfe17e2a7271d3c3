//! Address resolution service - core business logic

use std::sync::Arc;

use tracing::{debug, warn};
use wastetrack_common::cache::{Cache, CacheConfig, CacheStats, EvictionPolicy};
use wastetrack_domain::constants::LOCATION_UNAVAILABLE;
use wastetrack_domain::{GeoPoint, GeocodingConfig, LocationInput};

use super::location::parse_legacy_coordinates;
use super::ports::ReverseGeocoder;

/// Reverse geocoding service with a bounded address cache
///
/// Successful lookups are cached by `"{lat},{lng}"`; failures fall back to a
/// coordinate string that is never cached, so the next call retries the
/// provider. Concurrent misses on the same key are not coalesced.
pub struct GeocodeService {
    geocoder: Arc<dyn ReverseGeocoder>,
    cache: Cache<String, String>,
}

impl GeocodeService {
    /// Create a service with an LRU cache holding `capacity` addresses
    pub fn new(geocoder: Arc<dyn ReverseGeocoder>, capacity: usize) -> Self {
        let config = CacheConfig::builder()
            .max_size(capacity)
            .eviction_policy(EvictionPolicy::LRU)
            .track_metrics(true)
            .build();
        Self::with_cache_config(geocoder, config)
    }

    /// Create a service with a custom cache configuration
    pub fn with_cache_config(geocoder: Arc<dyn ReverseGeocoder>, config: CacheConfig) -> Self {
        Self { geocoder, cache: Cache::new(config) }
    }

    /// Create a service sized from configuration
    pub fn from_config(geocoder: Arc<dyn ReverseGeocoder>, config: &GeocodingConfig) -> Self {
        Self::new(geocoder, config.cache_capacity)
    }

    /// Resolve coordinates to a display address
    ///
    /// Never fails: provider errors and empty results yield
    /// `"Lat: {lat}, Long: {lng}"`.
    pub async fn resolve(&self, latitude: f64, longitude: f64) -> String {
        let point = GeoPoint::new(latitude, longitude);
        let key = point.cache_key();

        if let Some(address) = self.cache.get(&key) {
            debug!(key = %key, "Geocode cache hit");
            return address;
        }

        debug!(key = %key, "Geocode cache miss");
        match self.geocoder.reverse_geocode(point).await {
            Ok(address) => {
                self.cache.insert(key, address.clone());
                address
            }
            Err(err) => {
                warn!(key = %key, error = %err, "Reverse geocoding failed, using coordinates");
                format!("Lat: {latitude}, Long: {longitude}")
            }
        }
    }

    /// Render any stored location shape as display text
    ///
    /// - Coordinates resolve through [`Self::resolve`].
    /// - Legacy text embedding `Lat: <n>, Long: <n>` resolves the same way.
    /// - Other legacy text is already an address and is returned trimmed.
    /// - Missing or blank input yields `"Location unavailable"`.
    pub async fn format_location(&self, input: &LocationInput) -> String {
        match input {
            LocationInput::Coordinates(point) => self.resolve(point.latitude, point.longitude).await,
            LocationInput::Legacy(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return LOCATION_UNAVAILABLE.to_string();
                }
                match parse_legacy_coordinates(text) {
                    Some(point) => self.resolve(point.latitude, point.longitude).await,
                    None => text.to_string(),
                }
            }
            LocationInput::Missing => LOCATION_UNAVAILABLE.to_string(),
        }
    }

    /// Cache hit/miss/eviction counters
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop every cached address
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
