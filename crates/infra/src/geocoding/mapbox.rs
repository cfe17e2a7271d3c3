//! Mapbox-style reverse geocoding
//!
//! `GET {endpoint}/{lng},{lat}.json?access_token=..&limit=1`, answered with
//! `{ "features": [ { "place_name": ".." } ] }`. Requests go through the plain
//! [`HttpClient`]; the provider has its own credential and never sees the
//! API bearer token.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument, warn};
use url::Url;
use wastetrack_core::geocoding::{GeocodeError, ReverseGeocoder};
use wastetrack_domain::{GeoPoint, GeocodingConfig, Result, WasteTrackError};

use crate::http::HttpClient;

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    place_name: String,
}

/// [`ReverseGeocoder`] backed by a Mapbox-compatible places endpoint
#[derive(Clone)]
pub struct MapboxGeocoder {
    http: HttpClient,
    endpoint: String,
    access_token: String,
}

impl MapboxGeocoder {
    /// # Errors
    ///
    /// Returns `WasteTrackError::Config` if the endpoint is not a valid URL
    /// or the HTTP client cannot be built.
    pub fn new(config: &GeocodingConfig) -> Result<Self> {
        Url::parse(&config.endpoint).map_err(|e| {
            WasteTrackError::Config(format!(
                "Invalid geocoding endpoint '{}': {e}",
                config.endpoint
            ))
        })?;

        Ok(Self {
            http: HttpClient::new()?,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        })
    }

    fn lookup_url(&self, point: GeoPoint) -> String {
        format!("{}/{},{}.json", self.endpoint, point.longitude, point.latitude)
    }
}

impl std::fmt::Debug for MapboxGeocoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapboxGeocoder")
            .field("endpoint", &self.endpoint)
            .field("access_token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ReverseGeocoder for MapboxGeocoder {
    #[instrument(skip(self), fields(lat = point.latitude, lng = point.longitude))]
    async fn reverse_geocode(&self, point: GeoPoint) -> std::result::Result<String, GeocodeError> {
        let request = self
            .http
            .request(reqwest::Method::GET, &self.lookup_url(point))
            .query(&[("access_token", self.access_token.as_str()), ("limit", "1")]);

        let response = self.http.send(request).await.map_err(|e| {
            warn!(error = %e, "Geocoding request failed");
            GeocodeError::Provider(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Geocoding provider returned error status");
            return Err(GeocodeError::Provider(format!("provider returned {status}")));
        }

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| GeocodeError::Provider(format!("invalid provider response: {e}")))?;

        let place = body.features.into_iter().next().ok_or(GeocodeError::NoResults)?;
        debug!("Resolved address");
        Ok(place.place_name)
    }
}
