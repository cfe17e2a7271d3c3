//! Single-attempt HTTP transport
//!
//! Resending is a caller decision: the API client applies its reauth policy,
//! provider adapters fail fast and let their callers fall back.

use std::time::Duration;

use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;
use wastetrack_domain::constants::DEFAULT_API_TIMEOUT_SECS;
use wastetrack_domain::WasteTrackError;

use crate::errors::InfraError;

/// reqwest client with a fixed per-request timeout
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Client with the default API timeout
    ///
    /// # Errors
    /// Returns `WasteTrackError::Config` if the TLS backend cannot be
    /// initialised.
    pub fn new() -> Result<Self, WasteTrackError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_API_TIMEOUT_SECS))
    }

    /// # Errors
    /// Returns `WasteTrackError::Config` if the TLS backend cannot be
    /// initialised.
    pub fn with_timeout(timeout: Duration) -> Result<Self, WasteTrackError> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(InfraError::from)?;

        Ok(Self { client })
    }

    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute `builder` once and map transport failures
    ///
    /// Any HTTP status, including 5xx, is returned as `Ok`.
    ///
    /// # Errors
    /// Returns `WasteTrackError::Network` when no response arrives and
    /// `WasteTrackError::Config` when the request cannot be built.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, WasteTrackError> {
        let request = builder.build().map_err(InfraError::from)?;

        let method = request.method().clone();
        let path = request.url().path().to_string();
        debug!(%method, %path, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(%method, %path, status = %response.status(), "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %path, error = %err, "HTTP request failed");
                Err(InfraError::from(err).into())
            }
        }
    }
}
