//! Authenticated API client
//!
//! Decorates [`HttpClient::send`] with bearer-token injection and the
//! [`ReauthPolicy`]: one refresh-and-resend on `401`, then logout.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};
use url::Url;
use wastetrack_domain::constants::{DEFAULT_API_BASE_URL, DEFAULT_API_TIMEOUT_SECS};
use wastetrack_domain::{ApiConfig, WasteTrackError};

use super::auth::AccessTokenProvider;
use super::errors::ApiError;
use super::reauth::ReauthPolicy;
use super::request::ApiRequest;
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Backstop added to reqwest's own timeout so the outer timer, which reports
/// the configured limit, fires first.
const TRANSPORT_TIMEOUT_GRACE: Duration = Duration::from_secs(1);

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for API (e.g., "http://localhost:5000/api")
    pub base_url: String,
    /// Timeout for API requests
    pub timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
        }
    }
}

impl From<&ApiConfig> for ApiClientConfig {
    fn from(config: &ApiConfig) -> Self {
        Self { base_url: config.base_url.clone(), timeout: config.timeout() }
    }
}

/// API client with transparent reauthentication
pub struct ApiClient {
    http_client: Arc<HttpClient>,
    auth: Arc<dyn AccessTokenProvider>,
    config: ApiClientConfig,
    reauth: ReauthPolicy,
}

impl ApiClient {
    /// Create a new API client with the default [`ReauthPolicy`]
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the base URL is invalid or the HTTP
    /// client cannot be built
    pub fn new(
        config: ApiClientConfig,
        auth: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self, ApiError> {
        Self::with_policy(config, auth, ReauthPolicy::default())
    }

    /// Create a new API client with an explicit reauthentication policy
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the base URL is invalid or the HTTP
    /// client cannot be built
    pub fn with_policy(
        config: ApiClientConfig,
        auth: Arc<dyn AccessTokenProvider>,
        reauth: ReauthPolicy,
    ) -> Result<Self, ApiError> {
        Url::parse(&config.base_url).map_err(|e| {
            ApiError::Config(format!("Invalid API base URL '{}': {e}", config.base_url))
        })?;

        let http_client =
            HttpClient::with_timeout(config.timeout.saturating_add(TRANSPORT_TIMEOUT_GRACE))
                .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))?;

        Ok(Self { http_client: Arc::new(http_client), auth, config, reauth })
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// Execute a GET request
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be
    /// deserialized
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.execute(ApiRequest::get(path)).await
    }

    /// Execute a POST request with a JSON body
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be
    /// deserialized
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        self.execute(ApiRequest::new(Method::POST, path).with_json(body)?).await
    }

    /// Execute a PUT request with a JSON body
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be
    /// deserialized
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn put<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        self.execute(ApiRequest::new(Method::PUT, path).with_json(body)?).await
    }

    /// Execute a PATCH request with a JSON body
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be
    /// deserialized
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn patch<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        self.execute(ApiRequest::new(Method::PATCH, path).with_json(body)?).await
    }

    /// Execute a DELETE request
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be
    /// deserialized
    #[instrument(skip(self), fields(path = %path))]
    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.execute(ApiRequest::delete(path)).await
    }

    /// Send a prepared request through the auth decorator
    ///
    /// 1. Attach the provider's current token, if any.
    /// 2. On a `401` for a request not yet retried, refresh through the
    ///    policy, tag the request `retried`, and resend once.
    /// 3. If the refresh fails or the resend is still `401`, log out once
    ///    and return [`ApiError::Unauthorized`].
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status, or a body that
    /// does not deserialize into `R`
    #[instrument(skip(self, request), fields(method = %request.method(), path = %request.path()))]
    pub async fn execute<R: DeserializeOwned>(&self, mut request: ApiRequest) -> Result<R, ApiError> {
        match self.auth.access_token().await {
            Ok(Some(token)) => request.set_bearer(&token)?,
            Ok(None) => debug!("No access token available, sending unauthenticated"),
            Err(err) => {
                warn!(error = %err, "Failed to obtain access token, sending unauthenticated");
            }
        }

        loop {
            let response = self.send(&request).await?;
            let status = response.status();

            if status.is_success() {
                let result = Self::decode(response).await?;
                debug!(%status, "Request successful");
                return Ok(result);
            }

            if self.reauth.should_retry(&request, status) {
                match self.reauth.refresh(self.auth.as_ref()).await {
                    Ok(token) => {
                        info!("Access token refreshed, retrying request");
                        request.mark_retried();
                        request.set_bearer(&token)?;
                        continue;
                    }
                    Err(err) => {
                        warn!(error = %err, "Token refresh failed, logging out");
                        let body = response.text().await.unwrap_or_default();
                        self.auth.logout().await;
                        return Err(ApiError::unauthorized(&body));
                    }
                }
            }

            let body = response.text().await.unwrap_or_default();

            if self.reauth.triggers_on(status) {
                if request.is_retried() {
                    warn!(%status, "Request still unauthorized after reauthentication, logging out");
                    self.auth.logout().await;
                }
                return Err(ApiError::unauthorized(&body));
            }

            return Err(ApiError::from_response(status, &body));
        }
    }

    /// Health check for API
    ///
    /// Unauthenticated `GET {base_url}/health`.
    ///
    /// # Returns
    ///
    /// `true` if API is reachable and healthy
    ///
    /// # Errors
    ///
    /// Returns error if the API cannot be reached
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<bool, ApiError> {
        let url = self.url("/health");

        debug!(url = %url, "Health check");

        let request = self.http_client.request(Method::GET, &url);
        let response = tokio::time::timeout(HEALTH_CHECK_TIMEOUT, self.http_client.send(request))
            .await
            .map_err(|_| {
                warn!("Health check timeout");
                ApiError::Timeout(HEALTH_CHECK_TIMEOUT)
            })?;

        match response {
            Ok(resp) if resp.status().is_success() => {
                info!("API is healthy");
                Ok(true)
            }
            Ok(resp) => {
                warn!(status = %resp.status(), "API returned non-success status");
                Ok(false)
            }
            Err(e) => {
                warn!(error = %e, "Health check failed");
                Err(ApiError::from(e))
            }
        }
    }

    async fn send(&self, request: &ApiRequest) -> Result<Response, ApiError> {
        let url = self.url(request.path());

        let mut builder = self
            .http_client
            .request(request.method().clone(), &url)
            .headers(request.headers().clone())
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let timeout = self.config.timeout;
        match tokio::time::timeout(timeout, self.http_client.send(builder)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(err)) => Err(ApiError::from(err)),
            Err(_) => Err(ApiError::Timeout(timeout)),
        }
    }

    async fn decode<R: DeserializeOwned>(response: Response) -> Result<R, ApiError> {
        let status = response.status();

        // These status codes have no body by RFC spec
        if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
            return serde_json::from_value(Value::Null).map_err(|_| {
                ApiError::Decode(format!(
                    "No content response ({}), but response type cannot be deserialized from null",
                    status.as_u16()
                ))
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::from(WasteTrackError::from(InfraError::from(e))))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return serde_json::from_value(Value::Null)
                .map_err(|_| ApiError::Decode("Empty response body".to_string()));
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::Decode(format!("Failed to parse response: {e}")))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiClientConfig>,
    auth: Option<Arc<dyn AccessTokenProvider>>,
    reauth: Option<ReauthPolicy>,
}

impl ApiClientBuilder {
    /// Set the API configuration
    pub fn config(mut self, config: ApiClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the authentication provider
    pub fn auth(mut self, auth: Arc<dyn AccessTokenProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Override the reauthentication policy
    pub fn reauth_policy(mut self, policy: ReauthPolicy) -> Self {
        self.reauth = Some(policy);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if required fields are missing or client creation fails
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let auth =
            self.auth.ok_or_else(|| ApiError::Config("Auth provider not set".to_string()))?;

        ApiClient::with_policy(config, auth, self.reauth.unwrap_or_default())
    }
}
