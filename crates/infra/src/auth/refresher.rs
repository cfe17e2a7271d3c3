//! REST implementation of [`TokenRefresher`]
//!
//! `POST {base_url}/auth/refresh` with `{ "refreshToken": .. }`, answered with
//! `{ "accessToken", "refreshToken"?, "expiresIn", "user"? }`. The refresh
//! call goes through the plain [`HttpClient`] so a rejected refresh never
//! re-enters the reauthentication path.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use wastetrack_common::auth::{TokenRefresher, TokenSet};
use wastetrack_domain::{ApiConfig, CurrentUser, Result, WasteTrackError};

use crate::api::extract_error_message;
use crate::errors::InfraError;
use crate::http::HttpClient;

const REFRESH_PATH: &str = "auth/refresh";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: i64,
    #[serde(default)]
    user: Option<CurrentUser>,
}

impl From<RefreshResponse> for TokenSet {
    fn from(response: RefreshResponse) -> Self {
        let tokens = Self::new(response.access_token, response.refresh_token, response.expires_in);
        match response.user {
            Some(user) => tokens.with_user(user),
            None => tokens,
        }
    }
}

/// Token refresher for the WasteTrack auth endpoint
#[derive(Debug, Clone)]
pub struct RestTokenRefresher {
    http: HttpClient,
    refresh_url: String,
}

impl RestTokenRefresher {
    /// # Errors
    ///
    /// Returns `WasteTrackError::Config` if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = HttpClient::with_timeout(config.timeout())?;
        let refresh_url = format!("{}/{REFRESH_PATH}", config.base_url.trim_end_matches('/'));

        Ok(Self { http, refresh_url })
    }
}

#[async_trait]
impl TokenRefresher for RestTokenRefresher {
    #[instrument(skip(self, refresh_token))]
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<TokenSet> {
        let request = self
            .http
            .request(reqwest::Method::POST, &self.refresh_url)
            .json(&RefreshRequest { refresh_token });

        let response = self.http.send(request).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Token refresh rejected");
            return Err(WasteTrackError::Auth(extract_error_message(&body)));
        }

        let bytes = response.bytes().await.map_err(InfraError::from)?;
        let parsed: RefreshResponse = serde_json::from_slice(&bytes).map_err(|e| {
            WasteTrackError::Internal(format!("invalid refresh response: {e}"))
        })?;

        debug!(expires_in = parsed.expires_in, "Access token refreshed");
        Ok(parsed.into())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wastetrack_domain::UserRole;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn refresher(server: &MockServer) -> RestTokenRefresher {
        RestTokenRefresher::new(&ApiConfig {
            base_url: format!("{}/api/", server.uri()),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_refresh_maps_camel_case_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/refresh"))
            .and(body_json(json!({ "refreshToken": "r-1" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "accessToken": "a-2",
                "refreshToken": "r-2",
                "expiresIn": 900,
                "user": { "id": "u-1", "name": "Sari", "role": "collector" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tokens = refresher(&server).refresh_access_token("r-1").await.unwrap();

        assert_eq!(tokens.access_token, "a-2");
        assert_eq!(tokens.refresh_token.as_deref(), Some("r-2"));
        assert_eq!(tokens.expires_in, 900);
        assert!(tokens.expires_at.is_some());
        assert_eq!(tokens.user.map(|u| u.role), Some(UserRole::Collector));
    }

    #[tokio::test]
    async fn test_refresh_without_rotation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "accessToken": "a-2", "expiresIn": 60 })),
            )
            .mount(&server)
            .await;

        let tokens = refresher(&server).refresh_access_token("r-1").await.unwrap();

        assert_eq!(tokens.refresh_token, None);
        assert_eq!(tokens.user, None);
    }

    /// Validates a server lifetime beyond the representable date range.
    ///
    /// Assertions:
    /// - Refresh succeeds and the token is treated as non-expiring.
    #[tokio::test]
    async fn test_huge_expires_in_is_treated_as_no_expiry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "accessToken": "a-2",
                "expiresIn": 10_000_000_000_000_i64
            })))
            .mount(&server)
            .await;

        let tokens = refresher(&server).refresh_access_token("r-1").await.unwrap();

        assert_eq!(tokens.access_token, "a-2");
        assert_eq!(tokens.expires_in, 10_000_000_000_000);
        assert_eq!(tokens.expires_at, None);
        assert!(!tokens.is_expired(300));
    }

    #[tokio::test]
    async fn test_rejected_refresh_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "error": "Refresh token revoked" })),
            )
            .mount(&server)
            .await;

        let err = refresher(&server).refresh_access_token("r-1").await.unwrap_err();

        assert_eq!(err, WasteTrackError::Auth("Refresh token revoked".into()));
    }

    #[tokio::test]
    async fn test_malformed_response_is_internal_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "x" })))
            .mount(&server)
            .await;

        let err = refresher(&server).refresh_access_token("r-1").await.unwrap_err();

        assert!(matches!(err, WasteTrackError::Internal(_)));
    }
}
