//! Single-retry reauthentication policy

use reqwest::StatusCode;

use super::auth::AccessTokenProvider;
use super::errors::ApiError;
use super::request::ApiRequest;

/// When and how the client re-authenticates a rejected request
///
/// The default policy retries at most once, only on `401 Unauthorized`, and
/// obtains the new token from [`AccessTokenProvider::refresh_access_token`].
#[derive(Debug, Clone, Copy)]
pub struct ReauthPolicy {
    max_retries: u32,
    trigger: fn(StatusCode) -> bool,
}

impl Default for ReauthPolicy {
    fn default() -> Self {
        Self { max_retries: 1, trigger: is_unauthorized }
    }
}

impl ReauthPolicy {
    /// Policy that never re-authenticates
    pub fn disabled() -> Self {
        Self { max_retries: 0, trigger: is_unauthorized }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Whether `status` should trigger the policy at all
    pub fn triggers_on(&self, status: StatusCode) -> bool {
        (self.trigger)(status)
    }

    /// Whether `request` may be re-sent after receiving `status`
    ///
    /// A request already tagged `retried` never qualifies.
    pub fn should_retry(&self, request: &ApiRequest, status: StatusCode) -> bool {
        self.max_retries > 0 && !request.is_retried() && self.triggers_on(status)
    }

    /// Obtain a fresh token from the provider
    pub async fn refresh(&self, provider: &dyn AccessTokenProvider) -> Result<String, ApiError> {
        provider.refresh_access_token().await
    }
}

fn is_unauthorized(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_retries_fresh_401_once() {
        let policy = ReauthPolicy::default();
        let mut request = ApiRequest::get("/me");

        assert_eq!(policy.max_retries(), 1);
        assert!(policy.should_retry(&request, StatusCode::UNAUTHORIZED));

        request.mark_retried();
        assert!(!policy.should_retry(&request, StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn other_statuses_do_not_trigger() {
        let policy = ReauthPolicy::default();
        let request = ApiRequest::get("/me");

        assert!(!policy.should_retry(&request, StatusCode::FORBIDDEN));
        assert!(!policy.should_retry(&request, StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!policy.should_retry(&request, StatusCode::OK));
    }

    #[test]
    fn disabled_policy_never_retries() {
        let policy = ReauthPolicy::disabled();
        assert!(policy.triggers_on(StatusCode::UNAUTHORIZED));
        assert!(!policy.should_retry(&ApiRequest::get("/me"), StatusCode::UNAUTHORIZED));
    }
}
