//! Session token types
//!
//! A `TokenSet` is what the auth endpoints hand back after login or refresh,
//! plus the absolute expiry we derive from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wastetrack_domain::constants::DEFAULT_TOKEN_TYPE;
use wastetrack_domain::CurrentUser;

/// Access and refresh tokens with expiry metadata and the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    /// Bearer token for API authentication
    pub access_token: String,

    /// Token used to obtain a new access token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Access token lifetime in seconds (0 = no expiry)
    pub expires_in: i64,

    /// Absolute expiration timestamp (UTC), derived from `expires_in`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    /// User the tokens were issued to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<CurrentUser>,
}

impl TokenSet {
    /// Create a `TokenSet` whose `expires_at` is computed from now
    #[must_use]
    pub fn new(access_token: String, refresh_token: Option<String>, expires_in: i64) -> Self {
        let expires_at = if expires_in > 0 { offset_from_now(expires_in) } else { None };

        Self {
            access_token,
            refresh_token,
            token_type: DEFAULT_TOKEN_TYPE.to_string(),
            expires_in,
            expires_at,
            user: None,
        }
    }

    /// Attach the signed-in user
    #[must_use]
    pub fn with_user(mut self, user: CurrentUser) -> Self {
        self.user = Some(user);
        self
    }

    /// Whether the access token is expired or expires within
    /// `threshold_seconds`
    ///
    /// Tokens without an expiry never count as expired. A threshold outside
    /// the representable date range counts as expired when positive.
    #[must_use]
    pub fn is_expired(&self, threshold_seconds: i64) -> bool {
        self.expires_at.is_some_and(|expires_at| {
            offset_from_now(threshold_seconds)
                .map_or(threshold_seconds > 0, |deadline| deadline >= expires_at)
        })
    }

    /// Seconds until expiry, negative once expired
    #[must_use]
    pub fn seconds_until_expiry(&self) -> Option<i64> {
        self.expires_at.map(|expires_at| (expires_at - Utc::now()).num_seconds())
    }
}

/// `now + seconds`, or `None` when the result is out of chrono's range
fn offset_from_now(seconds: i64) -> Option<DateTime<Utc>> {
    chrono::Duration::try_seconds(seconds).and_then(|delta| Utc::now().checked_add_signed(delta))
}

#[cfg(test)]
mod tests {
    //! Unit tests for auth::types.
    use wastetrack_domain::UserRole;

    use super::*;

    fn user() -> CurrentUser {
        CurrentUser {
            id: "u-1".to_string(),
            name: "Sari".to_string(),
            email: None,
            role: UserRole::Collector,
        }
    }

    /// Validates `TokenSet::new` behavior for the expiry calculation scenario.
    ///
    /// Assertions:
    /// - Ensures `expires_at` is set for positive lifetimes.
    /// - Ensures a one-hour token is not expired with a 5 minute threshold.
    #[test]
    fn test_token_set_expiry_calculation() {
        let tokens = TokenSet::new("access".to_string(), Some("refresh".to_string()), 3600);

        assert!(tokens.expires_at.is_some());
        assert!(!tokens.is_expired(300));
        assert!(tokens.is_expired(3600));
        assert!(tokens.seconds_until_expiry().is_some_and(|s| s > 3500));
    }

    #[test]
    fn test_token_set_without_expiry_never_expires() {
        let tokens = TokenSet::new("access".to_string(), None, 0);
        assert_eq!(tokens.expires_at, None);
        assert!(!tokens.is_expired(i64::from(i32::MAX)));
        assert_eq!(tokens.seconds_until_expiry(), None);
    }

    /// Validates lifetimes beyond the representable date range.
    ///
    /// Assertions:
    /// - Ensures an unrepresentable `expires_in` yields no expiry instead of
    ///   overflowing.
    /// - Ensures an unrepresentable threshold reports the token as expired.
    #[test]
    fn test_out_of_range_lifetimes_do_not_overflow() {
        let unbounded = TokenSet::new("a".to_string(), None, 10_000_000_000_000);
        assert_eq!(unbounded.expires_at, None);
        assert!(!unbounded.is_expired(300));

        let hourly = TokenSet::new("a".to_string(), None, 3600);
        assert!(hourly.is_expired(i64::MAX));
        assert!(!hourly.is_expired(i64::MIN));
    }

    #[test]
    fn test_serde_round_trip_keeps_user() {
        let tokens = TokenSet::new("access".to_string(), None, 60).with_user(user());
        let json = serde_json::to_string(&tokens).unwrap();
        let back: TokenSet = serde_json::from_str(&json).unwrap();

        assert_eq!(back, tokens);
        assert!(!json.contains("refresh_token"));
    }
}
