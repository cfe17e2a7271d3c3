//! Conversions from external infrastructure errors into domain errors.

use keyring::Error as KeyringError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use wastetrack_domain::WasteTrackError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub WasteTrackError);

impl From<InfraError> for WasteTrackError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<WasteTrackError> for InfraError {
    fn from(value: WasteTrackError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoWasteTrackError {
    fn into_wastetrack(self) -> WasteTrackError;
}

/* -------------------------------------------------------------------------- */
/* keyring::Error → WasteTrackError */
/* -------------------------------------------------------------------------- */

impl IntoWasteTrackError for KeyringError {
    fn into_wastetrack(self) -> WasteTrackError {
        let description = self.to_string();

        match self {
            KeyringError::NoEntry => WasteTrackError::NotFound("keychain entry not found".into()),
            KeyringError::BadEncoding(_) => {
                WasteTrackError::Security("credential in keychain is not valid UTF-8".into())
            }
            KeyringError::TooLong(name, limit) => WasteTrackError::Security(format!(
                "keychain attribute '{name}' exceeds platform limit ({limit})"
            )),
            KeyringError::Invalid(attr, reason) => WasteTrackError::Security(format!(
                "keychain attribute '{attr}' is invalid: {reason}"
            )),
            KeyringError::PlatformFailure(err) => {
                WasteTrackError::Security(format!("keychain platform error: {err}"))
            }
            KeyringError::NoStorageAccess(err) => {
                WasteTrackError::Security(format!("unable to access secure storage: {err}"))
            }
            _ => WasteTrackError::Security(description),
        }
    }
}

impl From<KeyringError> for InfraError {
    fn from(value: KeyringError) -> Self {
        InfraError(value.into_wastetrack())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → WasteTrackError */
/* -------------------------------------------------------------------------- */

impl IntoWasteTrackError for HttpError {
    fn into_wastetrack(self) -> WasteTrackError {
        if self.is_timeout() {
            return WasteTrackError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return WasteTrackError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return WasteTrackError::Config(format!("invalid HTTP request: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));
            return match code {
                401 | 403 => WasteTrackError::Auth(message),
                404 => WasteTrackError::NotFound(message),
                400..=499 => WasteTrackError::InvalidInput(message),
                _ => WasteTrackError::Network(message),
            };
        }

        WasteTrackError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_wastetrack())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → WasteTrackError */
/* -------------------------------------------------------------------------- */

impl IntoWasteTrackError for JsonError {
    fn into_wastetrack(self) -> WasteTrackError {
        WasteTrackError::Internal(format!("invalid JSON payload: {self}"))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_wastetrack())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use reqwest::{Client, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn keyring_no_entry_maps_to_not_found() {
        let mapped: WasteTrackError = InfraError::from(KeyringError::NoEntry).into();
        match mapped {
            WasteTrackError::NotFound(msg) => assert!(msg.contains("keychain")),
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[test]
    fn keyring_too_long_maps_to_security() {
        let mapped: WasteTrackError =
            InfraError::from(KeyringError::TooLong("password".into(), 512)).into();
        assert!(matches!(mapped, WasteTrackError::Security(msg) if msg.contains("512")));
    }

    #[test]
    fn json_error_maps_to_internal() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let mapped: WasteTrackError = InfraError::from(err).into();
        assert!(matches!(mapped, WasteTrackError::Internal(_)));
    }

    #[tokio::test]
    async fn http_status_401_maps_to_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(StatusCode::UNAUTHORIZED))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

        let mapped: WasteTrackError = InfraError::from(error).into();
        match mapped {
            WasteTrackError::Auth(msg) => assert!(msg.contains("401")),
            other => panic!("expected auth error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn connection_refused_maps_to_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(format!("http://{addr}")).send().await.unwrap_err();

        let mapped: WasteTrackError = InfraError::from(error).into();
        assert!(matches!(mapped, WasteTrackError::Network(_)));
    }
}
