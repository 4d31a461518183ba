//! Conversions from external infrastructure errors into domain errors.

use pausecal_domain::PauseCalError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub PauseCalError);

impl From<InfraError> for PauseCalError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PauseCalError> for InfraError {
    fn from(value: PauseCalError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoPauseCalError {
    fn into_pausecal(self) -> PauseCalError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → PauseCalError */
/* -------------------------------------------------------------------------- */

impl IntoPauseCalError for HttpError {
    fn into_pausecal(self) -> PauseCalError {
        if self.is_timeout() {
            return PauseCalError::Gateway("HTTP request timed out".into());
        }

        if self.is_connect() {
            return PauseCalError::Gateway("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            return status_error(status, None);
        }

        if self.is_decode() {
            return PauseCalError::Gateway(format!("unexpected response body: {self}"));
        }

        PauseCalError::Gateway(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_pausecal())
    }
}

/// Map a non-success status (plus an optional provider message) to a domain
/// error.
pub fn status_error(status: reqwest::StatusCode, detail: Option<&str>) -> PauseCalError {
    let code = status.as_u16();
    let mut message =
        format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));
    if let Some(detail) = detail.filter(|d| !d.is_empty()) {
        message.push_str(": ");
        message.push_str(detail);
    }

    match code {
        401 | 403 => PauseCalError::Auth(message),
        404 | 410 => PauseCalError::NotFound(message),
        _ => PauseCalError::Gateway(message),
    }
}

/* -------------------------------------------------------------------------- */
/* jsonwebtoken::errors::Error → PauseCalError */
/* -------------------------------------------------------------------------- */

impl IntoPauseCalError for jsonwebtoken::errors::Error {
    fn into_pausecal(self) -> PauseCalError {
        PauseCalError::Auth(format!("failed to sign token assertion: {self}"))
    }
}

impl From<jsonwebtoken::errors::Error> for InfraError {
    fn from(value: jsonwebtoken::errors::Error) -> Self {
        InfraError(value.into_pausecal())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error / serde_json::Error → PauseCalError */
/* -------------------------------------------------------------------------- */

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(PauseCalError::Config(format!("I/O error: {value}")))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(PauseCalError::Config(format!("invalid JSON: {value}")))
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

    async fn status_failure(status: StatusCode) -> HttpError {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err()
    }

    #[tokio::test]
    async fn http_status_401_maps_to_auth_error() {
        let error = status_failure(StatusCode::UNAUTHORIZED).await;
        let mapped: PauseCalError = InfraError::from(error).into();
        match mapped {
            PauseCalError::Auth(msg) => assert!(msg.contains("401")),
            other => panic!("expected auth error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn http_status_404_maps_to_not_found() {
        let error = status_failure(StatusCode::NOT_FOUND).await;
        let mapped: PauseCalError = InfraError::from(error).into();
        assert!(matches!(mapped, PauseCalError::NotFound(_)));
    }

    #[tokio::test]
    async fn http_status_503_maps_to_gateway_error() {
        let error = status_failure(StatusCode::SERVICE_UNAVAILABLE).await;
        let mapped: PauseCalError = InfraError::from(error).into();
        match mapped {
            PauseCalError::Gateway(msg) => assert!(msg.contains("503")),
            other => panic!("expected gateway error, got {other:?}"),
        }
    }

    #[test]
    fn status_error_appends_provider_detail() {
        let err = status_error(StatusCode::BAD_REQUEST, Some("Invalid start time"));
        assert_eq!(err, PauseCalError::Gateway("HTTP 400 Bad Request: Invalid start time".into()));
    }

    #[test]
    fn io_errors_are_configuration_problems() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "service_account.json");
        let mapped: PauseCalError = InfraError::from(io).into();
        assert!(matches!(mapped, PauseCalError::Config(_)));
    }
}
