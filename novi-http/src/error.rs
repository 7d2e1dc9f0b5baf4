use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use novi_agent::{AgentError, ProviderErrorCode};
use novi_core::PqrError;

use crate::envelope;

/// External error contract: a message plus optional diagnostic detail.
/// The HTTP status rides along but never serializes into the body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing)]
    status: StatusCode,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, error: impl Into<String>, details: Option<String>) -> Self {
        Self {
            error: error.into(),
            details,
            status,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, None)
    }

    pub fn missing_configuration() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "missing agent configuration",
            None,
        )
    }

    /// Unclassified internal fault. Diagnostic detail is exposed in the body
    /// while the system is pre-production.
    pub fn internal_error(details: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal server error",
            Some(details.into()),
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        envelope::json_response(self.status, &self)
    }
}

impl From<AgentError> for ErrorResponse {
    fn from(e: AgentError) -> Self {
        match e {
            AgentError::Provider { code, message } => {
                let status = match &code {
                    ProviderErrorCode::ResourceNotFound => StatusCode::NOT_FOUND,
                    ProviderErrorCode::Validation => StatusCode::BAD_REQUEST,
                    ProviderErrorCode::Throttled => StatusCode::TOO_MANY_REQUESTS,
                    ProviderErrorCode::AccessDenied => StatusCode::FORBIDDEN,
                    ProviderErrorCode::Other(_) => StatusCode::BAD_GATEWAY,
                };
                Self::new(
                    status,
                    format!("agent provider error ({code})"),
                    Some(message),
                )
            }
            other => Self::internal_error(other.to_string()),
        }
    }
}

impl From<PqrError> for ErrorResponse {
    fn from(e: PqrError) -> Self {
        match e {
            PqrError::MissingField(_) => Self::invalid_request(e.to_string()),
            PqrError::NotFound(id) => {
                Self::new(StatusCode::NOT_FOUND, "PQR not found", Some(id))
            }
            PqrError::Store(inner) => Self::internal_error(inner.to_string()),
        }
    }
}

/// JSON extractor whose rejection is a 400 envelope instead of axum's
/// plain-text default. Malformed bodies never reach session resolution or
/// the agent.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ErrorResponse))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for ErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        error!("JSON deserialization error: {}", message);
        Self::invalid_request(format!("invalid JSON: {message}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(code: &str) -> ErrorResponse {
        ErrorResponse::from(AgentError::provider(code, "upstream message"))
    }

    #[test]
    fn provider_codes_map_to_the_fixed_table() {
        assert_eq!(provider("resource-not-found").status(), StatusCode::NOT_FOUND);
        assert_eq!(provider("validation-error").status(), StatusCode::BAD_REQUEST);
        assert_eq!(provider("throttled").status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(provider("access-denied").status(), StatusCode::FORBIDDEN);
        assert_eq!(provider("weird-code").status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn provider_message_lands_in_details() {
        let e = provider("throttled");
        assert_eq!(e.error, "agent provider error (throttled)");
        assert_eq!(e.details.as_deref(), Some("upstream message"));
    }

    #[test]
    fn status_is_not_serialized() {
        let body = serde_json::to_value(ErrorResponse::invalid_request("bad")).unwrap();
        assert_eq!(body, serde_json::json!({"error": "bad"}));
    }

    #[test]
    fn pqr_not_found_maps_to_404() {
        let e = ErrorResponse::from(PqrError::NotFound("abc".to_string()));
        assert_eq!(e.status(), StatusCode::NOT_FOUND);
        assert_eq!(e.details.as_deref(), Some("abc"));
    }
}
