use thiserror::Error;

/// Structured failure code reported by the agent runtime.
///
/// `Other` keeps the raw wire code so callers can still log it; the external
/// status mapping treats it as a gateway fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderErrorCode {
    ResourceNotFound,
    Validation,
    Throttled,
    AccessDenied,
    Other(String),
}

impl ProviderErrorCode {
    pub fn parse(code: &str) -> Self {
        match code {
            "resource-not-found" => Self::ResourceNotFound,
            "validation-error" => Self::Validation,
            "throttled" => Self::Throttled,
            "access-denied" => Self::AccessDenied,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::ResourceNotFound => "resource-not-found",
            Self::Validation => "validation-error",
            Self::Throttled => "throttled",
            Self::AccessDenied => "access-denied",
            Self::Other(code) => code,
        }
    }
}

impl std::fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures surfaced by an agent invocation.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The runtime rejected or aborted the call with a structured code.
    #[error("agent provider error ({code}): {message}")]
    Provider {
        code: ProviderErrorCode,
        message: String,
    },
    /// Connection-level failure reaching the runtime or reading the stream.
    #[error("agent transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    /// The stream produced a line that is not a valid frame.
    #[error("malformed stream frame: {0}")]
    Frame(#[from] serde_json::Error),
}

impl AgentError {
    pub fn provider(code: &str, message: impl Into<String>) -> Self {
        Self::Provider {
            code: ProviderErrorCode::parse(code),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_parse_to_variants() {
        assert_eq!(
            ProviderErrorCode::parse("throttled"),
            ProviderErrorCode::Throttled
        );
        assert_eq!(
            ProviderErrorCode::parse("resource-not-found"),
            ProviderErrorCode::ResourceNotFound
        );
        assert_eq!(
            ProviderErrorCode::parse("weird-code"),
            ProviderErrorCode::Other("weird-code".to_string())
        );
    }

    #[test]
    fn codes_round_trip_through_as_str() {
        for code in [
            "resource-not-found",
            "validation-error",
            "throttled",
            "access-denied",
            "weird-code",
        ] {
            assert_eq!(ProviderErrorCode::parse(code).as_str(), code);
        }
    }
}
