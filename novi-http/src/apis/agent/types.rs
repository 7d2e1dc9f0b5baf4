use serde::{Deserialize, Serialize};

/// Fixed confirmation line echoed with every successful reply.
pub const CONFIRMATION_MESSAGE: &str = "Novi agent response";

/// One conversational turn. `message` is optional at the serde level so an
/// absent field yields a contract error rather than a generic JSON
/// rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct ConverseRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConverseResponse {
    /// Aggregated agent output
    pub response: String,
    /// Session identity the turn ran under, echoed for the next turn
    pub session_id: String,
    /// Confirmation message
    pub message: String,
}
