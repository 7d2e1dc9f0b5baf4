use axum::{extract::State, http::StatusCode, response::Response};
use tracing::info;

use novi_agent::{invoke_and_collect, InvokeRequest};

use super::types::{ConverseRequest, ConverseResponse, CONFIRMATION_MESSAGE};
use crate::session::{resolve_session_id, ClientFingerprint};
use crate::{envelope, ApiJson, ErrorResponse, ServerState};

/// Dispatch one conversational turn to the agent.
///
/// Validation and configuration checks run before any network call; session
/// resolution never fails; the streamed reply is aggregated into a single
/// response body.
pub async fn handle_converse(
    State(state): State<ServerState>,
    fingerprint: ClientFingerprint,
    ApiJson(payload): ApiJson<ConverseRequest>,
) -> Result<Response, ErrorResponse> {
    let request_id = fingerprint.request_id.clone();
    info!("[{}] POST /agent", request_id);

    let message = payload.message.unwrap_or_default();
    if message.is_empty() {
        return Err(ErrorResponse::invalid_request("message field is required"));
    }

    let (agent_id, agent_alias_id) = state
        .config
        .agent_identity()
        .ok_or_else(ErrorResponse::missing_configuration)?;

    let session_id = resolve_session_id(payload.session_id.as_deref(), &fingerprint);
    info!("[{}] Using session {}", request_id, session_id);

    let response_text = invoke_and_collect(
        state.agent.as_ref(),
        InvokeRequest {
            agent_id: agent_id.to_string(),
            agent_alias_id: agent_alias_id.to_string(),
            session_id: session_id.clone(),
            input_text: message,
            enable_trace: false,
        },
    )
    .await?;

    let preview: String = response_text.chars().take(200).collect();
    info!("[{}] Agent replied: {}...", request_id, preview);

    Ok(envelope::json_response(
        StatusCode::OK,
        &ConverseResponse {
            response: response_text,
            session_id,
            message: CONFIRMATION_MESSAGE.to_string(),
        },
    ))
}
