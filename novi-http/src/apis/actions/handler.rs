use axum::{extract::State, http::StatusCode, response::Response};
use tracing::info;
use uuid::Uuid;

use novi_core::actions::{dispatch, ActionInvocation};

use crate::{envelope, ApiJson, ServerState};

/// Receive a tool-call from the agent's action group and route it to the
/// matching PQR operation. The transport answer is always 200; outcomes are
/// embedded in the wrapper the agent provider understands.
pub async fn handle_action(
    State(state): State<ServerState>,
    ApiJson(invocation): ApiJson<ActionInvocation>,
) -> Response {
    let request_id = Uuid::new_v4();
    info!(
        "[{}] POST /actions {} {}",
        request_id, invocation.http_method, invocation.api_path
    );

    let response = dispatch(state.store.as_ref(), &invocation).await;
    envelope::json_response(StatusCode::OK, &response)
}
