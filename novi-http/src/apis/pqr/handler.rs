use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use tracing::info;
use uuid::Uuid;

use novi_core::pqr::{check_pqr, create_pqr};
use novi_core::NewPqr;

use super::types::{CheckPqrResponse, CreatePqrRequest, CreatePqrResponse};
use crate::{envelope, ApiJson, ErrorResponse, ServerState};

/// Create a PQR record.
pub async fn handle_create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<CreatePqrRequest>,
) -> Result<Response, ErrorResponse> {
    let request_id = Uuid::new_v4();
    info!("[{}] POST /pqr", request_id);

    let record = create_pqr(
        state.store.as_ref(),
        NewPqr {
            customer_email: payload.customer_email,
            description: payload.description,
            priority: payload.priority,
            category: payload.category,
        },
    )
    .await?;

    info!("[{}] PQR created: {}", request_id, record.pqr_id);

    Ok(envelope::json_response(
        StatusCode::OK,
        &CreatePqrResponse {
            message: "PQR created".to_string(),
            pqr_id: record.pqr_id,
            status: record.status,
            created_at: record.created_at,
        },
    ))
}

/// Look up a PQR record by id.
pub async fn handle_check(
    State(state): State<ServerState>,
    Path(pqr_id): Path<String>,
) -> Result<Response, ErrorResponse> {
    let request_id = Uuid::new_v4();
    info!("[{}] GET /pqr/{}", request_id, pqr_id);

    let record = check_pqr(state.store.as_ref(), &pqr_id).await?;

    Ok(envelope::json_response(
        StatusCode::OK,
        &CheckPqrResponse {
            message: "PQR found".to_string(),
            pqr: record,
        },
    ))
}
