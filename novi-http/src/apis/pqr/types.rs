use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use novi_core::{PqrRecord, PqrStatus};

/// Create payload. Required fields default to empty so their absence maps to
/// a field-specific 400 instead of a generic JSON rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePqrRequest {
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePqrResponse {
    pub message: String,
    pub pqr_id: String,
    pub status: PqrStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckPqrResponse {
    pub message: String,
    pub pqr: PqrRecord,
}
