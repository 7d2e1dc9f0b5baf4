use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a PQR case. Records are created open and move toward
/// resolution; the gateway itself only ever writes `Created`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PqrStatus {
    Created,
    InProgress,
    Resolved,
}

/// A petition/complaint/claim case record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PqrRecord {
    pub pqr_id: String,
    pub customer_email: String,
    pub description: String,
    pub status: PqrStatus,
    pub priority: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a PQR. Priority and category default when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPqr {
    pub customer_email: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

pub(crate) const DEFAULT_PRIORITY: &str = "MEDIUM";
pub(crate) const DEFAULT_CATEGORY: &str = "GENERAL";

impl NewPqr {
    pub(crate) fn into_record(self) -> PqrRecord {
        let now = Utc::now();
        PqrRecord {
            pqr_id: Uuid::new_v4().to_string(),
            customer_email: self.customer_email,
            description: self.description,
            status: PqrStatus::Created,
            priority: self
                .priority
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| DEFAULT_PRIORITY.to_string()),
            category: self
                .category
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            created_at: now,
            updated_at: now,
        }
    }
}
