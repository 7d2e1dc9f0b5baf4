use thiserror::Error;
use tracing::info;

use super::record::{NewPqr, PqrRecord};
use super::store::{PqrStore, PqrStoreError};

#[derive(Debug, Error)]
pub enum PqrError {
    #[error("required field missing: {0}")]
    MissingField(&'static str),
    #[error("PQR not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] PqrStoreError),
}

/// Create a new PQR record.
/// Requires a customer email and a description; priority and category
/// default to MEDIUM / GENERAL.
pub async fn create_pqr(store: &dyn PqrStore, new: NewPqr) -> Result<PqrRecord, PqrError> {
    if new.customer_email.is_empty() {
        return Err(PqrError::MissingField("customer_email"));
    }
    if new.description.is_empty() {
        return Err(PqrError::MissingField("description"));
    }

    let record = new.into_record();
    info!("Storing PQR {}", record.pqr_id);
    store.put(record.clone()).await?;
    Ok(record)
}

/// Look up an existing PQR by id.
pub async fn check_pqr(store: &dyn PqrStore, pqr_id: &str) -> Result<PqrRecord, PqrError> {
    if pqr_id.is_empty() {
        return Err(PqrError::MissingField("pqr_id"));
    }

    info!("Looking up PQR {}", pqr_id);
    store
        .get(pqr_id)
        .await?
        .ok_or_else(|| PqrError::NotFound(pqr_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pqr::{MemoryPqrStore, PqrStatus};

    fn valid_new() -> NewPqr {
        NewPqr {
            customer_email: "test@example.com".to_string(),
            description: "Test description".to_string(),
            priority: Some("HIGH".to_string()),
            category: Some("BILLING".to_string()),
        }
    }

    #[tokio::test]
    async fn create_then_check_round_trips() {
        let store = MemoryPqrStore::new();
        let created = create_pqr(&store, valid_new()).await.unwrap();
        assert_eq!(created.status, PqrStatus::Created);
        assert_eq!(created.priority, "HIGH");

        let fetched = check_pqr(&store, &created.pqr_id).await.unwrap();
        assert_eq!(fetched.customer_email, "test@example.com");
        assert_eq!(fetched.pqr_id, created.pqr_id);
    }

    #[tokio::test]
    async fn create_rejects_missing_email() {
        let store = MemoryPqrStore::new();
        let mut new = valid_new();
        new.customer_email = String::new();
        let err = create_pqr(&store, new).await.unwrap_err();
        assert!(matches!(err, PqrError::MissingField("customer_email")));
    }

    #[tokio::test]
    async fn create_defaults_priority_and_category() {
        let store = MemoryPqrStore::new();
        let mut new = valid_new();
        new.priority = None;
        new.category = Some(String::new());
        let created = create_pqr(&store, new).await.unwrap();
        assert_eq!(created.priority, "MEDIUM");
        assert_eq!(created.category, "GENERAL");
    }

    #[tokio::test]
    async fn check_unknown_id_is_not_found() {
        let store = MemoryPqrStore::new();
        let err = check_pqr(&store, "missing-id").await.unwrap_err();
        assert!(matches!(err, PqrError::NotFound(_)));
    }
}
