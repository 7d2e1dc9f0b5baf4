use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

use super::record::PqrRecord;

/// Backend fault from the record store.
#[derive(Debug, Error)]
#[error("record store failure: {0}")]
pub struct PqrStoreError(pub String);

/// Single-key put/get seam over the PQR record store.
/// The production backend is an external key-value service; tests and the
/// standalone server use the in-memory implementation.
#[async_trait]
pub trait PqrStore: Send + Sync {
    async fn put(&self, record: PqrRecord) -> Result<(), PqrStoreError>;
    async fn get(&self, pqr_id: &str) -> Result<Option<PqrRecord>, PqrStoreError>;
}

/// In-process store keyed by pqr_id.
#[derive(Default)]
pub struct MemoryPqrStore {
    records: Mutex<HashMap<String, PqrRecord>>,
}

impl MemoryPqrStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PqrStore for MemoryPqrStore {
    async fn put(&self, record: PqrRecord) -> Result<(), PqrStoreError> {
        self.records
            .lock()
            .await
            .insert(record.pqr_id.clone(), record);
        Ok(())
    }

    async fn get(&self, pqr_id: &str) -> Result<Option<PqrRecord>, PqrStoreError> {
        Ok(self.records.lock().await.get(pqr_id).cloned())
    }
}
