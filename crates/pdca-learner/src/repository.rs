//! Record Repository
//!
//! Port for the append-only PDCA record store. Implementations return a
//! user's records in insertion order. Whether an append is visible to an
//! immediately following query is up to the implementation; both stores in
//! this crate make it visible.

use async_trait::async_trait;
use growth_core::GrowthResult;
use tokio::sync::RwLock;

use crate::models::PdcaRecord;

#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Append a record and return it as stored.
    ///
    /// # Errors
    ///
    /// - `GrowthError::Repository` when the store rejects the write
    async fn append(&self, record: PdcaRecord) -> GrowthResult<PdcaRecord>;

    /// All records for `user_id`, oldest first.
    async fn query(&self, user_id: &str) -> GrowthResult<Vec<PdcaRecord>>;
}

/// Process-local store, mainly for tests and single-node use
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<Vec<PdcaRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<PdcaRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl RecordRepository for InMemoryRecordStore {
    async fn append(&self, record: PdcaRecord) -> GrowthResult<PdcaRecord> {
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn query(&self, user_id: &str) -> GrowthResult<Vec<PdcaRecord>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }
}
