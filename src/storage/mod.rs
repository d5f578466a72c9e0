use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::AppResult;
use crate::models::{BatchRecord, Evaluation};

/// Storage collaborator supplying historical evidence
///
/// Implementations return batches satisfying the eligibility invariant
/// (evaluated with `score >= min_score`, both ambient temperatures
/// recorded, positive flour) in insertion order, oldest first. The
/// engine trusts this filter apart from a defensive re-check of the
/// flour quantity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BatchStore: Send + Sync {
    async fn fetch_eligible_batches(&self, min_score: u8) -> AppResult<Vec<BatchRecord>>;
}

/// In-memory batch store
///
/// Reference implementation of [`BatchStore`]; production deployments
/// put a database behind the same trait.
#[derive(Default)]
pub struct InMemoryBatchStore {
    inner: RwLock<Vec<BatchRecord>>,
}

impl InMemoryBatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record, preserving insertion order
    pub async fn insert(&self, record: BatchRecord) {
        let mut records = self.inner.write().await;
        records.push(record);
    }

    /// Attaches an evaluation to the batch with the given id
    pub async fn evaluate(&self, batch_id: i64, evaluation: Evaluation) -> bool {
        let mut records = self.inner.write().await;
        match records.iter_mut().find(|r| r.id == batch_id) {
            Some(record) => {
                record.evaluation = Some(evaluation);
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl BatchStore for InMemoryBatchStore {
    async fn fetch_eligible_batches(&self, min_score: u8) -> AppResult<Vec<BatchRecord>> {
        let records = self.inner.read().await;
        Ok(records
            .iter()
            .filter(|r| r.is_eligible(min_score))
            .cloned()
            .collect())
    }
}
