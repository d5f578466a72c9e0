use crate::config::EngineConfig;
use crate::error::{AppError, AppResult};
use crate::models::{Suggestion, SuggestionQuery};
use crate::services::suggestion;
use crate::storage::BatchStore;

/// Storage-facing wrapper around the suggestion engine
///
/// Validates the query, fetches eligible history from the store and
/// delegates to the pure engine. This is the boundary where invalid
/// flour targets are rejected; the engine itself assumes they are
/// already validated.
pub struct SuggestionService<S: BatchStore> {
    store: S,
    config: EngineConfig,
}

impl<S: BatchStore> SuggestionService<S> {
    pub fn new(store: S, config: EngineConfig) -> Self {
        Self { store, config }
    }

    pub async fn suggest_for(&self, query: SuggestionQuery) -> AppResult<Suggestion> {
        if !query.target_flour_kg.is_finite() || query.target_flour_kg <= 0.0 {
            return Err(AppError::InvalidInput(format!(
                "Target flour quantity must be a positive number of kilograms, got {}",
                query.target_flour_kg
            )));
        }

        let history = self
            .store
            .fetch_eligible_batches(self.config.min_score)
            .await?;

        tracing::debug!(
            eligible = history.len(),
            min_score = self.config.min_score,
            "Fetched eligible batch history"
        );

        Ok(suggestion::suggest(&history, &query, &self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BatchRecord, Evaluation};
    use crate::storage::MockBatchStore;

    fn record(id: i64) -> BatchRecord {
        BatchRecord {
            id,
            flour_kg: 10.0,
            leavening_grams: 110.0,
            emulsifier_ml: 3.0,
            ambient_temp_start: Some(23.0),
            ambient_temp_end_planned: Some(27.0),
            fermentation_minutes: Some(100),
            notes: None,
            evaluation: Some(Evaluation {
                score: 4,
                actual_end_temp: Some(26.8),
                comment: None,
            }),
        }
    }

    fn query(target_flour_kg: f64) -> SuggestionQuery {
        SuggestionQuery {
            target_flour_kg,
            current_ambient_temp: None,
            target_end_temp: None,
            target_fermentation_minutes: None,
        }
    }

    #[tokio::test]
    async fn test_rejects_non_positive_flour_target() {
        let mut store = MockBatchStore::new();
        store.expect_fetch_eligible_batches().never();

        let service = SuggestionService::new(store, EngineConfig::default());

        for bad in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            let result = service.suggest_for(query(bad)).await;
            assert!(matches!(result, Err(AppError::InvalidInput(_))));
        }
    }

    #[tokio::test]
    async fn test_fetches_with_configured_min_score() {
        let mut store = MockBatchStore::new();
        store
            .expect_fetch_eligible_batches()
            .withf(|min_score| *min_score == 4)
            .once()
            .returning(|_| Ok(vec![record(1)]));

        let service = SuggestionService::new(store, EngineConfig::default());
        let suggestion = service.suggest_for(query(20.0)).await.unwrap();

        assert_eq!(suggestion.suggested_leavening_grams, 220);
        assert_eq!(suggestion.evidence.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_store_is_not_an_error() {
        let mut store = MockBatchStore::new();
        store
            .expect_fetch_eligible_batches()
            .returning(|_| Ok(Vec::new()));

        let service = SuggestionService::new(store, EngineConfig::default());
        let suggestion = service.suggest_for(query(5.0)).await.unwrap();

        assert_eq!(suggestion.suggested_leavening_grams, 0);
        assert!(suggestion.evidence.is_empty());
    }

    #[tokio::test]
    async fn test_storage_errors_propagate() {
        let mut store = MockBatchStore::new();
        store
            .expect_fetch_eligible_batches()
            .returning(|_| Err(AppError::Storage("connection reset".to_string())));

        let service = SuggestionService::new(store, EngineConfig::default());
        let result = service.suggest_for(query(5.0)).await;

        assert!(matches!(result, Err(AppError::Storage(_))));
    }
}
