//! Leavening suggestions from evaluated bakery batch history.
//!
//! The core of the crate is [`services::suggestion::suggest`], a pure
//! distance-weighted nearest-neighbor regression over historical batches:
//! it averages the leavening-per-kilogram ratio of well-evaluated batches,
//! weighting each batch by how similar its ambient conditions were to the
//! query, and rescales the result to the target flour quantity.
//!
//! [`services::advisor::SuggestionService`] wraps the engine with the
//! storage collaborator ([`storage::BatchStore`]) that supplies eligible
//! history, and is the entry point most callers want.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use config::EngineConfig;
pub use error::{AppError, AppResult};
pub use models::{BatchRecord, Evaluation, EvidenceItem, Suggestion, SuggestionQuery};
pub use services::advisor::SuggestionService;
pub use storage::{BatchStore, InMemoryBatchStore};
