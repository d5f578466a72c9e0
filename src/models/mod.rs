pub mod batch;
pub mod suggestion;

pub use batch::{BatchRecord, Evaluation};
pub use suggestion::{EvidenceItem, Suggestion, SuggestionQuery};
