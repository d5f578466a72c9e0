pub mod advisor;
pub mod suggestion;

pub use advisor::SuggestionService;
