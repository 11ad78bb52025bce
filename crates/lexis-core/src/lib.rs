pub mod dictionary;
pub mod preferences;
pub mod preprocess;
pub mod related;
pub mod search;
pub mod state;

#[cfg(test)]
mod test_server;

pub use dictionary::{DictionaryApi, FreeDictionaryClient, LookupError};
pub use preferences::Preferences;
pub use related::{DatamuseClient, Relation, RelatedError, RelatedWordAggregator, RelatedWordsApi};
pub use search::SearchOrchestrator;
pub use state::AppState;
