use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lexis_types::RelatedWord;

/// Semantic relation queried from the word network
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Synonym,
    /// Words statistically triggered by the query ("associated with")
    Trigger,
    /// Adjectives frequently used to describe the query
    SimilarAdjective,
}

impl Relation {
    /// Merge order, earlier relations win duplicate ties
    pub const ALL: [Relation; 3] = [
        Relation::Synonym,
        Relation::Trigger,
        Relation::SimilarAdjective,
    ];

    pub fn query_param(&self) -> &'static str {
        match self {
            Relation::Synonym => "rel_syn",
            Relation::Trigger => "rel_trg",
            Relation::SimilarAdjective => "rel_jjb",
        }
    }
}

#[async_trait]
pub trait RelatedWordsApi: Send + Sync {
    async fn fetch(&self, relation: Relation, word: &str) -> Result<Vec<RelatedWord>, RelatedError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RelatedError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("{relation:?} lookup failed: {reason}")]
    ApiError { relation: Relation, reason: String },
}

/// Client for the Datamuse `/words` endpoint
#[derive(Clone)]
pub struct DatamuseClient {
    client: reqwest::Client,
    base_url: String,
}

impl DatamuseClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });

        Self { client, base_url }
    }
}

#[async_trait]
impl RelatedWordsApi for DatamuseClient {
    async fn fetch(&self, relation: Relation, word: &str) -> Result<Vec<RelatedWord>, RelatedError> {
        let url = format!("{}/words", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .query(&[(relation.query_param(), word)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RelatedError::ApiError {
                relation,
                reason: format!("HTTP {}", response.status()),
            });
        }

        response.json().await.map_err(|e| RelatedError::ApiError {
            relation,
            reason: format!("Failed to parse response: {}", e),
        })
    }
}

/// Fans out to every relation and merges the answers into one ranked list
pub struct RelatedWordAggregator {
    api: Arc<dyn RelatedWordsApi>,
    max_words: usize,
}

impl RelatedWordAggregator {
    pub fn new(api: Arc<dyn RelatedWordsApi>, max_words: usize) -> Self {
        Self { api, max_words }
    }

    /// Waits for all three relations; any failed relation fails the whole call
    pub async fn related_words(&self, word: &str) -> Result<Vec<RelatedWord>, RelatedError> {
        let [syn, trg, jjb] = Relation::ALL;
        let (synonyms, triggers, adjectives) = tokio::join!(
            self.api.fetch(syn, word),
            self.api.fetch(trg, word),
            self.api.fetch(jjb, word),
        );

        let lists = [synonyms?, triggers?, adjectives?];
        tracing::debug!(
            "'{}': {} synonyms, {} triggers, {} adjectives",
            word,
            lists[0].len(),
            lists[1].len(),
            lists[2].len()
        );

        Ok(merge_related(lists, self.max_words))
    }
}

/// Concatenate in order, keep the first occurrence of each word, rank by
/// score descending (stable), cap at `limit`
pub fn merge_related(
    lists: impl IntoIterator<Item = Vec<RelatedWord>>,
    limit: usize,
) -> Vec<RelatedWord> {
    let mut seen = HashSet::new();
    let mut merged: Vec<RelatedWord> = lists
        .into_iter()
        .flatten()
        .filter(|w| seen.insert(w.word.clone()))
        .collect();

    merged.sort_by(|a, b| b.score.total_cmp(&a.score));
    merged.truncate(limit);
    merged
}
