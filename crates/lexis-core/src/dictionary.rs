use std::time::Duration;

use async_trait::async_trait;
use lexis_types::DictionaryEntry;
use reqwest::{StatusCode, Url};

/// Lexical API lookups
#[async_trait]
pub trait DictionaryApi: Send + Sync {
    /// All entries for `word`, in the order the API returns them
    async fn lookup(&self, word: &str) -> Result<Vec<DictionaryEntry>, LookupError>;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    #[error("No definitions found for '{0}'")]
    NotFound(String),

    #[error("Lookup failed: {0}")]
    Failed(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        LookupError::Failed(e.to_string())
    }
}

/// Client for the Free Dictionary API (`/entries/en/{word}`)
#[derive(Clone)]
pub struct FreeDictionaryClient {
    client: reqwest::Client,
    base_url: String,
}

impl FreeDictionaryClient {
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
impl DictionaryApi for FreeDictionaryClient {
    async fn lookup(&self, word: &str) -> Result<Vec<DictionaryEntry>, LookupError> {
        let url = entry_url(&self.base_url, word)?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        check_status(response.status(), word)?;

        let entries: Vec<DictionaryEntry> = response
            .json()
            .await
            .map_err(|e| LookupError::Failed(format!("Failed to parse response: {}", e)))?;

        tracing::debug!("'{}': {} entries", word, entries.len());
        Ok(entries)
    }
}

/// `{base}/entries/en/{word}` with the word encoded as a single path segment
fn entry_url(base_url: &str, word: &str) -> Result<Url, LookupError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| LookupError::Failed(format!("Invalid dictionary URL: {}", e)))?;

    url.path_segments_mut()
        .map_err(|_| LookupError::Failed(format!("Dictionary URL cannot be a base: {base_url}")))?
        .pop_if_empty()
        .extend(["entries", "en", word]);

    Ok(url)
}

fn check_status(status: StatusCode, word: &str) -> Result<(), LookupError> {
    if status == StatusCode::NOT_FOUND {
        return Err(LookupError::NotFound(word.to_string()));
    }

    if !status.is_success() {
        return Err(LookupError::Failed(format!("HTTP {}", status)));
    }

    Ok(())
}
