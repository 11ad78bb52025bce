use std::env;

use serde::{Deserialize, Serialize};

fn default_dictionary_url() -> String {
    "https://api.dictionaryapi.dev/api/v2".to_string()
}

fn default_datamuse_url() -> String {
    "https://api.datamuse.com".to_string()
}

fn default_translation_url() -> String {
    "https://api.mymemory.translated.net/get".to_string()
}

fn default_request_timeout_secs() -> u64 {
    15
}

/// Endpoints of the three backing services
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    /// Lexical API base, entries live under `/entries/en/{word}`
    #[serde(default = "default_dictionary_url")]
    pub dictionary_url: String,
    /// Semantic API base, queried at `/words`
    #[serde(default = "default_datamuse_url")]
    pub datamuse_url: String,
    #[serde(default = "default_translation_url")]
    pub translation_url: String,
    /// Optional contact address, raises the translation provider's daily quota
    #[serde(default)]
    pub translation_email: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl ApiConfig {
    pub fn new() -> Self {
        let dictionary_url =
            env::var("LEXIS_DICTIONARY_URL").unwrap_or_else(|_| default_dictionary_url());
        let datamuse_url =
            env::var("LEXIS_DATAMUSE_URL").unwrap_or_else(|_| default_datamuse_url());
        let translation_url =
            env::var("LEXIS_TRANSLATION_URL").unwrap_or_else(|_| default_translation_url());
        let translation_email = env::var("LEXIS_TRANSLATION_EMAIL").ok();

        let request_timeout_secs = env::var("LEXIS_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_request_timeout_secs);

        Self {
            dictionary_url,
            datamuse_url,
            translation_url,
            translation_email,
            request_timeout_secs,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            dictionary_url: default_dictionary_url(),
            datamuse_url: default_datamuse_url(),
            translation_url: default_translation_url(),
            translation_email: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
