use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use lexis_types::LanguageCode;
use serde::{Deserialize, Serialize};

/// What a piece of translated text is, relative to the searched headword
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TranslationContext {
    /// Free text with no surrounding context
    Text,
    Headword {
        headword: String,
    },
    Definition {
        headword: String,
        part_of_speech: String,
        index: usize,
    },
    Example {
        headword: String,
        part_of_speech: String,
        index: usize,
    },
}

/// Source text identity plus the context it was translated in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    pub text: String,
    pub context: TranslationContext,
    pub target: LanguageCode,
}

impl CacheKey {
    pub fn new(text: &str, context: TranslationContext, target: &str) -> Self {
        Self {
            text: text.to_string(),
            context,
            target: target.to_lowercase(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub translated_text: String,
    pub fetched_at: DateTime<Utc>,
}

/// Translations with timestamp expiry.
///
/// Expired entries are only treated as misses; they stay in the map until
/// overwritten or until `purge_expired` is called.
#[derive(Debug, Clone)]
pub struct TranslationCache {
    entries: HashMap<CacheKey, CacheEntry>,
    ttl: Duration,
}

impl TranslationCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Rebuild from a persisted snapshot; later duplicates of a key win
    pub fn from_entries(entries: Vec<CacheEntry>, ttl: Duration) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| (entry.key.clone(), entry))
            .collect();
        Self { entries, ttl }
    }

    pub fn lookup(&self, key: &CacheKey, now: DateTime<Utc>) -> Option<&CacheEntry> {
        self.entries
            .get(key)
            .filter(|entry| now - entry.fetched_at <= self.ttl)
    }

    pub fn store(&mut self, key: CacheKey, translated_text: String, now: DateTime<Utc>) {
        let entry = CacheEntry {
            key: key.clone(),
            translated_text,
            fetched_at: now,
        };
        self.entries.insert(key, entry);
    }

    /// Drop expired entries, returning how many were removed
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, entry| now - entry.fetched_at <= ttl);
        before - self.entries.len()
    }

    pub fn snapshot(&self) -> Vec<CacheEntry> {
        self.entries.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
