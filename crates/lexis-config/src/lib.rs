use std::env;

use serde::{Deserialize, Serialize};

use self::api::ApiConfig;

pub mod api;

fn default_ttl_hours() -> i64 {
    24
}

fn default_max_history() -> usize {
    15
}

fn default_max_related() -> usize {
    30
}

fn default_language() -> String {
    "es".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    /// Translations older than this are treated as misses
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_ttl_hours(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct HistoryConfig {
    #[serde(default = "default_max_history")]
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_history(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RelatedConfig {
    #[serde(default = "default_max_related")]
    pub max_words: usize,
}

impl Default for RelatedConfig {
    fn default() -> Self {
        Self {
            max_words: default_max_related(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct PreferencesConfig {
    /// Interface language used until the user picks one, also the translation target
    #[serde(default = "default_language")]
    pub default_language: String,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the persisted preference files, platform data dir when unset
    pub data_dir: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub cache: CacheConfig,
    pub history: HistoryConfig,
    pub related: RelatedConfig,
    pub preferences: PreferencesConfig,
    pub storage: StorageConfig,
}

impl Config {
    pub fn new() -> Self {
        let data_dir = env::var("LEXIS_DATA_DIR").ok();

        let ttl_hours = env::var("LEXIS_CACHE_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_ttl_hours);

        let default_language =
            env::var("LEXIS_LANGUAGE").unwrap_or_else(|_| default_language());

        Config {
            api: ApiConfig::new(),
            cache: CacheConfig { ttl_hours },
            history: HistoryConfig::default(),
            related: RelatedConfig::default(),
            preferences: PreferencesConfig { default_language },
            storage: StorageConfig { data_dir },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.cache.ttl_hours, 24);
        assert_eq!(config.history.max_entries, 15);
        assert_eq!(config.related.max_words, 30);
        assert_eq!(config.preferences.default_language, "es");
        assert!(config.api.dictionary_url.starts_with("https://"));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "history": { "max_entries": 5 }, "api": { "request_timeout_secs": 3 } }"#)
                .unwrap();
        assert_eq!(config.history.max_entries, 5);
        assert_eq!(config.api.request_timeout_secs, 3);
        assert_eq!(config.api.datamuse_url, "https://api.datamuse.com");
        assert_eq!(config.related.max_words, 30);
    }
}
