use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use lexis_config::{CacheConfig, Config};
use lexis_core::{
    AppState, DatamuseClient, FreeDictionaryClient, RelatedWordAggregator, SearchOrchestrator,
};
use lexis_storage::{FileStore, KeyValueStore, MemoryStore};
use lexis_translator::{CachedTranslator, MyMemoryTranslator};

/// Load a JSON config file, or build one from the environment
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::debug!("No config file given, using environment defaults");
        return Ok(Config::new());
    };

    tracing::info!("Loading config from {}", path.display());
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}

/// File store under the configured data dir; memory only if that is unusable
pub fn open_store(config: &Config) -> Arc<dyn KeyValueStore> {
    let dir = config
        .storage
        .data_dir
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(FileStore::default_dir);

    match FileStore::open(&dir) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::warn!(
                "Cannot use {} for storage, nothing will be saved this session: {}",
                dir.display(),
                e
            );
            Arc::new(MemoryStore::new())
        }
    }
}

/// Wire the HTTP clients, translation cache and state into an orchestrator
pub fn build_orchestrator(config: Config, store: Arc<dyn KeyValueStore>) -> SearchOrchestrator {
    let timeout = Duration::from_secs(config.api.request_timeout_secs);

    let dictionary = Arc::new(FreeDictionaryClient::new(
        config.api.dictionary_url.clone(),
        timeout,
    ));
    let related = RelatedWordAggregator::new(
        Arc::new(DatamuseClient::new(config.api.datamuse_url.clone(), timeout)),
        config.related.max_words,
    );
    let provider = Arc::new(MyMemoryTranslator::new(
        config.api.translation_url.clone(),
        config.api.translation_email.clone(),
        timeout,
    ));
    let translator = Arc::new(CachedTranslator::load(
        provider,
        store.clone(),
        cache_ttl(config.cache.ttl_hours),
    ));

    let state = Arc::new(AppState::new(config, store));
    SearchOrchestrator::new(state, dictionary, related, translator)
}

/// Translation lifetime; out-of-range or non-positive hours use the default
fn cache_ttl(hours: i64) -> chrono::Duration {
    match chrono::Duration::try_hours(hours) {
        Some(ttl) if hours > 0 => ttl,
        _ => {
            let fallback = CacheConfig::default().ttl_hours;
            tracing::warn!(
                "Ignoring cache TTL of {} hours, using {} hours",
                hours,
                fallback
            );
            chrono::Duration::hours(fallback)
        }
    }
}
