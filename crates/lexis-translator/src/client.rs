use std::sync::Arc;

use chrono::{Duration, Utc};
use lexis_storage::{KeyValueStore, keys};
use tokio::sync::{Mutex, RwLock};

use crate::cache::{CacheEntry, CacheKey, TranslationCache, TranslationContext};
use crate::{SOURCE_LANGUAGE, Translator};

/// Read-through translation client.
///
/// Never fails: any provider error is logged and the original text comes back.
pub struct CachedTranslator {
    provider: Arc<dyn Translator>,
    cache: RwLock<TranslationCache>,
    store: Arc<dyn KeyValueStore>,
    /// Held from snapshot to write so a stale snapshot never lands last
    persist_lock: Mutex<()>,
}

impl CachedTranslator {
    pub fn new(
        provider: Arc<dyn Translator>,
        cache: TranslationCache,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            provider,
            cache: RwLock::new(cache),
            store,
            persist_lock: Mutex::new(()),
        }
    }

    /// Restore the persisted cache; a missing or corrupt snapshot starts empty
    pub fn load(provider: Arc<dyn Translator>, store: Arc<dyn KeyValueStore>, ttl: Duration) -> Self {
        let entries: Vec<CacheEntry> =
            lexis_storage::load_or_default(store.as_ref(), keys::TRANSLATION_CACHE);
        tracing::debug!("Restored {} cached translations", entries.len());

        let mut cache = TranslationCache::from_entries(entries, ttl);
        let purged = cache.purge_expired(Utc::now());
        if purged > 0 {
            tracing::debug!("Dropped {} expired translations", purged);
        }

        Self::new(provider, cache, store)
    }

    pub async fn translate(&self, text: &str, context: TranslationContext, target: &str) -> String {
        if target.eq_ignore_ascii_case(SOURCE_LANGUAGE) || text.trim().is_empty() {
            return text.to_string();
        }

        let key = CacheKey::new(text, context, target);

        {
            let cache = self.cache.read().await;
            if let Some(entry) = cache.lookup(&key, Utc::now()) {
                tracing::trace!("Translation cache hit for {:?}", key.context);
                return entry.translated_text.clone();
            }
        }

        match self.provider.translate(text, SOURCE_LANGUAGE, &key.target).await {
            Ok(translation) => {
                self.cache
                    .write()
                    .await
                    .store(key, translation.text.clone(), Utc::now());
                self.persist().await;
                translation.text
            }
            Err(e) => {
                tracing::warn!(
                    "Translation via {} failed, showing original text: {}",
                    self.provider.metadata().name,
                    e
                );
                text.to_string()
            }
        }
    }

    /// Number of entries currently held, expired ones included
    pub async fn cached_len(&self) -> usize {
        self.cache.read().await.len()
    }

    async fn persist(&self) {
        let _guard = self.persist_lock.lock().await;
        let snapshot = self.cache.read().await.snapshot();

        let store = self.store.clone();
        let written = tokio::task::spawn_blocking(move || {
            lexis_storage::save(store.as_ref(), keys::TRANSLATION_CACHE, &snapshot)
        })
        .await;

        match written {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!("Failed to persist translation cache: {}", e),
            Err(e) => tracing::error!("Translation cache writer panicked: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use async_trait::async_trait;
    use lexis_storage::{MemoryStore, StorageError};

    use super::*;
    use crate::{ProviderMetadata, TranslateError, Translation};

    struct FakeTranslator {
        calls: AtomicUsize,
        fail: bool,
    }

    impl FakeTranslator {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Translator for FakeTranslator {
        async fn translate(
            &self,
            text: &str,
            _from: &str,
            to: &str,
        ) -> Result<Translation, TranslateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(TranslateError::ApiError("HTTP 503".into()));
            }
            Ok(Translation {
                text: format!("[{to}] {text}"),
            })
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                name: "fake".into(),
            }
        }
    }

    /// Memory store whose first write stalls, as a slow disk would
    #[derive(Default)]
    struct SlowFirstWrite {
        inner: MemoryStore,
        stalled: AtomicBool,
    }

    impl KeyValueStore for SlowFirstWrite {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if !self.stalled.swap(true, Ordering::SeqCst) {
                std::thread::sleep(std::time::Duration::from_millis(200));
            }
            self.inner.set(key, value)
        }
    }

    fn client(provider: Arc<FakeTranslator>, store: Arc<MemoryStore>) -> CachedTranslator {
        CachedTranslator::load(provider, store, Duration::hours(24))
    }

    fn headword(word: &str) -> TranslationContext {
        TranslationContext::Headword {
            headword: word.to_string(),
        }
    }

    #[tokio::test]
    async fn test_source_language_is_noop() {
        let provider = FakeTranslator::new(false);
        let store = Arc::new(MemoryStore::new());
        let translator = client(provider.clone(), store.clone());

        assert_eq!(translator.translate("run", headword("run"), "en").await, "run");
        assert_eq!(translator.translate("run", headword("run"), "EN").await, "run");
        assert_eq!(provider.calls(), 0);
        assert_eq!(translator.cached_len().await, 0);
        assert!(store.get(keys::TRANSLATION_CACHE).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_miss_then_hit() {
        let provider = FakeTranslator::new(false);
        let store = Arc::new(MemoryStore::new());
        let translator = client(provider.clone(), store.clone());

        assert_eq!(translator.translate("run", headword("run"), "es").await, "[es] run");
        assert_eq!(translator.translate("run", headword("run"), "es").await, "[es] run");
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_store_persists_full_cache() {
        let provider = FakeTranslator::new(false);
        let store = Arc::new(MemoryStore::new());
        let translator = client(provider.clone(), store.clone());

        translator.translate("run", headword("run"), "es").await;
        translator.translate("walk", headword("walk"), "es").await;

        let persisted: Vec<CacheEntry> =
            lexis_storage::load_or_default(store.as_ref(), keys::TRANSLATION_CACHE);
        assert_eq!(persisted.len(), 2);

        // A fresh client over the same store serves from the restored cache
        let second = FakeTranslator::new(false);
        let restored = client(second.clone(), store);
        assert_eq!(restored.translate("walk", headword("walk"), "es").await, "[es] walk");
        assert_eq!(second.calls(), 0);
    }

    #[tokio::test]
    async fn test_failure_returns_original_and_is_not_cached() {
        let provider = FakeTranslator::new(true);
        let store = Arc::new(MemoryStore::new());
        let translator = client(provider.clone(), store);

        assert_eq!(translator.translate("run", headword("run"), "es").await, "run");
        assert_eq!(translator.translate("run", headword("run"), "es").await, "run");
        assert_eq!(provider.calls(), 2);
        assert_eq!(translator.cached_len().await, 0);
    }

    #[tokio::test]
    async fn test_persist_failure_keeps_memory_cache() {
        let provider = FakeTranslator::new(false);
        let store = Arc::new(MemoryStore::new());
        store.reject_writes(true);
        let translator = client(provider.clone(), store);

        assert_eq!(translator.translate("run", headword("run"), "fr").await, "[fr] run");
        assert_eq!(translator.translate("run", headword("run"), "fr").await, "[fr] run");
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_starts_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::TRANSLATION_CACHE, "[{\"broken\": true").unwrap();
        let translator = client(FakeTranslator::new(false), store);
        assert_eq!(translator.cached_len().await, 0);
    }

    #[tokio::test]
    async fn test_target_language_is_part_of_key() {
        let provider = FakeTranslator::new(false);
        let translator = client(provider.clone(), Arc::new(MemoryStore::new()));

        assert_eq!(translator.translate("run", headword("run"), "es").await, "[es] run");
        assert_eq!(translator.translate("run", headword("run"), "fr").await, "[fr] run");
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_misses_persist_every_entry() {
        let store = Arc::new(SlowFirstWrite::default());
        let translator = Arc::new(CachedTranslator::load(
            FakeTranslator::new(false),
            store.clone(),
            Duration::hours(24),
        ));

        let first = {
            let translator = translator.clone();
            tokio::spawn(async move { translator.translate("run", headword("run"), "es").await })
        };
        let second = {
            let translator = translator.clone();
            tokio::spawn(async move {
                tokio::time::sleep(std::time::Duration::from_millis(50)).await;
                translator.translate("walk", headword("walk"), "es").await
            })
        };
        assert_eq!(first.await.unwrap(), "[es] run");
        assert_eq!(second.await.unwrap(), "[es] walk");

        assert_eq!(translator.cached_len().await, 2);
        let persisted: Vec<CacheEntry> =
            lexis_storage::load_or_default(store.as_ref(), keys::TRANSLATION_CACHE);
        assert_eq!(persisted.len(), 2);
    }
}
