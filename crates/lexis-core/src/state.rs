use std::sync::Arc;

use lexis_config::Config;
use lexis_storage::{KeyValueStore, StorageError};
use lexis_types::{LanguageCode, LookupStatus, SearchView, Theme};
use tokio::sync::RwLock;

use crate::preferences::Preferences;

/// Application state shared by the orchestrator and the host.
///
/// Every preference mutation is written through to the store; a failed write
/// is logged and the in-memory value stays authoritative.
pub struct AppState {
    pub config: RwLock<Config>,
    preferences: RwLock<Preferences>,
    view: RwLock<SearchView>,
    store: Arc<dyn KeyValueStore>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>) -> Self {
        let preferences = Preferences::load(store.as_ref(), &config.preferences.default_language);
        tracing::debug!(
            "Loaded preferences: {} history, {} favorites, theme {}, language {}",
            preferences.history.len(),
            preferences.favorites.len(),
            preferences.theme.as_str(),
            preferences.language
        );

        Self {
            config: RwLock::new(config),
            preferences: RwLock::new(preferences),
            view: RwLock::new(SearchView::default()),
            store,
        }
    }

    pub async fn preferences(&self) -> Preferences {
        self.preferences.read().await.clone()
    }

    pub async fn history(&self) -> Vec<String> {
        self.preferences.read().await.history.clone()
    }

    pub async fn favorites(&self) -> Vec<String> {
        self.preferences.read().await.favorites.clone()
    }

    pub async fn language(&self) -> LanguageCode {
        self.preferences.read().await.language.clone()
    }

    pub async fn theme(&self) -> Theme {
        self.preferences.read().await.theme
    }

    pub async fn record_search(&self, word: &str) {
        let max = self.config.read().await.history.max_entries;
        let mut prefs = self.preferences.write().await;
        prefs.record_search(word, max);
        log_write_failure("history", prefs.save_history(self.store.as_ref()));
    }

    pub async fn clear_history(&self) {
        let mut prefs = self.preferences.write().await;
        prefs.history.clear();
        log_write_failure("history", prefs.save_history(self.store.as_ref()));
    }

    pub async fn toggle_favorite(&self, word: &str) -> bool {
        let mut prefs = self.preferences.write().await;
        let favorite = prefs.toggle_favorite(word);
        log_write_failure("favorites", prefs.save_favorites(self.store.as_ref()));
        favorite
    }

    pub async fn is_favorite(&self, word: &str) -> bool {
        self.preferences.read().await.is_favorite(word)
    }

    pub async fn set_theme(&self, theme: Theme) {
        let mut prefs = self.preferences.write().await;
        prefs.theme = theme;
        log_write_failure("theme", prefs.save_theme(self.store.as_ref()));
    }

    pub async fn set_language(&self, language: &str) {
        let language = language.trim().to_lowercase();
        if language.is_empty() {
            return;
        }
        let mut prefs = self.preferences.write().await;
        prefs.language = language;
        log_write_failure("language", prefs.save_language(self.store.as_ref()));
    }

    pub async fn view(&self) -> SearchView {
        self.view.read().await.clone()
    }

    /// Start a new search generation and return its sequence number.
    ///
    /// The previous related-word list is carried over so a failed word
    /// network fetch leaves it on screen.
    pub async fn begin_search(&self, query: &str) -> u64 {
        let mut view = self.view.write().await;
        let sequence = view.sequence + 1;
        let related = std::mem::take(&mut view.related);
        *view = SearchView {
            sequence,
            query: query.to_string(),
            status: LookupStatus::Loading,
            related,
            ..SearchView::default()
        };
        sequence
    }

    /// Apply `update` only while `sequence` is still the latest search
    pub async fn update_view<F>(&self, sequence: u64, update: F) -> bool
    where
        F: FnOnce(&mut SearchView),
    {
        let mut view = self.view.write().await;
        if view.sequence != sequence {
            tracing::debug!(
                "Discarding stale result for search #{} (current #{})",
                sequence,
                view.sequence
            );
            return false;
        }
        update(&mut *view);
        true
    }
}

fn log_write_failure(key: &str, result: Result<(), StorageError>) {
    if let Err(e) = result {
        tracing::warn!("Failed to persist {}: {}", key, e);
    }
}
