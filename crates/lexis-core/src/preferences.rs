use lexis_storage::{KeyValueStore, StorageError, keys};
use lexis_types::{LanguageCode, Theme};

/// User state persisted between sessions
#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    /// Most recent first, lowercased, no duplicates
    pub history: Vec<String>,
    /// Insertion order
    pub favorites: Vec<String>,
    pub theme: Theme,
    /// Interface language, also the translation target
    pub language: LanguageCode,
}

impl Preferences {
    pub fn new(language: LanguageCode) -> Self {
        Self {
            history: Vec::new(),
            favorites: Vec::new(),
            theme: Theme::default(),
            language,
        }
    }

    /// Read every key, treating absent or corrupt values as defaults
    pub fn load(store: &dyn KeyValueStore, default_language: &str) -> Self {
        let history = lexis_storage::load_or_default(store, keys::HISTORY);
        let favorites = lexis_storage::load_or_default(store, keys::FAVORITES);
        let theme = lexis_storage::load_or_default(store, keys::THEME);
        let language: Option<LanguageCode> = lexis_storage::load_or_default(store, keys::LANGUAGE);

        Self {
            history,
            favorites,
            theme,
            language: language
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| default_language.to_string()),
        }
    }

    /// Move `word` to the front of the history, dropping the oldest past `max`
    pub fn record_search(&mut self, word: &str, max: usize) {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            return;
        }

        self.history.retain(|w| w.to_lowercase() != word);
        self.history.insert(0, word);
        self.history.truncate(max);
    }

    /// Flip membership, returning whether the word is now a favorite
    pub fn toggle_favorite(&mut self, word: &str) -> bool {
        if let Some(pos) = self.favorites.iter().position(|w| w == word) {
            self.favorites.remove(pos);
            false
        } else {
            self.favorites.push(word.to_string());
            true
        }
    }

    pub fn is_favorite(&self, word: &str) -> bool {
        self.favorites.iter().any(|w| w == word)
    }

    pub fn save_history(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        lexis_storage::save(store, keys::HISTORY, &self.history)
    }

    pub fn save_favorites(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        lexis_storage::save(store, keys::FAVORITES, &self.favorites)
    }

    pub fn save_theme(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        lexis_storage::save(store, keys::THEME, &self.theme)
    }

    pub fn save_language(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        lexis_storage::save(store, keys::LANGUAGE, &self.language)
    }
}
