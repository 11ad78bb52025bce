use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dictionary::{DictionaryEntry, RelatedWord};

/// ISO 639-1 code ("en", "es", ...)
pub type LanguageCode = String;

#[derive(Debug, Clone)]
pub enum AppEvent {
    UiEvent(UiEvent),
    ShowResults(SearchView),
    ShowHistory(Vec<String>),
    ShowFavorites(Vec<String>),
    FavoriteToggled {
        word: String,
        favorite: bool,
    },
    PreferencesChanged {
        theme: Theme,
        language: LanguageCode,
    },
    Status(String),
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    SearchText(String),
    ToggleFavorite(String),
    ShowHistory,
    ShowFavorites,
    ClearHistory,
    SetTheme(Theme),
    SetLanguage(LanguageCode),
    Close,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// State of the dictionary half of a search
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LookupStatus {
    #[default]
    Idle,
    Loading,
    Ready(Vec<DictionaryEntry>),
    NotFound(String),
    Failed(String),
}

impl LookupStatus {
    pub fn is_error(&self) -> bool {
        matches!(self, LookupStatus::NotFound(_) | LookupStatus::Failed(_))
    }

    pub fn entries(&self) -> &[DictionaryEntry] {
        match self {
            LookupStatus::Ready(entries) => entries,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextKind {
    Definition,
    Example,
}

/// Position of a translated definition or example inside a result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TranslationSlot {
    pub entry: usize,
    pub meaning: usize,
    pub definition: usize,
    pub kind: TextKind,
}

/// Everything the display needs for the current search.
///
/// Each field is written independently as its fetch resolves, so a reader
/// may observe definitions before the word network or the other way round.
#[derive(Debug, Clone, Default)]
pub struct SearchView {
    pub sequence: u64,
    pub query: String,
    pub status: LookupStatus,
    pub related: Vec<RelatedWord>,
    pub headword_translation: Option<String>,
    pub translations: BTreeMap<TranslationSlot, String>,
}

impl SearchView {
    pub fn translation(&self, slot: &TranslationSlot) -> Option<&str> {
        self.translations.get(slot).map(String::as_str)
    }
}
