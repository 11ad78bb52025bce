pub mod dictionary;
pub mod types;

pub use dictionary::{Definition, DictionaryEntry, License, Meaning, Phonetic, RelatedWord};
pub use types::{
    AppEvent, LanguageCode, LookupStatus, SearchView, TextKind, Theme, TranslationSlot, UiEvent,
};
