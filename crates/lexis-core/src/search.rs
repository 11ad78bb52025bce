use std::sync::Arc;

use futures::future::join_all;
use lexis_translator::{CachedTranslator, TranslationContext};
use lexis_types::{DictionaryEntry, LookupStatus, SearchView, TextKind, TranslationSlot};

use crate::dictionary::{DictionaryApi, LookupError};
use crate::preprocess::{DefaultPreprocessor, Preprocessor};
use crate::related::RelatedWordAggregator;
use crate::state::AppState;

/// Drives one search across the dictionary, the word network and the
/// translator, writing each result into the shared view as it lands
pub struct SearchOrchestrator {
    state: Arc<AppState>,
    dictionary: Arc<dyn DictionaryApi>,
    related: RelatedWordAggregator,
    translator: Arc<CachedTranslator>,
    preprocessor: DefaultPreprocessor,
}

struct TranslationJob {
    slot: TranslationSlot,
    text: String,
    context: TranslationContext,
}

impl SearchOrchestrator {
    pub fn new(
        state: Arc<AppState>,
        dictionary: Arc<dyn DictionaryApi>,
        related: RelatedWordAggregator,
        translator: Arc<CachedTranslator>,
    ) -> Self {
        Self {
            state,
            dictionary,
            related,
            translator,
            preprocessor: DefaultPreprocessor,
        }
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Run a search and return the resulting view.
    ///
    /// Returns `None` for blank input, and when a newer search replaced this
    /// one before it finished.
    pub async fn search(&self, input: &str) -> Option<SearchView> {
        let word = self.preprocessor.process(input);
        if word.is_empty() {
            tracing::debug!("Ignoring blank search");
            return None;
        }

        // History is written before any request goes out
        self.state.record_search(&word).await;
        let sequence = self.state.begin_search(&word).await;
        let language = self.state.language().await;
        tracing::info!("Search #{} for '{}' (target {})", sequence, word, language);

        tokio::join!(
            self.lookup_definitions(sequence, &word, &language),
            self.lookup_related(sequence, &word),
            self.translate_headword(sequence, &word, &language),
        );

        let view = self.state.view().await;
        if view.sequence != sequence {
            tracing::debug!("Search #{} superseded by #{}", sequence, view.sequence);
            return None;
        }
        Some(view)
    }

    async fn lookup_definitions(&self, sequence: u64, word: &str, language: &str) {
        let status = match self.dictionary.lookup(word).await {
            Ok(entries) if entries.is_empty() => LookupStatus::NotFound(word.to_string()),
            Ok(entries) => LookupStatus::Ready(entries),
            Err(LookupError::NotFound(word)) => {
                tracing::debug!("No dictionary entry for '{}'", word);
                LookupStatus::NotFound(word)
            }
            Err(LookupError::Failed(reason)) => {
                tracing::warn!("Dictionary lookup for '{}' failed: {}", word, reason);
                LookupStatus::Failed(reason)
            }
        };

        let entries = status.entries().to_vec();
        if !self
            .state
            .update_view(sequence, |view| view.status = status)
            .await
        {
            return;
        }

        if !entries.is_empty() {
            self.translate_definitions(sequence, word, &entries, language)
                .await;
        }
    }

    async fn lookup_related(&self, sequence: u64, word: &str) {
        match self.related.related_words(word).await {
            Ok(related) => {
                self.state
                    .update_view(sequence, |view| view.related = related)
                    .await;
            }
            Err(e) => {
                // Previous list stays on screen
                tracing::warn!("Related words for '{}' unavailable: {}", word, e);
            }
        }
    }

    async fn translate_headword(&self, sequence: u64, word: &str, language: &str) {
        let context = TranslationContext::Headword {
            headword: word.to_string(),
        };
        let translated = self.translator.translate(word, context, language).await;
        self.state
            .update_view(sequence, |view| view.headword_translation = Some(translated))
            .await;
    }

    /// Translate every definition and example independently and in parallel
    async fn translate_definitions(
        &self,
        sequence: u64,
        headword: &str,
        entries: &[DictionaryEntry],
        language: &str,
    ) {
        let jobs = translation_jobs(headword, entries);
        tracing::debug!("Translating {} definition texts for '{}'", jobs.len(), headword);

        join_all(jobs.into_iter().map(|job| async move {
            let translated = self
                .translator
                .translate(&job.text, job.context, language)
                .await;
            self.state
                .update_view(sequence, |view| {
                    view.translations.insert(job.slot, translated);
                })
                .await;
        }))
        .await;
    }
}

fn translation_jobs(headword: &str, entries: &[DictionaryEntry]) -> Vec<TranslationJob> {
    let mut jobs = Vec::new();

    for (entry_idx, entry) in entries.iter().enumerate() {
        for (meaning_idx, meaning) in entry.meanings.iter().enumerate() {
            for (def_idx, definition) in meaning.definitions.iter().enumerate() {
                let slot = TranslationSlot {
                    entry: entry_idx,
                    meaning: meaning_idx,
                    definition: def_idx,
                    kind: TextKind::Definition,
                };
                jobs.push(TranslationJob {
                    slot,
                    text: definition.definition.clone(),
                    context: TranslationContext::Definition {
                        headword: headword.to_string(),
                        part_of_speech: meaning.part_of_speech.clone(),
                        index: def_idx,
                    },
                });

                if let Some(example) = definition.example.as_ref().filter(|e| !e.trim().is_empty()) {
                    jobs.push(TranslationJob {
                        slot: TranslationSlot {
                            kind: TextKind::Example,
                            ..slot
                        },
                        text: example.clone(),
                        context: TranslationContext::Example {
                            headword: headword.to_string(),
                            part_of_speech: meaning.part_of_speech.clone(),
                            index: def_idx,
                        },
                    });
                }
            }
        }
    }

    jobs
}
