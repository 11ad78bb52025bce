use std::fmt::Write;
use std::sync::Arc;

use kanal::AsyncReceiver;
use lexis_core::AppState;
use lexis_types::{AppEvent, LookupStatus, SearchView, TextKind, Theme, TranslationSlot, UiEvent};

use crate::io::HELP;

const RESET: &str = "\x1b[0m";
const SYNONYM_LIMIT: usize = 5;
const RELATED_PER_LINE: usize = 6;

/// Terminal renderer, the display side of the app
pub async fn ui_loop(
    state: Arc<AppState>,
    app_to_ui_rx: AsyncReceiver<AppEvent>,
) -> anyhow::Result<()> {
    println!("lexis: type a word to look it up\n{HELP}");

    while let Ok(event) = app_to_ui_rx.recv().await {
        let theme = state.theme().await;
        let output = match event {
            AppEvent::ShowResults(view) => {
                let favorite = state.is_favorite(&view.query).await;
                render_view(&view, theme, favorite)
            }
            AppEvent::ShowHistory(words) => render_list("Recent searches", &words, theme),
            AppEvent::ShowFavorites(words) => render_list("Favorites", &words, theme),
            AppEvent::FavoriteToggled { word, favorite } => {
                if favorite {
                    format!("★ '{word}' added to favorites")
                } else {
                    format!("☆ '{word}' removed from favorites")
                }
            }
            AppEvent::PreferencesChanged { theme, language } => {
                format!("Theme: {}, language: {}", theme.as_str(), language)
            }
            AppEvent::Status(message) => message,
            AppEvent::UiEvent(UiEvent::Close) => {
                tracing::debug!("Renderer closing");
                return Ok(());
            }
            AppEvent::UiEvent(_) => continue,
        };
        println!("{output}");
    }

    tracing::debug!("UI channel closed");
    Ok(())
}

fn accent(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "\x1b[34m",
        Theme::Dark => "\x1b[96m",
    }
}

pub fn render_view(view: &SearchView, theme: Theme, favorite: bool) -> String {
    let color = accent(theme);
    let mut out = String::new();
    let star = if favorite { " ★" } else { "" };

    let _ = writeln!(out, "{color}== {}{star} =={RESET}", view.query);
    if let Some(translation) = view
        .headword_translation
        .as_deref()
        .filter(|t| *t != view.query)
    {
        let _ = writeln!(out, "   → {translation}");
    }

    match &view.status {
        LookupStatus::Idle | LookupStatus::Loading => {
            let _ = writeln!(out, "   (loading)");
        }
        LookupStatus::NotFound(word) => {
            let _ = writeln!(out, "   No definitions found for '{word}'. Try another word.");
        }
        LookupStatus::Failed(reason) => {
            let _ = writeln!(out, "   Lookup failed ({reason}). Search again to retry.");
        }
        LookupStatus::Ready(entries) => {
            for (entry_idx, entry) in entries.iter().enumerate() {
                if let Some(pronunciation) = entry.pronunciation() {
                    let _ = writeln!(out, "   {pronunciation}");
                }
                if let Some(audio) = entry.audio_url() {
                    let _ = writeln!(out, "   audio: {audio}");
                }

                for (meaning_idx, meaning) in entry.meanings.iter().enumerate() {
                    let _ = writeln!(out, "{color}  {}{RESET}", meaning.part_of_speech);

                    for (def_idx, definition) in meaning.definitions.iter().enumerate() {
                        let slot = TranslationSlot {
                            entry: entry_idx,
                            meaning: meaning_idx,
                            definition: def_idx,
                            kind: TextKind::Definition,
                        };
                        let _ = writeln!(out, "   {}. {}", def_idx + 1, definition.definition);
                        write_translation(&mut out, view, &slot, &definition.definition);

                        if let Some(example) = &definition.example {
                            let slot = TranslationSlot {
                                kind: TextKind::Example,
                                ..slot
                            };
                            let _ = writeln!(out, "      \"{example}\"");
                            write_translation(&mut out, view, &slot, example);
                        }
                    }

                    let synonyms = meaning.top_synonyms(SYNONYM_LIMIT);
                    if !synonyms.is_empty() {
                        let _ = writeln!(out, "   synonyms: {}", synonyms.join(", "));
                    }
                    let antonyms = meaning.top_antonyms(SYNONYM_LIMIT);
                    if !antonyms.is_empty() {
                        let _ = writeln!(out, "   antonyms: {}", antonyms.join(", "));
                    }
                }
            }
        }
    }

    if !view.related.is_empty() {
        let _ = writeln!(out, "{color}  word network{RESET}");
        for chunk in view.related.chunks(RELATED_PER_LINE) {
            let words: Vec<&str> = chunk.iter().map(|w| w.word.as_str()).collect();
            let _ = writeln!(out, "   {}", words.join(" · "));
        }
    }

    out
}

fn write_translation(out: &mut String, view: &SearchView, slot: &TranslationSlot, original: &str) {
    if let Some(translated) = view.translation(slot).filter(|t| *t != original) {
        let _ = writeln!(out, "      ↳ {translated}");
    }
}

pub fn render_list(title: &str, words: &[String], theme: Theme) -> String {
    let color = accent(theme);
    if words.is_empty() {
        return format!("{color}{title}{RESET}: (none)");
    }
    let mut out = format!("{color}{title}{RESET}:");
    for word in words {
        let _ = write!(out, "\n  {word}");
    }
    out
}
