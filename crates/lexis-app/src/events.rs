use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lexis_core::SearchOrchestrator;
use lexis_types::{AppEvent, UiEvent};
use tokio::task::JoinSet;

pub mod preferences;
pub mod search;

use preferences::{
    handle_clear_history, handle_language_change, handle_theme_change, handle_toggle_favorite,
};
use search::handle_search;

/// App's main loop
pub async fn event_loop(
    orchestrator: Arc<SearchOrchestrator>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    tracing::debug!("[EVENT_LOOP] Starting main loop, waiting for events");
    let mut searches = JoinSet::new();
    loop {
        let event = ui_to_app_rx.recv().await?;

        tracing::debug!(
            "[EVENT_LOOP] EVENT RECEIVED: {:?}",
            std::mem::discriminant(&event)
        );
        while searches.try_join_next().is_some() {}

        if !handle_events(&orchestrator, &app_to_ui_tx, &mut searches, event).await? {
            tracing::info!(
                "[EVENT_LOOP] Close requested, finishing {} pending searches",
                searches.len()
            );
            while searches.join_next().await.is_some() {}
            // Lets the renderer stop after everything above is printed
            app_to_ui_tx.send(AppEvent::UiEvent(UiEvent::Close)).await?;
            return Ok(());
        }
    }
}

/// Returns `false` once the UI asks to close
async fn handle_events(
    orchestrator: &Arc<SearchOrchestrator>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    searches: &mut JoinSet<()>,
    event: AppEvent,
) -> anyhow::Result<bool> {
    let state = orchestrator.state();

    match event {
        AppEvent::UiEvent(UiEvent::SearchText(text)) => {
            // Searches run on their own task so a newer one can supersede a slow one
            let orchestrator = orchestrator.clone();
            let tx = app_to_ui_tx.clone();
            searches.spawn(async move {
                if let Err(e) = handle_search(&orchestrator, &text, &tx).await {
                    tracing::error!("Failed to deliver search results: {}", e);
                }
            });
        }
        AppEvent::UiEvent(UiEvent::ToggleFavorite(word)) => {
            handle_toggle_favorite(state, &word, app_to_ui_tx).await?;
        }
        AppEvent::UiEvent(UiEvent::ShowHistory) => {
            app_to_ui_tx
                .send(AppEvent::ShowHistory(state.history().await))
                .await?;
        }
        AppEvent::UiEvent(UiEvent::ShowFavorites) => {
            app_to_ui_tx
                .send(AppEvent::ShowFavorites(state.favorites().await))
                .await?;
        }
        AppEvent::UiEvent(UiEvent::ClearHistory) => {
            handle_clear_history(state, app_to_ui_tx).await?;
        }
        AppEvent::UiEvent(UiEvent::SetTheme(theme)) => {
            handle_theme_change(state, theme, app_to_ui_tx).await?;
        }
        AppEvent::UiEvent(UiEvent::SetLanguage(language)) => {
            handle_language_change(state, &language, app_to_ui_tx).await?;
        }
        AppEvent::UiEvent(UiEvent::Close) => return Ok(false),
        AppEvent::ShowResults(_)
        | AppEvent::ShowHistory(_)
        | AppEvent::ShowFavorites(_)
        | AppEvent::FavoriteToggled { .. }
        | AppEvent::PreferencesChanged { .. }
        | AppEvent::Status(_) => {
            // UI-only events, ignore in backend
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use lexis_config::Config;
    use lexis_core::{
        AppState, DictionaryApi, LookupError, RelatedError, RelatedWordAggregator,
        RelatedWordsApi, Relation,
    };
    use lexis_storage::MemoryStore;
    use lexis_translator::{CachedTranslator, MyMemoryTranslator};
    use lexis_types::{DictionaryEntry, LookupStatus, RelatedWord};

    use super::*;

    struct SlowDictionary;

    #[async_trait]
    impl DictionaryApi for SlowDictionary {
        async fn lookup(&self, word: &str) -> Result<Vec<DictionaryEntry>, LookupError> {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Err(LookupError::NotFound(word.to_string()))
        }
    }

    struct EmptyNetwork;

    #[async_trait]
    impl RelatedWordsApi for EmptyNetwork {
        async fn fetch(&self, _relation: Relation, _word: &str) -> Result<Vec<RelatedWord>, RelatedError> {
            Ok(Vec::new())
        }
    }

    fn orchestrator() -> Arc<SearchOrchestrator> {
        let mut config = Config::default();
        // English target, the translation provider is never called
        config.preferences.default_language = "en".into();
        let store = Arc::new(MemoryStore::new());

        let provider = Arc::new(MyMemoryTranslator::new(
            config.api.translation_url.clone(),
            None,
            Duration::from_secs(1),
        ));
        let translator = Arc::new(CachedTranslator::load(
            provider,
            store.clone(),
            chrono::Duration::hours(24),
        ));
        let state = Arc::new(AppState::new(config, store));

        Arc::new(SearchOrchestrator::new(
            state,
            Arc::new(SlowDictionary),
            RelatedWordAggregator::new(Arc::new(EmptyNetwork), 30),
            translator,
        ))
    }

    #[tokio::test]
    async fn test_close_waits_for_pending_search() {
        let (ui_tx, ui_rx) = kanal::unbounded_async();
        let (app_tx, app_rx) = kanal::unbounded_async();

        ui_tx
            .send(AppEvent::UiEvent(UiEvent::SearchText("run".into())))
            .await
            .unwrap();
        ui_tx.send(AppEvent::UiEvent(UiEvent::Close)).await.unwrap();

        event_loop(orchestrator(), ui_rx, app_tx).await.unwrap();

        match app_rx.try_recv() {
            Ok(Some(AppEvent::ShowResults(view))) => {
                assert_eq!(view.query, "run");
                assert_eq!(view.status, LookupStatus::NotFound("run".into()));
            }
            _ => panic!("search results were not delivered before close"),
        }
        assert!(matches!(
            app_rx.try_recv(),
            Ok(Some(AppEvent::UiEvent(UiEvent::Close)))
        ));
    }

    #[tokio::test]
    async fn test_history_request_answered() {
        let orchestrator = orchestrator();
        orchestrator.state().record_search("walk").await;
        let (ui_tx, ui_rx) = kanal::unbounded_async();
        let (app_tx, app_rx) = kanal::unbounded_async();

        ui_tx.send(AppEvent::UiEvent(UiEvent::ShowHistory)).await.unwrap();
        ui_tx.send(AppEvent::UiEvent(UiEvent::Close)).await.unwrap();
        event_loop(orchestrator, ui_rx, app_tx).await.unwrap();

        match app_rx.try_recv() {
            Ok(Some(AppEvent::ShowHistory(words))) => assert_eq!(words, vec!["walk"]),
            _ => panic!("Wrong event"),
        }
    }
}

