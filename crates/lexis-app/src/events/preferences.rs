use kanal::AsyncSender;
use lexis_core::AppState;
use lexis_types::{AppEvent, Theme};

pub async fn handle_toggle_favorite(
    state: &AppState,
    word: &str,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let word = word.trim().to_lowercase();
    if word.is_empty() {
        return Ok(());
    }

    let favorite = state.toggle_favorite(&word).await;
    tracing::info!("'{}' favorite: {}", word, favorite);

    app_to_ui_tx
        .send(AppEvent::FavoriteToggled { word, favorite })
        .await?;
    Ok(())
}

pub async fn handle_clear_history(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    state.clear_history().await;
    app_to_ui_tx
        .send(AppEvent::Status("History cleared".to_string()))
        .await?;
    Ok(())
}

pub async fn handle_theme_change(
    state: &AppState,
    theme: Theme,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    state.set_theme(theme).await;
    send_preferences(state, app_to_ui_tx).await
}

pub async fn handle_language_change(
    state: &AppState,
    language: &str,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    state.set_language(language).await;
    send_preferences(state, app_to_ui_tx).await
}

async fn send_preferences(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let prefs = state.preferences().await;
    app_to_ui_tx
        .send(AppEvent::PreferencesChanged {
            theme: prefs.theme,
            language: prefs.language,
        })
        .await?;
    Ok(())
}
