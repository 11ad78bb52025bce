use kanal::AsyncSender;
use lexis_core::SearchOrchestrator;
use lexis_types::AppEvent;

pub async fn handle_search(
    orchestrator: &SearchOrchestrator,
    text: &str,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    match orchestrator.search(text).await {
        Some(view) => {
            tracing::debug!(
                "Sending results for '{}' ({} related words)",
                view.query,
                view.related.len()
            );
            app_to_ui_tx.send(AppEvent::ShowResults(view)).await?;
        }
        None => {
            tracing::debug!("Search for '{}' produced nothing to show", text.trim());
        }
    }

    Ok(())
}
