use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lexis_core::SearchOrchestrator;
use lexis_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::input_loop;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(64),  // results and status lines
            ui_to_app: kanal::bounded_async(16),  // typed commands
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    orchestrator: Arc<SearchOrchestrator>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(orchestrator: Arc<SearchOrchestrator>) -> Self {
        Self {
            channels: ChannelSet::new(),
            orchestrator,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.orchestrator.clone(),
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
        ));

        // UI loop
        tasks.spawn(ui_loop(
            self.orchestrator.state().clone(),
            self.channels.app_to_ui.1.clone(),
        ));

        // Terminal input
        tasks.spawn(input_loop(
            self.cancel_token.child_token(),
            self.channels.ui_to_app.0.clone(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
