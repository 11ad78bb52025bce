use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;

mod controller;
mod events;
mod io;
mod profile;
mod ui;

use self::controller::AppController;

#[derive(Parser)]
#[command(name = "lexis", about = "English dictionary lookup with translations and a word network")]
struct Cli {
    /// JSON config file, environment defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory for history, favorites and the translation cache
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Log level, overridden by RUST_LOG
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Logs go to stderr, stdout is the render surface
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = profile::load_config(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = Some(dir.to_string_lossy().into_owned());
    }

    let store = profile::open_store(&config);
    let orchestrator = Arc::new(profile::build_orchestrator(config, store));

    let controller = AppController::new(orchestrator);
    let mut tasks = controller.spawn_tasks();

    let graceful = tokio::select! {
        result = signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("failed to listen for ctrl+c: {e}");
            }
            tracing::info!("Shutdown requested");
            false
        }
        Some(result) = tasks.join_next() => match result {
            Ok(Ok(())) => {
                tracing::info!("task exited");
                true
            }
            Ok(Err(e)) => {
                tracing::error!("task failed: {e}");
                false
            }
            Err(e) => {
                tracing::error!("task panicked: {e}");
                false
            }
        },
    };

    controller.shutdown();
    if graceful {
        // Pending searches finish and print unless ctrl+c cuts them short
        tokio::select! {
            _ = async { while tasks.join_next().await.is_some() {} } => {}
            _ = signal::ctrl_c() => {
                tracing::info!("Shutdown requested");
            }
        }
    }
    tasks.shutdown().await;

    Ok(())
}
