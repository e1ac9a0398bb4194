// Rinkboard entry point.
//
// Startup sequence:
// 1. Load config (copying defaults on first run)
// 2. Initialize tracing (log to file, not terminal)
// 3. Build the league API client and sync orchestrator
// 4. Create mpsc channels
// 5. Spawn the app logic task
// 6. Run the TUI until the user quits
// 7. Wait briefly for the app task to wind down

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use directories::ProjectDirs;
use tokio::sync::mpsc;
use tracing::{error, info};

use rinkboard_core::api::HttpLeagueApi;
use rinkboard_core::sync::SyncOrchestrator;
use rinkboard_tui::config::{self, LoggingConfig};
use rinkboard_tui::{app, tui};

const DEFAULT_FILTER: &str = "rinkboard=info,warn";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config first: it says where the log goes.
    let config = config::load_config().context("failed to load configuration")?;

    let log_path = init_tracing(&config.logging)?;
    info!("Rinkboard starting up, logging to {}", log_path.display());

    let api = HttpLeagueApi::new(
        &config.api.base_url,
        Duration::from_secs(config.api.timeout_secs),
    )
    .context("failed to build HTTP client")?;
    info!(
        "League API at {} (timeout {}s), refresh every {}s",
        api.base_url(),
        config.api.timeout_secs,
        config.refresh.interval_secs
    );
    let orchestrator = SyncOrchestrator::new(Arc::new(api));

    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    let refresh = config.refresh.clone();
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, ui_tx, orchestrator, refresh).await {
            error!("Application loop error: {:#}", e);
        }
    });

    // Blocks until the user quits or the app task goes away.
    let tui_result = tui::run(ui_rx, cmd_tx).await;
    if let Err(e) = &tui_result {
        error!("TUI error: {:#}", e);
    }

    if tokio::time::timeout(Duration::from_secs(5), app_handle)
        .await
        .is_err()
    {
        error!("App task did not stop within 5s");
    }

    info!("Rinkboard shut down");
    tui_result.context("terminal UI failed")
}

/// Install a file-backed tracing subscriber and return the log file path.
///
/// The terminal belongs to the TUI, so nothing is written to stdout/stderr.
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<PathBuf> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = match &logging.dir {
        Some(dir) => dir.clone(),
        None => match ProjectDirs::from("", "", "rinkboard") {
            Some(dirs) => dirs.data_dir().join("logs"),
            None => std::env::current_dir()?.join("logs"),
        },
    };
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_path = log_dir.join("rinkboard.log");
    let log_file = std::fs::File::create(&log_path)
        .with_context(|| format!("failed to create {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(logging.filter.as_deref().unwrap_or(DEFAULT_FILTER))
    });

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(log_path)
}
