// Application state and orchestration logic.
//
// The app task owns the DataStore and the Navigator. It reacts to user
// commands, applies fetch results as they arrive, runs the periodic refresh,
// and pushes a fresh snapshot to the TUI after every change. Network work
// happens on spawned tasks that report back over channels.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::FuturesUnordered;
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use rinkboard_core::api::LeagueApi;
use rinkboard_core::history::MemoryHistory;
use rinkboard_core::metrics::{find_decreases, format_millions};
use rinkboard_core::model::{Ack, NewPlayer, PlayerId, SalaryUpdate, Settings};
use rinkboard_core::navigation::{NavAction, Navigator};
use rinkboard_core::salary_csv::preview_salary_csv;
use rinkboard_core::store::{Collection, DataStore};
use rinkboard_core::sync::{FetchFuture, Fetched, SyncOrchestrator, SyncSummary};
use rinkboard_core::view::View;

use crate::config::RefreshConfig;
use crate::protocol::{AppSnapshot, Notification, UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// Background results
// ---------------------------------------------------------------------------

/// Completion notices from spawned tasks, other than fetch results.
#[derive(Debug)]
pub enum AppEvent {
    SyncFinished(SyncSummary),
    WriteFinished {
        action: &'static str,
        /// Success text, or a user-facing failure message.
        result: Result<String, String>,
    },
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState<A: LeagueApi + 'static> {
    pub store: DataStore,
    pub nav: Navigator<MemoryHistory>,
    /// Collections whose most recent fetch failed.
    pub stale: Vec<Collection>,
    pub status: Option<String>,
    /// Collections still outstanding from a user-requested refresh.
    refreshing: Vec<Collection>,
    orchestrator: SyncOrchestrator<A>,
    fetch_tx: mpsc::Sender<Fetched>,
    event_tx: mpsc::Sender<AppEvent>,
    notices: Vec<Notification>,
}

impl<A: LeagueApi + 'static> AppState<A> {
    pub fn new(
        orchestrator: SyncOrchestrator<A>,
        fetch_tx: mpsc::Sender<Fetched>,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        AppState {
            store: DataStore::new(),
            nav: Navigator::in_memory(),
            stale: Vec::new(),
            status: None,
            refreshing: Vec::new(),
            orchestrator,
            fetch_tx,
            event_tx,
            notices: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            store: self.store.clone(),
            view: self.nav.view().clone(),
            syncing: self.orchestrator.is_syncing(),
            stale: self.stale.clone(),
            status: self.status.clone(),
            can_go_back: self.nav.history().can_go_back(),
            can_go_forward: self.nav.history().can_go_forward(),
        }
    }

    /// Notifications raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notices)
    }

    // --- commands ---

    /// Handle one command. Returns `false` when the app should shut down.
    pub fn handle_command(&mut self, cmd: UserCommand) -> bool {
        debug!("Command: {:?}", cmd);
        match cmd {
            UserCommand::Nav(action) => self.navigate(action),
            UserCommand::Refresh => {
                self.status = Some("Refreshing...".into());
                self.refreshing = Collection::ALL.to_vec();
                self.start_load();
            }
            UserCommand::Sync => {
                self.start_sync();
            }
            UserCommand::SaveSettings(settings) => self.save_settings(settings),
            UserCommand::UpdateSalary { player_id, update } => {
                self.update_salary(player_id, update)
            }
            UserCommand::CreatePlayer(player) => self.create_player(player),
            UserCommand::UploadSalaryFile(path) => self.upload_salary_file(path),
            UserCommand::Quit => return false,
        }
        true
    }

    fn navigate(&mut self, action: NavAction) {
        let before = self.nav.view().view();
        let before_stat = self.nav.view().selected_stat();
        if !self.nav.dispatch(action, &self.store) {
            return;
        }

        let view = self.nav.view();
        let changed = view.view() != before;
        match view.view() {
            View::TeamDetail(team_id) if changed || view.selected_stat() != before_stat => {
                let fetch = self
                    .orchestrator
                    .fetch_team_player_history(team_id, view.selected_stat());
                let pending = FuturesUnordered::new();
                pending.push(fetch);
                self.forward(pending);
            }
            View::PlayerDetail(player_id) if changed => {
                let pending = self.orchestrator.fetch_player(player_id);
                self.forward(pending);
            }
            _ => {}
        }
    }

    // --- loading ---

    /// Refresh every collection in the background.
    pub fn start_load(&self) {
        self.forward(self.orchestrator.fetch_all());
    }

    /// Claim the sync latch and run a sync cycle in the background.
    /// Returns `false` if one is already running.
    pub fn start_sync(&mut self) -> bool {
        let Some(guard) = self.orchestrator.try_begin_sync() else {
            return false;
        };
        let orchestrator = self.orchestrator.clone();
        let fetch_tx = self.fetch_tx.clone();
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            let summary = orchestrator.run_sync(guard, fetch_tx).await;
            let _ = event_tx.send(AppEvent::SyncFinished(summary)).await;
        });
        self.status = Some("Syncing...".into());
        true
    }

    fn forward(&self, mut pending: FuturesUnordered<FetchFuture>) {
        let tx = self.fetch_tx.clone();
        tokio::spawn(async move {
            while let Some(fetched) = pending.next().await {
                if tx.send(fetched).await.is_err() {
                    break;
                }
            }
        });
    }

    /// Apply one fetch result to the store.
    pub fn apply_fetched(&mut self, fetched: Fetched) {
        let collection = fetched.collection();
        let history_refreshed = matches!(fetched, Fetched::History(Ok(_)));
        match fetched.apply_to(&mut self.store) {
            Ok(()) => {
                if let Some(collection) = collection {
                    self.stale.retain(|c| *c != collection);
                }
                if history_refreshed {
                    self.report_history_anomalies();
                }
            }
            Err(_) => {
                if let Some(collection) = collection {
                    if !self.stale.contains(&collection) {
                        self.stale.push(collection);
                    }
                }
            }
        }

        if let Some(collection) = collection {
            self.finish_refresh_step(collection);
        }
    }

    /// Count `collection` off the pending refresh and report once the last
    /// one lands.
    fn finish_refresh_step(&mut self, collection: Collection) {
        let Some(pos) = self.refreshing.iter().position(|c| *c == collection) else {
            return;
        };
        self.refreshing.swap_remove(pos);
        if !self.refreshing.is_empty() {
            return;
        }
        self.status = Some(if self.stale.is_empty() {
            "Refreshed".to_string()
        } else {
            let names: Vec<&str> = self.stale.iter().map(|c| c.name()).collect();
            format!("Refresh failed: {}", names.join(", "))
        });
    }

    fn report_history_anomalies(&self) {
        for anomaly in find_decreases(&self.store.history) {
            warn!(
                "Cumulative points for {} dropped by {:.2} on {}",
                anomaly.key, -anomaly.delta, anomaly.day
            );
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SyncFinished(summary) => {
                self.status = Some(match (&summary.sync, &summary.salary_sync) {
                    (Ok(_), Ok(_)) => "Sync completed".to_string(),
                    (Err(e), _) | (_, Err(e)) => format!("Sync failed: {}", e.user_message()),
                });
            }
            AppEvent::WriteFinished { action, result } => match result {
                Ok(message) => {
                    info!("{} succeeded: {}", action, message);
                    self.status = Some(message);
                    self.start_load();
                }
                Err(message) => {
                    warn!("{} failed: {}", action, message);
                    self.notices
                        .push(Notification::error(format!("{action} failed"), message));
                }
            },
        }
    }

    // --- writes ---

    fn spawn_write<F>(&self, action: &'static str, work: F)
    where
        F: std::future::Future<Output = Result<String, String>> + Send + 'static,
    {
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = work.await;
            let _ = tx.send(AppEvent::WriteFinished { action, result }).await;
        });
    }

    fn save_settings(&self, settings: Settings) {
        let api = Arc::clone(self.orchestrator.api());
        self.spawn_write("Save settings", async move {
            api.update_settings(&settings)
                .await
                .map(|ack| ack_text(ack, "Settings saved"))
                .map_err(|e| e.user_message())
        });
    }

    fn update_salary(&self, player_id: PlayerId, update: SalaryUpdate) {
        let api = Arc::clone(self.orchestrator.api());
        self.spawn_write("Update salary", async move {
            api.update_salary(player_id, &update)
                .await
                .map(|ack| ack_text(ack, "Salary updated"))
                .map_err(|e| e.user_message())
        });
    }

    fn create_player(&self, player: NewPlayer) {
        let api = Arc::clone(self.orchestrator.api());
        self.spawn_write("Create player", async move {
            api.create_player(&player)
                .await
                .map(|ack| ack_text(ack, "Player created"))
                .map_err(|e| e.user_message())
        });
    }

    fn upload_salary_file(&self, path: PathBuf) {
        let api = Arc::clone(self.orchestrator.api());
        self.spawn_write("Salary upload", upload_salary_file(api, path));
    }
}

fn ack_text(ack: Ack, fallback: &str) -> String {
    if ack.message.is_empty() {
        fallback.to_string()
    } else {
        ack.message
    }
}

/// Read, preview, then upload a salary CSV.
async fn upload_salary_file<A: LeagueApi>(api: Arc<A>, path: PathBuf) -> Result<String, String> {
    let contents = tokio::fs::read(&path)
        .await
        .map_err(|e| format!("Could not read {}: {e}", path.display()))?;
    let preview = preview_salary_csv(contents.as_slice())
        .map_err(|e| format!("{} is not a usable salary file: {e}", path.display()))?;
    info!(
        "Uploading {} salary rows ({} skipped, {} in cap hits) from {}",
        preview.rows.len(),
        preview.skipped,
        format_millions(preview.total_dollars() / 1_000_000.0),
        path.display()
    );

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("salaries.csv")
        .to_string();
    let summary = api
        .upload_salaries(file_name, contents)
        .await
        .map_err(|e| e.user_message())?;
    Ok(if summary.message.is_empty() {
        format!("Updated {} salaries", summary.updated)
    } else {
        summary.message
    })
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

/// Run the app orchestrator until the TUI quits or goes away.
pub async fn run<A: LeagueApi + 'static>(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    orchestrator: SyncOrchestrator<A>,
    refresh: RefreshConfig,
) -> anyhow::Result<()> {
    let (fetch_tx, mut fetch_rx) = mpsc::channel(256);
    let (event_tx, mut event_rx) = mpsc::channel(64);
    let mut state = AppState::new(orchestrator, fetch_tx, event_tx);

    if refresh.sync_on_start {
        state.start_sync();
    } else {
        state.start_load();
    }
    if !push_updates(&mut state, &ui_tx).await {
        return Ok(());
    }

    let period = Duration::from_secs(refresh.interval_secs);
    let mut refresh_tick = tokio::time::interval_at(Instant::now() + period, period);
    refresh_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(cmd) => {
                        if !state.handle_command(cmd) {
                            info!("Quit requested");
                            break;
                        }
                    }
                    None => break,
                }
            }
            Some(fetched) = fetch_rx.recv() => {
                state.apply_fetched(fetched);
            }
            Some(event) = event_rx.recv() => {
                state.handle_event(event);
            }
            _ = refresh_tick.tick() => {
                if state.orchestrator.is_syncing() {
                    debug!("Skipping periodic refresh during sync");
                } else {
                    debug!("Periodic refresh");
                    state.start_load();
                }
            }
        }

        if !push_updates(&mut state, &ui_tx).await {
            debug!("UI channel closed; stopping app loop");
            break;
        }
    }

    Ok(())
}

/// Send pending notifications and a fresh snapshot. `false` once the TUI
/// has gone away.
async fn push_updates<A: LeagueApi + 'static>(
    state: &mut AppState<A>,
    ui_tx: &mpsc::Sender<UiUpdate>,
) -> bool {
    for notice in state.take_notices() {
        if ui_tx.send(UiUpdate::Notify(notice)).await.is_err() {
            return false;
        }
    }
    ui_tx
        .send(UiUpdate::Snapshot(Box::new(state.snapshot())))
        .await
        .is_ok()
}
