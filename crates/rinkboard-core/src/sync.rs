// Sync orchestration: concurrent collection fetches and the guarded
// sync-then-reload cycle.
//
// Every remote read comes back as a `Fetched` value tagged with what it is
// for, so the owner of the DataStore can apply results one at a time in
// whatever order they arrive.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::stream::FuturesUnordered;
use futures_util::{FutureExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::{ApiError, LeagueApi};
use crate::model::{
    Ack, HistorySnapshot, Player, PlayerId, SalaryRecord, ScoringRules, Settings, Stat, Team,
    TeamId,
};
use crate::store::{Collection, DataStore, PlayerHistory, TeamPlayerHistory};

// ---------------------------------------------------------------------------
// Fetch results
// ---------------------------------------------------------------------------

/// One completed remote read.
#[derive(Debug)]
pub enum Fetched {
    Teams(Result<Vec<Team>, ApiError>),
    FreeAgents(Result<Vec<Player>, ApiError>),
    ScoringRules(Result<ScoringRules, ApiError>),
    History(Result<Vec<HistorySnapshot>, ApiError>),
    Settings(Result<Settings, ApiError>),
    Salaries(Result<Vec<SalaryRecord>, ApiError>),
    TeamPlayerHistory {
        team_id: TeamId,
        stat: Stat,
        result: Result<Vec<HistorySnapshot>, ApiError>,
    },
    PlayerHistory {
        player_id: PlayerId,
        result: Result<Vec<HistorySnapshot>, ApiError>,
    },
    PlayerDetail {
        player_id: PlayerId,
        result: Result<Player, ApiError>,
    },
}

impl Fetched {
    /// The collection a full load refreshes with this result, if any.
    /// Detail-view reads return `None`.
    pub fn collection(&self) -> Option<Collection> {
        match self {
            Fetched::Teams(_) => Some(Collection::Teams),
            Fetched::FreeAgents(_) => Some(Collection::FreeAgents),
            Fetched::ScoringRules(_) => Some(Collection::ScoringRules),
            Fetched::History(_) => Some(Collection::History),
            Fetched::Settings(_) => Some(Collection::Settings),
            Fetched::Salaries(_) => Some(Collection::Salaries),
            Fetched::TeamPlayerHistory { .. }
            | Fetched::PlayerHistory { .. }
            | Fetched::PlayerDetail { .. } => None,
        }
    }

    /// Write a successful result into `store`. A failure leaves the previous
    /// value in place (apart from the first-load team placeholders) and is
    /// handed back to the caller.
    pub fn apply_to(self, store: &mut DataStore) -> Result<(), ApiError> {
        match self {
            Fetched::Teams(Ok(teams)) => store.replace_teams(teams),
            Fetched::Teams(Err(e)) => {
                warn!("Failed to fetch teams: {}", e);
                store.teams_fetch_failed();
                return Err(e);
            }
            Fetched::FreeAgents(result) => {
                store.replace_free_agents(logged(result, "free agents")?)
            }
            Fetched::ScoringRules(result) => {
                store.replace_scoring_rules(logged(result, "scoring rules")?)
            }
            Fetched::History(result) => store.replace_history(logged(result, "team history")?),
            Fetched::Settings(result) => store.replace_settings(logged(result, "settings")?),
            Fetched::Salaries(result) => store.replace_salaries(logged(result, "salaries")?),
            Fetched::TeamPlayerHistory {
                team_id,
                stat,
                result,
            } => {
                let snapshots = logged(result, "team player history")?;
                store.team_player_history = Some(TeamPlayerHistory {
                    team_id,
                    stat,
                    snapshots,
                });
            }
            Fetched::PlayerHistory { player_id, result } => {
                let snapshots = logged(result, "player history")?;
                store.player_history = Some(PlayerHistory {
                    player_id,
                    snapshots,
                });
            }
            Fetched::PlayerDetail { player_id, result } => {
                let player = logged(result, "player detail")?;
                if player.id != player_id {
                    debug!("Player detail for {} came back as id {}", player_id, player.id);
                }
                store.player_detail = Some(player);
            }
        }
        Ok(())
    }
}

fn logged<T>(result: Result<T, ApiError>, what: &str) -> Result<T, ApiError> {
    if let Err(e) = &result {
        warn!("Failed to fetch {}: {}", what, e);
    }
    result
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// Which collections a full load failed to refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub failed: Vec<Collection>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Apply one fetch result and note its failure, if any.
    pub fn apply(&mut self, fetched: Fetched, store: &mut DataStore) {
        let collection = fetched.collection();
        if fetched.apply_to(store).is_err() {
            if let Some(collection) = collection {
                self.failed.push(collection);
            }
        }
    }
}

/// Outcome of the two server-side sync requests.
#[derive(Debug)]
pub struct SyncSummary {
    pub sync: Result<Ack, ApiError>,
    pub salary_sync: Result<Ack, ApiError>,
}

impl SyncSummary {
    pub fn succeeded(&self) -> bool {
        self.sync.is_ok() && self.salary_sync.is_ok()
    }
}

#[derive(Debug)]
pub enum SyncOutcome {
    /// Another sync cycle was already in flight; nothing was sent.
    Rejected,
    Completed { summary: SyncSummary, load: LoadReport },
}

// ---------------------------------------------------------------------------
// In-flight guard
// ---------------------------------------------------------------------------

/// Held for the duration of a sync cycle. Dropping it reopens the latch,
/// including when the cycle fails or its future is dropped.
#[derive(Debug)]
pub struct SyncGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for SyncGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
        debug!("Sync latch released");
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

pub type FetchFuture = BoxFuture<'static, Fetched>;

pub struct SyncOrchestrator<A: LeagueApi + 'static> {
    api: Arc<A>,
    in_flight: Arc<AtomicBool>,
}

impl<A: LeagueApi + 'static> Clone for SyncOrchestrator<A> {
    fn clone(&self) -> Self {
        SyncOrchestrator {
            api: Arc::clone(&self.api),
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

impl<A: LeagueApi + 'static> SyncOrchestrator<A> {
    pub fn new(api: Arc<A>) -> Self {
        SyncOrchestrator {
            api,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    pub fn is_syncing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Start every collection fetch at once. Results come out in completion
    /// order.
    pub fn fetch_all(&self) -> FuturesUnordered<FetchFuture> {
        let pending = FuturesUnordered::new();
        for collection in Collection::ALL {
            pending.push(self.fetch_collection(collection));
        }
        pending
    }

    fn fetch_collection(&self, collection: Collection) -> FetchFuture {
        let api = Arc::clone(&self.api);
        match collection {
            Collection::Teams => async move { Fetched::Teams(api.teams().await) }.boxed(),
            Collection::FreeAgents => {
                async move { Fetched::FreeAgents(api.free_agents().await) }.boxed()
            }
            Collection::ScoringRules => {
                async move { Fetched::ScoringRules(api.scoring_rules().await) }.boxed()
            }
            Collection::History => {
                async move { Fetched::History(api.team_history().await) }.boxed()
            }
            Collection::Settings => async move { Fetched::Settings(api.settings().await) }.boxed(),
            Collection::Salaries => async move { Fetched::Salaries(api.salaries().await) }.boxed(),
        }
    }

    /// Per-player history for the team detail chart.
    pub fn fetch_team_player_history(&self, team_id: TeamId, stat: Stat) -> FetchFuture {
        let api = Arc::clone(&self.api);
        async move {
            Fetched::TeamPlayerHistory {
                team_id,
                stat,
                result: api.team_player_history(team_id, stat).await,
            }
        }
        .boxed()
    }

    /// History and full-detail reads for the player detail view.
    pub fn fetch_player(&self, player_id: PlayerId) -> FuturesUnordered<FetchFuture> {
        let pending = FuturesUnordered::new();
        let api = Arc::clone(&self.api);
        pending.push(
            async move {
                Fetched::PlayerHistory {
                    player_id,
                    result: api.player_history(player_id).await,
                }
            }
            .boxed(),
        );
        let api = Arc::clone(&self.api);
        pending.push(
            async move {
                Fetched::PlayerDetail {
                    player_id,
                    result: api.player(player_id).await,
                }
            }
            .boxed(),
        );
        pending
    }

    /// Refresh every collection, applying each result as it lands.
    pub async fn load_all(&self, store: &mut DataStore) -> LoadReport {
        let mut pending = self.fetch_all();
        let mut report = LoadReport::default();
        while let Some(fetched) = pending.next().await {
            report.apply(fetched, store);
        }
        if report.is_complete() {
            info!("Loaded all collections");
        } else {
            warn!("Load finished with failures: {:?}", report.failed);
        }
        report
    }

    /// Claim the in-flight latch. `None` if a sync cycle is already running.
    pub fn try_begin_sync(&self) -> Option<SyncGuard> {
        match self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => Some(SyncGuard {
                flag: Arc::clone(&self.in_flight),
            }),
            Err(_) => {
                debug!("Sync already in flight; ignoring request");
                None
            }
        }
    }

    async fn run_server_syncs(&self) -> SyncSummary {
        info!("Triggering data and salary sync");
        let (sync, salary_sync) = tokio::join!(self.api.sync(), self.api.sync_salaries());
        if let Err(e) = &sync {
            warn!("Data sync failed: {}", e);
        }
        if let Err(e) = &salary_sync {
            warn!("Salary sync failed: {}", e);
        }
        SyncSummary { sync, salary_sync }
    }

    /// Run a full sync cycle under `guard`, forwarding the reload's fetch
    /// results into `sink` instead of applying them. The guard is held until
    /// the last result has been forwarded.
    pub async fn run_sync(&self, guard: SyncGuard, sink: mpsc::Sender<Fetched>) -> SyncSummary {
        let summary = self.run_server_syncs().await;
        let mut pending = self.fetch_all();
        while let Some(fetched) = pending.next().await {
            if sink.send(fetched).await.is_err() {
                debug!("Fetch receiver dropped during sync reload");
                break;
            }
        }
        drop(guard);
        summary
    }

    /// Sync the server, then reload everything into `store`. The reload runs
    /// whether or not the sync requests succeeded.
    pub async fn trigger_sync(&self, store: &mut DataStore) -> SyncOutcome {
        let Some(guard) = self.try_begin_sync() else {
            return SyncOutcome::Rejected;
        };
        let summary = self.run_server_syncs().await;
        let load = self.load_all(store).await;
        drop(guard);
        SyncOutcome::Completed { summary, load }
    }
}
