// Shared fixtures: an in-process LeagueApi with call counters and failure
// switches.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rinkboard_core::api::{ApiError, LeagueApi};
use rinkboard_core::model::{
    Ack, HistorySnapshot, NewPlayer, Player, PlayerId, SalaryRecord, SalaryUpdate, ScoringRules,
    Settings, Stat, Team, TeamId, UploadSummary,
};
use rinkboard_core::store::Collection;

pub fn player(id: PlayerId, name: &str, position: &str, points: f64) -> Player {
    Player {
        id,
        full_name: name.to_string(),
        position: position.to_string(),
        total_points: points,
        ..Player::default()
    }
}

pub fn team(id: TeamId, name: &str, points: f64, players: Vec<Player>) -> Team {
    Team {
        id,
        name: name.to_string(),
        rank: id as u32,
        points,
        players,
        ..Team::default()
    }
}

pub fn league_teams() -> Vec<Team> {
    vec![
        team(
            3,
            "Ice Hogs",
            980.0,
            vec![player(9, "Rostered Nine", "C", 120.0), player(10, "Rostered Ten", "D", 80.0)],
        ),
        team(4, "Puck Bunnies", 940.0, vec![player(11, "Rostered Eleven", "LW", 99.0)]),
    ]
}

pub fn league_free_agents() -> Vec<Player> {
    vec![player(40, "Free Forty", "C", 60.0), player(41, "Free Forty-One", "D", 44.0)]
}

pub fn league_history() -> Vec<HistorySnapshot> {
    vec![
        HistorySnapshot::new("2025-11-01").with("Ice Hogs", 900.0).with("Puck Bunnies", 910.0),
        HistorySnapshot::new("2025-11-02").with("Ice Hogs", 980.0).with("Puck Bunnies", 940.0),
    ]
}

fn unavailable() -> ApiError {
    ApiError::Status {
        status: 503,
        detail: Some("Upstream unavailable".into()),
    }
}

#[derive(Default)]
pub struct FakeApi {
    pub failing: HashSet<Collection>,
    pub fail_sync: bool,
    pub sync_calls: AtomicUsize,
    pub salary_sync_calls: AtomicUsize,
    pub teams_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(collections: &[Collection]) -> Self {
        FakeApi {
            failing: collections.iter().copied().collect(),
            ..Self::default()
        }
    }

    fn check(&self, collection: Collection) -> Result<(), ApiError> {
        if self.failing.contains(&collection) {
            Err(unavailable())
        } else {
            Ok(())
        }
    }

    pub fn syncs(&self) -> usize {
        self.sync_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LeagueApi for FakeApi {
    async fn teams(&self) -> Result<Vec<Team>, ApiError> {
        self.teams_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.check(Collection::Teams)?;
        Ok(league_teams())
    }

    async fn free_agents(&self) -> Result<Vec<Player>, ApiError> {
        self.check(Collection::FreeAgents)?;
        Ok(league_free_agents())
    }

    async fn scoring_rules(&self) -> Result<ScoringRules, ApiError> {
        self.check(Collection::ScoringRules)?;
        Ok(BTreeMap::from([("G".to_string(), 3.0), ("A".to_string(), 2.0)]))
    }

    async fn team_history(&self) -> Result<Vec<HistorySnapshot>, ApiError> {
        self.check(Collection::History)?;
        Ok(league_history())
    }

    async fn team_player_history(
        &self,
        team_id: TeamId,
        stat: Stat,
    ) -> Result<Vec<HistorySnapshot>, ApiError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![HistorySnapshot::new("2025-11-02")
            .with(format!("team {team_id}"), 1.0)
            .with(stat.key(), 2.0)])
    }

    async fn player_history(&self, player_id: PlayerId) -> Result<Vec<HistorySnapshot>, ApiError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![
            HistorySnapshot::new("2025-11-01").with("total_points", 10.0),
            HistorySnapshot::new("2025-11-02").with("total_points", 10.0 + player_id as f64),
        ])
    }

    async fn player(&self, player_id: PlayerId) -> Result<Player, ApiError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        let mut p = player(player_id, "Detailed", "C", 1.0);
        p.injury_detail = Some("Day to day".into());
        Ok(p)
    }

    async fn settings(&self) -> Result<Settings, ApiError> {
        self.check(Collection::Settings)?;
        Ok(Settings {
            salary_cap: 72.0,
            ..Settings::default()
        })
    }

    async fn salaries(&self) -> Result<Vec<SalaryRecord>, ApiError> {
        self.check(Collection::Salaries)?;
        Ok(vec![SalaryRecord {
            player_id: 9,
            full_name: "Rostered Nine".into(),
            team_id: Some(3),
            salary: Some("$9,000,000".into()),
            salary_value: Some(9_000_000.0),
            contract_years: Some("2".into()),
        }])
    }

    async fn sync(&self) -> Result<Ack, ApiError> {
        self.sync_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        if self.fail_sync {
            return Err(unavailable());
        }
        Ok(Ack {
            message: "Sync completed".into(),
        })
    }

    async fn sync_salaries(&self) -> Result<Ack, ApiError> {
        self.salary_sync_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        Ok(Ack {
            message: "Salary sync completed".into(),
        })
    }

    async fn update_settings(&self, _settings: &Settings) -> Result<Ack, ApiError> {
        Ok(Ack::default())
    }

    async fn upload_salaries(
        &self,
        _file_name: String,
        _contents: Vec<u8>,
    ) -> Result<UploadSummary, ApiError> {
        Ok(UploadSummary::default())
    }

    async fn create_player(&self, _player: &NewPlayer) -> Result<Ack, ApiError> {
        Ok(Ack::default())
    }

    async fn update_salary(
        &self,
        _player_id: PlayerId,
        _update: &SalaryUpdate,
    ) -> Result<Ack, ApiError> {
        Ok(Ack::default())
    }
}
