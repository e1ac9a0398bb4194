// In-process LeagueApi for driving the app state without a server.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use rinkboard_core::api::{ApiError, LeagueApi};
use rinkboard_core::model::{
    Ack, HistorySnapshot, NewPlayer, Player, PlayerId, SalaryRecord, SalaryUpdate, ScoringRules,
    Settings, Stat, Team, TeamId, UploadSummary,
};

pub fn player(id: PlayerId, name: &str, position: &str, points: f64) -> Player {
    Player {
        id,
        full_name: name.to_string(),
        position: position.to_string(),
        total_points: points,
        ..Player::default()
    }
}

#[derive(Default)]
pub struct FakeApi {
    /// Every write fails with this server detail.
    pub write_error: Option<String>,
    pub sync_calls: AtomicUsize,
    pub team_history_requests: Mutex<Vec<(TeamId, Stat)>>,
    /// (file name, byte count) per upload.
    pub uploads: Mutex<Vec<(String, usize)>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting_writes(detail: &str) -> Self {
        FakeApi {
            write_error: Some(detail.to_string()),
            ..Self::default()
        }
    }

    fn write(&self, message: &str) -> Result<Ack, ApiError> {
        match &self.write_error {
            Some(detail) => Err(ApiError::Status {
                status: 400,
                detail: Some(detail.clone()),
            }),
            None => Ok(Ack {
                message: message.to_string(),
            }),
        }
    }
}

#[async_trait]
impl LeagueApi for FakeApi {
    async fn teams(&self) -> Result<Vec<Team>, ApiError> {
        Ok(vec![
            Team {
                id: 3,
                name: "Ice Hogs".into(),
                rank: 1,
                points: 980.0,
                players: vec![player(9, "Rostered Nine", "C", 120.0)],
                ..Team::default()
            },
            Team {
                id: 4,
                name: "Puck Bunnies".into(),
                rank: 2,
                points: 940.0,
                ..Team::default()
            },
        ])
    }

    async fn free_agents(&self) -> Result<Vec<Player>, ApiError> {
        Ok(vec![player(40, "Free Forty", "C", 60.0)])
    }

    async fn scoring_rules(&self) -> Result<ScoringRules, ApiError> {
        Ok(BTreeMap::from([("goals".to_string(), 2.0)]))
    }

    async fn team_history(&self) -> Result<Vec<HistorySnapshot>, ApiError> {
        Ok(vec![
            HistorySnapshot::new("2025-11-01").with("Ice Hogs", 900.0),
            HistorySnapshot::new("2025-11-02").with("Ice Hogs", 980.0),
        ])
    }

    async fn team_player_history(
        &self,
        team_id: TeamId,
        stat: Stat,
    ) -> Result<Vec<HistorySnapshot>, ApiError> {
        self.team_history_requests
            .lock()
            .unwrap()
            .push((team_id, stat));
        Ok(vec![HistorySnapshot::new("2025-11-02").with("Rostered Nine", 5.0)])
    }

    async fn player_history(&self, _player_id: PlayerId) -> Result<Vec<HistorySnapshot>, ApiError> {
        Ok(vec![HistorySnapshot::new("2025-11-02").with("total_points", 120.0)])
    }

    async fn player(&self, player_id: PlayerId) -> Result<Player, ApiError> {
        Ok(player(player_id, "Rostered Nine", "C", 120.0))
    }

    async fn settings(&self) -> Result<Settings, ApiError> {
        Ok(Settings::default())
    }

    async fn salaries(&self) -> Result<Vec<SalaryRecord>, ApiError> {
        Ok(Vec::new())
    }

    async fn sync(&self) -> Result<Ack, ApiError> {
        self.sync_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        Ok(Ack::default())
    }

    async fn sync_salaries(&self) -> Result<Ack, ApiError> {
        Ok(Ack::default())
    }

    async fn update_settings(&self, _settings: &Settings) -> Result<Ack, ApiError> {
        self.write("")
    }

    async fn upload_salaries(
        &self,
        file_name: String,
        contents: Vec<u8>,
    ) -> Result<UploadSummary, ApiError> {
        self.write("")?;
        self.uploads.lock().unwrap().push((file_name, contents.len()));
        Ok(UploadSummary {
            updated: 2,
            message: String::new(),
        })
    }

    async fn create_player(&self, _player: &NewPlayer) -> Result<Ack, ApiError> {
        self.write("Player created")
    }

    async fn update_salary(
        &self,
        _player_id: PlayerId,
        _update: &SalaryUpdate,
    ) -> Result<Ack, ApiError> {
        self.write("Salary saved for Rostered Nine")
    }
}
