// A small loaded league for widget and input tests.

use rinkboard_core::model::{HistorySnapshot, Player, SalaryRecord, Settings, Stat, Team};
use rinkboard_core::store::{DataStore, PlayerHistory, TeamPlayerHistory};
use rinkboard_core::view::{View, ViewState};

use crate::protocol::AppSnapshot;

pub fn player(id: u64, name: &str, position: &str, points: f64) -> Player {
    Player {
        id,
        full_name: name.to_string(),
        position: position.to_string(),
        pro_team: "TOR".to_string(),
        total_points: points,
        goals: points / 4.0,
        ..Player::default()
    }
}

fn team(id: u64, name: &str, points: f64, players: Vec<Player>) -> Team {
    Team {
        id,
        name: name.to_string(),
        rank: id as u32,
        points,
        players,
        ..Team::default()
    }
}

pub fn loaded_store() -> DataStore {
    let mut nine = player(9, "Rostered Nine", "C", 120.0);
    nine.salary = Some("$9,500,000".into());
    nine.salary_value = Some(9_500_000.0);
    nine.contract_years = Some("2027".into());

    let mut store = DataStore::new();
    store.replace_teams(vec![
        team(3, "Ice Hogs", 980.0, vec![nine, player(10, "Rostered Ten", "D", 80.0)]),
        team(4, "Puck Bunnies", 940.0, vec![player(11, "Rostered Eleven", "LW", 99.0)]),
    ]);
    store.replace_free_agents(vec![
        player(40, "Free Forty", "C", 60.0),
        player(41, "Free Forty-One", "D", 44.0),
    ]);
    store.replace_history(vec![
        HistorySnapshot::new("2025-11-01")
            .with("Ice Hogs", 900.0)
            .with("Puck Bunnies", 910.0),
        HistorySnapshot::new("2025-11-02")
            .with("Ice Hogs", 980.0)
            .with("Puck Bunnies", 940.0),
    ]);
    store.replace_settings(Settings {
        salary_cap: 72.0,
        ..Settings::default()
    });
    store.replace_salaries(vec![SalaryRecord {
        player_id: 9,
        full_name: "Rostered Nine".into(),
        team_id: Some(3),
        salary: Some("$9,500,000".into()),
        salary_value: Some(9_500_000.0),
        contract_years: Some("2027".into()),
    }]);
    store.team_player_history = Some(TeamPlayerHistory {
        team_id: 3,
        stat: Stat::TotalPoints,
        snapshots: vec![
            HistorySnapshot::new("2025-11-01")
                .with("Rostered Nine", 110.0)
                .with("Rostered Ten", 75.0),
            HistorySnapshot::new("2025-11-02")
                .with("Rostered Nine", 120.0)
                .with("Rostered Ten", 80.0),
        ],
    });
    store.player_history = Some(PlayerHistory {
        player_id: 9,
        snapshots: vec![
            HistorySnapshot::new("2025-11-01").with("total_points", 110.0),
            HistorySnapshot::new("2025-11-02").with("total_points", 120.0),
        ],
    });
    store
}

pub fn loaded_snapshot() -> AppSnapshot {
    AppSnapshot {
        store: loaded_store(),
        ..AppSnapshot::default()
    }
}

pub fn snapshot_in(view: View) -> AppSnapshot {
    let mut state = ViewState::default();
    match view {
        View::Section(section) => state.select_tab(section),
        View::TeamDetail(team_id) => state.select_team(team_id),
        View::PlayerDetail(player_id) => state.select_player(player_id),
    }
    AppSnapshot {
        view: state,
        ..loaded_snapshot()
    }
}
