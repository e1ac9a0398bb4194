// End-to-end navigation over a loaded league: history traversal, selection
// resolution after a refresh, and the derived values each view reads.

mod common;

use std::sync::Arc;

use common::FakeApi;
use rinkboard_core::metrics::{
    cap_space, compare_free_agents, daily_deltas, day_standings, default_history_day,
    league_summary, sort_by_config,
};
use rinkboard_core::navigation::{NavAction, Navigator};
use rinkboard_core::store::DataStore;
use rinkboard_core::sync::SyncOrchestrator;
use rinkboard_core::view::{Section, View, ViewState};

async fn loaded_store() -> DataStore {
    let orchestrator = SyncOrchestrator::new(Arc::new(FakeApi::new()));
    let mut store = DataStore::new();
    orchestrator.load_all(&mut store).await;
    store
}

#[tokio::test]
async fn team_to_player_and_back_to_baseline() {
    let store = loaded_store().await;
    let mut nav = Navigator::in_memory();

    nav.dispatch(NavAction::SelectTeam(3), &store);
    nav.dispatch(NavAction::SelectPlayer(9), &store);
    nav.dispatch(NavAction::Back, &store);
    assert_eq!(nav.view().view(), View::TeamDetail(3));
    nav.dispatch(NavAction::Back, &store);

    assert_eq!(*nav.view(), ViewState::default());
}

#[tokio::test]
async fn free_agent_detail_resolves_through_the_free_agent_list() {
    let store = loaded_store().await;
    let mut nav = Navigator::in_memory();

    nav.dispatch(NavAction::SelectTab(Section::FreeAgents), &store);
    nav.dispatch(NavAction::SelectPlayer(40), &store);
    nav.dispatch(NavAction::SelectTab(Section::Settings), &store);
    nav.dispatch(NavAction::Back, &store);

    assert_eq!(nav.view().view(), View::PlayerDetail(40));
    let lookup = store.find_player(40).unwrap();
    assert!(lookup.team.is_none());
}

#[tokio::test]
async fn history_entry_for_a_team_that_left_the_league_is_cleared() {
    let mut store = loaded_store().await;
    let mut nav = Navigator::in_memory();

    nav.dispatch(NavAction::SelectTab(Section::Standings), &store);
    nav.dispatch(NavAction::SelectTeam(4), &store);
    nav.dispatch(NavAction::SelectTab(Section::Salaries), &store);

    store.teams.retain(|t| t.id != 4);
    nav.dispatch(NavAction::Back, &store);

    assert_eq!(nav.view().view(), View::Section(Section::Standings));
    assert!(nav.view().selected_team_id().is_none());
}

#[tokio::test]
async fn views_derive_their_values_from_the_store() {
    let store = loaded_store().await;
    let mut nav = Navigator::in_memory();

    let summary = league_summary(&store.teams, &store.free_agents);
    assert_eq!(summary.leader.map(|t| t.name.as_str()), Some("Ice Hogs"));
    assert_eq!(summary.top_free_agent.map(|p| p.id), Some(40));

    let day = default_history_day(&store.history).unwrap().to_string();
    let standings = day_standings(&store.history, &day);
    assert_eq!(standings[0].team, "Ice Hogs");
    assert_eq!(standings[0].gain, Some(80.0));

    let gains = daily_deltas(&store.history, None);
    assert_eq!(gains.len(), 1);
    assert_eq!(gains[0].get("Puck Bunnies"), Some(30.0));

    nav.dispatch(NavAction::RequestSort("total_points".into()), &store);
    let ascending = sort_by_config(&store.free_agents, nav.view().sort());
    assert_eq!(ascending[0].id, 41);

    let reference = store.find_player(9).unwrap().player;
    let comparisons = compare_free_agents(reference, &store.free_agents);
    assert_eq!(comparisons.len(), 1);
    assert_eq!(comparisons[0].diff, -60.0);

    let ice_hogs = store.team(3).unwrap();
    let cap = cap_space(store.settings.salary_cap, &ice_hogs.players);
    assert_eq!(cap.space, 72.0);
    assert!(!cap.over_cap);
}
