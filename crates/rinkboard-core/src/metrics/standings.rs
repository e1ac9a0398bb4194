// Standings views derived from team history and the current rosters.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::model::{HistorySnapshot, Player, Team};

/// One team's line in a historical standings snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DayStanding {
    /// 1-based position on that day.
    pub rank: usize,
    pub team: String,
    pub points: f64,
    /// Points gained since the previous snapshot; `None` on the first day.
    pub gain: Option<f64>,
}

/// Rank teams by their cumulative points on `day`.
///
/// Returns an empty list when no snapshot exists for `day`. A team absent
/// from the previous snapshot gains from zero.
pub fn day_standings(history: &[HistorySnapshot], day: &str) -> Vec<DayStanding> {
    let Some(idx) = history.iter().position(|s| s.day == day) else {
        return Vec::new();
    };
    let current = &history[idx];
    let previous = idx.checked_sub(1).map(|i| &history[i]);

    let mut rows: Vec<(&String, f64)> = current.values.iter().map(|(k, v)| (k, *v)).collect();
    rows.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    rows.into_iter()
        .enumerate()
        .map(|(i, (team, points))| DayStanding {
            rank: i + 1,
            team: team.clone(),
            points,
            gain: previous.map(|p| points - p.get(team).unwrap_or(0.0)),
        })
        .collect()
}

/// The most recent snapshot day, used when no day has been picked.
pub fn default_history_day(history: &[HistorySnapshot]) -> Option<&str> {
    history.last().map(|s| s.day.as_str())
}

/// Headline figures for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeagueSummary<'a> {
    /// First team in standings order.
    pub leader: Option<&'a Team>,
    /// Highest-scoring free agent (first wins ties).
    pub top_free_agent: Option<&'a Player>,
}

pub fn league_summary<'a>(teams: &'a [Team], free_agents: &'a [Player]) -> LeagueSummary<'a> {
    let top_free_agent = free_agents.iter().fold(None::<&Player>, |best, p| match best {
        Some(b) if b.total_points >= p.total_points => Some(b),
        _ => Some(p),
    });
    LeagueSummary {
        leader: teams.first(),
        top_free_agent,
    }
}

/// A roster ordered by season points, best first.
pub fn roster_by_points(team: &Team) -> Vec<&Player> {
    let mut players: Vec<&Player> = team.players.iter().collect();
    players.sort_by(|a, b| b.total_points.partial_cmp(&a.total_points).unwrap_or(Ordering::Equal));
    players
}

/// Short axis label for a snapshot day: `2025-11-02` -> `11/02`.
/// Unparseable days are returned unchanged.
pub fn format_day(day: &str) -> String {
    match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
        Ok(date) => date.format("%m/%d").to_string(),
        Err(_) => day.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> Vec<HistorySnapshot> {
        vec![
            HistorySnapshot::new("2025-11-01").with("Ice Hogs", 100.0).with("Puck Bunnies", 110.0),
            HistorySnapshot::new("2025-11-02")
                .with("Ice Hogs", 125.0)
                .with("Puck Bunnies", 118.0)
                .with("Expansion", 5.0),
        ]
    }

    #[test]
    fn ranks_teams_on_a_day_with_gains() {
        let rows = day_standings(&history(), "2025-11-02");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].team, "Ice Hogs");
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].gain, Some(25.0));
        assert_eq!(rows[1].gain, Some(8.0));
        assert_eq!(rows[2].team, "Expansion");
        assert_eq!(rows[2].gain, Some(5.0));
    }

    #[test]
    fn first_day_has_no_gain() {
        let rows = day_standings(&history(), "2025-11-01");
        assert_eq!(rows[0].team, "Puck Bunnies");
        assert!(rows.iter().all(|r| r.gain.is_none()));
    }

    #[test]
    fn unknown_day_is_empty() {
        assert!(day_standings(&history(), "2024-01-01").is_empty());
        assert_eq!(default_history_day(&history()), Some("2025-11-02"));
        assert_eq!(default_history_day(&[]), None);
    }

    #[test]
    fn summary_picks_leader_and_best_free_agent() {
        let teams = vec![Team::placeholder(1, "First", 10.0), Team::placeholder(2, "Second", 20.0)];
        let fas = vec![
            Player { id: 1, total_points: 5.0, ..Player::default() },
            Player { id: 2, total_points: 9.0, ..Player::default() },
            Player { id: 3, total_points: 9.0, ..Player::default() },
        ];
        let summary = league_summary(&teams, &fas);
        assert_eq!(summary.leader.map(|t| t.id), Some(1));
        assert_eq!(summary.top_free_agent.map(|p| p.id), Some(2));
        assert!(league_summary(&[], &[]).leader.is_none());
    }

    #[test]
    fn formats_axis_days() {
        assert_eq!(format_day("2025-11-02"), "11/02");
        assert_eq!(format_day("day 3"), "day 3");
    }
}
