// Free-agent comparison for a rostered player.

use crate::model::Player;

/// A free agent at the reference player's position and how they stack up.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeAgentComparison<'a> {
    pub candidate: &'a Player,
    /// `candidate.total_points - reference.total_points`. Positive means the
    /// free agent is outscoring the rostered player.
    pub diff: f64,
}

/// Free agents sharing the exact position tag of `reference`, best first.
///
/// Ties keep the free-agent list's order.
pub fn compare_free_agents<'a>(
    reference: &Player,
    free_agents: &'a [Player],
) -> Vec<FreeAgentComparison<'a>> {
    let mut rows: Vec<FreeAgentComparison<'a>> = free_agents
        .iter()
        .filter(|fa| fa.position == reference.position && fa.id != reference.id)
        .map(|candidate| FreeAgentComparison {
            candidate,
            diff: candidate.total_points - reference.total_points,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.candidate
            .total_points
            .partial_cmp(&a.candidate.total_points)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    rows
}
