use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use super::models::{PlayerAggregateStats, PlayerStatsEntry};

/// Anything that can be placed in a ranking.
pub trait Standing {
    fn standing(&self) -> &PlayerAggregateStats;
}

impl Standing for PlayerAggregateStats {
    fn standing(&self) -> &PlayerAggregateStats {
        self
    }
}

impl Standing for PlayerStatsEntry {
    fn standing(&self) -> &PlayerAggregateStats {
        &self.stats
    }
}

/// Tie-break chains used to order players.
///
/// Both policies compare, in order: win percentage (desc), draw percentage (desc),
/// a win count (desc), a loss count (asc), best score (desc), worst score (desc)
/// and finally player id (asc). They differ only in how the win and loss counts
/// are obtained:
///
/// - `BestPlayer` uses the raw win count and approximates losses as
///   `counted - wins - trunc(draw% / 100 * counted)`.
/// - `StatsTable` rebuilds both counts from the percentages:
///   `trunc(win% / 100 * counted)` and `trunc(loss% / 100 * counted)`.
///
/// The percentage round trips are done in `f32` and truncated, so a count can come
/// out one lower than the stored integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum RankingPolicy {
    BestPlayer,
    StatsTable,
}

impl RankingPolicy {
    pub fn compare(self, a: &PlayerAggregateStats, b: &PlayerAggregateStats) -> Ordering {
        b.win_percentage()
            .total_cmp(&a.win_percentage())
            .then_with(|| b.draw_percentage().total_cmp(&a.draw_percentage()))
            .then_with(|| self.compare_counts(a, b))
            .then_with(|| b.best_score.cmp(&a.best_score))
            .then_with(|| b.worst_score.cmp(&a.worst_score))
            .then_with(|| a.player_id.cmp(&b.player_id))
    }

    fn compare_counts(self, a: &PlayerAggregateStats, b: &PlayerAggregateStats) -> Ordering {
        let (a_wins, a_losses) = self.count_keys(a);
        let (b_wins, b_losses) = self.count_keys(b);
        b_wins.cmp(&a_wins).then_with(|| a_losses.cmp(&b_losses))
    }

    /// The (wins, losses) pair compared after the percentages.
    fn count_keys(self, stats: &PlayerAggregateStats) -> (i64, i64) {
        match self {
            RankingPolicy::BestPlayer => (stats.wins as i64, approximate_losses(stats)),
            RankingPolicy::StatsTable => (
                share(stats.win_percentage(), stats.counted_games),
                share(stats.loss_percentage(), stats.counted_games),
            ),
        }
    }

    /// Orders `entries` best first. Entries without counted games are dropped.
    pub fn rank<T: Standing>(self, entries: impl IntoIterator<Item = T>) -> Vec<T> {
        let mut ranked: Vec<T> = entries
            .into_iter()
            .filter(|entry| entry.standing().counted_games > 0)
            .collect();
        ranked.sort_by(|a, b| self.compare(a.standing(), b.standing()));
        ranked
    }
}

fn approximate_losses(stats: &PlayerAggregateStats) -> i64 {
    stats.counted_games as i64
        - stats.wins as i64
        - share(stats.draw_percentage(), stats.counted_games)
}

/// `trunc(percentage / 100 * counted_games)`
fn share(percentage: f32, counted_games: u32) -> i64 {
    (percentage / 100.0 * counted_games as f32) as i64
}
