use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use super::{
    models::{
        GameType, PlayerAggregateStats, PlayerStatsEntry, PlayerWins, StatsTable, TopResultEntry,
    },
    ranking::RankingPolicy,
    repository::GameResultRepository,
    StatsError,
};
use crate::{
    player::{repository::PlayerRepository, GREY},
    yahtzee::{GameSession, SessionOutcome},
};

/// Records finished sessions and answers the statistics screens
pub struct StatsService {
    players: Arc<dyn PlayerRepository>,
    results: Arc<dyn GameResultRepository>,
    top_results_limit: usize,
}

impl StatsService {
    pub fn new(
        players: Arc<dyn PlayerRepository>,
        results: Arc<dyn GameResultRepository>,
        top_results_limit: usize,
    ) -> Self {
        Self {
            players,
            results,
            top_results_limit,
        }
    }

    /// Stores one result row per seat of a completed session.
    ///
    /// Every seat must belong to a player that is still on the roster.
    #[instrument(skip(self, session), fields(players = session.player_count()))]
    pub async fn record_session(
        &self,
        session: &GameSession,
        played_at: DateTime<Utc>,
    ) -> Result<SessionOutcome, StatsError> {
        let results = session.to_results(GameType::Yahtzee, played_at)?;

        for result in &results {
            if self.players.get_player(result.player_id).await?.is_none() {
                warn!(player_id = result.player_id, "Session seat has no player");
                return Err(StatsError::Validation(format!(
                    "Player {} is not on the roster",
                    result.player_id
                )));
            }
        }

        self.results.insert_results(results).await?;

        let outcome = session.outcome();
        info!(
            winners = ?outcome.winners,
            is_draw = outcome.is_draw,
            is_solo = outcome.is_solo,
            "Game session recorded"
        );
        Ok(outcome)
    }

    /// Figures for one player; best and worst score are 0 when nothing was played.
    #[instrument(skip(self))]
    pub async fn aggregate(
        &self,
        player_id: i64,
        game_type: GameType,
    ) -> Result<PlayerAggregateStats, StatsError> {
        let stats = PlayerAggregateStats {
            player_id,
            total_games: self.results.games_played(player_id, game_type).await?,
            counted_games: self
                .results
                .counted_games_played(player_id, game_type)
                .await?,
            wins: self.results.wins(player_id, game_type).await?,
            draws: self.results.draws(player_id, game_type).await?,
            best_score: self
                .results
                .best_score(player_id, game_type)
                .await?
                .unwrap_or_default(),
            worst_score: self
                .results
                .worst_score(player_id, game_type)
                .await?
                .unwrap_or_default(),
        };

        debug!(?stats, "Aggregated player stats");
        Ok(stats)
    }

    /// Roster players who have played at least once, with their figures
    async fn entries(&self, game_type: GameType) -> Result<Vec<PlayerStatsEntry>, StatsError> {
        let mut entries = Vec::new();
        for player in self.players.list_players().await? {
            let stats = self.aggregate(player.id, game_type).await?;
            if stats.total_games > 0 {
                entries.push(PlayerStatsEntry { player, stats });
            }
        }
        Ok(entries)
    }

    #[instrument(skip(self))]
    pub async fn stats_table(&self, game_type: GameType) -> Result<StatsTable, StatsError> {
        let (counted, unranked): (Vec<_>, Vec<_>) = self
            .entries(game_type)
            .await?
            .into_iter()
            .partition(|entry| entry.stats.counted_games > 0);

        let table = StatsTable {
            ranked: RankingPolicy::StatsTable.rank(counted),
            unranked,
        };

        debug!(
            ranked = table.ranked.len(),
            unranked = table.unranked.len(),
            "Built stats table"
        );
        Ok(table)
    }

    /// Top of the best-player ranking, if anyone has a counted game
    #[instrument(skip(self))]
    pub async fn best_player(
        &self,
        game_type: GameType,
    ) -> Result<Option<PlayerStatsEntry>, StatsError> {
        let ranked = RankingPolicy::BestPlayer.rank(self.entries(game_type).await?);
        Ok(ranked.into_iter().next())
    }

    /// Highest single result on the leaderboard
    #[instrument(skip(self))]
    pub async fn best_score(
        &self,
        game_type: GameType,
    ) -> Result<Option<TopResultEntry>, StatsError> {
        Ok(self.top_results(game_type).await?.into_iter().next())
    }

    #[instrument(skip(self))]
    pub async fn most_wins(&self, game_type: GameType) -> Result<Option<PlayerWins>, StatsError> {
        Ok(self.results.player_with_most_wins(game_type).await?)
    }

    /// Leaderboard of single results, each paired with its player's colour.
    /// Results of deleted players are shown in grey.
    #[instrument(skip(self))]
    pub async fn top_results(&self, game_type: GameType) -> Result<Vec<TopResultEntry>, StatsError> {
        let colors: HashMap<i64, u32> = self
            .players
            .list_players()
            .await?
            .into_iter()
            .map(|p| (p.id, p.color))
            .collect();

        let entries: Vec<TopResultEntry> = self
            .results
            .top_results(game_type, self.top_results_limit)
            .await?
            .into_iter()
            .map(|result| TopResultEntry {
                color: colors.get(&result.player_id).copied().unwrap_or(GREY),
                result,
            })
            .collect();

        debug!(count = entries.len(), "Built leaderboard");
        Ok(entries)
    }
}
