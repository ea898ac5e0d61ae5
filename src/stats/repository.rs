use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::models::{GameResultRecord, GameType, NewGameResult, PlayerWins};
use crate::db::from_millis;
use crate::shared::AppError;

/// Trait for game result storage and the per-player queries built on it
#[async_trait]
pub trait GameResultRepository: Send + Sync {
    async fn insert_result(&self, result: NewGameResult) -> Result<i64, AppError>;
    async fn insert_results(&self, results: Vec<NewGameResult>) -> Result<(), AppError>;

    /// Highest scores first; ties go to the earlier game, then the lower id
    async fn top_results(
        &self,
        game_type: GameType,
        limit: usize,
    ) -> Result<Vec<GameResultRecord>, AppError>;

    async fn games_played(&self, player_id: i64, game_type: GameType) -> Result<u32, AppError>;

    /// Games the player shared with at least one other participant
    async fn counted_games_played(
        &self,
        player_id: i64,
        game_type: GameType,
    ) -> Result<u32, AppError>;

    async fn wins(&self, player_id: i64, game_type: GameType) -> Result<u32, AppError>;
    async fn draws(&self, player_id: i64, game_type: GameType) -> Result<u32, AppError>;
    async fn best_score(&self, player_id: i64, game_type: GameType)
        -> Result<Option<i32>, AppError>;
    async fn worst_score(
        &self,
        player_id: i64,
        game_type: GameType,
    ) -> Result<Option<i32>, AppError>;

    /// Rewrites the denormalized name on every result of the player, returns rows touched
    async fn update_player_name(&self, player_id: i64, new_name: &str) -> Result<u64, AppError>;

    async fn player_with_most_wins(
        &self,
        game_type: GameType,
    ) -> Result<Option<PlayerWins>, AppError>;
}

#[derive(Debug, Default)]
struct ResultsState {
    records: Vec<GameResultRecord>,
    next_id: i64,
}

impl ResultsState {
    fn for_player(
        &self,
        player_id: i64,
        game_type: GameType,
    ) -> impl Iterator<Item = &GameResultRecord> {
        self.records
            .iter()
            .filter(move |r| r.player_id == player_id && r.game_type == game_type)
    }

    fn push(&mut self, result: NewGameResult) -> i64 {
        self.next_id += 1;
        let id = self.next_id;
        self.records.push(result.into_record(id));
        id
    }
}

/// In-memory implementation of GameResultRepository for development and testing
#[derive(Debug, Default)]
pub struct InMemoryGameResultRepository {
    state: RwLock<ResultsState>,
}

impl InMemoryGameResultRepository {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(ResultsState::default()),
        }
    }
}

#[async_trait]
impl GameResultRepository for InMemoryGameResultRepository {
    #[instrument(skip(self, result), fields(player_id = result.player_id))]
    async fn insert_result(&self, result: NewGameResult) -> Result<i64, AppError> {
        let mut state = self.state.write().await;
        let id = state.push(result);

        debug!(result_id = id, "Game result stored in memory");
        Ok(id)
    }

    #[instrument(skip(self, results), fields(count = results.len()))]
    async fn insert_results(&self, results: Vec<NewGameResult>) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        for result in results {
            state.push(result);
        }

        debug!("Game results stored in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn top_results(
        &self,
        game_type: GameType,
        limit: usize,
    ) -> Result<Vec<GameResultRecord>, AppError> {
        let state = self.state.read().await;
        let mut results: Vec<GameResultRecord> = state
            .records
            .iter()
            .filter(|r| r.game_type == game_type)
            .cloned()
            .collect();
        results.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(a.played_at.cmp(&b.played_at))
                .then(a.id.cmp(&b.id))
        });
        results.truncate(limit);
        Ok(results)
    }

    #[instrument(skip(self))]
    async fn games_played(&self, player_id: i64, game_type: GameType) -> Result<u32, AppError> {
        let state = self.state.read().await;
        Ok(state.for_player(player_id, game_type).count() as u32)
    }

    #[instrument(skip(self))]
    async fn counted_games_played(
        &self,
        player_id: i64,
        game_type: GameType,
    ) -> Result<u32, AppError> {
        let state = self.state.read().await;

        let mut participants = HashMap::new();
        for record in state.records.iter().filter(|r| r.game_type == game_type) {
            *participants.entry(record.played_at).or_insert(0usize) += 1;
        }

        let counted: HashSet<_> = state
            .for_player(player_id, game_type)
            .map(|r| r.played_at)
            .filter(|played_at| participants.get(played_at).copied().unwrap_or_default() > 1)
            .collect();
        Ok(counted.len() as u32)
    }

    #[instrument(skip(self))]
    async fn wins(&self, player_id: i64, game_type: GameType) -> Result<u32, AppError> {
        let state = self.state.read().await;
        Ok(state
            .for_player(player_id, game_type)
            .filter(|r| r.is_winner)
            .count() as u32)
    }

    #[instrument(skip(self))]
    async fn draws(&self, player_id: i64, game_type: GameType) -> Result<u32, AppError> {
        let state = self.state.read().await;
        Ok(state
            .for_player(player_id, game_type)
            .filter(|r| r.is_draw)
            .count() as u32)
    }

    #[instrument(skip(self))]
    async fn best_score(
        &self,
        player_id: i64,
        game_type: GameType,
    ) -> Result<Option<i32>, AppError> {
        let state = self.state.read().await;
        Ok(state.for_player(player_id, game_type).map(|r| r.score).max())
    }

    #[instrument(skip(self))]
    async fn worst_score(
        &self,
        player_id: i64,
        game_type: GameType,
    ) -> Result<Option<i32>, AppError> {
        let state = self.state.read().await;
        Ok(state.for_player(player_id, game_type).map(|r| r.score).min())
    }

    #[instrument(skip(self))]
    async fn update_player_name(&self, player_id: i64, new_name: &str) -> Result<u64, AppError> {
        let mut state = self.state.write().await;
        let mut updated = 0;
        for record in state.records.iter_mut().filter(|r| r.player_id == player_id) {
            record.player_name = new_name.to_string();
            updated += 1;
        }

        debug!(updated, "Renamed player in stored results");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn player_with_most_wins(
        &self,
        game_type: GameType,
    ) -> Result<Option<PlayerWins>, AppError> {
        let state = self.state.read().await;
        let mut wins: HashMap<i64, u32> = HashMap::new();
        for record in state
            .records
            .iter()
            .filter(|r| r.game_type == game_type && r.is_winner)
        {
            *wins.entry(record.player_id).or_default() += 1;
        }

        Ok(wins
            .into_iter()
            .map(|(player_id, wins)| PlayerWins { player_id, wins })
            .min_by(|a, b| b.wins.cmp(&a.wins).then(a.player_id.cmp(&b.player_id))))
    }
}

/// SQLite implementation of the game result repository
pub struct SqliteGameResultRepository {
    pool: SqlitePool,
}

impl SqliteGameResultRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn count(
        &self,
        sql: &'static str,
        player_id: i64,
        game_type: GameType,
    ) -> Result<u32, AppError> {
        let count: i64 = sqlx::query_scalar(sql)
            .bind(player_id)
            .bind(game_type.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, player_id, "Failed to count game results");
                AppError::DatabaseError(e.to_string())
            })?;
        Ok(count as u32)
    }

    async fn score(
        &self,
        sql: &'static str,
        player_id: i64,
        game_type: GameType,
    ) -> Result<Option<i32>, AppError> {
        let score: Option<i64> = sqlx::query_scalar(sql)
            .bind(player_id)
            .bind(game_type.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, player_id, "Failed to fetch score");
                AppError::DatabaseError(e.to_string())
            })?;
        Ok(score.map(|s| s as i32))
    }
}

const INSERT_RESULT: &str = "INSERT INTO game_results
    (game_type, player_id, player_name, score, is_winner, is_draw, played_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

fn result_from_row(row: &SqliteRow) -> Result<GameResultRecord, AppError> {
    let game_type: String = row.get("game_type");
    Ok(GameResultRecord {
        id: row.get("id"),
        game_type: GameType::from_str(&game_type)
            .map_err(|_| AppError::DatabaseError(format!("Unknown game type: {}", game_type)))?,
        player_id: row.get("player_id"),
        player_name: row.get("player_name"),
        score: row.get("score"),
        is_winner: row.get("is_winner"),
        is_draw: row.get("is_draw"),
        played_at: from_millis(row.get("played_at"))?,
    })
}

#[async_trait]
impl GameResultRepository for SqliteGameResultRepository {
    #[instrument(skip(self, result), fields(player_id = result.player_id))]
    async fn insert_result(&self, result: NewGameResult) -> Result<i64, AppError> {
        let outcome = sqlx::query(INSERT_RESULT)
            .bind(result.game_type.as_str())
            .bind(result.player_id)
            .bind(&result.player_name)
            .bind(result.score)
            .bind(result.is_winner)
            .bind(result.is_draw)
            .bind(result.played_at.timestamp_millis())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to store game result");
                AppError::DatabaseError(e.to_string())
            })?;

        let id = outcome.last_insert_rowid();
        debug!(result_id = id, "Game result stored in database");
        Ok(id)
    }

    #[instrument(skip(self, results), fields(count = results.len()))]
    async fn insert_results(&self, results: Vec<NewGameResult>) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            warn!(error = %e, "Failed to open transaction");
            AppError::DatabaseError(e.to_string())
        })?;

        for result in &results {
            sqlx::query(INSERT_RESULT)
                .bind(result.game_type.as_str())
                .bind(result.player_id)
                .bind(&result.player_name)
                .bind(result.score)
                .bind(result.is_winner)
                .bind(result.is_draw)
                .bind(result.played_at.timestamp_millis())
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    warn!(error = %e, "Failed to store game result");
                    AppError::DatabaseError(e.to_string())
                })?;
        }

        tx.commit().await.map_err(|e| {
            warn!(error = %e, "Failed to commit game results");
            AppError::DatabaseError(e.to_string())
        })?;

        debug!("Game results stored in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn top_results(
        &self,
        game_type: GameType,
        limit: usize,
    ) -> Result<Vec<GameResultRecord>, AppError> {
        let rows = sqlx::query(
            "SELECT id, game_type, player_id, player_name, score, is_winner, is_draw, played_at
             FROM game_results WHERE game_type = ?1
             ORDER BY score DESC, played_at ASC, id ASC LIMIT ?2",
        )
        .bind(game_type.as_str())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch top results");
            AppError::DatabaseError(e.to_string())
        })?;

        rows.iter().map(result_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn games_played(&self, player_id: i64, game_type: GameType) -> Result<u32, AppError> {
        self.count(
            "SELECT COUNT(*) FROM game_results WHERE player_id = ?1 AND game_type = ?2",
            player_id,
            game_type,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn counted_games_played(
        &self,
        player_id: i64,
        game_type: GameType,
    ) -> Result<u32, AppError> {
        self.count(
            "SELECT COUNT(DISTINCT played_at) FROM game_results
             WHERE player_id = ?1 AND game_type = ?2 AND played_at IN (
                 SELECT played_at FROM game_results WHERE game_type = ?2
                 GROUP BY played_at HAVING COUNT(*) > 1
             )",
            player_id,
            game_type,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn wins(&self, player_id: i64, game_type: GameType) -> Result<u32, AppError> {
        self.count(
            "SELECT COUNT(*) FROM game_results
             WHERE player_id = ?1 AND game_type = ?2 AND is_winner = 1",
            player_id,
            game_type,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn draws(&self, player_id: i64, game_type: GameType) -> Result<u32, AppError> {
        self.count(
            "SELECT COUNT(*) FROM game_results
             WHERE player_id = ?1 AND game_type = ?2 AND is_draw = 1",
            player_id,
            game_type,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn best_score(
        &self,
        player_id: i64,
        game_type: GameType,
    ) -> Result<Option<i32>, AppError> {
        self.score(
            "SELECT MAX(score) FROM game_results WHERE player_id = ?1 AND game_type = ?2",
            player_id,
            game_type,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn worst_score(
        &self,
        player_id: i64,
        game_type: GameType,
    ) -> Result<Option<i32>, AppError> {
        self.score(
            "SELECT MIN(score) FROM game_results WHERE player_id = ?1 AND game_type = ?2",
            player_id,
            game_type,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn update_player_name(&self, player_id: i64, new_name: &str) -> Result<u64, AppError> {
        let result = sqlx::query("UPDATE game_results SET player_name = ?2 WHERE player_id = ?1")
            .bind(player_id)
            .bind(new_name)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, player_id, "Failed to rename player in results");
                AppError::DatabaseError(e.to_string())
            })?;

        debug!(updated = result.rows_affected(), "Renamed player in stored results");
        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn player_with_most_wins(
        &self,
        game_type: GameType,
    ) -> Result<Option<PlayerWins>, AppError> {
        let row = sqlx::query(
            "SELECT player_id, COUNT(*) AS wins FROM game_results
             WHERE game_type = ?1 AND is_winner = 1
             GROUP BY player_id ORDER BY wins DESC, player_id ASC LIMIT 1",
        )
        .bind(game_type.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch player with most wins");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|row| PlayerWins {
            player_id: row.get("player_id"),
            wins: row.get::<i64, _>("wins") as u32,
        }))
    }
}
