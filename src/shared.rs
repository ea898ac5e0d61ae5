use std::sync::Arc;

use sqlx::SqlitePool;
use thiserror::Error;

use crate::player::repository::{
    InMemoryPlayerRepository, PlayerRepository, SqlitePlayerRepository,
};
use crate::player::PlayerService;
use crate::stats::repository::{
    GameResultRepository, InMemoryGameResultRepository, SqliteGameResultRepository,
};
use crate::stats::StatsService;

/// Shared application state containing the storage collaborators
#[derive(Clone)]
pub struct AppState {
    pub player_repository: Arc<dyn PlayerRepository>,
    pub result_repository: Arc<dyn GameResultRepository>,
}

impl AppState {
    pub fn new(
        player_repository: Arc<dyn PlayerRepository>,
        result_repository: Arc<dyn GameResultRepository>,
    ) -> Self {
        Self {
            player_repository,
            result_repository,
        }
    }

    /// State backed by in-memory repositories, for development and tests
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryPlayerRepository::new()),
            Arc::new(InMemoryGameResultRepository::new()),
        )
    }

    /// State backed by SQLite; the schema must already exist
    pub fn sqlite(pool: SqlitePool) -> Self {
        Self::new(
            Arc::new(SqlitePlayerRepository::new(pool.clone())),
            Arc::new(SqliteGameResultRepository::new(pool)),
        )
    }

    pub fn player_service(&self) -> PlayerService {
        PlayerService::new(
            self.player_repository.clone(),
            self.result_repository.clone(),
        )
    }

    pub fn stats_service(&self, top_results_limit: usize) -> StatsService {
        StatsService::new(
            self.player_repository.clone(),
            self.result_repository.clone(),
            top_results_limit,
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),
}
