use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::models::{NewPlayer, Player};
use crate::db::from_millis;
use crate::shared::AppError;

/// Trait for player roster operations
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// All players, ordered by name
    async fn list_players(&self) -> Result<Vec<Player>, AppError>;
    async fn get_player(&self, player_id: i64) -> Result<Option<Player>, AppError>;
    async fn get_player_by_name(&self, name: &str) -> Result<Option<Player>, AppError>;

    /// Stores a new player and returns it with its assigned id
    async fn insert_player(&self, player: NewPlayer) -> Result<Player, AppError>;
    async fn update_player(&self, player: &Player) -> Result<(), AppError>;
    async fn delete_player(&self, player_id: i64) -> Result<(), AppError>;
}

#[derive(Debug)]
struct RosterState {
    players: BTreeMap<i64, Player>,
    next_id: i64,
}

/// In-memory implementation of PlayerRepository for development and testing
#[derive(Debug)]
pub struct InMemoryPlayerRepository {
    state: RwLock<RosterState>,
}

impl Default for InMemoryPlayerRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPlayerRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RosterState {
                players: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    #[instrument(skip(self))]
    async fn list_players(&self) -> Result<Vec<Player>, AppError> {
        let state = self.state.read().await;
        let mut players: Vec<Player> = state.players.values().cloned().collect();
        players.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        debug!(count = players.len(), "Listed players from memory");
        Ok(players)
    }

    #[instrument(skip(self))]
    async fn get_player(&self, player_id: i64) -> Result<Option<Player>, AppError> {
        let state = self.state.read().await;
        Ok(state.players.get(&player_id).cloned())
    }

    #[instrument(skip(self))]
    async fn get_player_by_name(&self, name: &str) -> Result<Option<Player>, AppError> {
        let state = self.state.read().await;
        Ok(state.players.values().find(|p| p.name == name).cloned())
    }

    #[instrument(skip(self, player), fields(name = %player.name))]
    async fn insert_player(&self, player: NewPlayer) -> Result<Player, AppError> {
        let mut state = self.state.write().await;
        if state.players.values().any(|p| p.name == player.name) {
            warn!(name = %player.name, "Player name already taken in memory");
            return Err(AppError::AlreadyExists(format!("Player {}", player.name)));
        }

        let id = state.next_id;
        state.next_id += 1;
        let player = player.into_player(id);
        state.players.insert(id, player.clone());

        debug!(player_id = id, "Player created in memory");
        Ok(player)
    }

    #[instrument(skip(self, player), fields(player_id = player.id))]
    async fn update_player(&self, player: &Player) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        if state
            .players
            .values()
            .any(|p| p.name == player.name && p.id != player.id)
        {
            warn!(name = %player.name, "Player name already taken in memory");
            return Err(AppError::AlreadyExists(format!("Player {}", player.name)));
        }

        match state.players.get_mut(&player.id) {
            Some(existing) => {
                *existing = player.clone();
                debug!("Player updated in memory");
                Ok(())
            }
            None => {
                warn!("Player not found for update in memory");
                Err(AppError::NotFound("Player not found".to_string()))
            }
        }
    }

    #[instrument(skip(self))]
    async fn delete_player(&self, player_id: i64) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        if state.players.remove(&player_id).is_none() {
            warn!("Player not found for deletion in memory");
            return Err(AppError::NotFound("Player not found".to_string()));
        }

        debug!("Player deleted from memory");
        Ok(())
    }
}

/// SQLite implementation of the player repository
pub struct SqlitePlayerRepository {
    pool: SqlitePool,
}

impl SqlitePlayerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn player_from_row(row: &SqliteRow) -> Result<Player, AppError> {
    Ok(Player {
        id: row.get("id"),
        name: row.get("name"),
        color: row.get::<i64, _>("color") as u32,
        created_at: from_millis(row.get("created_at"))?,
    })
}

fn write_error(e: sqlx::Error, name: &str) -> AppError {
    match e.as_database_error() {
        Some(db_error) if db_error.is_unique_violation() => {
            warn!(name = %name, "Player name already taken in database");
            AppError::AlreadyExists(format!("Player {}", name))
        }
        _ => {
            warn!(error = %e, "Failed to write player to database");
            AppError::DatabaseError(e.to_string())
        }
    }
}

#[async_trait]
impl PlayerRepository for SqlitePlayerRepository {
    #[instrument(skip(self))]
    async fn list_players(&self) -> Result<Vec<Player>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, color, created_at FROM players ORDER BY name ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to list players from database");
            AppError::DatabaseError(e.to_string())
        })?;

        let players = rows
            .iter()
            .map(player_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = players.len(), "Listed players from database");
        Ok(players)
    }

    #[instrument(skip(self))]
    async fn get_player(&self, player_id: i64) -> Result<Option<Player>, AppError> {
        let row = sqlx::query("SELECT id, name, color, created_at FROM players WHERE id = ?1")
            .bind(player_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, player_id, "Failed to fetch player from database");
                AppError::DatabaseError(e.to_string())
            })?;

        row.as_ref().map(player_from_row).transpose()
    }

    #[instrument(skip(self))]
    async fn get_player_by_name(&self, name: &str) -> Result<Option<Player>, AppError> {
        let row = sqlx::query(
            "SELECT id, name, color, created_at FROM players WHERE name = ?1 LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, name = %name, "Failed to fetch player from database");
            AppError::DatabaseError(e.to_string())
        })?;

        row.as_ref().map(player_from_row).transpose()
    }

    #[instrument(skip(self, player), fields(name = %player.name))]
    async fn insert_player(&self, player: NewPlayer) -> Result<Player, AppError> {
        let result =
            sqlx::query("INSERT INTO players (name, color, created_at) VALUES (?1, ?2, ?3)")
                .bind(&player.name)
                .bind(player.color as i64)
                .bind(player.created_at.timestamp_millis())
                .execute(&self.pool)
                .await
                .map_err(|e| write_error(e, &player.name))?;

        let id = result.last_insert_rowid();
        debug!(player_id = id, "Player created in database");
        Ok(player.into_player(id))
    }

    #[instrument(skip(self, player), fields(player_id = player.id))]
    async fn update_player(&self, player: &Player) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE players SET name = ?2, color = ?3 WHERE id = ?1")
            .bind(player.id)
            .bind(&player.name)
            .bind(player.color as i64)
            .execute(&self.pool)
            .await
            .map_err(|e| write_error(e, &player.name))?;

        if result.rows_affected() == 0 {
            warn!("Player not found for update");
            return Err(AppError::NotFound("Player not found".to_string()));
        }

        debug!("Player updated in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_player(&self, player_id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM players WHERE id = ?1")
            .bind(player_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, player_id, "Failed to delete player from database");
                AppError::DatabaseError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            warn!("Player not found for deletion");
            return Err(AppError::NotFound("Player not found".to_string()));
        }

        debug!("Player deleted from database");
        Ok(())
    }
}
