use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{
    models::{NewPlayer, Player},
    repository::PlayerRepository,
};
use crate::{shared::AppError, stats::repository::GameResultRepository};

/// Service for managing the player roster
pub struct PlayerService {
    repository: Arc<dyn PlayerRepository>,
    results: Arc<dyn GameResultRepository>,
}

impl PlayerService {
    pub fn new(
        repository: Arc<dyn PlayerRepository>,
        results: Arc<dyn GameResultRepository>,
    ) -> Self {
        Self {
            repository,
            results,
        }
    }

    /// Lists every player ordered by name
    #[instrument(skip(self))]
    pub async fn list_players(&self) -> Result<Vec<Player>, AppError> {
        let players = self.repository.list_players().await?;
        debug!(count = players.len(), "Players retrieved");
        Ok(players)
    }

    #[instrument(skip(self))]
    pub async fn get_player(&self, player_id: i64) -> Result<Player, AppError> {
        self.repository
            .get_player(player_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Player {}", player_id)))
    }

    /// Adds a player; names are trimmed and must be unique
    #[instrument(skip(self))]
    pub async fn add_player(&self, name: &str, color: u32) -> Result<Player, AppError> {
        let name = validate_name(name)?;

        if self.repository.get_player_by_name(&name).await?.is_some() {
            warn!(name = %name, "Player name already taken");
            return Err(AppError::AlreadyExists(format!("Player {}", name)));
        }

        let player = self.repository.insert_player(NewPlayer::new(name, color)).await?;

        info!(player_id = player.id, name = %player.name, "Player added");
        Ok(player)
    }

    /// Renames and recolours a player. A new name is also written onto
    /// every stored result of that player.
    #[instrument(skip(self))]
    pub async fn update_player(
        &self,
        player_id: i64,
        name: &str,
        color: u32,
    ) -> Result<Player, AppError> {
        let name = validate_name(name)?;
        let mut player = self.get_player(player_id).await?;

        if let Some(other) = self.repository.get_player_by_name(&name).await? {
            if other.id != player_id {
                warn!(name = %name, "Player name already taken");
                return Err(AppError::AlreadyExists(format!("Player {}", name)));
            }
        }

        let renamed = player.name != name;
        player.name = name;
        player.color = color;
        self.repository.update_player(&player).await?;

        if renamed {
            let updated = self
                .results
                .update_player_name(player.id, &player.name)
                .await?;
            debug!(updated, "Propagated new name to results");
        }

        info!(player_id = player.id, name = %player.name, "Player updated");
        Ok(player)
    }

    /// Removes a player from the roster. Their results stay in the history.
    #[instrument(skip(self))]
    pub async fn delete_player(&self, player_id: i64) -> Result<(), AppError> {
        self.repository.delete_player(player_id).await?;
        info!(player_id, "Player deleted");
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Player name cannot be empty".to_string()));
    }
    Ok(name.to_string())
}
