use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::player::Player;

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("Preferences file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Preferences format error: {0}")]
    Format(#[from] serde_json::Error),
}

/// Settings remembered between launches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub language: String,
    pub last_player_order: Vec<i64>, // Player ids of the last session, in seat order
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            last_player_order: Vec::new(),
        }
    }
}

impl Preferences {
    /// Reads preferences from `path`; a missing file yields the defaults.
    #[instrument]
    pub async fn load(path: &Path) -> Result<Self, PreferencesError> {
        match tokio::fs::read_to_string(path).await {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No preferences file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    pub async fn save(&self, path: &Path) -> Result<(), PreferencesError> {
        let contents = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, contents).await?;
        debug!("Preferences saved");
        Ok(())
    }

    pub fn remember_order(&mut self, players: &[Player]) {
        self.last_player_order = players.iter().map(|p| p.id).collect();
    }
}

/// Puts players listed in `saved_ids` first, in that order, followed by the
/// rest in their original order. Ids without a matching player are ignored.
pub fn order_players(players: Vec<Player>, saved_ids: &[i64]) -> Vec<Player> {
    let mut remaining = players;
    let mut ordered = Vec::with_capacity(remaining.len());

    for id in saved_ids {
        if let Some(pos) = remaining.iter().position(|p| p.id == *id) {
            ordered.push(remaining.remove(pos));
        }
    }

    ordered.extend(remaining);
    ordered
}
