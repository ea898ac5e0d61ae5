use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::player::Player;

/// Tag stored on every result row to tell games apart
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    Yahtzee,
}

impl GameType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::Yahtzee => "yahtzee",
        }
    }
}

/// A persisted result: one row per player per completed game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResultRecord {
    pub id: i64,
    pub game_type: GameType,
    pub player_id: i64,
    pub player_name: String, // Denormalized at the time of the game, rewritten on rename
    pub score: i32,
    pub is_winner: bool,
    pub is_draw: bool,
    pub played_at: DateTime<Utc>, // Shared by every row of the same game
}

/// A result row that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameResult {
    pub game_type: GameType,
    pub player_id: i64,
    pub player_name: String,
    pub score: i32,
    pub is_winner: bool,
    pub is_draw: bool,
    pub played_at: DateTime<Utc>,
}

impl NewGameResult {
    pub fn into_record(self, id: i64) -> GameResultRecord {
        GameResultRecord {
            id,
            game_type: self.game_type,
            player_id: self.player_id,
            player_name: self.player_name,
            score: self.score,
            is_winner: self.is_winner,
            is_draw: self.is_draw,
            played_at: self.played_at,
        }
    }
}

/// Per-player figures for one game type, derived from the result rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerAggregateStats {
    pub player_id: i64,
    pub total_games: u32,
    pub counted_games: u32, // Games with at least two participants
    pub wins: u32,
    pub draws: u32,
    pub best_score: i32,
    pub worst_score: i32,
}

impl PlayerAggregateStats {
    pub fn losses(&self) -> u32 {
        self.counted_games
            .saturating_sub(self.wins)
            .saturating_sub(self.draws)
    }

    pub fn win_percentage(&self) -> f32 {
        percentage(self.wins, self.counted_games)
    }

    pub fn draw_percentage(&self) -> f32 {
        percentage(self.draws, self.counted_games)
    }

    pub fn loss_percentage(&self) -> f32 {
        percentage(self.losses(), self.counted_games)
    }
}

fn percentage(count: u32, counted_games: u32) -> f32 {
    if counted_games > 0 {
        count as f32 * 100.0 / counted_games as f32
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerWins {
    pub player_id: i64,
    pub wins: u32,
}

/// A player with their aggregated figures, as shown in the statistics table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatsEntry {
    pub player: Player,
    pub stats: PlayerAggregateStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsTable {
    /// Players with counted games, in ranking order
    pub ranked: Vec<PlayerStatsEntry>,
    /// Players who only played alone, by name
    pub unranked: Vec<PlayerStatsEntry>,
}

/// Leaderboard row with the colour of the player who scored it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopResultEntry {
    pub result: GameResultRecord,
    pub color: u32,
}
