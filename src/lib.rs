// Library crate for the Yahtzee score tracker
// This file exposes the public API for the binary and integration tests

pub mod config;
pub mod db;
pub mod player;
pub mod preferences;
pub mod shared;
pub mod stats;
pub mod yahtzee;

// Re-export commonly used types for easier access in tests
pub use config::AppConfig;
pub use player::{Player, PlayerService};
pub use preferences::{order_players, Preferences};
pub use shared::{AppError, AppState};
pub use stats::{GameType, RankingPolicy, StatsError, StatsService};
pub use yahtzee::{Category, GameSession, PlayerScoreSheet, ScoreSlot};
