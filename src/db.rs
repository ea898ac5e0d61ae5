use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info, instrument, warn};

use crate::shared::AppError;

const SCHEMA: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS players (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        color INTEGER NOT NULL,
        created_at INTEGER NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS game_results (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        game_type TEXT NOT NULL,
        player_id INTEGER NOT NULL,
        player_name TEXT NOT NULL,
        score INTEGER NOT NULL,
        is_winner INTEGER NOT NULL,
        is_draw INTEGER NOT NULL,
        played_at INTEGER NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_game_results_player ON game_results (player_id, game_type)",
];

/// Opens a pool for `database_url`, creating the database file if needed.
///
/// In-memory databases get a single long-lived connection, otherwise every
/// pooled connection would see its own empty database.
#[instrument]
pub async fn connect(database_url: &str) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| {
            warn!(error = %e, "Invalid database url");
            AppError::DatabaseError(e.to_string())
        })?
        .create_if_missing(true);

    let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    let pool = pool_options.connect_with(options).await.map_err(|e| {
        warn!(error = %e, "Failed to open database");
        AppError::DatabaseError(e.to_string())
    })?;

    info!(in_memory, "Database connection established");
    Ok(pool)
}

/// Creates the `players` and `game_results` tables when missing.
#[instrument(skip(pool))]
pub async fn init_schema(pool: &SqlitePool) -> Result<(), AppError> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await.map_err(|e| {
            warn!(error = %e, "Failed to apply schema");
            AppError::DatabaseError(e.to_string())
        })?;
    }

    debug!("Schema ready");
    Ok(())
}

/// Timestamps are stored as Unix milliseconds.
pub(crate) fn from_millis(millis: i64) -> Result<DateTime<Utc>, AppError> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .ok_or_else(|| AppError::DatabaseError(format!("Invalid timestamp: {}", millis)))
}
