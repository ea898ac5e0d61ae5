use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub name: String, // Unique across the roster
    pub color: u32,   // ARGB
    pub created_at: DateTime<Utc>,
}

/// Player data before it has been assigned an id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlayer {
    pub name: String,
    pub color: u32,
    pub created_at: DateTime<Utc>,
}

impl NewPlayer {
    pub fn new(name: impl Into<String>, color: u32) -> Self {
        Self {
            name: name.into(),
            color,
            created_at: Utc::now(),
        }
    }

    pub fn into_player(self, id: i64) -> Player {
        Player {
            id,
            name: self.name,
            color: self.color,
            created_at: self.created_at,
        }
    }
}
