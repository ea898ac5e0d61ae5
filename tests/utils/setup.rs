use chrono::{DateTime, Utc};

use scorehub::{db, AppState, GameSession, Player, PlayerService, StatsService};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub players: PlayerService,
    pub stats: StatsService,
    pub roster: Vec<Player>,
    games_played: i64,
}

pub struct TestSetupBuilder {
    names: Vec<String>,
    top_results_limit: usize,
    sqlite: bool,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            names: vec![],
            top_results_limit: 20,
            sqlite: false,
        }
    }

    pub fn with_players(mut self, names: Vec<&str>) -> Self {
        self.names = names.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_three_players(self) -> Self {
        self.with_players(vec!["alice", "bob", "carol"])
    }

    pub fn with_top_results_limit(mut self, limit: usize) -> Self {
        self.top_results_limit = limit;
        self
    }

    /// Back the setup with an in-memory SQLite database instead of the in-memory repositories
    pub fn with_sqlite(mut self) -> Self {
        self.sqlite = true;
        self
    }

    pub async fn build(self) -> TestSetup {
        let state = if self.sqlite {
            let pool = db::connect("sqlite::memory:").await.unwrap();
            db::init_schema(&pool).await.unwrap();
            AppState::sqlite(pool)
        } else {
            AppState::in_memory()
        };

        let players = state.player_service();
        let stats = state.stats_service(self.top_results_limit);

        let mut roster = Vec::new();
        for (i, name) in self.names.iter().enumerate() {
            roster.push(players.add_player(name, i as u32).await.unwrap());
        }

        TestSetup {
            players,
            stats,
            roster,
            games_played: 0,
        }
    }
}

impl TestSetup {
    pub fn player(&self, name: &str) -> Player {
        self.roster
            .iter()
            .find(|p| p.name == name)
            .cloned()
            .unwrap_or_else(|| panic!("no player named {}", name))
    }

    pub fn pick(&self, names: &[&str]) -> Vec<Player> {
        names.iter().map(|name| self.player(name)).collect()
    }

    /// Records `session` one minute after the previous game
    pub async fn record(&mut self, session: GameSession) {
        self.games_played += 1;
        let played_at = DateTime::<Utc>::from_timestamp(self.games_played * 60, 0).unwrap();
        self.stats.record_session(&session, played_at).await.unwrap();
    }
}
