use std::collections::HashMap;

use scorehub::{Category, GameSession, Player, ScoreSlot};

// ============================================================================
// Session Setup Utilities
// ============================================================================

/// Plays a whole session turn by turn. Every slot not given a value is scored as zero.
pub struct SessionBuilder {
    players: Vec<Player>,
    scores: HashMap<(usize, Category), u32>,
}

impl SessionBuilder {
    pub fn new(players: &[Player]) -> Self {
        Self {
            players: players.to_vec(),
            scores: HashMap::new(),
        }
    }

    pub fn score(mut self, seat: usize, category: Category, value: u32) -> Self {
        self.scores.insert((seat, category), value);
        self
    }

    /// Seat `i` ends with a grand total of `totals[i]`, written into Chance
    pub fn with_chances(mut self, totals: &[u32]) -> Self {
        for (seat, total) in totals.iter().enumerate() {
            self = self.score(seat, Category::Chance, *total);
        }
        self
    }

    pub fn build(self) -> GameSession {
        let mut session = GameSession::new(&self.players).unwrap();
        for category in Category::all() {
            for seat in 0..self.players.len() {
                assert_eq!(session.current_turn(), seat);
                let value = self.scores.get(&(seat, category)).copied().unwrap_or(0);
                session = session.record(category, ScoreSlot::Set(value));
            }
        }
        assert!(session.is_complete());
        session
    }
}
