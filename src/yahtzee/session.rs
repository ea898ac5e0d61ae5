// A session holds one score sheet per participant, in seat order, and the seat that is to act.
// Every score selection writes into the active sheet and passes the turn on; the session is
// finished once every sheet is complete, at which point it can be turned into result rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::sheet::{PlayerScoreSheet, ScoreSlot};
use crate::player::Player;
use crate::stats::{GameType, NewGameResult};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("A game session needs at least one player")]
    NoPlayers,
    #[error("Seat {index} does not exist ({players} players)")]
    InvalidSeat { index: usize, players: usize },
    #[error("Game session is not complete")]
    Incomplete,
}

/// Final standings of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub totals: Vec<u32>,    // Grand total per seat
    pub winners: Vec<usize>, // Seats sharing the highest total
    pub is_draw: bool,
    pub is_solo: bool,
}

impl SessionOutcome {
    pub fn is_winner(&self, seat: usize) -> bool {
        !self.is_solo && !self.is_draw && self.winners.contains(&seat)
    }

    pub fn is_drawn(&self, seat: usize) -> bool {
        !self.is_solo && self.is_draw && self.winners.contains(&seat)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SavedSession")]
pub struct GameSession {
    sheets: Vec<PlayerScoreSheet>,
    current_turn: usize, // The seat that is to act
}

/// Unchecked wire form of a session; only reachable through `TryFrom`
#[derive(Deserialize)]
struct SavedSession {
    sheets: Vec<PlayerScoreSheet>,
    current_turn: usize,
}

impl TryFrom<SavedSession> for GameSession {
    type Error = SessionError;

    fn try_from(saved: SavedSession) -> Result<Self, Self::Error> {
        let players = saved.sheets.len();
        if saved.current_turn >= players && players > 0 {
            return Err(SessionError::InvalidSeat {
                index: saved.current_turn,
                players,
            });
        }

        let mut session = Self::from_sheets(saved.sheets)?;
        session.current_turn = saved.current_turn;
        Ok(session)
    }
}

impl GameSession {
    /// Starts a session with the players seated in the given order.
    pub fn new(players: &[Player]) -> Result<Self, SessionError> {
        Self::from_sheets(
            players
                .iter()
                .map(|p| PlayerScoreSheet::new(p.id, p.name.clone(), p.color))
                .collect(),
        )
    }

    pub fn from_sheets(sheets: Vec<PlayerScoreSheet>) -> Result<Self, SessionError> {
        if sheets.is_empty() {
            return Err(SessionError::NoPlayers);
        }

        Ok(Self {
            sheets,
            current_turn: 0,
        })
    }

    pub fn sheets(&self) -> &[PlayerScoreSheet] {
        &self.sheets
    }

    pub fn current_turn(&self) -> usize {
        self.current_turn
    }

    pub fn current_sheet(&self) -> &PlayerScoreSheet {
        &self.sheets[self.current_turn]
    }

    pub fn player_count(&self) -> usize {
        self.sheets.len()
    }

    /// Writes `slot` into the active player's sheet. Passing `ScoreSlot::Unset` clears it.
    pub fn apply_score(mut self, category: Category, slot: ScoreSlot) -> Self {
        self.sheets[self.current_turn].put(category, slot);
        self
    }

    pub fn advance_turn(mut self) -> Self {
        self.current_turn = (self.current_turn + 1) % self.sheets.len();
        self
    }

    /// A score selection: write the slot, then hand the turn to the next seat.
    pub fn record(self, category: Category, slot: ScoreSlot) -> Self {
        self.apply_score(category, slot).advance_turn()
    }

    /// Makes `seat` the active player without scoring anything.
    pub fn select_player(mut self, seat: usize) -> Result<Self, SessionError> {
        if seat >= self.sheets.len() {
            return Err(SessionError::InvalidSeat {
                index: seat,
                players: self.sheets.len(),
            });
        }
        self.current_turn = seat;
        Ok(self)
    }

    pub fn is_complete(&self) -> bool {
        self.sheets.iter().all(|sheet| sheet.is_complete())
    }

    pub fn is_solo(&self) -> bool {
        self.sheets.len() == 1
    }

    pub fn outcome(&self) -> SessionOutcome {
        let totals: Vec<u32> = self.sheets.iter().map(|s| s.grand_total()).collect();
        let max_total = totals.iter().copied().max().unwrap_or_default();
        let winners: Vec<usize> = totals
            .iter()
            .enumerate()
            .filter(|(_, total)| **total == max_total)
            .map(|(seat, _)| seat)
            .collect();

        SessionOutcome {
            is_draw: winners.len() > 1,
            is_solo: self.is_solo(),
            totals,
            winners,
        }
    }

    /// Result rows for a finished session, one per seat, all stamped with `played_at`.
    pub fn to_results(
        &self,
        game_type: GameType,
        played_at: DateTime<Utc>,
    ) -> Result<Vec<NewGameResult>, SessionError> {
        if !self.is_complete() {
            return Err(SessionError::Incomplete);
        }

        let outcome = self.outcome();
        Ok(self
            .sheets
            .iter()
            .enumerate()
            .map(|(seat, sheet)| NewGameResult {
                game_type,
                player_id: sheet.player_id,
                player_name: sheet.player_name.clone(),
                score: outcome.totals[seat] as i32,
                is_winner: outcome.is_winner(seat),
                is_draw: outcome.is_drawn(seat),
                played_at,
            })
            .collect())
    }
}
