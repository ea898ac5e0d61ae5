use serde::{Deserialize, Serialize};

use super::category::{Category, CATEGORY_COUNT};

/// Upper section subtotal needed for the bonus.
pub const UPPER_BONUS_THRESHOLD: u32 = 63;
/// Points awarded once the upper section reaches the threshold.
pub const UPPER_BONUS: u32 = 35;

/// State of one category on a sheet.
///
/// `Set(0)` is a scored zero (a scratched category), distinct from `Unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScoreSlot {
    #[default]
    Unset,
    Set(u32),
}

impl ScoreSlot {
    pub fn value(self) -> Option<u32> {
        match self {
            ScoreSlot::Unset => None,
            ScoreSlot::Set(value) => Some(value),
        }
    }

    /// Points this slot contributes to a subtotal; unset counts as 0.
    pub fn points(self) -> u32 {
        self.value().unwrap_or_default()
    }

    pub fn is_set(self) -> bool {
        matches!(self, ScoreSlot::Set(_))
    }
}

impl From<Option<u32>> for ScoreSlot {
    fn from(value: Option<u32>) -> Self {
        value.map(ScoreSlot::Set).unwrap_or_default()
    }
}

/// One player's scores for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScoreSheet {
    pub player_id: i64,
    pub player_name: String,
    pub player_color: u32,
    slots: [ScoreSlot; CATEGORY_COUNT],
}

impl PlayerScoreSheet {
    pub fn new(player_id: i64, player_name: impl Into<String>, player_color: u32) -> Self {
        Self {
            player_id,
            player_name: player_name.into(),
            player_color,
            slots: [ScoreSlot::Unset; CATEGORY_COUNT],
        }
    }

    pub fn slot(&self, category: Category) -> ScoreSlot {
        self.slots[category.index()]
    }

    pub fn score(&self, category: Category) -> Option<u32> {
        self.slot(category).value()
    }

    /// Slots in sheet order.
    pub fn slots(&self) -> impl Iterator<Item = (Category, ScoreSlot)> + '_ {
        Category::all().map(move |category| (category, self.slot(category)))
    }

    pub fn put(&mut self, category: Category, slot: ScoreSlot) {
        self.slots[category.index()] = slot;
    }

    pub fn set(&mut self, category: Category, value: u32) {
        self.put(category, ScoreSlot::Set(value));
    }

    pub fn clear(&mut self, category: Category) {
        self.put(category, ScoreSlot::Unset);
    }

    /// Returns the sheet with `slot` written into `category`.
    pub fn apply_score(mut self, category: Category, slot: ScoreSlot) -> Self {
        self.put(category, slot);
        self
    }

    pub fn upper_total(&self) -> u32 {
        Category::upper().map(|c| self.slot(c).points()).sum()
    }

    pub fn bonus(&self) -> u32 {
        if self.upper_total() >= UPPER_BONUS_THRESHOLD {
            UPPER_BONUS
        } else {
            0
        }
    }

    /// Points still missing before the bonus is earned, 0 once it is.
    pub fn bonus_progress(&self) -> u32 {
        UPPER_BONUS_THRESHOLD.saturating_sub(self.upper_total())
    }

    pub fn lower_total(&self) -> u32 {
        Category::lower().map(|c| self.slot(c).points()).sum()
    }

    pub fn grand_total(&self) -> u32 {
        self.upper_total() + self.bonus() + self.lower_total()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_set())
    }

    /// Categories still waiting for a score, in sheet order.
    pub fn remaining(&self) -> Vec<Category> {
        self.slots()
            .filter(|(_, slot)| !slot.is_set())
            .map(|(category, _)| category)
            .collect()
    }
}
