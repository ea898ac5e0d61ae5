mod category;
pub mod session;
mod sheet;
#[cfg(test)]
mod tests;

pub use category::{Category, Section, CATEGORY_COUNT};
pub use session::{GameSession, SessionError, SessionOutcome};
pub use sheet::{PlayerScoreSheet, ScoreSlot, UPPER_BONUS, UPPER_BONUS_THRESHOLD};
