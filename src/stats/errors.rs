use thiserror::Error;

use crate::shared::AppError;
use crate::yahtzee::SessionError;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Repository error: {0}")]
    Repository(#[from] AppError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Validation error: {0}")]
    Validation(String),
}
