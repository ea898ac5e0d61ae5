mod errors;
pub mod models;
pub mod ranking;
pub mod repository;
mod service;

pub use errors::StatsError;
pub use models::*;
pub use ranking::{RankingPolicy, Standing};
pub use repository::{
    GameResultRepository, InMemoryGameResultRepository, SqliteGameResultRepository,
};
pub use service::StatsService;
