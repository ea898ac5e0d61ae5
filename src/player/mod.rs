// Public API - what other modules can use
pub use models::{NewPlayer, Player};
pub use palette::{palette_position, random_color, ColorCursor, GREY, PALETTE};
pub use repository::{InMemoryPlayerRepository, PlayerRepository, SqlitePlayerRepository};
pub use service::PlayerService;

pub mod models;
pub mod palette;
pub mod repository;
mod service;
