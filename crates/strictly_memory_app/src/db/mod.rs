//! Database persistence layer for best scores.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::DbError;
pub use models::{BestScore, NewBestScore};
pub use repository::ScoreRepository;
