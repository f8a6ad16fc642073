//! Database models.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use strictly_memory::BoardSize;
use tracing::instrument;

use crate::db::{DbError, schema};

/// Best score row: one per board size.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::best_scores)]
#[diesel(primary_key(board_size))]
pub struct BestScore {
    board_size: i32,
    score: i32,
    updated_at: NaiveDateTime,
}

impl BestScore {
    /// Parses the stored board size.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the row holds a size the game would reject.
    #[instrument(skip(self), fields(board_size = self.board_size))]
    pub fn parse_board_size(&self) -> Result<BoardSize, DbError> {
        let tiles = usize::try_from(self.board_size)
            .map_err(|e| DbError::new(format!("Negative board size: {}", e)))?;
        BoardSize::new(tiles).map_err(|e| DbError::new(e.to_string()))
    }
}

/// Insertable best score.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::best_scores)]
pub struct NewBestScore {
    board_size: i32,
    score: i32,
    updated_at: NaiveDateTime,
}
