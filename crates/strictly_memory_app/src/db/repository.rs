//! SQLite-backed best score repository.

use std::path::Path;

use chrono::Utc;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use strictly_memory::{BoardSize, ScoreStore};
use tracing::{debug, info, instrument, warn};

use crate::db::{BestScore, DbError, NewBestScore, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Best scores persisted in a SQLite file.
///
/// Opens a fresh connection per operation, so the repository is cheap to
/// clone and holds no file handle between calls.
#[derive(Debug, Clone)]
pub struct ScoreRepository {
    db_path: String,
}

impl ScoreRepository {
    /// Opens (creating if needed) the database at `db_path` and applies
    /// pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the file cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, DbError> {
        info!(path = %db_path, "Opening score repository");
        let repo = Self { db_path };

        let mut conn = repo.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(DbError::migration)?;
        debug!(count = applied.len(), "Migrations applied");

        Ok(repo)
    }

    /// Opens the database at `db_path` only if the file already exists.
    ///
    /// Read-only callers use this so that looking for scores never creates
    /// an empty database.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if an existing file cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open_existing(db_path: String) -> Result<Option<Self>, DbError> {
        if !Path::new(&db_path).exists() {
            debug!("No database file yet");
            return Ok(None);
        }
        Self::open(db_path).map(Some)
    }

    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Looks up the best score row for a board size.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get(&self, board_size: BoardSize) -> Result<Option<BestScore>, DbError> {
        let mut conn = self.connection()?;
        let size = i32::try_from(board_size.tiles())?;

        let row = schema::best_scores::table
            .filter(schema::best_scores::board_size.eq(size))
            .first::<BestScore>(&mut conn)
            .optional()?;

        debug!(found = row.is_some(), "Best score lookup");
        Ok(row)
    }

    /// Inserts or replaces the best score for a board size.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn upsert(&self, board_size: BoardSize, score: u32) -> Result<BestScore, DbError> {
        let mut conn = self.connection()?;
        let now = Utc::now().naive_utc();
        let row = NewBestScore::new(i32::try_from(board_size.tiles())?, i32::try_from(score)?, now);

        diesel::insert_into(schema::best_scores::table)
            .values(&row)
            .on_conflict(schema::best_scores::board_size)
            .do_update()
            .set((
                schema::best_scores::score.eq(*row.score()),
                schema::best_scores::updated_at.eq(now),
            ))
            .execute(&mut conn)?;

        let stored = schema::best_scores::table
            .filter(schema::best_scores::board_size.eq(*row.board_size()))
            .select(BestScore::as_select())
            .first(&mut conn)?;

        info!(board_size = stored.board_size(), score = stored.score(), "Best score stored");
        Ok(stored)
    }

    /// Lists every best score, smallest board first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list(&self) -> Result<Vec<BestScore>, DbError> {
        let mut conn = self.connection()?;

        let rows = schema::best_scores::table
            .order(schema::best_scores::board_size.asc())
            .load::<BestScore>(&mut conn)?;

        info!(count = rows.len(), "Best scores loaded");
        Ok(rows)
    }
}

impl ScoreStore for ScoreRepository {
    type Error = DbError;

    fn best_score(&self, board_size: BoardSize) -> Result<Option<u32>, DbError> {
        let Some(row) = self.get(board_size)? else {
            return Ok(None);
        };
        match u32::try_from(*row.score()) {
            Ok(score) => Ok(Some(score)),
            Err(e) => {
                warn!(score = row.score(), "Ignoring corrupt best score");
                Err(e.into())
            }
        }
    }

    fn set_best_score(&mut self, board_size: BoardSize, score: u32) -> Result<(), DbError> {
        self.upsert(board_size, score).map(|_| ())
    }
}
