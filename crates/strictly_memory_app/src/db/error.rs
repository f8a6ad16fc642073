//! Score store error type.

use derive_more::{Display, Error};
use tracing::instrument;

/// Score store failure, tagged with the call site that raised it.
#[derive(Debug, Clone, Display, Error)]
#[display("Score store error: {} at {}:{}", message, file, line)]
pub struct DbError {
    /// What went wrong.
    pub message: String,
    /// Line of the call site.
    pub line: u32,
    /// File of the call site.
    pub file: &'static str,
}

impl DbError {
    /// Creates an error located at the caller.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Wraps a failed schema migration.
    #[track_caller]
    pub fn migration(err: impl std::fmt::Display) -> Self {
        Self::new(format!("Migration failed: {}", err))
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(format!("Query failed: {}", err))
    }
}

impl From<diesel::ConnectionError> for DbError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(format!("Cannot open database: {}", err))
    }
}

impl From<std::num::TryFromIntError> for DbError {
    #[track_caller]
    fn from(err: std::num::TryFromIntError) -> Self {
        Self::new(format!("Score out of range: {}", err))
    }
}
