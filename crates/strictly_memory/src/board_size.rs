//! Validated board size.

use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::SessionError;

/// Number of tiles on a board: even, and within `MIN..=MAX`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(try_from = "usize", into = "usize")]
pub struct BoardSize(usize);

impl BoardSize {
    /// Smallest accepted board.
    pub const MIN: usize = 4;
    /// Largest accepted board.
    pub const MAX: usize = 100;

    /// Validates a requested tile count.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidConfiguration`] if `tiles` is odd,
    /// not greater than 3, or greater than 100.
    #[instrument]
    pub fn new(tiles: usize) -> Result<Self, SessionError> {
        if tiles % 2 != 0 || !(Self::MIN..=Self::MAX).contains(&tiles) {
            warn!(tiles, "Rejecting board size");
            return Err(SessionError::InvalidConfiguration { tiles });
        }
        Ok(Self(tiles))
    }

    /// Number of tiles.
    pub const fn tiles(self) -> usize {
        self.0
    }

    /// Number of pairs (distinct colors).
    pub const fn pairs(self) -> usize {
        self.0 / 2
    }
}

impl TryFrom<usize> for BoardSize {
    type Error = SessionError;

    fn try_from(tiles: usize) -> Result<Self, Self::Error> {
        Self::new(tiles)
    }
}

impl From<BoardSize> for usize {
    fn from(size: BoardSize) -> Self {
        size.0
    }
}
