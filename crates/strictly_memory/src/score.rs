//! Best-score bookkeeping.
//!
//! Lower is better: the score counts reveals, so a round finished in fewer
//! reveals beats a longer one.

use std::collections::HashMap;
use std::convert::Infallible;

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::BoardSize;

/// Message shown when a round beats the stored best.
pub const NEW_BEST_MESSAGE: &str = "New best score!";

/// Persistent best score per board size.
pub trait ScoreStore {
    /// Error raised by the backing store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the best score recorded for a board size, if any.
    fn best_score(&self, board_size: BoardSize) -> Result<Option<u32>, Self::Error>;

    /// Stores a new best score for a board size.
    fn set_best_score(&mut self, board_size: BoardSize, score: u32) -> Result<(), Self::Error>;
}

/// Outcome of a completed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct RoundSummary {
    board_size: BoardSize,
    score: u32,
    previous_best: Option<u32>,
    new_best: bool,
}

impl RoundSummary {
    /// Judges a final score against the previous best.
    pub fn new(board_size: BoardSize, score: u32, previous_best: Option<u32>) -> Self {
        let new_best = previous_best.is_none_or(|best| score < best);
        Self {
            board_size,
            score,
            previous_best,
            new_best,
        }
    }

    /// Best score after this round.
    pub fn best(&self) -> u32 {
        match self.previous_best {
            Some(best) if !self.new_best => best,
            _ => self.score,
        }
    }

    /// Best-score banner: [`NEW_BEST_MESSAGE`] or empty.
    pub fn message(&self) -> &'static str {
        if self.new_best { NEW_BEST_MESSAGE } else { "" }
    }
}

/// Records a finished round, updating the store only on a strictly better score.
///
/// # Errors
///
/// Propagates the store's error.
#[instrument(skip(store))]
pub fn record_round<S: ScoreStore + ?Sized>(
    store: &mut S,
    board_size: BoardSize,
    score: u32,
) -> Result<RoundSummary, S::Error> {
    let previous_best = store.best_score(board_size)?;
    let summary = RoundSummary::new(board_size, score, previous_best);

    if summary.new_best {
        store.set_best_score(board_size, score)?;
        info!(?previous_best, score, "New best score stored");
    } else {
        debug!(?previous_best, score, "Best score unchanged");
    }

    Ok(summary)
}

/// Score store kept in memory; forgets everything on drop.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    best: HashMap<BoardSize, u32>,
}

impl MemoryScoreStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    type Error = Infallible;

    fn best_score(&self, board_size: BoardSize) -> Result<Option<u32>, Self::Error> {
        Ok(self.best.get(&board_size).copied())
    }

    fn set_best_score(&mut self, board_size: BoardSize, score: u32) -> Result<(), Self::Error> {
        self.best.insert(board_size, score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(tiles: usize) -> BoardSize {
        BoardSize::new(tiles).expect("valid size")
    }

    #[test]
    fn test_first_round_is_always_a_best() {
        let mut store = MemoryScoreStore::new();
        let summary = record_round(&mut store, size(8), 30).expect("infallible");
        assert!(*summary.new_best());
        assert_eq!(summary.message(), NEW_BEST_MESSAGE);
        assert_eq!(store.best_score(size(8)), Ok(Some(30)));
    }

    #[test]
    fn test_lower_score_replaces_best() {
        let mut store = MemoryScoreStore::new();
        store.set_best_score(size(8), 10).expect("infallible");

        let summary = record_round(&mut store, size(8), 8).expect("infallible");
        assert!(*summary.new_best());
        assert_eq!(*summary.previous_best(), Some(10));
        assert_eq!(store.best_score(size(8)), Ok(Some(8)));
    }

    #[test]
    fn test_higher_or_equal_score_keeps_best() {
        let mut store = MemoryScoreStore::new();
        store.set_best_score(size(8), 10).expect("infallible");

        let worse = record_round(&mut store, size(8), 12).expect("infallible");
        assert!(!*worse.new_best());
        assert_eq!(worse.message(), "");
        assert_eq!(worse.best(), 10);

        let tie = record_round(&mut store, size(8), 10).expect("infallible");
        assert!(!*tie.new_best());
        assert_eq!(store.best_score(size(8)), Ok(Some(10)));
    }

    #[test]
    fn test_sizes_are_tracked_separately() {
        let mut store = MemoryScoreStore::new();
        store.set_best_score(size(8), 10).expect("infallible");
        let summary = record_round(&mut store, size(16), 40).expect("infallible");
        assert!(*summary.new_best());
        assert_eq!(store.best_score(size(8)), Ok(Some(10)));
    }
}
