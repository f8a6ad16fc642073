//! The game session state machine.
//!
//! A [`GameSession`] owns the deal, the tiles, the current selection and the
//! score of one round at a time. It is mutated through two entry points only:
//! [`GameSession::handle_tile_click`] and [`GameSession::flip_back`]. Timing
//! is the caller's business: a mismatch yields a [`FlipBack`] that must be
//! handed back after the delay.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{BoardSize, Color, Selection, SessionError, Tile, TileId, TileState, color};

/// Phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display)]
pub enum Phase {
    /// No round has been dealt.
    #[default]
    NotStarted,
    /// Tiles accept clicks.
    InProgress,
    /// Every pair has been found.
    Complete,
}

/// Identifies one dealt round. Increases on every deal and reset.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub struct RoundId(u64);

impl RoundId {
    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Pending flip-back for a mismatched pair.
///
/// Hand it back to [`GameSession::flip_back`] once the delay has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlipBack {
    /// Round the pair belongs to.
    pub round: RoundId,
    /// The two mismatched tiles, in reveal order.
    pub tiles: [TileId; 2],
}

/// Why a click changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum IgnoreReason {
    /// No round in progress (not started, or already complete).
    NotInProgress,
    /// The id is not on the board.
    UnknownTile,
    /// The tile is already face up in the current attempt.
    AlreadySelected,
    /// The tile's pair has been found.
    AlreadyMatched,
    /// Two mismatched tiles are waiting to flip back.
    SelectionFull,
}

/// Result of a tile click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// First tile of an attempt turned face up.
    Revealed(TileId),
    /// Second tile matched the first; both stay face up.
    Matched {
        /// The pair, in reveal order.
        pair: [TileId; 2],
        /// True if this pair finished the round.
        complete: bool,
    },
    /// Second tile did not match; both must flip back after the delay.
    Mismatch(FlipBack),
}

/// One player's memory game, round by round.
#[derive(Debug, Clone, Default)]
pub struct GameSession {
    phase: Phase,
    round: RoundId,
    board_size: Option<BoardSize>,
    tiles: Vec<Tile>,
    selection: Selection,
    score: u32,
}

// ─────────────────────────────────────────────────────────────
//  Round setup
// ─────────────────────────────────────────────────────────────

impl GameSession {
    /// Creates a session with no round dealt.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deals a new round of `tiles` tiles with random colors.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidConfiguration`] if `tiles` is not an
    /// even count in 4..=100. The session is left untouched in that case.
    #[instrument(skip(self, rng))]
    pub fn initialize<R: Rng + ?Sized>(
        &mut self,
        tiles: usize,
        rng: &mut R,
    ) -> Result<(), SessionError> {
        let board_size = BoardSize::new(tiles)?;
        let colors = color::deal(board_size, rng);
        self.start_round(board_size, colors);
        Ok(())
    }

    /// Deals a new round with a fixed color layout.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidConfiguration`] if the layout length is
    /// not a valid board size, or [`SessionError::InvalidLayout`] if some
    /// color does not appear exactly twice.
    #[instrument(skip(self, colors), fields(tiles = colors.len()))]
    pub fn initialize_with_colors(&mut self, colors: Vec<Color>) -> Result<(), SessionError> {
        let board_size = BoardSize::new(colors.len())?;

        let mut counts: HashMap<Color, usize> = HashMap::new();
        for color in &colors {
            *counts.entry(*color).or_default() += 1;
        }
        if let Some((color, count)) = counts.iter().find(|(_, count)| **count != 2) {
            warn!(%color, count, "Rejecting layout");
            return Err(SessionError::InvalidLayout {
                reason: format!("{} appears {} times, expected 2", color, count),
            });
        }

        self.start_round(board_size, colors);
        Ok(())
    }

    fn start_round(&mut self, board_size: BoardSize, colors: Vec<Color>) {
        self.round = self.round.next();
        self.board_size = Some(board_size);
        self.tiles = colors
            .into_iter()
            .enumerate()
            .map(|(index, color)| Tile::new(TileId::new(index), color))
            .collect();
        self.selection.clear();
        self.score = 0;
        self.phase = Phase::InProgress;
        info!(round = %self.round, board_size = %board_size, "Round dealt");
    }

    /// Drops the current round and returns to [`Phase::NotStarted`].
    ///
    /// The round id still advances, so flip-backs issued before the reset
    /// are ignored.
    #[instrument(skip(self), fields(round = %self.round))]
    pub fn reset(&mut self) {
        self.round = self.round.next();
        self.board_size = None;
        self.tiles.clear();
        self.selection.clear();
        self.score = 0;
        self.phase = Phase::NotStarted;
        debug!("Session reset");
    }
}

// ─────────────────────────────────────────────────────────────
//  Transitions
// ─────────────────────────────────────────────────────────────

impl GameSession {
    /// Handles a click on a tile.
    ///
    /// Every tile that turns face up adds one to the score, whether or not it
    /// completes a pair.
    #[instrument(skip(self), fields(round = %self.round, selected = self.selection.len()))]
    pub fn handle_tile_click(&mut self, tile: TileId) -> ClickOutcome {
        if let Some(reason) = self.ignore_reason(tile) {
            debug!(%reason, "Click ignored");
            return ClickOutcome::Ignored(reason);
        }

        // A repeated click on the pending tile was already rejected above.
        let Some(first) = self.selection.pending() else {
            self.reveal(tile);
            return ClickOutcome::Revealed(tile);
        };

        self.reveal(tile);
        let pair = [first, tile];

        if self.tiles[first.index()].color() == self.tiles[tile.index()].color() {
            for id in pair {
                self.tiles[id.index()].set_state(TileState::Matched);
            }
            self.selection.clear();

            let complete = self.tiles.iter().all(Tile::is_matched);
            if complete {
                self.phase = Phase::Complete;
                info!(score = self.score, "Round complete");
            } else {
                debug!(first = %first, second = %tile, "Pair matched");
            }
            ClickOutcome::Matched { pair, complete }
        } else {
            debug!(first = %first, second = %tile, "Pair mismatched");
            ClickOutcome::Mismatch(FlipBack {
                round: self.round,
                tiles: pair,
            })
        }
    }

    /// Turns a mismatched pair face down again.
    ///
    /// Stale flip-backs (from an earlier round) and tiles that are no longer
    /// revealed are skipped. Returns the tiles that actually flipped.
    #[instrument(skip(self), fields(current = %self.round))]
    pub fn flip_back(&mut self, flip: FlipBack) -> Vec<TileId> {
        if flip.round != self.round {
            debug!(stale = %flip.round, "Ignoring flip-back from another round");
            return Vec::new();
        }

        let mut flipped = Vec::with_capacity(flip.tiles.len());
        for id in flip.tiles {
            let Some(tile) = self.tiles.get_mut(id.index()) else {
                continue;
            };
            if tile.state() == TileState::Revealed {
                tile.set_state(TileState::FaceDown);
                self.selection.remove(id);
                flipped.push(id);
            }
        }

        debug!(flipped = flipped.len(), "Flip-back applied");
        flipped
    }

    fn ignore_reason(&self, tile: TileId) -> Option<IgnoreReason> {
        if self.phase != Phase::InProgress {
            return Some(IgnoreReason::NotInProgress);
        }
        let Some(target) = self.tiles.get(tile.index()) else {
            return Some(IgnoreReason::UnknownTile);
        };
        match target.state() {
            TileState::Matched => Some(IgnoreReason::AlreadyMatched),
            TileState::Revealed => Some(IgnoreReason::AlreadySelected),
            TileState::FaceDown if self.selection.is_full() => Some(IgnoreReason::SelectionFull),
            TileState::FaceDown => None,
        }
    }

    fn reveal(&mut self, tile: TileId) {
        self.tiles[tile.index()].set_state(TileState::Revealed);
        self.selection.push(tile);
        self.score += 1;
    }
}

// ─────────────────────────────────────────────────────────────
//  Accessors
// ─────────────────────────────────────────────────────────────

impl GameSession {
    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Id of the current (or last) round.
    pub fn round(&self) -> RoundId {
        self.round
    }

    /// Board size of the current round.
    pub fn board_size(&self) -> Option<BoardSize> {
        self.board_size
    }

    /// Tiles in board order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Looks up a tile.
    pub fn tile(&self, tile: TileId) -> Option<&Tile> {
        self.tiles.get(tile.index())
    }

    /// Tiles face up in the current attempt.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Reveals so far this round.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Returns true once every pair is found.
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// Pairs found so far.
    pub fn matched_pairs(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_matched()).count() / 2
    }

    /// Pairs on the board.
    pub fn total_pairs(&self) -> usize {
        self.tiles.len() / 2
    }
}
