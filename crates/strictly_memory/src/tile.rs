//! Tiles and their visible faces.

use serde::{Deserialize, Serialize};

use crate::Color;

/// Index of a tile on the board (0..N-1).
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
    derive_more::From,
)]
#[display("#{}", _0)]
pub struct TileId(usize);

impl TileId {
    /// Creates a tile id from a board index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the board index.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Lifecycle of a single tile within a round.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
pub enum TileState {
    /// Color hidden.
    #[default]
    FaceDown,
    /// Color shown while the player looks for its partner.
    Revealed,
    /// Pair found; stays face up for the rest of the round.
    Matched,
}

/// What a renderer may show for a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileFace {
    /// Face down, color unknown to the player.
    Hidden,
    /// Face up, waiting for the pair to resolve.
    Revealed(Color),
    /// Face up for good.
    Matched(Color),
}

impl TileFace {
    /// Returns the color if the face is up.
    pub fn color(self) -> Option<Color> {
        match self {
            TileFace::Hidden => None,
            TileFace::Revealed(color) | TileFace::Matched(color) => Some(color),
        }
    }
}

/// A tile on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,
    color: Color,
    state: TileState,
}

impl Tile {
    /// Creates a face-down tile.
    pub fn new(id: TileId, color: Color) -> Self {
        Self {
            id,
            color,
            state: TileState::FaceDown,
        }
    }

    /// Returns the tile id.
    pub fn id(&self) -> TileId {
        self.id
    }

    /// Returns the hidden color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the current state.
    pub fn state(&self) -> TileState {
        self.state
    }

    /// Returns true once the tile's pair has been found.
    pub fn is_matched(&self) -> bool {
        self.state == TileState::Matched
    }

    /// Projects the state to what a renderer may show.
    pub fn face(&self) -> TileFace {
        match self.state {
            TileState::FaceDown => TileFace::Hidden,
            TileState::Revealed => TileFace::Revealed(self.color),
            TileState::Matched => TileFace::Matched(self.color),
        }
    }

    pub(crate) fn set_state(&mut self, state: TileState) {
        self.state = state;
    }
}
