//! The face-up, unresolved tiles of the current attempt.

use crate::TileId;

/// Ordered set of at most two revealed-but-unresolved tiles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    tiles: Vec<TileId>,
}

impl Selection {
    /// Maximum number of tiles an attempt can hold.
    pub const CAPACITY: usize = 2;

    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of selected tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Returns true if no further tile can be added.
    pub fn is_full(&self) -> bool {
        self.tiles.len() >= Self::CAPACITY
    }

    /// The tile revealed first, if any.
    pub fn pending(&self) -> Option<TileId> {
        self.tiles.first().copied()
    }

    /// Returns true if the tile is selected.
    pub fn contains(&self, tile: TileId) -> bool {
        self.tiles.contains(&tile)
    }

    /// Selected tiles in reveal order.
    pub fn tiles(&self) -> &[TileId] {
        &self.tiles
    }

    /// Adds a tile. Returns false if the selection is full or already holds it.
    pub(crate) fn push(&mut self, tile: TileId) -> bool {
        if self.is_full() || self.contains(tile) {
            return false;
        }
        self.tiles.push(tile);
        true
    }

    /// Removes a tile, returning whether it was present.
    pub(crate) fn remove(&mut self, tile: TileId) -> bool {
        let before = self.tiles.len();
        self.tiles.retain(|&t| t != tile);
        self.tiles.len() != before
    }

    pub(crate) fn clear(&mut self) {
        self.tiles.clear();
    }
}
