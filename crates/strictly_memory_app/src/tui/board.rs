//! Board state as the terminal sees it.

use derive_getters::Getters;
use strictly_memory::{BoardRenderer, RoundSummary, TileFace, TileId, layout};
use tracing::{debug, instrument};

/// [`BoardRenderer`] that keeps a drawable copy of the board.
///
/// The game pushes changes in; [`super::ui::draw`] reads them out each frame.
#[derive(Debug, Clone, Default, Getters)]
pub struct TerminalBoard {
    tiles: Vec<TileFace>,
    columns: usize,
    score: u32,
    summary: Option<RoundSummary>,
}

impl TerminalBoard {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of grid rows for the current layout.
    pub fn rows(&self) -> usize {
        layout::row_count(self.tiles.len(), self.columns)
    }

    /// Face of the tile at `index`.
    pub fn face(&self, index: usize) -> Option<TileFace> {
        self.tiles.get(index).copied()
    }
}

impl BoardRenderer for TerminalBoard {
    fn render_tile(&mut self, tile: TileId, face: TileFace) {
        let index = tile.index();
        if index >= self.tiles.len() {
            self.tiles.resize(index + 1, TileFace::Hidden);
        }
        self.tiles[index] = face;
    }

    #[instrument(skip(self), fields(tiles = self.tiles.len()))]
    fn remove_all_tiles(&mut self) {
        self.tiles.clear();
        self.summary = None;
        debug!("Board cleared");
    }

    fn layout_grid(&mut self, columns: usize) {
        self.columns = columns;
    }

    fn update_score(&mut self, score: u32) {
        self.score = score;
    }

    fn show_summary(&mut self, summary: &RoundSummary) {
        self.summary = Some(*summary);
    }
}
