//! Seams between the game and the outside world.

use crate::{FlipBack, RoundSummary, TileFace, TileId};

/// Draws the board.
///
/// The game tells the renderer what changed; the renderer owns layout and
/// styling and forwards clicks to [`MemoryGame::click`](crate::MemoryGame::click).
pub trait BoardRenderer {
    /// Shows a tile with the given face, creating its visual if needed.
    fn render_tile(&mut self, tile: TileId, face: TileFace);

    /// Removes every tile visual.
    fn remove_all_tiles(&mut self);

    /// Arranges tiles into a grid with `columns` columns.
    fn layout_grid(&mut self, columns: usize);

    /// Shows the running score.
    fn update_score(&mut self, score: u32);

    /// Shows the end-of-round screen.
    fn show_summary(&mut self, summary: &RoundSummary);
}

/// Runs flip-backs after the mismatch delay.
///
/// Implementations deliver every scheduled [`FlipBack`] back to
/// [`MemoryGame::flip_back`](crate::MemoryGame::flip_back) once the delay has
/// elapsed, unless cancelled first.
pub trait FlipScheduler {
    /// Schedules a flip-back.
    fn schedule(&mut self, flip: FlipBack);

    /// Cancels every flip-back that has not fired yet.
    fn cancel_all(&mut self);
}
