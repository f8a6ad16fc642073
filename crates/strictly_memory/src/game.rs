//! Drives a [`GameSession`] against a renderer, a score store and a scheduler.

use rand::rngs::StdRng;
use tracing::{debug, info, instrument, warn};

use crate::{
    BoardRenderer, BoardSize, ClickOutcome, FlipBack, FlipScheduler, GameError, GameSession,
    ScoreStore, TileId, layout, score,
};

/// A playable memory game.
///
/// Owns the session and its collaborators. Every entry point runs to
/// completion, so callers only need to serialize calls, never lock.
#[derive(Debug)]
pub struct MemoryGame<R, S, T> {
    session: GameSession,
    renderer: R,
    store: S,
    scheduler: T,
    rng: StdRng,
    board_size: Option<BoardSize>,
}

impl<R, S, T> MemoryGame<R, S, T>
where
    R: BoardRenderer,
    S: ScoreStore,
    T: FlipScheduler,
{
    /// Creates a game with no round started.
    #[instrument(skip_all)]
    pub fn new(renderer: R, store: S, scheduler: T, rng: StdRng) -> Self {
        Self {
            session: GameSession::new(),
            renderer,
            store,
            scheduler,
            rng,
            board_size: None,
        }
    }

    /// Starts a round of `tiles` tiles.
    ///
    /// Pending flip-backs from the previous round are cancelled first.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Session`] if `tiles` is not a valid board size.
    /// The previous round is left as it was.
    #[instrument(skip(self))]
    pub fn start(&mut self, tiles: usize) -> Result<(), GameError> {
        let board_size = BoardSize::new(tiles)?;

        self.scheduler.cancel_all();
        self.session.initialize(board_size.tiles(), &mut self.rng)?;
        self.board_size = Some(board_size);
        self.redraw();

        info!(round = %self.session.round(), %board_size, "Round started");
        Ok(())
    }

    /// Starts a new round with the previously chosen board size.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotStarted`] if no round was ever started.
    #[instrument(skip(self))]
    pub fn replay(&mut self) -> Result<(), GameError> {
        let board_size = self.board_size.ok_or(GameError::NotStarted)?;
        self.start(board_size.tiles())
    }

    /// Handles a tile click coming from the renderer.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Store`] if the round completed but its score
    /// could not be recorded. The board is fully updated regardless.
    #[instrument(skip(self))]
    pub fn click(&mut self, tile: TileId) -> Result<ClickOutcome, GameError> {
        let outcome = self.session.handle_tile_click(tile);

        match outcome {
            ClickOutcome::Ignored(_) => return Ok(outcome),
            ClickOutcome::Revealed(id) => self.render(id),
            ClickOutcome::Matched { pair, .. } => pair.into_iter().for_each(|id| self.render(id)),
            ClickOutcome::Mismatch(flip) => {
                self.render(tile);
                self.scheduler.schedule(flip);
            }
        }
        self.renderer.update_score(self.session.score());

        if let ClickOutcome::Matched { complete: true, .. } = outcome {
            self.finish()?;
        }

        Ok(outcome)
    }

    /// Applies a flip-back delivered by the scheduler.
    #[instrument(skip(self))]
    pub fn flip_back(&mut self, flip: FlipBack) {
        for id in self.session.flip_back(flip) {
            self.render(id);
        }
    }

    /// Best score stored for the current board size.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Store`] if the store cannot be read.
    #[instrument(skip(self))]
    pub fn best_score(&self) -> Result<Option<u32>, GameError> {
        let Some(board_size) = self.board_size else {
            return Ok(None);
        };
        self.store.best_score(board_size).map_err(store_error)
    }

    fn finish(&mut self) -> Result<(), GameError> {
        let Some(board_size) = self.session.board_size() else {
            warn!("Completed round without a board size");
            return Ok(());
        };
        let summary = score::record_round(&mut self.store, board_size, self.session.score())
            .map_err(store_error)?;
        debug!(?summary, "Showing round summary");
        self.renderer.show_summary(&summary);
        Ok(())
    }

    fn redraw(&mut self) {
        self.renderer.remove_all_tiles();
        self.renderer
            .layout_grid(layout::column_count(self.session.tiles().len()));
        for tile in self.session.tiles() {
            self.renderer.render_tile(tile.id(), tile.face());
        }
        self.renderer.update_score(self.session.score());
    }

    fn render(&mut self, id: TileId) {
        if let Some(tile) = self.session.tile(id) {
            self.renderer.render_tile(id, tile.face());
        }
    }

    /// The underlying session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The score store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The flip-back scheduler.
    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }

    /// Mutable access to the scheduler.
    pub fn scheduler_mut(&mut self) -> &mut T {
        &mut self.scheduler
    }

    /// Board size chosen for the current (or last) round.
    pub fn board_size(&self) -> Option<BoardSize> {
        self.board_size
    }
}

fn store_error<E: std::error::Error>(err: E) -> GameError {
    GameError::Store {
        message: err.to_string(),
    }
}
