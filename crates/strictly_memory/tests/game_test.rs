//! Tests for the game driver and its collaborators.

use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use strictly_memory::{
    BoardRenderer, BoardSize, ClickOutcome, FlipBack, FlipScheduler, GameError, MemoryGame,
    MemoryScoreStore, NEW_BEST_MESSAGE, RoundSummary, ScoreStore, SessionError, TileFace, TileId,
};

/// Renderer that remembers what it was told.
#[derive(Debug, Default)]
struct RecordingRenderer {
    tiles: HashMap<TileId, TileFace>,
    columns: Option<usize>,
    score: Option<u32>,
    summary: Option<RoundSummary>,
    clears: usize,
}

impl BoardRenderer for RecordingRenderer {
    fn render_tile(&mut self, tile: TileId, face: TileFace) {
        self.tiles.insert(tile, face);
    }

    fn remove_all_tiles(&mut self) {
        self.tiles.clear();
        self.summary = None;
        self.clears += 1;
    }

    fn layout_grid(&mut self, columns: usize) {
        self.columns = Some(columns);
    }

    fn update_score(&mut self, score: u32) {
        self.score = Some(score);
    }

    fn show_summary(&mut self, summary: &RoundSummary) {
        self.summary = Some(*summary);
    }
}

/// Scheduler that holds flip-backs until the test fires them.
#[derive(Debug, Default)]
struct ManualScheduler {
    pending: Vec<FlipBack>,
    cancelled: usize,
}

impl FlipScheduler for ManualScheduler {
    fn schedule(&mut self, flip: FlipBack) {
        self.pending.push(flip);
    }

    fn cancel_all(&mut self) {
        self.cancelled += self.pending.len();
        self.pending.clear();
    }
}

/// Store whose writes always fail.
#[derive(Debug, Default)]
struct FailingStore;

impl ScoreStore for FailingStore {
    type Error = std::io::Error;

    fn best_score(&self, _board_size: BoardSize) -> Result<Option<u32>, Self::Error> {
        Ok(None)
    }

    fn set_best_score(&mut self, _board_size: BoardSize, _score: u32) -> Result<(), Self::Error> {
        Err(std::io::Error::other("disk full"))
    }
}

type TestGame<S = MemoryScoreStore> = MemoryGame<RecordingRenderer, S, ManualScheduler>;

fn new_game<S: ScoreStore>(store: S) -> TestGame<S> {
    MemoryGame::new(
        RecordingRenderer::default(),
        store,
        ManualScheduler::default(),
        StdRng::seed_from_u64(42),
    )
}

/// Groups tile ids by color so tests can pick matches and mismatches.
fn pairs<S: ScoreStore>(game: &TestGame<S>) -> Vec<[TileId; 2]> {
    let mut by_color: HashMap<_, Vec<TileId>> = HashMap::new();
    for tile in game.session().tiles() {
        by_color.entry(tile.color()).or_default().push(tile.id());
    }
    let mut pairs: Vec<[TileId; 2]> = by_color.into_values().map(|ids| [ids[0], ids[1]]).collect();
    pairs.sort();
    pairs
}

fn solve(game: &mut TestGame) {
    for [a, b] in pairs(game) {
        game.click(a).expect("Click failed");
        game.click(b).expect("Click failed");
    }
}

#[test]
fn test_start_lays_out_hidden_board() {
    let mut game = new_game(MemoryScoreStore::new());
    game.start(12).expect("Valid size");

    let renderer = game.renderer();
    assert_eq!(renderer.columns, Some(4));
    assert_eq!(renderer.tiles.len(), 12);
    assert!(renderer.tiles.values().all(|face| *face == TileFace::Hidden));
    assert_eq!(renderer.score, Some(0));
}

#[test]
fn test_start_rejects_invalid_size() {
    let mut game = new_game(MemoryScoreStore::new());
    assert_eq!(
        game.start(7),
        Err(GameError::Session(SessionError::InvalidConfiguration { tiles: 7 }))
    );
    assert_eq!(game.renderer().clears, 0);
    assert_eq!(game.board_size(), None);
}

#[test]
fn test_replay_requires_a_previous_round() {
    let mut game = new_game(MemoryScoreStore::new());
    assert_eq!(game.replay(), Err(GameError::NotStarted));
}

#[test]
fn test_mismatch_schedules_flip_back() {
    let mut game = new_game(MemoryScoreStore::new());
    game.start(8).expect("Valid size");
    let pairs = pairs(&game);
    let (a, b) = (pairs[0][0], pairs[1][0]);

    game.click(a).expect("Click failed");
    let outcome = game.click(b).expect("Click failed");
    assert!(matches!(outcome, ClickOutcome::Mismatch(_)));
    assert!(matches!(game.renderer().tiles[&b], TileFace::Revealed(_)));
    assert_eq!(game.renderer().score, Some(2));

    let flip = game.scheduler_pending().pop().expect("Flip-back scheduled");
    game.flip_back(flip);
    assert_eq!(game.renderer().tiles[&a], TileFace::Hidden);
    assert_eq!(game.renderer().tiles[&b], TileFace::Hidden);
    assert!(game.session().selection().is_empty());
}

#[test]
fn test_match_renders_both_tiles_matched() {
    let mut game = new_game(MemoryScoreStore::new());
    game.start(8).expect("Valid size");
    let [a, b] = pairs(&game)[0];

    game.click(a).expect("Click failed");
    game.click(b).expect("Click failed");
    assert!(matches!(game.renderer().tiles[&a], TileFace::Matched(_)));
    assert!(matches!(game.renderer().tiles[&b], TileFace::Matched(_)));
    assert!(game.scheduler_pending().is_empty());
}

#[test]
fn test_completion_records_new_best() {
    let size = BoardSize::new(8).expect("Valid size");
    let mut store = MemoryScoreStore::new();
    store.set_best_score(size, 10).expect("Infallible");

    let mut game = new_game(store);
    game.start(8).expect("Valid size");
    solve(&mut game);

    let summary = game.renderer().summary.expect("Summary shown");
    assert_eq!(*summary.score(), 8);
    assert_eq!(summary.message(), NEW_BEST_MESSAGE);
    assert_eq!(game.store().best_score(size), Ok(Some(8)));
    assert_eq!(game.best_score(), Ok(Some(8)));
}

#[test]
fn test_completion_keeps_better_best() {
    let size = BoardSize::new(8).expect("Valid size");
    let mut store = MemoryScoreStore::new();
    store.set_best_score(size, 6).expect("Infallible");

    let mut game = new_game(store);
    game.start(8).expect("Valid size");
    solve(&mut game);

    let summary = game.renderer().summary.expect("Summary shown");
    assert!(!*summary.new_best());
    assert_eq!(summary.message(), "");
    assert_eq!(game.store().best_score(size), Ok(Some(6)));
}

#[test]
fn test_store_failure_still_finishes_board() {
    let mut game = new_game(FailingStore);
    game.start(8).expect("Valid size");
    let mut pairs = pairs(&game);
    let [a, b] = pairs.pop().expect("Has pairs");

    for [x, y] in pairs {
        game.click(x).expect("Click failed");
        game.click(y).expect("Click failed");
    }
    game.click(a).expect("Click failed");

    let err = game.click(b).expect_err("Store should fail");
    assert!(matches!(err, GameError::Store { .. }));
    assert_eq!(err.to_string(), "Score store failed: disk full");

    assert!(matches!(game.renderer().tiles[&a], TileFace::Matched(_)));
    assert!(matches!(game.renderer().tiles[&b], TileFace::Matched(_)));
    assert_eq!(game.renderer().score, Some(8));
    assert!(game.session().is_complete());
    assert!(game.renderer().summary.is_none());
}

#[test]
fn test_replay_cancels_pending_flip_backs() {
    let mut game = new_game(MemoryScoreStore::new());
    game.start(8).expect("Valid size");
    let pairs = pairs(&game);

    game.click(pairs[0][0]).expect("Click failed");
    game.click(pairs[1][0]).expect("Click failed");
    assert_eq!(game.scheduler_pending().len(), 1);

    game.replay().expect("Replay");
    assert!(game.scheduler_pending().is_empty());
    assert_eq!(game.scheduler_cancelled(), 1);
    assert_eq!(game.session().score(), 0);
    assert!(game.renderer().summary.is_none());
    assert_eq!(game.renderer().tiles.len(), 8);
}

/// Test-only access to the scheduler state.
trait SchedulerAccess {
    fn scheduler_pending(&mut self) -> &mut Vec<FlipBack>;
    fn scheduler_cancelled(&self) -> usize;
}

impl SchedulerAccess for TestGame {
    fn scheduler_pending(&mut self) -> &mut Vec<FlipBack> {
        &mut self.scheduler_mut().pending
    }

    fn scheduler_cancelled(&self) -> usize {
        self.scheduler().cancelled
    }
}
