//! Tests for keyboard and mouse handling on the start screen and the board.

use std::collections::HashMap;

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::layout::Rect;
use strictly_memory::{
    BoardSize, FlipBack, FlipScheduler, MemoryGame, MemoryScoreStore, ScoreStore, TileFace,
    TileId,
};
use strictly_memory_app::{App, BoardGeometry, Screen, TerminalBoard, board_grid_area};

/// Scheduler that keeps flip-backs until the test applies them.
#[derive(Debug, Default)]
struct HeldFlips(Vec<FlipBack>);

impl FlipScheduler for HeldFlips {
    fn schedule(&mut self, flip: FlipBack) {
        self.0.push(flip);
    }

    fn cancel_all(&mut self) {
        self.0.clear();
    }
}

/// Store whose writes always fail.
#[derive(Debug, Default)]
struct ReadOnlyStore;

impl ScoreStore for ReadOnlyStore {
    type Error = std::io::Error;

    fn best_score(&self, _board_size: BoardSize) -> Result<Option<u32>, Self::Error> {
        Ok(None)
    }

    fn set_best_score(&mut self, _board_size: BoardSize, _score: u32) -> Result<(), Self::Error> {
        Err(std::io::Error::other("disk full"))
    }
}

type KeyGame<S = MemoryScoreStore> = MemoryGame<TerminalBoard, S, HeldFlips>;

const SCREEN: Rect = Rect::new(0, 0, 80, 24);

fn new_game<S: ScoreStore>(store: S) -> KeyGame<S> {
    MemoryGame::new(
        TerminalBoard::new(),
        store,
        HeldFlips::default(),
        StdRng::seed_from_u64(9),
    )
}

fn press<S: ScoreStore>(app: &mut App, game: &mut KeyGame<S>, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), game);
}

fn type_text<S: ScoreStore>(app: &mut App, game: &mut KeyGame<S>, text: &str) {
    for c in text.chars() {
        press(app, game, KeyCode::Char(c));
    }
}

fn started(tiles: &str) -> (App, KeyGame) {
    let mut app = App::new();
    let mut game = new_game(MemoryScoreStore::new());
    type_text(&mut app, &mut game, tiles);
    press(&mut app, &mut game, KeyCode::Enter);
    (app, game)
}

/// Walks the cursor to `index` using only arrow keys.
fn go_to<S: ScoreStore>(app: &mut App, game: &mut KeyGame<S>, index: usize) {
    let columns = *game.renderer().columns();
    for _ in 0..game.renderer().rows() {
        press(app, game, KeyCode::Up);
    }
    for _ in 0..columns {
        press(app, game, KeyCode::Left);
    }
    for _ in 0..index / columns {
        press(app, game, KeyCode::Down);
    }
    for _ in 0..index % columns {
        press(app, game, KeyCode::Right);
    }
    assert_eq!(app.cursor(), index);
}

fn reveal<S: ScoreStore>(app: &mut App, game: &mut KeyGame<S>, tile: TileId) {
    go_to(app, game, tile.index());
    press(app, game, KeyCode::Enter);
}

fn pairs<S: ScoreStore>(game: &KeyGame<S>) -> Vec<[TileId; 2]> {
    let mut by_color: HashMap<_, Vec<TileId>> = HashMap::new();
    for tile in game.session().tiles() {
        by_color.entry(tile.color()).or_default().push(tile.id());
    }
    by_color.into_values().map(|ids| [ids[0], ids[1]]).collect()
}

#[test]
fn test_typing_a_size_starts_the_board() {
    let (app, game) = started("12");
    assert_eq!(app.screen(), Screen::Playing);
    assert_eq!(game.renderer().tiles().len(), 12);
    assert_eq!(*game.renderer().columns(), 4);
    assert_eq!(app.cursor(), 0);
    assert_eq!(app.best_score(), None);
}

#[test]
fn test_invalid_size_stays_on_start_screen() {
    let (app, game) = started("7");
    assert_eq!(app.screen(), Screen::Start);
    assert_eq!(app.tiles_input(), "7");
    assert!(app.status_message().contains("Invalid configuration"));
    assert!(game.renderer().tiles().is_empty());
}

#[test]
fn test_backspace_edits_input() {
    let mut app = App::new();
    let mut game = new_game(MemoryScoreStore::new());
    type_text(&mut app, &mut game, "168");
    press(&mut app, &mut game, KeyCode::Backspace);
    assert_eq!(app.tiles_input(), "16");

    type_text(&mut app, &mut game, "0000");
    assert_eq!(app.tiles_input(), "160", "Input is capped at three digits");
}

#[test]
fn test_enter_without_digits_asks_for_a_number() {
    let (app, _game) = started("");
    assert_eq!(app.screen(), Screen::Start);
    assert!(app.status_message().starts_with("Enter a number"));
}

#[test]
fn test_arrows_move_cursor() {
    let (mut app, mut game) = started("8");
    press(&mut app, &mut game, KeyCode::Right);
    press(&mut app, &mut game, KeyCode::Down);
    assert_eq!(app.cursor(), 5);
    press(&mut app, &mut game, KeyCode::Down);
    assert_eq!(app.cursor(), 5, "Bottom edge stops the cursor");
}

#[test]
fn test_enter_reveals_tile_under_cursor() {
    let (mut app, mut game) = started("8");
    press(&mut app, &mut game, KeyCode::Right);
    press(&mut app, &mut game, KeyCode::Char(' '));

    assert!(matches!(game.renderer().face(1), Some(TileFace::Revealed(_))));
    assert_eq!(*game.renderer().score(), 1);

    press(&mut app, &mut game, KeyCode::Enter);
    assert_eq!(*game.renderer().score(), 1, "Same tile twice is a no-op");
    assert_eq!(app.status_message(), "That tile is already face up.");
}

#[test]
fn test_solving_by_keys_records_best() {
    let mut store = MemoryScoreStore::new();
    let size = BoardSize::new(8).expect("Valid size");
    store.set_best_score(size, 12).expect("Store failed");

    let mut app = App::new();
    let mut game = new_game(store);
    type_text(&mut app, &mut game, "8");
    press(&mut app, &mut game, KeyCode::Enter);
    assert_eq!(app.best_score(), Some(12));

    for [a, b] in pairs(&game) {
        reveal(&mut app, &mut game, a);
        reveal(&mut app, &mut game, b);
    }

    assert!(game.session().is_complete());
    assert_eq!(app.best_score(), Some(8));
    let summary = game.renderer().summary().as_ref().expect("Summary shown");
    assert!(*summary.new_best());
    assert!(app.status_message().starts_with("Play again?"));
}

#[test]
fn test_failed_score_save_is_reported_in_status() {
    let mut app = App::new();
    let mut game = new_game(ReadOnlyStore);
    type_text(&mut app, &mut game, "8");
    press(&mut app, &mut game, KeyCode::Enter);

    for [a, b] in pairs(&game) {
        reveal(&mut app, &mut game, a);
        reveal(&mut app, &mut game, b);
    }

    assert!(game.session().is_complete());
    assert!(game.renderer().summary().is_none());
    assert_eq!(app.best_score(), None);
    assert!(app.status_message().contains("Score store failed: disk full"));
    assert!(app.status_message().ends_with("Press r to play again."));

    press(&mut app, &mut game, KeyCode::Char('r'));
    assert!(!game.session().is_complete(), "Replay still works");
}

fn left_click(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

#[test]
fn test_click_reveals_tile_under_pointer() {
    let (mut app, mut game) = started("8");
    let board = game.renderer();
    let geometry = BoardGeometry::new(
        board_grid_area(SCREEN),
        *board.columns(),
        board.tiles().len(),
        app.cursor(),
    )
    .expect("Board fits");
    let cell = geometry.cell(5).expect("Tile on screen");

    app.handle_mouse(left_click(cell.x + 1, cell.y + 1), SCREEN, &mut game);
    assert_eq!(app.cursor(), 5);
    assert!(matches!(game.renderer().face(5), Some(TileFace::Revealed(_))));
    assert_eq!(*game.renderer().score(), 1);

    app.handle_mouse(left_click(0, 0), SCREEN, &mut game);
    assert_eq!(app.cursor(), 5, "Title bar is not a tile");
    assert_eq!(*game.renderer().score(), 1);

    let release = MouseEvent {
        kind: MouseEventKind::Up(MouseButton::Left),
        ..left_click(cell.x, cell.y)
    };
    app.handle_mouse(release, SCREEN, &mut game);
    assert_eq!(*game.renderer().score(), 1, "Only presses reveal");
}

#[test]
fn test_click_on_start_screen_is_ignored() {
    let mut app = App::new();
    let mut game = new_game(MemoryScoreStore::new());
    app.handle_mouse(left_click(40, 12), SCREEN, &mut game);
    assert_eq!(app.screen(), Screen::Start);
    assert!(game.renderer().tiles().is_empty());
}

#[test]
fn test_replay_key_starts_fresh_round() {
    let (mut app, mut game) = started("8");
    let round = game.session().round();
    press(&mut app, &mut game, KeyCode::Enter);
    press(&mut app, &mut game, KeyCode::Right);

    press(&mut app, &mut game, KeyCode::Char('r'));
    assert_ne!(game.session().round(), round);
    assert_eq!(app.cursor(), 0);
    assert_eq!(*game.renderer().score(), 0);
    assert!(game.scheduler().0.is_empty());
}

#[test]
fn test_new_size_key_returns_to_start_screen() {
    let (mut app, mut game) = started("10");
    press(&mut app, &mut game, KeyCode::Char('n'));
    assert_eq!(app.screen(), Screen::Start);
    assert_eq!(app.tiles_input(), "10");

    press(&mut app, &mut game, KeyCode::Backspace);
    press(&mut app, &mut game, KeyCode::Backspace);
    type_text(&mut app, &mut game, "20");
    press(&mut app, &mut game, KeyCode::Enter);
    assert_eq!(app.screen(), Screen::Playing);
    assert_eq!(game.renderer().tiles().len(), 20);
    assert_eq!(*game.renderer().columns(), 5);
}

#[test]
fn test_quit_keys() {
    let (mut app, mut game) = started("4");
    assert!(!app.should_quit());
    press(&mut app, &mut game, KeyCode::Char('q'));
    assert!(app.should_quit());

    let mut app = App::new();
    app.handle_key(
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        &mut game,
    );
    assert!(app.should_quit());
}
