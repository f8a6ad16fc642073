//! Application state and key handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use strictly_memory::{
    BoardSize, ClickOutcome, FlipScheduler, IgnoreReason, MemoryGame, ScoreStore, TileId,
};
use tracing::{debug, info, instrument, warn};

use super::board::TerminalBoard;
use super::grid::{BoardGeometry, board_grid_area};
use super::input::move_cursor;

/// Longest board size input accepted, in digits.
const MAX_INPUT_DIGITS: usize = 3;

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Screen {
    /// Asking for a board size.
    Start,
    /// A board is on screen.
    Playing,
}

/// Main application state.
///
/// Holds only what the game does not: the screen, the cursor and the text
/// shown to the player.
#[derive(Debug)]
pub struct App {
    screen: Screen,
    tiles_input: String,
    cursor: usize,
    status_message: String,
    best_score: Option<u32>,
    should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates an application on the start screen.
    pub fn new() -> Self {
        Self {
            screen: Screen::Start,
            tiles_input: String::new(),
            cursor: 0,
            status_message: start_prompt(),
            best_score: None,
            should_quit: false,
        }
    }

    /// Current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Board size typed so far.
    pub fn tiles_input(&self) -> &str {
        &self.tiles_input
    }

    /// Index of the highlighted tile.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Best score for the board on screen, as of the last lookup.
    pub fn best_score(&self) -> Option<u32> {
        self.best_score
    }

    /// True once the player asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Starts a round of `tiles` tiles and switches to the board.
    ///
    /// An invalid size keeps the start screen up and explains why.
    #[instrument(skip(self, game))]
    pub fn begin<S, T>(&mut self, game: &mut MemoryGame<TerminalBoard, S, T>, tiles: usize)
    where
        S: ScoreStore,
        T: FlipScheduler,
    {
        match game.start(tiles) {
            Ok(()) => {
                self.enter_board(game);
                info!(tiles, "Board shown");
            }
            Err(e) => {
                warn!(error = %e, tiles, "Rejected board size");
                self.screen = Screen::Start;
                self.status_message = format!("{}. {}", e, start_prompt());
            }
        }
    }

    /// Handles a key press.
    #[instrument(skip(self, key, game), fields(screen = %self.screen, key = ?key.code))]
    pub fn handle_key<S, T>(&mut self, key: KeyEvent, game: &mut MemoryGame<TerminalBoard, S, T>)
    where
        S: ScoreStore,
        T: FlipScheduler,
    {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Start => self.handle_start_key(key.code, game),
            Screen::Playing => self.handle_board_key(key.code, game),
        }
    }

    /// Handles a mouse event on a screen of size `screen`.
    ///
    /// A left click on a drawn tile moves the cursor there and reveals it.
    #[instrument(skip(self, mouse, game), fields(x = mouse.column, y = mouse.row))]
    pub fn handle_mouse<S, T>(
        &mut self,
        mouse: MouseEvent,
        screen: Rect,
        game: &mut MemoryGame<TerminalBoard, S, T>,
    ) where
        S: ScoreStore,
        T: FlipScheduler,
    {
        if self.screen != Screen::Playing || mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }

        let board = game.renderer();
        let geometry = BoardGeometry::new(
            board_grid_area(screen),
            *board.columns(),
            board.tiles().len(),
            self.cursor,
        );
        let Some(index) = geometry.and_then(|g| g.tile_at(mouse.column, mouse.row)) else {
            debug!("Click outside the grid");
            return;
        };

        self.cursor = index;
        self.reveal(game);
    }

    fn handle_start_key<S, T>(&mut self, code: KeyCode, game: &mut MemoryGame<TerminalBoard, S, T>)
    where
        S: ScoreStore,
        T: FlipScheduler,
    {
        match code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.tiles_input.len() < MAX_INPUT_DIGITS {
                    self.tiles_input.push(c);
                }
            }
            KeyCode::Backspace => {
                self.tiles_input.pop();
            }
            KeyCode::Enter => match self.tiles_input.parse::<usize>() {
                Ok(tiles) => self.begin(game, tiles),
                Err(_) => self.status_message = format!("Enter a number. {}", start_prompt()),
            },
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_board_key<S, T>(&mut self, code: KeyCode, game: &mut MemoryGame<TerminalBoard, S, T>)
    where
        S: ScoreStore,
        T: FlipScheduler,
    {
        match code {
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
                let board = game.renderer();
                self.cursor = move_cursor(self.cursor, code, *board.columns(), board.tiles().len());
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.reveal(game),
            KeyCode::Char('r') => match game.replay() {
                Ok(()) => self.enter_board(game),
                Err(e) => self.status_message = e.to_string(),
            },
            KeyCode::Char('n') => {
                debug!("Back to start screen");
                self.screen = Screen::Start;
                self.tiles_input = game
                    .board_size()
                    .map(|size| size.tiles().to_string())
                    .unwrap_or_default();
                self.status_message = start_prompt();
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn reveal<S, T>(&mut self, game: &mut MemoryGame<TerminalBoard, S, T>)
    where
        S: ScoreStore,
        T: FlipScheduler,
    {
        let outcome = match game.click(TileId::new(self.cursor)) {
            Ok(outcome) => outcome,
            Err(e) => {
                // The board is already up to date; only the score failed to save.
                warn!(error = %e, "Round finished but score not saved");
                self.status_message = format!("{}. Press r to play again.", e);
                return;
            }
        };

        self.status_message = match outcome {
            ClickOutcome::Ignored(reason) => ignored_message(reason).to_string(),
            ClickOutcome::Revealed(_) => "Now find its partner.".to_string(),
            ClickOutcome::Matched { complete: false, .. } => "Match!".to_string(),
            ClickOutcome::Matched { complete: true, .. } => {
                self.best_score = game.renderer().summary().as_ref().map(|summary| summary.best());
                "Play again? Press r for the same board or n for a new size.".to_string()
            }
            ClickOutcome::Mismatch(_) => "No match.".to_string(),
        };
    }

    fn enter_board<S, T>(&mut self, game: &MemoryGame<TerminalBoard, S, T>)
    where
        S: ScoreStore,
        T: FlipScheduler,
    {
        self.screen = Screen::Playing;
        self.cursor = 0;
        self.best_score = match game.best_score() {
            Ok(best) => best,
            Err(e) => {
                warn!(error = %e, "Could not read best score");
                None
            }
        };
        self.status_message = "Pick a tile. Click it, or move with arrows and press Enter.".to_string();
    }
}

fn start_prompt() -> String {
    format!(
        "Type an even number of tiles ({}-{}) and press Enter.",
        BoardSize::MIN,
        BoardSize::MAX
    )
}

fn ignored_message(reason: IgnoreReason) -> &'static str {
    match reason {
        IgnoreReason::NotInProgress => "Round over. Press r to play again.",
        IgnoreReason::UnknownTile => "",
        IgnoreReason::AlreadySelected => "That tile is already face up.",
        IgnoreReason::AlreadyMatched => "That pair is already found.",
        IgnoreReason::SelectionFull => "Wait for the tiles to flip back.",
    }
}

