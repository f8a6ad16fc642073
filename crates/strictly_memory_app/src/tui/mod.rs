//! Terminal UI for Strictly Memory

mod app;
mod board;
mod grid;
mod input;
mod ui;

pub use app::{App, Screen};
pub use board::TerminalBoard;
pub use grid::{BoardGeometry, board_grid_area};
pub use input::move_cursor;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use strictly_memory::{FlipBack, MemoryGame};
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use crate::config::GameConfig;
use crate::db::ScoreRepository;
use crate::timer::FlipBackTimers;

/// Game wired to the terminal, SQLite and tokio timers.
pub type TerminalGame = MemoryGame<TerminalBoard, ScoreRepository, FlipBackTimers>;

/// How long the loop waits for a flip-back before checking the keyboard.
const TICK: Duration = Duration::from_millis(50);

/// Run the TUI
pub async fn run_tui(config: GameConfig) -> Result<()> {
    // Log to a file so output does not tear the screen
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(?config, "Starting Strictly Memory TUI");

    let store = ScoreRepository::open(config.database_path().clone())?;
    let rng = match config.seed() {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_os_rng(),
    };
    let (timers, mut flip_rx) = FlipBackTimers::new(config.flip_back_delay());
    let mut game = MemoryGame::new(TerminalBoard::new(), store, timers, rng);

    let mut app = App::new();
    if let Some(tiles) = config.tiles() {
        app.begin(&mut game, *tiles);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, &mut app, &mut game, &mut flip_rx).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!("Strictly Memory TUI exited");
    res
}

/// Draws, then waits for either a flip-back or the next tick, then drains
/// pending key and mouse events. Everything runs on this task, so the game never
/// sees two events at once.
#[instrument(skip_all)]
async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    game: &mut TerminalGame,
    flip_rx: &mut mpsc::UnboundedReceiver<FlipBack>,
) -> Result<()> {
    while !app.should_quit() {
        let screen = terminal.draw(|f| ui::draw(f, app, game.renderer()))?.area;

        tokio::select! {
            Some(flip) = flip_rx.recv() => {
                debug!(?flip, "Flip-back delivered");
                game.flip_back(flip);
            }
            _ = tokio::time::sleep(TICK) => {}
        }

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => app.handle_key(key, game),
                Event::Mouse(mouse) => app.handle_mouse(mouse, screen, game),
                _ => {}
            }
        }
    }

    info!("User quit");
    Ok(())
}
