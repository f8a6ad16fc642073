//! Strictly Memory app - terminal front end and persistence
//!
//! Wires the game logic in `strictly_memory` to a ratatui board, a SQLite
//! best score table and tokio flip-back timers.
//!
//! # Architecture
//!
//! - **Config**: [`GameConfig`] from TOML, environment and command line
//! - **Database**: [`ScoreRepository`], best scores per board size
//! - **Timers**: [`FlipBackTimers`], delayed flip-backs on a channel
//! - **TUI**: [`run_tui`], the interactive board
//!
//! # Example
//!
//! ```no_run
//! use strictly_memory::{BoardSize, ScoreStore};
//! use strictly_memory_app::ScoreRepository;
//!
//! # fn example() -> anyhow::Result<()> {
//! let repo = ScoreRepository::open("strictly_memory.db".to_string())?;
//! let best = repo.best_score(BoardSize::new(16)?)?;
//! println!("Best for 16 tiles: {:?}", best);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod db;
mod timer;
mod tui;

// Crate-level exports - Configuration
pub use config::{ConfigError, DATABASE_ENV, DEFAULT_CONFIG_FILE, GameConfig};

// Crate-level exports - Persistence
pub use db::{BestScore, DbError, NewBestScore, ScoreRepository};

// Crate-level exports - Timers
pub use timer::FlipBackTimers;

// Crate-level exports - Terminal UI
pub use tui::{
    App, BoardGeometry, Screen, TerminalBoard, TerminalGame, board_grid_area, move_cursor, run_tui,
};
