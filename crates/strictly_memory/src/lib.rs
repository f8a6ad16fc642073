//! Strictly Memory - pair-matching game logic.
//!
//! A board of face-down tiles hides pairs of colors. The player turns tiles
//! over two at a time; matching pairs stay up, mismatches flip back after a
//! delay. Every reveal costs one point and the lowest score per board size is
//! kept as the best.
//!
//! # Architecture
//!
//! - **Session**: [`GameSession`], the state machine for one round at a time
//! - **Game**: [`MemoryGame`], wiring a session to its collaborators
//! - **Seams**: [`BoardRenderer`], [`ScoreStore`] and [`FlipScheduler`]
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use strictly_memory::{ClickOutcome, GameSession, TileId};
//!
//! let mut session = GameSession::new();
//! session.initialize(16, &mut StdRng::seed_from_u64(1))?;
//! assert!(matches!(
//!     session.handle_tile_click(TileId::new(0)),
//!     ClickOutcome::Revealed(_)
//! ));
//! assert_eq!(session.score(), 1);
//! # Ok::<(), strictly_memory::SessionError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board_size;
pub mod color;
mod error;
mod game;
pub mod layout;
mod score;
mod selection;
mod session;
mod tile;
mod traits;

pub use board_size::BoardSize;
pub use color::Color;
pub use error::{GameError, SessionError};
pub use game::MemoryGame;
pub use layout::column_count;
pub use score::{MemoryScoreStore, NEW_BEST_MESSAGE, RoundSummary, ScoreStore, record_round};
pub use selection::Selection;
pub use session::{ClickOutcome, FlipBack, GameSession, IgnoreReason, Phase, RoundId};
pub use tile::{Tile, TileFace, TileId, TileState};
pub use traits::{BoardRenderer, FlipScheduler};
