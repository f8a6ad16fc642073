//! Error types for the memory game.

/// Error raised when a round cannot be set up.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    /// The requested tile count is odd or outside 4..=100.
    #[display(
        "Invalid configuration: {} tiles (need an even count between {} and {})",
        tiles,
        crate::BoardSize::MIN,
        crate::BoardSize::MAX
    )]
    InvalidConfiguration {
        /// The rejected tile count.
        tiles: usize,
    },

    /// A caller-supplied color layout does not form pairs.
    #[display("Invalid layout: {}", reason)]
    InvalidLayout {
        /// Why the layout was rejected.
        reason: String,
    },
}

impl std::error::Error for SessionError {}

/// Error raised by [`MemoryGame`](crate::MemoryGame).
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum GameError {
    /// The round could not be set up.
    #[display("{}", _0)]
    #[from]
    Session(SessionError),

    /// Replay was requested before any round was started.
    #[display("No board size chosen yet; start a round first")]
    NotStarted,

    /// The score store failed.
    #[display("Score store failed: {}", message)]
    Store {
        /// Store error message.
        message: String,
    },
}
