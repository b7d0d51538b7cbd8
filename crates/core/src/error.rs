//! Engine error taxonomy.
//!
//! Only precondition violations are errors. A rejected move or a reverted
//! rotation is a normal `Ok(false)` outcome, and a blocked spawn is reported
//! through the game-over hook rather than as an error.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Board dimensions are zero, too large, or too small to spawn every piece kind
    #[error("invalid board dimensions {columns}x{rows}")]
    InvalidDimensions { columns: u16, rows: u16 },

    /// A piece command was issued before `start_new_game`
    #[error("no game in progress; call start_new_game first")]
    NotStarted,

    /// A piece command was issued while a finished game waits for an explicit restart
    #[error("game over; waiting for start_new_game")]
    AwaitingRestart,

    /// A scripted piece source was built from an empty list
    #[error("scripted piece source needs at least one piece kind")]
    EmptyScript,
}
