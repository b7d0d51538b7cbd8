//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the whole falling-block engine: piece shapes and rotation,
//! the board with collision and line clearing, and the game state that ties
//! them together. It performs no I/O and owns no timers or threads, so it
//! runs unchanged under a terminal driver, a GUI, or a headless test.
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven tetromino shapes and the in-place rotation transform
//! - [`board`]: occupancy grid, placement predicate, locking, row clearing
//! - [`game_state`]: active piece lifecycle, scoring, game over and restart
//! - [`rng`]: seedable piece sources (uniform random or scripted)
//! - [`snapshot`]: render-ready view of the current state
//! - [`config`]: board size, seed and restart policy
//! - [`error`]: precondition violations
//!
//! # Game Rules
//!
//! - Pieces spawn at (`columns / 2`, 0) and each kind is drawn uniformly at random
//! - Rotation maps every offset `(x, y)` to `(y, -x)`; a colliding rotation is undone
//! - A piece that cannot move down locks; every completed row is removed and scores one point
//! - A blocked spawn ends the game; by default a new game starts right away
//!
//! # Example
//!
//! ```
//! use tetris_engine_core::{EngineConfig, GameState};
//! use tetris_engine_types::GameAction;
//!
//! let mut game = GameState::new(EngineConfig::default().with_seed(12345)).unwrap();
//! game.start_new_game();
//!
//! game.apply_action(GameAction::MoveLeft).unwrap();
//! game.apply_action(GameAction::Rotate).unwrap();
//! while game.tick().unwrap() {}
//!
//! assert_eq!(game.board().occupied_count(), 4);
//! assert_eq!(game.score(), 0);
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod snapshot;

pub use tetris_engine_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{EngineConfig, RestartPolicy, MAX_DIMENSION};
pub use error::EngineError;
pub use game_state::{EngineStatus, GameOverHook, GameOverReport, GameState, LockEvent};
pub use pieces::{new_piece, spawn_position, spawn_shape, Tetromino};
pub use rng::{PieceSource, ScriptedSource, SimpleRng, UniformSource};
pub use snapshot::{ActiveSnapshot, GameSnapshot, LockedCell};
