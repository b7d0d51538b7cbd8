//! Game state module - the active-piece lifecycle
//!
//! Owns the board, the falling piece, the piece source and the score. Every
//! command runs to completion: a failed descent locks the piece, clears rows,
//! scores them and spawns the next piece in one call, so the transient
//! "locking" phase is never observable from outside.
//!
//! The engine has no timers. A driver calls [`GameState::tick`] on its own
//! cadence (500ms by default) and forwards input as commands.

use std::fmt;

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::board::Board;
use crate::config::{EngineConfig, RestartPolicy};
use crate::error::EngineError;
use crate::pieces::{spawn_position, Tetromino};
use crate::rng::{PieceSource, UniformSource};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, LockedCell};
use crate::types::{GameAction, PieceKind};

/// Externally visible engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EngineStatus {
    /// No game started yet
    Idle,
    /// A piece is falling and commands are accepted
    Active,
    /// The last spawn was blocked; only reachable with [`RestartPolicy::Manual`]
    GameOver,
}

/// Emitted after every lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockEvent {
    pub kind: PieceKind,
    /// Cleared row indices as found scanning top to bottom.
    ///
    /// A piece spans at most four rows, so at most four rows complete per lock.
    pub cleared_rows: ArrayVec<u16, 4>,
    pub lines_cleared: u32,
    /// The next spawn was blocked and the game ended
    pub game_over: bool,
}

/// Delivered to the game-over hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GameOverReport {
    /// 1-based number of the game that just ended
    pub game: u32,
    pub score: u32,
    pub lines: u32,
    pub pieces: u32,
}

pub type GameOverHook = Box<dyn FnMut(&GameOverReport) + Send>;

/// Complete game session
pub struct GameState {
    config: EngineConfig,
    board: Board,
    active: Option<Tetromino>,
    source: Box<dyn PieceSource + Send>,
    status: EngineStatus,
    score: u32,
    lines: u32,
    pieces_spawned: u32,
    games_played: u32,
    last_event: Option<LockEvent>,
    game_over_hook: Option<GameOverHook>,
}

impl GameState {
    /// Create an idle engine drawing pieces uniformly from `config.seed`
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Self::with_source(config, UniformSource::new(config.seed))
    }

    /// Create an idle engine with an injected piece source
    pub fn with_source(
        config: EngineConfig,
        source: impl PieceSource + Send + 'static,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let board = Board::new(config.columns, config.rows)?;

        Ok(Self {
            config,
            board,
            active: None,
            source: Box::new(source),
            status: EngineStatus::Idle,
            score: 0,
            lines: 0,
            pieces_spawned: 0,
            games_played: 0,
            last_event: None,
            game_over_hook: None,
        })
    }

    /// Register the callback fired once per game over, before any automatic restart
    pub fn set_game_over_hook(&mut self, hook: impl FnMut(&GameOverReport) + Send + 'static) {
        self.game_over_hook = Some(Box::new(hook));
    }

    pub fn clear_game_over_hook(&mut self) {
        self.game_over_hook = None;
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status == EngineStatus::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Rows cleared in the current game
    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Pieces spawned in the current game, including a blocked final spawn
    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Reset board and score and spawn the first piece.
    pub fn start_new_game(&mut self) {
        self.board.reset();
        self.score = 0;
        self.lines = 0;
        self.pieces_spawned = 0;
        self.games_played = self.games_played.wrapping_add(1);
        self.last_event = None;
        self.status = EngineStatus::Active;

        // Configuration validation guarantees every kind fits on an empty board.
        let spawned = self.spawn_piece();
        debug_assert!(spawned, "spawn blocked on an empty board");
    }

    /// Draw the next kind and place it at the spawn position.
    ///
    /// Returns false (and leaves no active piece) when the spawn cells are taken.
    fn spawn_piece(&mut self) -> bool {
        let kind = self.source.next_kind();
        let (x, y) = spawn_position(self.config.columns);
        let piece = Tetromino::new(kind, x, y);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);

        if self.board.can_place(&piece, 0, 0) {
            self.active = Some(piece);
            true
        } else {
            self.active = None;
            false
        }
    }

    fn ensure_playable(&self) -> Result<Tetromino, EngineError> {
        match self.status {
            EngineStatus::Idle => Err(EngineError::NotStarted),
            EngineStatus::GameOver => Err(EngineError::AwaitingRestart),
            EngineStatus::Active => self.active.ok_or(EngineError::NotStarted),
        }
    }

    /// Shift the active piece by (`dx`, `dy`) if the target is free.
    pub fn try_move(&mut self, dx: i32, dy: i32) -> Result<bool, EngineError> {
        let mut piece = self.ensure_playable()?;

        if !self.board.can_place(&piece, dx, dy) {
            return Ok(false);
        }

        piece.translate(dx, dy);
        self.active = Some(piece);
        Ok(true)
    }

    pub fn move_left(&mut self) -> Result<bool, EngineError> {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> Result<bool, EngineError> {
        self.try_move(1, 0)
    }

    /// Descend one row, or lock the piece when it cannot.
    ///
    /// Returns true if the piece moved, false if it locked.
    pub fn move_down(&mut self) -> Result<bool, EngineError> {
        if self.try_move(0, 1)? {
            return Ok(true);
        }
        self.lock_active();
        Ok(false)
    }

    /// Timer entry point; same as [`GameState::move_down`]
    pub fn tick(&mut self) -> Result<bool, EngineError> {
        self.move_down()
    }

    /// Rotate the active piece, restoring it unchanged if the result collides.
    pub fn rotate(&mut self) -> Result<bool, EngineError> {
        let before = self.ensure_playable()?;
        let mut rotated = before;
        rotated.rotate();

        if self.board.can_place(&rotated, 0, 0) {
            self.active = Some(rotated);
            Ok(true)
        } else {
            self.active = Some(before);
            Ok(false)
        }
    }

    /// Lock, clear, score and spawn as one unit.
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        self.board.lock_piece(&piece);

        let full_rows: Vec<usize> = self.board.full_rows().collect();
        debug_assert!(
            full_rows.len() <= 4,
            "a single lock completed {} rows",
            full_rows.len()
        );
        let cleared_rows: ArrayVec<u16, 4> = full_rows.iter().map(|&y| y as u16).collect();
        let lines_cleared = self.board.clear_completed_rows() as u32;
        self.score = self.score.saturating_add(lines_cleared);
        self.lines = self.lines.saturating_add(lines_cleared);

        let game_over = !self.spawn_piece();
        let event = LockEvent {
            kind: piece.kind,
            cleared_rows,
            lines_cleared,
            game_over,
        };

        if game_over {
            self.finish_game();
        }

        // Set after a possible restart so the final lock stays observable.
        self.last_event = Some(event);
    }

    fn finish_game(&mut self) {
        self.status = EngineStatus::GameOver;

        let report = GameOverReport {
            game: self.games_played,
            score: self.score,
            lines: self.lines,
            pieces: self.pieces_spawned,
        };
        if let Some(hook) = self.game_over_hook.as_mut() {
            hook(&report);
        }

        if self.config.restart == RestartPolicy::Immediate {
            self.start_new_game();
        }
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> Result<bool, EngineError> {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::MoveDown => self.move_down(),
            GameAction::Rotate => self.rotate(),
            GameAction::Restart => {
                self.start_new_game();
                Ok(true)
            }
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            columns: self.board.columns(),
            rows: self.board.rows(),
            status: self.status,
            score: self.score,
            lines: self.lines,
            game: self.games_played,
            active: self.active.map(ActiveSnapshot::from),
            locked: self
                .board
                .locked_cells()
                .map(|(x, y, kind)| LockedCell {
                    x,
                    y,
                    kind,
                    color: kind.color(),
                })
                .collect(),
        }
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("config", &self.config)
            .field("status", &self.status)
            .field("active", &self.active)
            .field("score", &self.score)
            .field("lines", &self.lines)
            .field("pieces_spawned", &self.pieces_spawned)
            .field("games_played", &self.games_played)
            .field("source", &self.source)
            .field("has_game_over_hook", &self.game_over_hook.is_some())
            .finish_non_exhaustive()
    }
}
