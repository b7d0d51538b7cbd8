//! Engine configuration

use crate::error::EngineError;
use crate::pieces::{spawn_position, spawn_shape};
use crate::types::{PieceKind, DEFAULT_COLUMNS, DEFAULT_ROWS};

/// Upper bound for either board dimension.
pub const MAX_DIMENSION: u16 = 1024;

/// What happens after a freshly spawned piece cannot be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestartPolicy {
    /// Fire the game-over hook, then start a new game in the same call.
    #[default]
    Immediate,
    /// Fire the game-over hook and stay in `GameOver` until `start_new_game`.
    Manual,
}

impl RestartPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "immediate" | "auto" => Some(RestartPolicy::Immediate),
            "manual" | "wait" => Some(RestartPolicy::Manual),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub columns: u16,
    pub rows: u16,
    /// Seed for the default uniform piece source
    pub seed: u32,
    pub restart: RestartPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            seed: 1,
            restart: RestartPolicy::Immediate,
        }
    }
}

impl EngineConfig {
    pub fn with_size(mut self, columns: u16, rows: u16) -> Self {
        self.columns = columns;
        self.rows = rows;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_restart(mut self, restart: RestartPolicy) -> Self {
        self.restart = restart;
        self
    }

    /// Reject dimensions on which some piece kind could not spawn on an empty board.
    ///
    /// An unplaceable spawn on a fresh board would end every game immediately,
    /// and under [`RestartPolicy::Immediate`] restart forever.
    pub fn validate(&self) -> Result<(), EngineError> {
        let invalid = EngineError::InvalidDimensions {
            columns: self.columns,
            rows: self.rows,
        };

        if self.columns == 0 || self.rows == 0 {
            return Err(invalid);
        }
        if self.columns > MAX_DIMENSION || self.rows > MAX_DIMENSION {
            return Err(invalid);
        }

        let (spawn_x, spawn_y) = spawn_position(self.columns);
        let fits = PieceKind::ALL.iter().all(|&kind| {
            spawn_shape(kind).iter().all(|&(dx, dy)| {
                let x = spawn_x + dx;
                let y = spawn_y + dy;
                x >= 0 && x < self.columns as i32 && y >= 0 && y < self.rows as i32
            })
        });

        if fits {
            Ok(())
        } else {
            Err(invalid)
        }
    }
}
