use serde::Serialize;

use crate::game_state::EngineStatus;
use crate::pieces::Tetromino;
use crate::types::{PieceColor, PieceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub color: PieceColor,
    pub x: i32,
    pub y: i32,
    /// Absolute grid cells
    pub cells: [(i32, i32); 4],
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            color: value.color(),
            x: value.x,
            y: value.y,
            cells: value.cells(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LockedCell {
    pub x: i32,
    pub y: i32,
    pub kind: PieceKind,
    pub color: PieceColor,
}

/// Everything a renderer needs to redraw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub columns: u16,
    pub rows: u16,
    pub status: EngineStatus,
    pub score: u32,
    pub lines: u32,
    pub game: u32,
    pub active: Option<ActiveSnapshot>,
    /// Locked cells in row-major order
    pub locked: Vec<LockedCell>,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.status == EngineStatus::Active
    }

    /// Kind at (x, y), looking at the active piece first
    pub fn cell_at(&self, x: i32, y: i32) -> Option<PieceKind> {
        if let Some(active) = &self.active {
            if active.cells.contains(&(x, y)) {
                return Some(active.kind);
            }
        }
        self.locked
            .iter()
            .find(|cell| cell.x == x && cell.y == y)
            .map(|cell| cell.kind)
    }
}
