//! Pieces module - tetromino shapes and the fixed rotation transform
//!
//! Each piece carries its own four mino offsets. Rotation rewrites those
//! offsets in place with `(x, y) -> (y, -x)` about the local origin. There is
//! no recentering and no wall kick, so a rotated piece can reach cells above
//! or left of its origin (even the O piece changes footprint). Four rotations
//! always return the original offsets.

use serde::Serialize;

use crate::types::{PieceColor, PieceKind};

/// Offset of a single mino relative to piece origin, as (column, row)
pub type MinoOffset = (i32, i32);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Offsets of a freshly created piece of the given kind
pub fn spawn_shape(kind: PieceKind) -> PieceShape {
    match kind {
        // horizontal bar
        PieceKind::I => [(0, 0), (1, 0), (2, 0), (3, 0)],
        PieceKind::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
        // stem up
        PieceKind::T => [(1, 0), (1, 1), (0, 1), (2, 1)],
        PieceKind::S => [(0, 0), (1, 0), (1, 1), (2, 1)],
        PieceKind::Z => [(0, 1), (1, 1), (1, 0), (2, 0)],
        PieceKind::J => [(0, 0), (1, 0), (1, 1), (1, 2)],
        PieceKind::L => [(2, 0), (1, 0), (1, 1), (1, 2)],
    }
}

/// Spawn origin for a board of the given width: (`columns / 2`, 0)
pub fn spawn_position(columns: u16) -> (i32, i32) {
    ((columns / 2) as i32, 0)
}

/// Rotate a single offset 90° about the local origin
#[inline]
pub fn rotate_offset((x, y): MinoOffset) -> MinoOffset {
    (y, -x)
}

/// A piece: kind, origin in grid coordinates, and its current offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub x: i32,
    pub y: i32,
    offsets: PieceShape,
}

/// Create a piece of `kind` with its origin at (`spawn_x`, `spawn_y`)
pub fn new_piece(kind: PieceKind, spawn_x: i32, spawn_y: i32) -> Tetromino {
    Tetromino::new(kind, spawn_x, spawn_y)
}

impl Tetromino {
    pub fn new(kind: PieceKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            x,
            y,
            offsets: spawn_shape(kind),
        }
    }

    /// Current local offsets (after any rotations)
    pub fn offsets(&self) -> &PieceShape {
        &self.offsets
    }

    pub fn color(&self) -> PieceColor {
        self.kind.color()
    }

    /// Rotate in place. Legality is the caller's concern.
    pub fn rotate(&mut self) {
        for offset in &mut self.offsets {
            *offset = rotate_offset(*offset);
        }
    }

    /// Absolute grid cells of the piece shifted by (`dx`, `dy`)
    pub fn cells_at(&self, dx: i32, dy: i32) -> [(i32, i32); 4] {
        self.offsets
            .map(|(ox, oy)| (self.x + ox + dx, self.y + oy + dy))
    }

    /// Absolute grid cells at the current origin
    pub fn cells(&self) -> [(i32, i32); 4] {
        self.cells_at(0, 0)
    }

    /// Move the origin by (`dx`, `dy`) without any checks
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_piece_sets_origin_and_offsets() {
        let piece = new_piece(PieceKind::T, 5, 0);
        assert_eq!(piece.kind, PieceKind::T);
        assert_eq!((piece.x, piece.y), (5, 0));
        assert_eq!(piece.offsets(), &[(1, 0), (1, 1), (0, 1), (2, 1)]);
    }

    #[test]
    fn test_every_shape_has_four_distinct_offsets() {
        for kind in PieceKind::ALL {
            let shape = spawn_shape(kind);
            for i in 0..4 {
                for j in (i + 1)..4 {
                    assert_ne!(shape[i], shape[j], "{:?} repeats an offset", kind);
                }
            }
        }
    }

    #[test]
    fn test_rotate_offset() {
        assert_eq!(rotate_offset((1, 0)), (0, -1));
        assert_eq!(rotate_offset((0, 1)), (1, 0));
        assert_eq!(rotate_offset((2, 1)), (1, -2));
    }

    #[test]
    fn test_o_rotation_changes_footprint() {
        let mut piece = Tetromino::new(PieceKind::O, 0, 0);
        piece.rotate();
        assert_eq!(piece.offsets(), &[(0, 0), (0, -1), (1, 0), (1, -1)]);
    }

    #[test]
    fn test_four_rotations_are_identity() {
        for kind in PieceKind::ALL {
            let original = Tetromino::new(kind, 3, 7);
            let mut piece = original;
            for _ in 0..4 {
                piece.rotate();
            }
            assert_eq!(piece, original);
        }
    }

    #[test]
    fn test_cells_at_applies_origin_and_shift() {
        let piece = Tetromino::new(PieceKind::I, 2, 5);
        assert_eq!(piece.cells(), [(2, 5), (3, 5), (4, 5), (5, 5)]);
        assert_eq!(piece.cells_at(-1, 1), [(1, 6), (2, 6), (3, 6), (4, 6)]);
    }
}
