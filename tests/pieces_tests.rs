//! Pieces module tests - shape table and rotation transform

use tetris_engine::core::pieces::{new_piece, rotate_offset, spawn_shape, Tetromino};
use tetris_engine::types::{PieceColor, PieceKind};

// ============== Shape Tests ==============

#[test]
fn test_shape_table() {
    let expected = [
        (PieceKind::I, [(0, 0), (1, 0), (2, 0), (3, 0)]),
        (PieceKind::O, [(0, 0), (1, 0), (0, 1), (1, 1)]),
        (PieceKind::T, [(1, 0), (1, 1), (0, 1), (2, 1)]),
        (PieceKind::S, [(0, 0), (1, 0), (1, 1), (2, 1)]),
        (PieceKind::Z, [(0, 1), (1, 1), (1, 0), (2, 0)]),
        (PieceKind::J, [(0, 0), (1, 0), (1, 1), (1, 2)]),
        (PieceKind::L, [(2, 0), (1, 0), (1, 1), (1, 2)]),
    ];

    for (kind, shape) in expected {
        assert_eq!(spawn_shape(kind), shape, "{:?}", kind);
        assert_eq!(new_piece(kind, 0, 0).offsets(), &shape, "{:?}", kind);
    }
}

#[test]
fn test_new_piece_keeps_four_distinct_offsets() {
    for kind in PieceKind::ALL {
        let piece = new_piece(kind, 5, 0);
        let mut offsets = piece.offsets().to_vec();
        offsets.sort();
        offsets.dedup();
        assert_eq!(offsets.len(), 4, "{:?}", kind);
    }
}

#[test]
fn test_piece_colors() {
    assert_eq!(new_piece(PieceKind::I, 0, 0).color(), PieceColor::Cyan);
    assert_eq!(new_piece(PieceKind::O, 0, 0).color(), PieceColor::Yellow);
    assert_eq!(new_piece(PieceKind::T, 0, 0).color(), PieceColor::Purple);
    assert_eq!(new_piece(PieceKind::S, 0, 0).color(), PieceColor::Green);
    assert_eq!(new_piece(PieceKind::Z, 0, 0).color(), PieceColor::Red);
    assert_eq!(new_piece(PieceKind::J, 0, 0).color(), PieceColor::Blue);
    assert_eq!(new_piece(PieceKind::L, 0, 0).color(), PieceColor::Orange);
}

// ============== Rotation Tests ==============

#[test]
fn test_rotation_is_per_offset_transform() {
    for kind in PieceKind::ALL {
        let mut piece = new_piece(kind, 4, 4);
        let before = *piece.offsets();
        piece.rotate();
        let expected = before.map(rotate_offset);
        assert_eq!(piece.offsets(), &expected, "{:?}", kind);
        assert_eq!((piece.x, piece.y), (4, 4));
    }
}

#[test]
fn test_rotation_keeps_four_offsets() {
    for kind in PieceKind::ALL {
        let mut piece = new_piece(kind, 0, 0);
        for _ in 0..3 {
            piece.rotate();
            let mut offsets = piece.offsets().to_vec();
            offsets.sort();
            offsets.dedup();
            assert_eq!(offsets.len(), 4);
        }
    }
}

#[test]
fn test_full_cycle_returns_original_offsets() {
    for kind in PieceKind::ALL {
        let mut piece = new_piece(kind, 0, 0);
        for _ in 0..4 {
            piece.rotate();
        }
        assert_eq!(piece.offsets(), &spawn_shape(kind));
    }
}

#[test]
fn test_o_piece_is_not_rotation_invariant() {
    let mut piece = Tetromino::new(PieceKind::O, 0, 0);
    piece.rotate();
    assert_eq!(piece.offsets(), &[(0, 0), (0, -1), (1, 0), (1, -1)]);
    assert_ne!(piece.offsets(), &spawn_shape(PieceKind::O));
}

#[test]
fn test_i_piece_rotates_upward() {
    let mut piece = Tetromino::new(PieceKind::I, 0, 0);
    piece.rotate();
    assert_eq!(piece.offsets(), &[(0, 0), (0, -1), (0, -2), (0, -3)]);
    piece.rotate();
    assert_eq!(piece.offsets(), &[(0, 0), (-1, 0), (-2, 0), (-3, 0)]);
}
