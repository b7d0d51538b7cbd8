//! Board module - manages the game grid
//!
//! The board is a `columns x rows` grid where each cell is empty or holds the
//! kind of the piece that locked there (the renderer derives color from it).
//! Storage is a flat row-major vector sized once at construction.
//! Coordinates: (x, y) where x is the column (left to right) and y is the row
//! (top to bottom, the direction pieces fall).

use crate::error::EngineError;
use crate::pieces::Tetromino;
use crate::types::{Cell, PieceKind};

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    columns: u16,
    rows: u16,
    /// Flat array of cells, row-major order (y * columns + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board.
    ///
    /// Zero-sized dimensions are a precondition violation and are rejected.
    pub fn new(columns: u16, rows: u16) -> Result<Self, EngineError> {
        if columns == 0 || rows == 0 {
            return Err(EngineError::InvalidDimensions { columns, rows });
        }
        Ok(Self {
            columns,
            rows,
            cells: vec![None; columns as usize * rows as usize],
        })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.columns as usize) + (x as usize))
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_out_of_bounds(&self, x: i32, y: i32) -> bool {
        x < 0 || x >= self.columns as i32 || y < 0 || y >= self.rows as i32
    }

    /// Whether `piece` shifted by (`dx`, `dy`) lies inside the grid on empty cells.
    ///
    /// Pure predicate; the board is never touched.
    pub fn can_place(&self, piece: &Tetromino, dx: i32, dy: i32) -> bool {
        piece
            .cells_at(dx, dy)
            .iter()
            .all(|&(x, y)| self.is_valid(x, y))
    }

    /// Mark the piece's four cells as occupied by its kind.
    ///
    /// The caller must already have checked `can_place(piece, 0, 0)`; nothing
    /// is validated here beyond a debug assertion.
    pub fn lock_piece(&mut self, piece: &Tetromino) {
        for (x, y) in piece.cells() {
            let placed = self.set(x, y, Some(piece.kind));
            debug_assert!(placed, "locked cell ({}, {}) outside the board", x, y);
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.rows as usize {
            return false;
        }
        let width = self.columns as usize;
        let start = y * width;
        self.cells[start..start + width].iter().all(|cell| cell.is_some())
    }

    /// Indices of the full rows, top to bottom
    pub fn full_rows(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.rows as usize).filter(move |&y| self.is_row_full(y))
    }

    /// Remove every full row, dropping the rows above each one.
    ///
    /// Single compaction pass from the bottom up. The result is the same as
    /// removing complete rows one at a time from the top, shifting everything
    /// above down after each removal. Returns the number of rows removed.
    pub fn clear_completed_rows(&mut self) -> usize {
        let width = self.columns as usize;
        let mut write_y = self.rows as usize;
        let mut cleared = 0;

        for read_y in (0..self.rows as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared
    }

    /// Clear the entire board
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Occupied cells as (x, y, kind), row-major
    pub fn locked_cells(&self) -> impl Iterator<Item = (i32, i32, PieceKind)> + '_ {
        let width = self.columns as usize;
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.map(|kind| ((idx % width) as i32, (idx / width) as i32, kind))
        })
    }

    /// Convert to 2D vector for testing/display
    #[cfg(test)]
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells
            .chunks(self.columns as usize)
            .map(|row| row.to_vec())
            .collect()
    }
}
