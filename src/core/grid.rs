//! Grid module - the locked-cell matrix.
//!
//! A 12x18 playfield of cell values. Coordinates: (x, y) with x in
//! 0..COLUMNS left to right and y in 0..ROWS top to bottom.
//!
//! Every row is an independently owned Vec, allocated fresh at
//! construction and whenever a blank row is introduced at the top after a
//! line clear. Rows must never share storage; shifting copies row
//! contents, it never moves references.

use std::fmt;

use arrayvec::ArrayVec;

use crate::core::catalog::RotationMatrix;
use crate::types::{Cell, COLUMNS, EMPTY, ROWS};

/// A grid coordinate outside [0, COLUMNS) x [0, ROWS).
///
/// This is a programming-contract violation: correct collision checks
/// precede every mutation, so a caller that sees this has skipped them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange {
    pub x: i8,
    pub y: i8,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "grid coordinate ({}, {}) outside {}x{} playfield",
            self.x, self.y, COLUMNS, ROWS
        )
    }
}

impl std::error::Error for OutOfRange {}

/// The playfield of locked cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Create an empty grid with one owned allocation per row
    pub fn new() -> Self {
        Self {
            rows: (0..ROWS).map(|_| vec![EMPTY; COLUMNS]).collect(),
        }
    }

    pub fn width(&self) -> usize {
        COLUMNS
    }

    pub fn height(&self) -> usize {
        ROWS
    }

    fn in_bounds(x: i8, y: i8) -> bool {
        x >= 0 && (x as usize) < COLUMNS && y >= 0 && (y as usize) < ROWS
    }

    /// Get the cell at (x, y), or None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        if Self::in_bounds(x, y) {
            Some(self.rows[y as usize][x as usize])
        } else {
            None
        }
    }

    /// Bounds-checked cell read
    pub fn cell_at(&self, x: i8, y: i8) -> Result<Cell, OutOfRange> {
        self.get(x, y).ok_or(OutOfRange { x, y })
    }

    /// Bounds-checked cell write
    pub fn set_cell(&mut self, x: i8, y: i8, value: Cell) -> Result<(), OutOfRange> {
        if Self::in_bounds(x, y) {
            self.rows[y as usize][x as usize] = value;
            Ok(())
        } else {
            Err(OutOfRange { x, y })
        }
    }

    /// True if (x, y) is in bounds and holds a nonzero cell
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(cell) if cell != EMPTY)
    }

    /// True if every cell in row y is nonzero
    pub fn is_row_full(&self, y: usize) -> bool {
        y < ROWS && self.rows[y].iter().all(|&cell| cell != EMPTY)
    }

    /// Merge a rotation matrix into the grid at the given anchor.
    ///
    /// Precondition (not re-validated here): every nonzero cell of the
    /// matrix lands in bounds on a currently empty cell. The caller's
    /// collision checks guarantee this; a violation panics.
    pub fn lock(&mut self, matrix: &RotationMatrix, anchor_x: i8, anchor_y: i8) {
        for (dy, row) in matrix.iter().enumerate() {
            for (dx, &value) in row.iter().enumerate() {
                if value != EMPTY {
                    let x = (anchor_x + dx as i8) as usize;
                    let y = (anchor_y + dy as i8) as usize;
                    self.rows[y][x] = value;
                }
            }
        }
    }

    /// Clear full rows in a single top-to-bottom pass.
    ///
    /// When a full row is found at index y, every row strictly above it
    /// shifts down by one and row 0 becomes a freshly allocated empty row.
    /// The pass continues from the same index sequence without rescanning
    /// rows already shifted into visited indices.
    ///
    /// Returns the row indices that were full, in pass order.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, ROWS> {
        let mut cleared = ArrayVec::new();
        for y in 0..ROWS {
            if !self.is_row_full(y) {
                continue;
            }
            for i in (1..=y).rev() {
                let above = self.rows[i - 1].clone();
                self.rows[i] = above;
            }
            self.rows[0] = vec![EMPTY; COLUMNS];
            cleared.push(y);
        }
        cleared
    }

    /// Reset every cell to empty, re-allocating each row
    pub fn clear(&mut self) {
        self.rows = (0..ROWS).map(|_| vec![EMPTY; COLUMNS]).collect();
    }

    /// Row-major view of the locked cells, for rendering
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Copy the grid into a fixed-size cell array
    pub fn write_cells(&self, out: &mut [[Cell; COLUMNS]; ROWS]) {
        for (y, row) in self.rows.iter().enumerate() {
            out[y].copy_from_slice(row);
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_dimensions() {
        let grid = Grid::new();
        assert_eq!(grid.rows().len(), ROWS);
        assert!(grid.rows().iter().all(|row| row.len() == COLUMNS));
    }

    #[test]
    fn test_rows_do_not_alias() {
        let mut grid = Grid::new();
        grid.set_cell(0, 3, 9).unwrap();
        for y in 0..ROWS as i8 {
            if y != 3 {
                assert_eq!(grid.get(0, y), Some(EMPTY), "row {y} aliased row 3");
            }
        }
    }

    #[test]
    fn test_blank_top_row_after_clear_does_not_alias() {
        let mut grid = Grid::new();
        for x in 0..COLUMNS as i8 {
            grid.set_cell(x, 0, 1).unwrap();
        }
        let cleared = grid.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[0]);

        // Mutating the fresh top row must not leak into any other row.
        grid.set_cell(5, 0, 7).unwrap();
        for y in 1..ROWS as i8 {
            assert_eq!(grid.get(5, y), Some(EMPTY));
        }
    }

    #[test]
    fn test_cell_at_out_of_range() {
        let grid = Grid::new();
        assert_eq!(grid.cell_at(-1, 0), Err(OutOfRange { x: -1, y: 0 }));
        assert_eq!(grid.cell_at(0, ROWS as i8), Err(OutOfRange { x: 0, y: ROWS as i8 }));
        assert!(grid.cell_at(COLUMNS as i8, 0).is_err());
    }

    #[test]
    fn test_is_occupied() {
        let mut grid = Grid::new();
        assert!(!grid.is_occupied(2, 2));
        grid.set_cell(2, 2, 4).unwrap();
        assert!(grid.is_occupied(2, 2));
        // Out of bounds is not "occupied"
        assert!(!grid.is_occupied(-1, 0));
    }
}
