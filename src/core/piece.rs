//! Piece module - the falling block: geometry, collision, movement.
//!
//! A Piece binds a catalog pattern to a rotation index and a board-relative
//! anchor (the top-left corner of the rotation matrix). Movement and drops
//! are gated by directional collision tests against the grid; rotation is
//! not collision-gated, it only clamps back inside the right boundary.

use crate::core::catalog::{RotationMatrix, ShapePattern};
use crate::core::grid::Grid;
use crate::types::{Cell, Direction, COLUMNS, ROWS, SPAWN_X, SPAWN_Y};

/// The currently controllable falling block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pattern: ShapePattern,
    rotation: usize,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece at the spawn anchor in its base rotation
    pub fn new(pattern: ShapePattern) -> Self {
        Self {
            pattern,
            rotation: 0,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    pub fn pattern(&self) -> &ShapePattern {
        &self.pattern
    }

    pub fn rotation(&self) -> usize {
        self.rotation
    }

    /// The matrix for the active rotation
    pub fn matrix(&self) -> &RotationMatrix {
        self.pattern.variant(self.rotation)
    }

    /// Iterate the nonzero cells of the active rotation as (dx, dy, value)
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8, Cell)> + '_ {
        self.pattern.cells(self.rotation)
    }

    /// Rightmost occupied column index within the active rotation matrix
    pub fn bounding_width(&self) -> i8 {
        self.cells().map(|(dx, _, _)| dx).max().unwrap_or(0)
    }

    /// True if any cell of the piece has a wall, the floor, or a locked
    /// cell directly adjacent in the given direction.
    pub fn collides(&self, grid: &Grid, direction: Direction) -> bool {
        self.cells().any(|(dx, dy, _)| {
            let x = self.x + dx;
            let y = self.y + dy;
            match direction {
                Direction::Down => y + 1 >= ROWS as i8 || grid.is_occupied(x, y + 1),
                Direction::Left => x == 0 || grid.is_occupied(x - 1, y),
                Direction::Right => x + 1 >= COLUMNS as i8 || grid.is_occupied(x + 1, y),
            }
        })
    }

    /// True if any cell of the piece lands on an already occupied grid
    /// cell at the current position. Used right after a spawn to detect
    /// the no-room-to-spawn terminal condition.
    pub fn overlaps_grid(&self, grid: &Grid) -> bool {
        self.cells()
            .any(|(dx, dy, _)| grid.is_occupied(self.x + dx, self.y + dy))
    }

    /// Descend one row unless resting on the floor or a locked cell
    pub fn drop_one_row(&mut self, grid: &Grid) {
        if !self.collides(grid, Direction::Down) {
            self.y += 1;
        }
    }

    pub fn move_left(&mut self, grid: &Grid) {
        if !self.collides(grid, Direction::Left) {
            self.x -= 1;
        }
    }

    pub fn move_right(&mut self, grid: &Grid) {
        if !self.collides(grid, Direction::Right) {
            self.x += 1;
        }
    }

    /// Advance to the next rotation variant.
    ///
    /// If the new variant overflows the right boundary the anchor is pulled
    /// back so the rightmost occupied column sits at COLUMNS - 1. There is
    /// no corresponding correction at the left edge, and no occupancy
    /// check: rotating into locked cells is allowed.
    pub fn rotate(&mut self) {
        self.rotation = (self.rotation + 1) % 4;

        let overflow = self.x + self.bounding_width() - COLUMNS as i8;
        if overflow >= 0 {
            self.x -= overflow + 1;
        }
    }

    /// Merge this piece's cells into the grid at its current position.
    /// Caller guarantees the cells are in bounds and empty.
    pub fn lock_into(&self, grid: &mut Grid) {
        grid.lock(self.matrix(), self.x, self.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::ShapeCatalog;
    use crate::types::EMPTY;

    fn pattern(name: &str) -> ShapePattern {
        let catalog = ShapeCatalog::builtin().unwrap();
        (0..catalog.len())
            .map(|i| catalog.get(i).unwrap())
            .find(|shape| shape.name() == name)
            .unwrap()
            .clone()
    }

    /// A 1x1 piece, handy for pinpoint collision scenarios
    fn dot() -> ShapePattern {
        ShapePattern::new("dot", vec![vec![vec![9]]; 4]).unwrap()
    }

    #[test]
    fn test_spawn_anchor() {
        let piece = Piece::new(pattern("t"));
        assert_eq!((piece.x, piece.y), (4, 0));
        assert_eq!(piece.rotation(), 0);
    }

    #[test]
    fn test_bounding_width_tracks_rotation() {
        let mut piece = Piece::new(pattern("i"));
        // Horizontal bar spans columns 0..=3 of its matrix
        assert_eq!(piece.bounding_width(), 3);
        piece.rotate();
        // Vertical bar occupies a single matrix column
        assert_eq!(piece.bounding_width(), 2);
    }

    #[test]
    fn test_four_rotations_restore_geometry() {
        let catalog = ShapeCatalog::builtin().unwrap();
        for i in 0..catalog.len() {
            let mut piece = Piece::new(catalog.get(i).unwrap().clone());
            piece.x = 4;
            let before = (piece.rotation(), piece.matrix().clone());
            for _ in 0..4 {
                piece.rotate();
            }
            assert_eq!(piece.rotation(), before.0);
            assert_eq!(piece.matrix(), &before.1);
        }
    }

    #[test]
    fn test_collides_down_floor() {
        let grid = Grid::new();
        let mut piece = Piece::new(dot());
        piece.y = (ROWS - 2) as i8;
        assert!(!piece.collides(&grid, Direction::Down));
        piece.y = (ROWS - 1) as i8;
        assert!(piece.collides(&grid, Direction::Down));
    }

    #[test]
    fn test_collides_down_through_single_gap() {
        let mut grid = Grid::new();
        // Bottom row full except one cell at x = 6
        for x in 0..COLUMNS as i8 {
            if x != 6 {
                grid.set_cell(x, (ROWS - 1) as i8, 1).unwrap();
            }
        }

        let mut piece = Piece::new(dot());
        piece.x = 6;
        piece.y = (ROWS - 2) as i8;
        assert!(!piece.collides(&grid, Direction::Down));

        grid.set_cell(6, (ROWS - 1) as i8, 1).unwrap();
        assert!(piece.collides(&grid, Direction::Down));
    }

    #[test]
    fn test_move_left_rejected_at_wall() {
        let grid = Grid::new();
        let mut piece = Piece::new(dot());
        piece.x = 0;
        piece.move_left(&grid);
        assert_eq!(piece.x, 0);
    }

    #[test]
    fn test_move_right_rejected_at_wall() {
        let grid = Grid::new();
        let mut piece = Piece::new(dot());
        piece.x = (COLUMNS - 1) as i8;
        piece.move_right(&grid);
        assert_eq!(piece.x, (COLUMNS - 1) as i8);
    }

    #[test]
    fn test_move_blocked_by_locked_cell() {
        let mut grid = Grid::new();
        grid.set_cell(4, 5, 1).unwrap();

        let mut piece = Piece::new(dot());
        piece.x = 5;
        piece.y = 5;
        piece.move_left(&grid);
        assert_eq!(piece.x, 5);

        piece.move_right(&grid);
        assert_eq!(piece.x, 6);
    }

    #[test]
    fn test_rotate_clamps_right_overflow() {
        let mut piece = Piece::new(pattern("i"));
        // Vertical at the right wall; rotating back to horizontal would
        // overflow past the boundary.
        piece.rotate();
        piece.x = (COLUMNS - 1) as i8 - piece.bounding_width();
        piece.rotate();
        assert!(piece.x + piece.bounding_width() <= (COLUMNS - 1) as i8);
        // Overflow clamps the rightmost column exactly onto the boundary.
        assert_eq!(piece.x + piece.bounding_width(), (COLUMNS - 1) as i8);
    }

    #[test]
    fn test_rotate_has_no_left_correction() {
        let mut piece = Piece::new(pattern("i"));
        piece.rotate();
        // Vertical bar hugging the left wall; its occupied matrix column
        // is 2, so the anchor sits at -2.
        piece.x = -2;
        piece.rotate();
        // No symmetric kick: the anchor is left where the rotation put it.
        assert_eq!(piece.x, -2);
    }

    #[test]
    fn test_overlaps_grid() {
        let mut grid = Grid::new();
        let mut piece = Piece::new(dot());
        piece.x = 4;
        piece.y = 0;
        assert!(!piece.overlaps_grid(&grid));
        grid.set_cell(4, 0, 3).unwrap();
        assert!(piece.overlaps_grid(&grid));
    }

    #[test]
    fn test_lock_into_writes_only_piece_cells() {
        let mut grid = Grid::new();
        let mut piece = Piece::new(pattern("o"));
        piece.x = 4;
        piece.y = 0;
        piece.lock_into(&mut grid);

        let mut nonzero = 0;
        for y in 0..ROWS as i8 {
            for x in 0..COLUMNS as i8 {
                if grid.get(x, y) != Some(EMPTY) {
                    nonzero += 1;
                }
            }
        }
        assert_eq!(nonzero, 4);
        assert_eq!(grid.get(4, 0), Some(2));
        assert_eq!(grid.get(5, 0), Some(2));
        assert_eq!(grid.get(4, 1), Some(2));
        assert_eq!(grid.get(5, 1), Some(2));
    }
}
