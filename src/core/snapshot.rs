//! Render-facing state export.
//!
//! A presentation layer polls the game once per frame; the snapshot hands
//! it everything it may draw without reaching into simulation internals.

use crate::core::catalog::RotationMatrix;
use crate::core::game::Game;
use crate::core::piece::Piece;
use crate::types::{Cell, COLUMNS, ROWS};

/// A piece as seen by the renderer: active rotation matrix plus anchor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceView {
    pub matrix: RotationMatrix,
    pub rotation: usize,
    pub x: i8,
    pub y: i8,
}

impl From<&Piece> for PieceView {
    fn from(piece: &Piece) -> Self {
        Self {
            matrix: piece.matrix().clone(),
            rotation: piece.rotation(),
            x: piece.x,
            y: piece.y,
        }
    }
}

/// Full game state for one rendered frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: [[Cell; COLUMNS]; ROWS],
    pub active: PieceView,
    pub preview: PieceView,
    pub paused: bool,
    pub running: bool,
    pub topped_out: bool,
}

impl GameSnapshot {
    pub fn capture(game: &Game) -> Self {
        let mut board = [[0; COLUMNS]; ROWS];
        game.grid().write_cells(&mut board);
        Self {
            board,
            active: game.active().into(),
            preview: game.preview().into(),
            paused: game.paused(),
            running: game.running(),
            topped_out: game.topped_out(),
        }
    }
}
