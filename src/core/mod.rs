//! Core module - pure game logic with no I/O.
//!
//! Grid state, piece geometry and collision, the shape catalog, and the
//! tick-driven update loop. Nothing here touches a terminal, a window, or
//! a clock; the surrounding driver supplies ticks and input events.

pub mod catalog;
pub mod game;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod snapshot;

pub use catalog::{CatalogError, RotationMatrix, ShapeCatalog, ShapePattern};
pub use game::{Game, Tick};
pub use grid::{Grid, OutOfRange};
pub use piece::Piece;
pub use rng::SimpleRng;
pub use snapshot::{GameSnapshot, PieceView};
