//! blockfall - falling-block puzzle simulation core.
//!
//! Pure tick-driven game logic: grid state, piece geometry and collision,
//! line clears, and the update loop that ties input and gravity together.
//! Rendering, window management and raw keyboard decoding live in whatever
//! driver owns the tick source; this crate only consumes input events and
//! ticks, and exposes queryable state.

pub mod core;
pub mod types;

pub use crate::core::{Game, Grid, Piece, ShapeCatalog, Tick};
pub use crate::types::{Action, InputEvent};
