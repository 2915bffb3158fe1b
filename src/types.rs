//! Core types shared across the crate.
//! Pure data types and constants with no external dependencies.

/// Playfield dimensions
pub const COLUMNS: usize = 12;
pub const ROWS: usize = 18;

/// Width of the preview display area, in cells, to the right of the playfield
pub const PREVIEW_COLUMNS: usize = 6;

/// Spawn anchor for a piece entering play
pub const SPAWN_X: i8 = (COLUMNS / 2 - 2) as i8;
pub const SPAWN_Y: i8 = 0;

/// Input and gravity both run on a slower cadence than the raw tick rate:
/// one processed interval per this many `update()` calls.
pub const INPUT_INTERVAL_TICKS: u32 = 5;

/// Drop counter thresholds, in processed intervals
pub const DROP_INTERVAL_TICKS: u32 = 10;
pub const SOFT_DROP_INTERVAL_TICKS: u32 = 1;

/// One grid cell. 0 is empty; a nonzero value is an occupied cell carrying
/// the shape tag it was locked from (the tag has no simulation semantics).
pub type Cell = u8;

/// The empty cell value
pub const EMPTY: Cell = 0;

/// Discrete input events consumed by the game, as decoded by the driver.
///
/// Held/released pairs model keys that repeat while down (movement) or
/// change a mode while down (soft drop).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    RotateRequested,
    MoveLeftHeld,
    MoveLeftReleased,
    MoveRightHeld,
    MoveRightReleased,
    SoftDropHeld,
    SoftDropReleased,
    PauseToggle,
    Reset,
    Quit,
}

/// The single pending action applied to the active piece once per
/// processed interval. Rotate and the speed changes are one-shot;
/// MoveLeft/MoveRight persist until released or replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Rotate,
    MoveLeft,
    MoveRight,
    SpeedUp,
    SpeedNormal,
}

/// Neighbor direction for piece collision tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Left,
    Right,
}
