//! Game module - the per-tick scheduling state machine.
//!
//! One `update()` call per externally supplied frame. Input and gravity
//! are processed every INPUT_INTERVAL_TICKS calls; within a processed
//! interval the pending action is applied first, then the drop counter is
//! checked against the current drop interval. A piece that can no longer
//! descend is locked, full rows are cleared, the preview is promoted to
//! the spawn anchor and a new preview is drawn from the catalog.
//!
//! The game never ends on its own: a spawn that overlaps the grid is
//! reported as `Tick::SpawnBlocked` and freezes the simulation; acting on
//! it (game-over screen, restart) is the driver's job.

use arrayvec::ArrayVec;

use crate::core::catalog::ShapeCatalog;
use crate::core::grid::Grid;
use crate::core::piece::Piece;
use crate::core::rng::SimpleRng;
use crate::core::snapshot::GameSnapshot;
use crate::types::{
    Action, Direction, InputEvent, COLUMNS, DROP_INTERVAL_TICKS, INPUT_INTERVAL_TICKS,
    PREVIEW_COLUMNS, ROWS, SOFT_DROP_INTERVAL_TICKS, SPAWN_X, SPAWN_Y,
};

/// Outcome of one `update()` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// Paused, not running, topped out, or between processed intervals
    Idle,
    /// A processed interval ran without locking the active piece
    Ran,
    /// The active piece locked; carries the cleared row indices
    Locked { cleared: ArrayVec<usize, ROWS> },
    /// The piece promoted from the preview slot overlaps the grid:
    /// no room to spawn. Terminal until the driver resets.
    SpawnBlocked,
}

/// A complete game session
#[derive(Debug, Clone)]
pub struct Game {
    grid: Grid,
    catalog: ShapeCatalog,
    rng: SimpleRng,
    active: Piece,
    preview: Piece,
    ticks: u32,
    drop_ticks: u32,
    drop_interval: u32,
    pending: Option<Action>,
    paused: bool,
    running: bool,
    topped_out: bool,
}

impl Game {
    /// Start a session with the given catalog and RNG seed
    pub fn new(catalog: ShapeCatalog, seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let mut active = Self::preview_piece(&catalog, &mut rng);
        active.x = SPAWN_X;
        active.y = SPAWN_Y;
        let preview = Self::preview_piece(&catalog, &mut rng);

        Self {
            grid: Grid::new(),
            catalog,
            rng,
            active,
            preview,
            ticks: 0,
            drop_ticks: 0,
            drop_interval: DROP_INTERVAL_TICKS,
            pending: None,
            paused: false,
            running: true,
            topped_out: false,
        }
    }

    /// Draw a random piece and park it in the preview display area,
    /// centered in the side panel, outside the play columns.
    fn preview_piece(catalog: &ShapeCatalog, rng: &mut SimpleRng) -> Piece {
        let mut piece = Piece::new(catalog.choose(rng).clone());
        piece.x = COLUMNS as i8 + (PREVIEW_COLUMNS as i8 - piece.bounding_width()) / 2;
        piece.y = 1;
        piece
    }

    /// Move the preview into play at the spawn anchor and draw its
    /// replacement.
    fn promote_preview(&mut self) {
        let next = Self::preview_piece(&self.catalog, &mut self.rng);
        let mut active = std::mem::replace(&mut self.preview, next);
        active.x = SPAWN_X;
        active.y = SPAWN_Y;
        self.active = active;
    }

    /// Lock the active piece, clear rows, and bring in the next piece
    fn lock_active(&mut self) -> Tick {
        self.active.lock_into(&mut self.grid);
        let cleared = self.grid.clear_full_rows();
        self.promote_preview();
        self.pending = None;

        if self.active.overlaps_grid(&self.grid) {
            self.topped_out = true;
            return Tick::SpawnBlocked;
        }
        Tick::Locked { cleared }
    }

    /// Advance the simulation by one external tick.
    ///
    /// Processing order within a processed interval is fixed: pending
    /// action first, then gravity. The drop counter is compared before it
    /// is incremented, so the first descent lands one interval later than
    /// the interval count alone would suggest.
    pub fn update(&mut self) -> Tick {
        if self.paused || !self.running || self.topped_out {
            return Tick::Idle;
        }

        self.ticks += 1;
        if self.ticks < INPUT_INTERVAL_TICKS {
            return Tick::Idle;
        }
        self.ticks = 0;

        match self.pending {
            Some(Action::Rotate) => {
                self.active.rotate();
                self.pending = None;
            }
            Some(Action::MoveLeft) => self.active.move_left(&self.grid),
            Some(Action::MoveRight) => self.active.move_right(&self.grid),
            Some(Action::SpeedUp) => {
                self.drop_interval = SOFT_DROP_INTERVAL_TICKS;
                self.pending = None;
            }
            Some(Action::SpeedNormal) => {
                self.drop_interval = DROP_INTERVAL_TICKS;
                self.pending = None;
            }
            None => {}
        }

        let mut outcome = Tick::Ran;
        if self.drop_ticks >= self.drop_interval {
            if self.active.collides(&self.grid, Direction::Down) {
                outcome = self.lock_active();
            } else {
                self.active.drop_one_row(&self.grid);
            }
            self.drop_ticks = 0;
        }
        self.drop_ticks += 1;

        outcome
    }

    /// Feed one decoded input event into the pending-action slot.
    ///
    /// Pause toggling is always accepted; everything else is ignored
    /// while paused.
    pub fn handle(&mut self, event: InputEvent) {
        if event == InputEvent::PauseToggle {
            self.paused = !self.paused;
            return;
        }
        if self.paused {
            return;
        }

        match event {
            InputEvent::RotateRequested => self.pending = Some(Action::Rotate),
            InputEvent::MoveLeftHeld => self.pending = Some(Action::MoveLeft),
            InputEvent::MoveRightHeld => self.pending = Some(Action::MoveRight),
            InputEvent::MoveLeftReleased | InputEvent::MoveRightReleased => self.pending = None,
            InputEvent::SoftDropHeld => self.pending = Some(Action::SpeedUp),
            InputEvent::SoftDropReleased => self.pending = Some(Action::SpeedNormal),
            InputEvent::Reset => self.reset(),
            InputEvent::Quit => self.running = false,
            InputEvent::PauseToggle => unreachable!("handled above"),
        }
    }

    /// Re-initialize the session: empty grid, fresh counters and pieces.
    /// The RNG stream continues, it is not re-seeded.
    pub fn reset(&mut self) {
        self.grid = Grid::new();
        self.ticks = 0;
        self.drop_ticks = 0;
        self.drop_interval = DROP_INTERVAL_TICKS;
        self.pending = None;
        self.topped_out = false;
        self.running = true;
        self.preview = Self::preview_piece(&self.catalog, &mut self.rng);
        self.promote_preview();
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    pub fn preview(&self) -> &Piece {
        &self.preview
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn topped_out(&self) -> bool {
        self.topped_out
    }

    pub fn drop_interval(&self) -> u32 {
        self.drop_interval
    }

    pub fn pending(&self) -> Option<Action> {
        self.pending
    }

    /// Export the full render-facing state
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }

    #[cfg(test)]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[cfg(test)]
    pub fn active_mut(&mut self) -> &mut Piece {
        &mut self.active
    }
}
