//! Per-tile animation state, driven by the renderer.
//!
//! The engine only reports [`TileChange`]s. The renderer calls
//! [`TileAnimator::begin`] with them, schedules its own timer, and later
//! calls [`TileAnimator::finish`] with the ticket it got back. A ticket from
//! an older move or an older run is ignored, so a late timer can never reset
//! a newer animation.
//!
//! ```text
//! Idle --begin(Merged)--> Merging --finish--> Idle
//! Idle --begin(Spawned)-> Spawning --finish--> Idle
//! ```

use crate::session::RunToken;

use super::game::TileChange;
use super::grid::SIZE;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TileAnimation {
    #[default]
    Idle,
    Merging,
    Spawning,
}

/// Handle for one `begin` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationTicket {
    run: RunToken,
    sequence: u64,
}

#[derive(Clone, Debug, Default)]
pub struct TileAnimator {
    cells: [[TileAnimation; SIZE]; SIZE],
    sequence: u64,
    active: Option<AnimationTicket>,
}

impl TileAnimator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start animations for one move, replacing any still running.
    pub fn begin(&mut self, run: RunToken, changes: &[TileChange]) -> AnimationTicket {
        self.clear();
        for change in changes {
            match *change {
                TileChange::Merged { row, col, .. } => self.cells[row][col] = TileAnimation::Merging,
                TileChange::Spawned { row, col, .. } => self.cells[row][col] = TileAnimation::Spawning,
            }
        }
        self.sequence += 1;
        let ticket = AnimationTicket { run, sequence: self.sequence };
        self.active = Some(ticket);
        ticket
    }

    /// End the animation identified by `ticket`. Returns `false` for a stale ticket.
    pub fn finish(&mut self, ticket: AnimationTicket) -> bool {
        if self.active != Some(ticket) {
            return false;
        }
        self.clear();
        self.active = None;
        true
    }

    /// Drop every animation, e.g. on restart.
    pub fn cancel(&mut self) {
        self.clear();
        self.active = None;
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> TileAnimation {
        self.cells[row][col]
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    fn clear(&mut self) {
        self.cells = [[TileAnimation::Idle; SIZE]; SIZE];
    }
}
