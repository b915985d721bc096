//! Engine traits shared by every game.
//!
//! Discrete games expose their own command methods (`apply_move`, `reveal`,
//! `step`, ...) and report through `ArcadeGame`. Continuous games also
//! implement `RealtimeEngine`, driven once per display frame.

use serde::{Deserialize, Serialize};

use crate::core::GameId;

/// Lifecycle of a single run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Created but waiting for the first input (flap game).
    Ready,
    /// Accepting commands.
    Playing,
    /// Finished successfully.
    Won,
    /// Finished by a losing move or collision.
    Lost,
}

impl GameStatus {
    /// Check if the run has finished.
    #[must_use]
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}

/// What a frame or step produced, for the score store and the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickDelta {
    pub score_gained: u32,
    pub status: GameStatus,
}

impl TickDelta {
    #[must_use]
    pub const fn idle(status: GameStatus) -> Self {
        Self { score_gained: 0, status }
    }

    /// Did the run end during this tick?
    #[must_use]
    pub fn game_over(&self) -> bool {
        self.status.is_over()
    }
}

/// Common surface of every scored game.
///
/// ## Implementation Notes
///
/// - `restart` must replace the whole run state with a freshly built one,
///   never patch the old one in place.
/// - `score` is the value recorded as a best score when the run ends.
pub trait ArcadeGame {
    /// Which game this is.
    fn game_id(&self) -> GameId;

    /// Current score of this run.
    fn score(&self) -> u32;

    /// Current lifecycle state.
    fn status(&self) -> GameStatus;

    /// Discard the current run and start a new one.
    fn restart(&mut self);

    /// Should the current score be offered to the score store?
    ///
    /// Defaults to any finished run. Games whose losing runs are not
    /// meaningful scores override this.
    fn is_recordable(&self) -> bool {
        self.status().is_over()
    }

    /// Offer the score after every change instead of once at the end.
    ///
    /// For games whose score only grows during a run, so a run abandoned
    /// midway still keeps its best.
    fn records_live(&self) -> bool {
        false
    }
}

/// A game integrated in continuous time.
pub trait RealtimeEngine: ArcadeGame {
    /// Advance the simulation by `dt` seconds.
    ///
    /// Must run to completion; never called re-entrantly.
    fn tick(&mut self, dt: f32) -> TickDelta;
}
