//! 2048 game: grid plus score, spawning and persistence snapshot.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{Direction, GameId, GameRng, RandomSource};
use crate::error::{ArcadeError, Result};
use crate::rules::{ArcadeGame, GameStatus};

use super::grid::{is_game_over, slide, spawn_random_tile, Grid};

/// Tiles placed on an empty grid at the start of a run.
pub const START_TILES: usize = 2;

/// Persisted `{grid, score}` record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot2048 {
    pub grid: Grid,
    pub score: u32,
}

impl Snapshot2048 {
    /// A snapshot is usable only if its grid satisfies the tile invariant.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.grid.is_well_formed()
    }
}

/// How a cell changed during one move, for the animation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileChange {
    Merged { row: usize, col: usize, value: u32 },
    Spawned { row: usize, col: usize, value: u32 },
}

/// Result of one `apply_move` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub moved: bool,
    pub score_gained: u32,
    pub changes: Vec<TileChange>,
    pub status: GameStatus,
}

#[derive(Clone, Debug)]
struct RunState {
    grid: Grid,
    score: u32,
    status: GameStatus,
}

impl RunState {
    fn fresh<R: RandomSource>(rng: &mut R) -> Self {
        let mut grid = Grid::EMPTY;
        for _ in 0..START_TILES {
            spawn_random_tile(&mut grid, rng);
        }
        Self { grid, score: 0, status: GameStatus::Playing }
    }

    fn from_snapshot(snapshot: Snapshot2048) -> Self {
        let status = if is_game_over(&snapshot.grid) { GameStatus::Lost } else { GameStatus::Playing };
        Self { grid: snapshot.grid, score: snapshot.score, status }
    }
}

/// A 2048 run with its random source.
#[derive(Clone, Debug)]
pub struct Game2048<R: RandomSource = GameRng> {
    rng: R,
    state: RunState,
}

impl<R: RandomSource> Game2048<R> {
    /// Start a new run with two random tiles.
    pub fn new(mut rng: R) -> Self {
        let state = RunState::fresh(&mut rng);
        Self { rng, state }
    }

    /// Resume from a persisted snapshot, or start fresh when it is missing
    /// or breaks the tile invariant.
    pub fn resume(snapshot: Option<Snapshot2048>, rng: R) -> Self {
        match snapshot {
            Some(s) if s.is_valid() => {
                debug!(score = s.score, "resuming 2048 from snapshot");
                Self { rng, state: RunState::from_snapshot(s) }
            }
            _ => Self::new(rng),
        }
    }

    /// Start from an explicit grid. Fails if a tile is not a power of two.
    pub fn with_grid(grid: Grid, score: u32, rng: R) -> Result<Self> {
        let snapshot = Snapshot2048 { grid, score };
        if !snapshot.is_valid() {
            return Err(ArcadeError::InvalidBoard(
                "2048 tiles must be powers of two >= 2".to_string(),
            ));
        }
        Ok(Self { rng, state: RunState::from_snapshot(snapshot) })
    }

    /// Slide in `dir`; on a successful move add the merge score and spawn
    /// one tile. A move that changes nothing spawns nothing.
    pub fn apply_move(&mut self, dir: Direction) -> MoveOutcome {
        if self.state.status.is_over() {
            return self.unchanged();
        }

        let result = slide(&self.state.grid, dir);
        if !result.moved {
            return self.unchanged();
        }

        let mut changes: Vec<TileChange> = result
            .merged_cells()
            .map(|(row, col)| TileChange::Merged { row, col, value: result.grid.get(row, col) })
            .collect();

        let mut grid = result.grid;
        if let Some(((row, col), value)) = spawn_random_tile(&mut grid, &mut self.rng) {
            changes.push(TileChange::Spawned { row, col, value });
        }

        self.state.grid = grid;
        self.state.score += result.score_gained;
        if is_game_over(&grid) {
            self.state.status = GameStatus::Lost;
            info!(score = self.state.score, max_tile = grid.max_tile(), "2048 run over");
        }
        debug!(%dir, gained = result.score_gained, "2048 move");

        MoveOutcome {
            moved: true,
            score_gained: result.score_gained,
            changes,
            status: self.state.status,
        }
    }

    fn unchanged(&self) -> MoveOutcome {
        MoveOutcome {
            moved: false,
            score_gained: 0,
            changes: Vec::new(),
            status: self.state.status,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    #[must_use]
    pub fn max_tile(&self) -> u32 {
        self.state.grid.max_tile()
    }

    /// Current `{grid, score}` for persistence.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot2048 {
        Snapshot2048 { grid: self.state.grid, score: self.state.score }
    }
}

impl<R: RandomSource> ArcadeGame for Game2048<R> {
    fn game_id(&self) -> GameId {
        GameId::Twenty48
    }

    fn score(&self) -> u32 {
        self.state.score
    }

    fn status(&self) -> GameStatus {
        self.state.status
    }

    fn restart(&mut self) {
        self.state = RunState::fresh(&mut self.rng);
        info!("2048 restarted");
    }

    fn records_live(&self) -> bool {
        true
    }
}
