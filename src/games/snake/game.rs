//! Tick-driven snake on a square grid.

use std::time::Duration;

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{Direction, GameId, GameRng, RandomSource};
use crate::error::{ArcadeError, Result};
use crate::rules::{ArcadeGame, GameStatus};

/// Grid coordinate; `y` grows downwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Snake game configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "SnakeConfigFile")]
pub struct SnakeConfig {
    /// Side length of the square grid.
    pub grid_size: i32,

    /// Head position of the one-segment starting snake.
    pub start: Position,

    pub start_direction: Direction,

    /// Food position at the start of every run.
    pub first_food: Position,

    /// Interval of the external tick timer.
    pub tick_interval_ms: u64,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self::for_grid(20)
    }
}

/// Deserialized form; positions left out are placed relative to the grid.
#[derive(Deserialize)]
#[serde(default)]
struct SnakeConfigFile {
    grid_size: i32,
    start: Option<Position>,
    start_direction: Direction,
    first_food: Option<Position>,
    tick_interval_ms: u64,
}

impl Default for SnakeConfigFile {
    fn default() -> Self {
        let base = SnakeConfig::default();
        Self {
            grid_size: base.grid_size,
            start: None,
            start_direction: base.start_direction,
            first_food: None,
            tick_interval_ms: base.tick_interval_ms,
        }
    }
}

impl From<SnakeConfigFile> for SnakeConfig {
    fn from(file: SnakeConfigFile) -> Self {
        let base = SnakeConfig::for_grid(file.grid_size);
        Self {
            grid_size: file.grid_size,
            start: file.start.unwrap_or(base.start),
            start_direction: file.start_direction,
            first_food: file.first_food.unwrap_or(base.first_food),
            tick_interval_ms: file.tick_interval_ms,
        }
    }
}

impl SnakeConfig {
    /// Defaults for a `size`×`size` grid: head two fifths of the way in,
    /// food a fifth further along the same row.
    #[must_use]
    pub fn for_grid(size: i32) -> Self {
        let start = size * 2 / 5;
        Self {
            grid_size: size,
            start: Position::new(start, start),
            start_direction: Direction::Right,
            first_food: Position::new(size * 3 / 5, start),
            tick_interval_ms: 100,
        }
    }

    /// Change the grid size only; `start` and `first_food` stay as set.
    ///
    /// Use [`SnakeConfig::for_grid`] to move them with the grid.
    pub fn with_grid_size(mut self, size: i32) -> Self {
        self.grid_size = size;
        self
    }

    pub fn with_start(mut self, start: Position, direction: Direction) -> Self {
        self.start = start;
        self.start_direction = direction;
        self
    }

    pub fn with_first_food(mut self, food: Position) -> Self {
        self.first_food = food;
        self
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    #[must_use]
    pub fn contains(&self, p: Position) -> bool {
        (0..self.grid_size).contains(&p.x) && (0..self.grid_size).contains(&p.y)
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_size < 2 {
            return Err(ArcadeError::Config(format!("snake grid must be at least 2, got {}", self.grid_size)));
        }
        if !self.contains(self.start) || !self.contains(self.first_food) {
            return Err(ArcadeError::Config("snake start and food must lie on the grid".to_string()));
        }
        if self.start == self.first_food {
            return Err(ArcadeError::Config("snake food cannot start under the head".to_string()));
        }
        if self.tick_interval_ms == 0 {
            return Err(ArcadeError::Config("snake tick interval must be positive".to_string()));
        }
        Ok(())
    }
}

/// Result of one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepResult {
    pub status: GameStatus,
    /// Food was eaten this tick.
    pub scored: bool,
}

impl StepResult {
    #[must_use]
    pub fn game_over(&self) -> bool {
        self.status.is_over()
    }
}

#[derive(Clone, Debug)]
struct SnakeState {
    /// Head first.
    body: Vector<Position>,
    direction: Direction,
    pending: Option<Direction>,
    food: Position,
    score: u32,
    status: GameStatus,
}

impl SnakeState {
    fn fresh(config: &SnakeConfig) -> Self {
        Self {
            body: Vector::unit(config.start),
            direction: config.start_direction,
            pending: None,
            food: config.first_food,
            score: 0,
            status: GameStatus::Playing,
        }
    }
}

/// A snake run.
#[derive(Clone, Debug)]
pub struct SnakeGame<R: RandomSource = GameRng> {
    config: SnakeConfig,
    rng: R,
    state: SnakeState,
}

impl<R: RandomSource> SnakeGame<R> {
    pub fn new(config: SnakeConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let state = SnakeState::fresh(&config);
        Ok(Self { config, rng, state })
    }

    /// Start from an explicit body (head first), heading and food.
    pub fn with_body(
        config: SnakeConfig,
        body: &[Position],
        direction: Direction,
        food: Position,
        rng: R,
    ) -> Result<Self> {
        config.validate()?;
        if body.is_empty() || !body.iter().all(|&p| config.contains(p)) {
            return Err(ArcadeError::InvalidBoard("snake body must be non-empty and on the grid".to_string()));
        }
        let unique: FxHashSet<Position> = body.iter().copied().collect();
        if unique.len() != body.len() || unique.contains(&food) || !config.contains(food) {
            return Err(ArcadeError::InvalidBoard("snake body overlaps itself or the food".to_string()));
        }
        let state = SnakeState {
            body: body.iter().copied().collect(),
            direction,
            pending: None,
            food,
            score: 0,
            status: GameStatus::Playing,
        };
        Ok(Self { config, rng, state })
    }

    /// Buffer a direction for the next tick.
    ///
    /// Rejected when it reverses the direction currently travelled, or when
    /// the run is over. The last accepted direction before a tick wins.
    pub fn set_direction(&mut self, dir: Direction) -> bool {
        if self.state.status.is_over() || dir == self.state.direction.opposite() {
            return false;
        }
        self.state.pending = Some(dir);
        true
    }

    /// Advance one grid cell.
    pub fn step(&mut self) -> StepResult {
        let state = &mut self.state;
        if state.status.is_over() {
            return StepResult { status: state.status, scored: false };
        }

        if let Some(dir) = state.pending.take() {
            state.direction = dir;
        }
        let Some(&head) = state.body.front() else {
            return StepResult { status: state.status, scored: false };
        };
        let next = head.step(state.direction);

        // The tail still counts: it only moves away if nothing is eaten.
        if !self.config.contains(next) || state.body.contains(&next) {
            state.status = GameStatus::Lost;
            info!(score = state.score, length = state.body.len(), "snake crashed");
            return StepResult { status: state.status, scored: false };
        }

        state.body.push_front(next);
        if next != state.food {
            state.body.pop_back();
            return StepResult { status: state.status, scored: false };
        }

        state.score += 1;
        let empty = Self::empty_cells(&self.config, &state.body);
        if empty.is_empty() {
            state.status = GameStatus::Won;
            info!(score = state.score, "snake filled the grid");
        } else {
            state.food = empty[self.rng.gen_index(empty.len())];
            debug!(score = state.score, food = ?state.food, "snake ate");
        }
        StepResult { status: state.status, scored: true }
    }

    fn empty_cells(config: &SnakeConfig, body: &Vector<Position>) -> Vec<Position> {
        let occupied: FxHashSet<Position> = body.iter().copied().collect();
        (0..config.grid_size)
            .flat_map(|y| (0..config.grid_size).map(move |x| Position::new(x, y)))
            .filter(|p| !occupied.contains(p))
            .collect()
    }

    /// Body segments, head first.
    pub fn body(&self) -> impl Iterator<Item = &Position> {
        self.state.body.iter()
    }

    #[must_use]
    pub fn head(&self) -> Option<Position> {
        self.state.body.front().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.body.is_empty()
    }

    #[must_use]
    pub fn food(&self) -> Position {
        self.state.food
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    #[must_use]
    pub fn config(&self) -> &SnakeConfig {
        &self.config
    }
}

impl<R: RandomSource> ArcadeGame for SnakeGame<R> {
    fn game_id(&self) -> GameId {
        GameId::Snake
    }

    fn score(&self) -> u32 {
        self.state.score
    }

    fn status(&self) -> GameStatus {
        self.state.status
    }

    fn restart(&mut self) {
        self.state = SnakeState::fresh(&self.config);
        info!("snake restarted");
    }
}
