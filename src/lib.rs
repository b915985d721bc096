//! # arcade-engines
//!
//! Deterministic state engines for a small collection of arcade games.
//!
//! ## Design Principles
//!
//! 1. **Engines Own Their Runs**: each game owns its entire run state and
//!    replaces it wholesale on restart. Nothing is shared between games.
//!
//! 2. **Injected Randomness**: every engine draws from a `RandomSource`.
//!    `GameRng` gives seeded, reproducible runs; `SequenceRng` scripts
//!    exact scenarios in tests.
//!
//! 3. **Gameplay Never Fails**: commands on a finished game are no-ops and
//!    score-store failures are logged, not returned. Only construction and
//!    out-of-range coordinates produce errors.
//!
//! ## Architecture
//!
//! - **Discrete engines** (2048, minesweeper, snake, memory) change state
//!   only inside a command call.
//!
//! - **Continuous engines** (flap, shooter) also implement
//!   `RealtimeEngine::tick(dt)`, called once per display frame.
//!
//! - **Sessions** bind a game to a `ScoreStore`, record the best score once
//!   per finished run and drop deferred work from replaced runs.
//!
//! ## Modules
//!
//! - `core`: RNG, directions, geometry, game identity, configuration
//! - `rules`: `ArcadeGame` and `RealtimeEngine` traits, `GameStatus`
//! - `games`: the engines themselves
//! - `scores`: best scores, leaderboards, saved 2048 runs
//! - `session`: run lifecycle and stale-callback protection
//! - `input`: key, pointer and swipe mapping
//! - `error`: `ArcadeError`

pub mod core;
pub mod error;
pub mod games;
pub mod input;
pub mod rules;
pub mod scores;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    ArcadeConfig, Direction, GameId, GameRng, RandomSource, Rect, ScoreRanking, SequenceRng, Vec2,
};

pub use crate::error::{ArcadeError, Result};

pub use crate::rules::{ArcadeGame, GameStatus, RealtimeEngine, TickDelta};

pub use crate::games::flap::{FlapConfig, FlapGame};
pub use crate::games::memory::{MemoryConfig, MemoryGame};
pub use crate::games::minesweeper::{BoardParams, Difficulty, Minesweeper};
pub use crate::games::shooter::{HitPolicy, ShooterConfig, ShooterGame};
pub use crate::games::snake::{SnakeConfig, SnakeGame};
pub use crate::games::tictactoe::TicTacToe;
pub use crate::games::twenty48::Game2048;

pub use crate::scores::{JsonFileStore, KeyValueStore, MemoryStore, ScoreBook, ScoreStore};

pub use crate::session::{RunToken, Session};
