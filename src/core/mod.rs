//! Building blocks shared by every engine: randomness, directions,
//! geometry, game identity and configuration.

pub mod config;
pub mod direction;
pub mod geometry;
pub mod rng;

pub use config::{ArcadeConfig, GameId, ScoreRanking};
pub use direction::Direction;
pub use geometry::{Rect, Vec2};
pub use rng::{GameRng, RandomSource, SequenceRng};
