//! Engine traits for game implementations.
//!
//! Games implement `ArcadeGame` to report score and status, and
//! `RealtimeEngine` when they advance with frame time rather than with
//! discrete commands.

pub mod engine;

pub use engine::{ArcadeGame, GameStatus, RealtimeEngine, TickDelta};
