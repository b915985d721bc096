//! Snake: a growing body steered across a square grid, one cell per tick.
//!
//! The body is stored head first. Direction changes are buffered and applied
//! at the start of the next tick, and a change that would reverse the snake
//! onto its own neck is refused.

mod game;

pub use game::{Position, SnakeConfig, SnakeGame, StepResult};
