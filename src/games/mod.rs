//! Game engines.
//!
//! Each engine owns its whole run state and a random source, exposes
//! command methods for its inputs and reports through
//! [`ArcadeGame`](crate::rules::ArcadeGame). Flap and shooter are also
//! [`RealtimeEngine`](crate::rules::RealtimeEngine)s.

pub mod flap;
pub mod memory;
pub mod minesweeper;
pub mod shooter;
pub mod snake;
pub mod tictactoe;
pub mod twenty48;
