//! 2048: slide-and-merge on a 4×4 grid.
//!
//! - [`grid`]: the pure transition (`slide`, `is_game_over`, spawning)
//! - [`game`]: a run with score, spawn RNG and snapshot support
//! - [`animation`]: renderer-side tile animation state

pub mod animation;
pub mod game;
pub mod grid;

pub use animation::{AnimationTicket, TileAnimation, TileAnimator};
pub use game::{Game2048, MoveOutcome, Snapshot2048, TileChange, START_TILES};
pub use grid::{is_game_over, slide, spawn_random_tile, Grid, MoveResult, SIZE};
