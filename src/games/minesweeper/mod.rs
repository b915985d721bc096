//! Minesweeper: mine placement, adjacency counts and flood-fill reveal.

mod board;
mod game;

pub use board::{Board, Cell, Neighbors};
pub use game::{BoardParams, Difficulty, Minesweeper, RevealOutcome};
