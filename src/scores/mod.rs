//! Score keeping: best scores in a key-value store, named runs on a
//! leaderboard, and the saved 2048 run.
//!
//! Games never talk to a backend directly. They go through
//! [`ScoreStore`], whose [`ScoreBook`] implementation logs and swallows
//! every backend failure so a broken store cannot interrupt play.

mod book;
mod leaderboard;
mod snapshot;
mod store;

pub use book::{best_key, ScoreBook, ScoreStore, SubmitOutcome, DEFAULT_LIST_LIMIT};
pub use leaderboard::{Leaderboard, MemoryLeaderboard, ScoreRecord};
pub use snapshot::{clear_snapshot, load_snapshot, save_snapshot, SNAPSHOT_KEY};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
