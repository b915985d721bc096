//! Named score tables shared between players.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{GameId, ScoreRanking};
use crate::error::Result;

/// One leaderboard row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub score: u32,
}

impl ScoreRecord {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self { name: name.into(), score }
    }
}

/// Remote table backend: append a row, read the top rows.
pub trait Leaderboard {
    fn insert(&mut self, game: GameId, record: ScoreRecord) -> Result<()>;

    /// At most `limit` rows, best first under the game's ranking.
    fn select_top(&self, game: GameId, limit: usize) -> Result<Vec<ScoreRecord>>;
}

/// Leaderboard held in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryLeaderboard {
    tables: FxHashMap<GameId, Vec<ScoreRecord>>,
}

impl MemoryLeaderboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Leaderboard for MemoryLeaderboard {
    fn insert(&mut self, game: GameId, record: ScoreRecord) -> Result<()> {
        self.tables.entry(game).or_default().push(record);
        Ok(())
    }

    fn select_top(&self, game: GameId, limit: usize) -> Result<Vec<ScoreRecord>> {
        let mut rows = self.tables.get(&game).cloned().unwrap_or_default();
        // Stable: equal scores keep submission order.
        match game.ranking() {
            ScoreRanking::HigherIsBetter => rows.sort_by(|a, b| b.score.cmp(&a.score)),
            ScoreRanking::LowerIsBetter => rows.sort_by_key(|r| r.score),
        }
        rows.truncate(limit);
        Ok(rows)
    }
}
