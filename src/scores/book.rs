//! Best-score keeping and leaderboard submission behind one façade.

use tracing::{debug, warn};

use crate::core::GameId;
use crate::error::{ArcadeError, Result};

use super::leaderboard::{Leaderboard, ScoreRecord};
use super::store::KeyValueStore;

/// Rows shown by a leaderboard view.
pub const DEFAULT_LIST_LIMIT: usize = 10;

/// Result of a leaderboard submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    /// Blank player name; nothing was sent.
    EmptyName,
    /// No leaderboard is configured.
    Unavailable,
    /// The backend failed. Gameplay is unaffected.
    Failed,
}

/// Score keeping as seen by the games.
///
/// None of these calls can fail from the caller's point of view: backend
/// errors degrade to "absent", "not recorded", empty lists or
/// [`SubmitOutcome::Failed`].
pub trait ScoreStore {
    fn get_best(&self, game: GameId) -> Option<u32>;

    /// Store `score` as the new best if it beats the stored one under the
    /// game's ranking. Returns whether it was stored.
    fn record_if_better(&mut self, game: GameId, score: u32) -> bool;

    fn submit(&mut self, game: GameId, name: &str, score: u32) -> SubmitOutcome;

    /// Top `limit` rows, best first.
    fn list(&self, game: GameId, limit: usize) -> Vec<ScoreRecord>;
}

/// Key under which a game's best score is stored.
///
/// Snake and memory keep the names their browser versions already use.
#[must_use]
pub fn best_key(game: GameId) -> String {
    match game {
        GameId::Snake => "snakeHighscore".to_owned(),
        GameId::Memory => "memoryBestScore".to_owned(),
        _ => format!("{}_best", game.key()),
    }
}

/// [`ScoreStore`] over a key-value store plus an optional leaderboard.
pub struct ScoreBook<K: KeyValueStore> {
    store: K,
    leaderboard: Option<Box<dyn Leaderboard>>,
}

impl<K: KeyValueStore> ScoreBook<K> {
    pub fn new(store: K) -> Self {
        Self { store, leaderboard: None }
    }

    #[must_use]
    pub fn with_leaderboard(mut self, leaderboard: impl Leaderboard + 'static) -> Self {
        self.leaderboard = Some(Box::new(leaderboard));
        self
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut K {
        &mut self.store
    }

    fn read_best(&self, game: GameId) -> Result<Option<u32>> {
        let Some(raw) = self.store.get(&best_key(game))? else {
            return Ok(None);
        };
        raw.trim()
            .parse()
            .map(Some)
            .map_err(|_| ArcadeError::Store(format!("best score for {game} is not a number: {raw:?}")))
    }
}

impl<K: KeyValueStore> ScoreStore for ScoreBook<K> {
    fn get_best(&self, game: GameId) -> Option<u32> {
        self.read_best(game).unwrap_or_else(|err| {
            warn!(%game, %err, "could not read best score");
            None
        })
    }

    fn record_if_better(&mut self, game: GameId, score: u32) -> bool {
        let current = match self.read_best(game) {
            Ok(current) => current,
            Err(err) => {
                // An unreadable value is replaced.
                warn!(%game, %err, "replacing unreadable best score");
                None
            }
        };
        if current.is_some_and(|best| !game.ranking().improves(score, best)) {
            return false;
        }
        match self.store.set(&best_key(game), &score.to_string()) {
            Ok(()) => {
                debug!(%game, score, "new best score");
                true
            }
            Err(err) => {
                warn!(%game, %err, "could not store best score");
                false
            }
        }
    }

    fn submit(&mut self, game: GameId, name: &str, score: u32) -> SubmitOutcome {
        let name = name.trim();
        if name.is_empty() {
            return SubmitOutcome::EmptyName;
        }
        let Some(board) = self.leaderboard.as_mut() else {
            return SubmitOutcome::Unavailable;
        };
        match board.insert(game, ScoreRecord::new(name, score)) {
            Ok(()) => SubmitOutcome::Submitted,
            Err(err) => {
                warn!(%game, %err, "leaderboard submission failed");
                SubmitOutcome::Failed
            }
        }
    }

    fn list(&self, game: GameId, limit: usize) -> Vec<ScoreRecord> {
        let Some(board) = self.leaderboard.as_ref() else {
            return Vec::new();
        };
        board.select_top(game, limit).unwrap_or_else(|err| {
            warn!(%game, %err, "leaderboard unavailable");
            Vec::new()
        })
    }
}
