//! A running game bound to its score store.
//!
//! ## Run generations
//!
//! Every restart starts a new *run generation*. Work scheduled for later
//! (turning back a memory pair, clearing a tile animation) captures a
//! [`RunToken`] when it is scheduled and executes through
//! [`Session::run_deferred`], which drops it if the run it belonged to has
//! since been replaced:
//!
//! ```
//! use arcade_engines::core::SequenceRng;
//! use arcade_engines::games::memory::MemoryGame;
//! use arcade_engines::scores::{MemoryStore, ScoreBook};
//! use arcade_engines::session::Session;
//!
//! let game = MemoryGame::with_symbols(&[0, 1, 0, 1], SequenceRng::constant(0.0)).unwrap();
//! let mut session = Session::new(game, ScoreBook::new(MemoryStore::new()));
//!
//! session.update(|g| g.flip(0)).unwrap();
//! session.update(|g| g.flip(1)).unwrap();
//! let token = session.token();
//!
//! session.restart();
//! // The old run's timer fires after the restart and is ignored.
//! assert_eq!(session.run_deferred(token, |g| g.conceal()), None);
//! ```

use tracing::{debug, info};

use crate::rules::ArcadeGame;
use crate::scores::ScoreStore;

/// Identifies one run of one session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunToken(u64);

impl RunToken {
    /// Token of a session's first run.
    #[must_use]
    pub const fn first() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn generation(self) -> u64 {
        self.0
    }

    #[must_use]
    const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Owns the current game and the score store.
///
/// The best score is offered to the store at most once per run, the first
/// time the game reports itself recordable after a command. Games that
/// record live instead have each new score offered as it appears.
pub struct Session<G: ArcadeGame, S: ScoreStore> {
    game: G,
    store: S,
    run: RunToken,
    /// Last score offered during this run.
    offered: Option<u32>,
}

impl<G: ArcadeGame, S: ScoreStore> Session<G, S> {
    pub fn new(game: G, store: S) -> Self {
        info!(game = %game.game_id(), "session started");
        Self { game, store, run: RunToken::first(), offered: None }
    }

    /// Apply a command or tick to the game.
    pub fn update<T>(&mut self, command: impl FnOnce(&mut G) -> T) -> T {
        let out = command(&mut self.game);
        self.record_progress();
        out
    }

    fn record_progress(&mut self) {
        let (id, score) = (self.game.game_id(), self.game.score());
        if self.game.records_live() {
            if score == 0 || self.offered == Some(score) {
                return;
            }
            self.offered = Some(score);
            if self.store.record_if_better(id, score) {
                debug!(game = %id, score, "new best during run");
            }
            return;
        }

        if self.offered.is_some() || !self.game.is_recordable() {
            return;
        }
        self.offered = Some(score);
        let improved = self.store.record_if_better(id, score);
        info!(game = %id, score, improved, "run finished");
    }

    /// Start a new run of the same game.
    pub fn restart(&mut self) {
        self.game.restart();
        self.begin_run();
    }

    /// Swap in a freshly built game. Returns the previous one.
    pub fn replace(&mut self, game: G) -> G {
        let old = std::mem::replace(&mut self.game, game);
        self.begin_run();
        old
    }

    fn begin_run(&mut self) {
        self.run = self.run.next();
        self.offered = None;
        debug!(game = %self.game.game_id(), generation = self.run.generation(), "new run");
    }

    /// Token of the current run.
    #[must_use]
    pub fn token(&self) -> RunToken {
        self.run
    }

    #[must_use]
    pub fn is_current(&self, token: RunToken) -> bool {
        token == self.run
    }

    /// Run work that was scheduled during the run `token` identifies.
    ///
    /// Returns `None` without touching the game if that run is gone.
    pub fn run_deferred<T>(&mut self, token: RunToken, work: impl FnOnce(&mut G) -> T) -> Option<T> {
        if !self.is_current(token) {
            debug!(stale = token.generation(), current = self.run.generation(), "dropping deferred work");
            return None;
        }
        Some(self.update(work))
    }

    /// Stored best score of this game.
    #[must_use]
    pub fn best(&self) -> Option<u32> {
        self.store.get_best(self.game.game_id())
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Give back the game and the store.
    pub fn into_parts(self) -> (G, S) {
        (self.game, self.store)
    }
}
