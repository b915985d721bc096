use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{GameId, GameRng, RandomSource};
use crate::error::{ArcadeError, Result};
use crate::rules::{ArcadeGame, GameStatus};

/// Memory configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Distinct symbols; the deck holds two cards of each.
    pub pairs: usize,
    /// How long a mismatched pair stays face up before `conceal`.
    pub conceal_delay_ms: u64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self { pairs: 8, conceal_delay_ms: 1000 }
    }
}

impl MemoryConfig {
    pub fn with_pairs(mut self, pairs: usize) -> Self {
        self.pairs = pairs;
        self
    }

    #[must_use]
    pub fn conceal_delay(&self) -> Duration {
        Duration::from_millis(self.conceal_delay_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.pairs == 0 {
            return Err(ArcadeError::Config("memory needs at least one pair".to_string()));
        }
        Ok(())
    }
}

/// One card of the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub symbol: u8,
    pub face_up: bool,
    pub matched: bool,
}

/// What a single flip did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Locked board, card already showing, or the run is over.
    Ignored,
    /// First card of a pair turned over.
    First,
    /// Second card matched the first; both stay face up.
    Matched { first: usize, second: usize },
    /// Second card differs; the board stays locked until `conceal`.
    Mismatched { first: usize, second: usize },
}

#[derive(Clone, Debug)]
struct TableState {
    cards: Vec<Card>,
    /// First card of the pair being turned.
    open: Option<usize>,
    /// Mismatched pair waiting to be turned back.
    pending: Option<(usize, usize)>,
    moves: u32,
    status: GameStatus,
}

impl TableState {
    fn shuffled<R: RandomSource>(pairs: usize, rng: &mut R) -> Self {
        let mut cards: Vec<Card> = (0..pairs)
            .flat_map(|s| {
                let card = Card { symbol: s as u8, face_up: false, matched: false };
                [card, card]
            })
            .collect();
        rng.shuffle(&mut cards);
        Self { cards, open: None, pending: None, moves: 0, status: GameStatus::Playing }
    }
}

/// A pair-matching run. Its score is the number of pair attempts.
#[derive(Clone, Debug)]
pub struct MemoryGame<R: RandomSource = GameRng> {
    config: MemoryConfig,
    rng: R,
    state: TableState,
}

impl<R: RandomSource> MemoryGame<R> {
    pub fn new(config: MemoryConfig, mut rng: R) -> Result<Self> {
        config.validate()?;
        if config.pairs > usize::from(u8::MAX) + 1 {
            return Err(ArcadeError::Config(format!("memory supports at most 256 pairs, got {}", config.pairs)));
        }
        let state = TableState::shuffled(config.pairs, &mut rng);
        Ok(Self { config, rng, state })
    }

    /// Lay out an explicit deck of symbols, for replays and tests.
    pub fn with_symbols(symbols: &[u8], rng: R) -> Result<Self> {
        let mut counts = [0u8; 256];
        for &s in symbols {
            counts[usize::from(s)] = counts[usize::from(s)].saturating_add(1);
        }
        if symbols.is_empty() || counts.iter().any(|&n| n != 0 && n != 2) {
            return Err(ArcadeError::InvalidBoard("every symbol must appear exactly twice".to_string()));
        }
        let cards = symbols
            .iter()
            .map(|&symbol| Card { symbol, face_up: false, matched: false })
            .collect();
        let config = MemoryConfig { pairs: symbols.len() / 2, ..MemoryConfig::default() };
        let state = TableState { cards, open: None, pending: None, moves: 0, status: GameStatus::Playing };
        Ok(Self { config, rng, state })
    }

    /// Turn over the card at `index`.
    pub fn flip(&mut self, index: usize) -> Result<FlipOutcome> {
        let len = self.state.cards.len();
        let card = *self.state.cards.get(index).ok_or(ArcadeError::IndexOutOfRange { index, len })?;
        if self.is_locked() || self.state.status.is_over() || card.face_up || card.matched {
            return Ok(FlipOutcome::Ignored);
        }

        self.state.cards[index].face_up = true;
        let Some(first) = self.state.open.take() else {
            self.state.open = Some(index);
            return Ok(FlipOutcome::First);
        };

        self.state.moves += 1;
        if self.state.cards[first].symbol == card.symbol {
            self.state.cards[first].matched = true;
            self.state.cards[index].matched = true;
            debug!(first, second = index, moves = self.state.moves, "pair matched");
            if self.state.cards.iter().all(|c| c.matched) {
                self.state.status = GameStatus::Won;
                info!(moves = self.state.moves, "memory cleared");
            }
            Ok(FlipOutcome::Matched { first, second: index })
        } else {
            self.state.pending = Some((first, index));
            Ok(FlipOutcome::Mismatched { first, second: index })
        }
    }

    /// Turn a mismatched pair face down and unlock the board.
    ///
    /// Returns `false` if nothing was pending.
    pub fn conceal(&mut self) -> bool {
        let Some((a, b)) = self.state.pending.take() else {
            return false;
        };
        self.state.cards[a].face_up = false;
        self.state.cards[b].face_up = false;
        true
    }

    /// A mismatched pair is still showing.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.state.pending.is_some()
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.state.moves
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.state.cards
    }

    #[must_use]
    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }
}

impl<R: RandomSource> ArcadeGame for MemoryGame<R> {
    fn game_id(&self) -> GameId {
        GameId::Memory
    }

    fn score(&self) -> u32 {
        self.state.moves
    }

    fn status(&self) -> GameStatus {
        self.state.status
    }

    fn restart(&mut self) {
        self.state = TableState::shuffled(self.config.pairs, &mut self.rng);
        info!("memory restarted");
    }

    /// Only a cleared table gives a meaningful move count.
    fn is_recordable(&self) -> bool {
        self.state.status == GameStatus::Won
    }
}
