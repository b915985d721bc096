//! Game identity and top-level configuration.
//!
//! - `GameId`: which game a score or snapshot belongs to
//! - `ScoreRanking`: whether a higher or lower score is better
//! - `ArcadeConfig`: per-game configuration, loadable from JSON
//!
//! Every field of `ArcadeConfig` falls back to the game's defaults, so a
//! config file only needs to mention what it changes. Snake positions that
//! are left out follow the grid size:
//!
//! ```
//! use arcade_engines::core::ArcadeConfig;
//! use arcade_engines::games::snake::Position;
//!
//! let config = ArcadeConfig::from_json_str(r#"{ "snake": { "grid_size": 12 } }"#).unwrap();
//! assert_eq!(config.snake.grid_size, 12);
//! assert_eq!(config.snake.first_food, Position::new(7, 4));
//! assert_eq!(config.flap.gap_height, 150.0);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ArcadeError, Result};
use crate::games::flap::FlapConfig;
use crate::games::memory::MemoryConfig;
use crate::games::minesweeper::BoardParams;
use crate::games::shooter::ShooterConfig;
use crate::games::snake::SnakeConfig;

/// Identifies a game for score keeping and persistence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameId {
    Twenty48,
    Minesweeper,
    Snake,
    Flap,
    Shooter,
    Memory,
}

/// Direction in which scores improve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreRanking {
    HigherIsBetter,
    LowerIsBetter,
}

impl ScoreRanking {
    /// Does `candidate` beat `current`? Ties never do.
    #[must_use]
    pub fn improves(self, candidate: u32, current: u32) -> bool {
        match self {
            ScoreRanking::HigherIsBetter => candidate > current,
            ScoreRanking::LowerIsBetter => candidate < current,
        }
    }
}

impl GameId {
    pub const ALL: [GameId; 6] = [
        GameId::Twenty48,
        GameId::Minesweeper,
        GameId::Snake,
        GameId::Flap,
        GameId::Shooter,
        GameId::Memory,
    ];

    /// Stable storage key prefix.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            GameId::Twenty48 => "game2048",
            GameId::Minesweeper => "minesweeper",
            GameId::Snake => "snake",
            GameId::Flap => "flappy-bird",
            GameId::Shooter => "space-shooter",
            GameId::Memory => "memory",
        }
    }

    /// Memory is scored in moves taken, so fewer is better.
    #[must_use]
    pub const fn ranking(self) -> ScoreRanking {
        match self {
            GameId::Memory => ScoreRanking::LowerIsBetter,
            _ => ScoreRanking::HigherIsBetter,
        }
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Configuration for every engine in the collection.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    /// Seed for the root RNG; each game forks its own stream from it.
    pub seed: u64,
    pub minesweeper: BoardParams,
    pub snake: SnakeConfig,
    pub flap: FlapConfig,
    pub shooter: ShooterConfig,
    pub memory: MemoryConfig,
}

impl ArcadeConfig {
    /// Parse a JSON document and validate every section.
    ///
    /// Malformed JSON is reported as [`ArcadeError::Config`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| ArcadeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Check every per-game section.
    pub fn validate(&self) -> Result<()> {
        self.minesweeper.validate()?;
        self.snake.validate()?;
        self.flap.validate()?;
        self.shooter.validate()?;
        self.memory.validate()?;
        Ok(())
    }

    /// Set the root seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::Position;

    #[test]
    fn test_ranking() {
        assert!(ScoreRanking::HigherIsBetter.improves(5, 4));
        assert!(!ScoreRanking::HigherIsBetter.improves(4, 4));
        assert!(ScoreRanking::LowerIsBetter.improves(12, 14));
        assert!(!ScoreRanking::LowerIsBetter.improves(14, 14));
        assert_eq!(GameId::Memory.ranking(), ScoreRanking::LowerIsBetter);
        assert_eq!(GameId::Snake.ranking(), ScoreRanking::HigherIsBetter);
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<_> = GameId::ALL.iter().map(|g| g.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), GameId::ALL.len());
    }

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = ArcadeConfig::from_json_str("{}").unwrap();
        assert_eq!(config.seed, 0);
        assert_eq!(config.snake.grid_size, 20);
        assert_eq!(config.minesweeper.rows, 9);
    }

    #[test]
    fn test_invalid_section_is_rejected() {
        let err = ArcadeConfig::from_json_str(r#"{ "minesweeper": { "rows": 2, "cols": 2, "mines": 9 } }"#);
        assert!(matches!(err, Err(ArcadeError::Config(_))));
    }

    #[test]
    fn test_malformed_json_is_a_config_error() {
        assert!(matches!(ArcadeConfig::from_json_str("{ not json"), Err(ArcadeError::Config(_))));
        assert!(matches!(ArcadeConfig::from_json_str(r#"{ "seed": "x" }"#), Err(ArcadeError::Config(_))));
    }

    #[test]
    fn test_snake_grid_alone_places_start_and_food() {
        let config = ArcadeConfig::from_json_str(r#"{ "snake": { "grid_size": 6 } }"#).unwrap();
        assert_eq!(config.snake.start, Position::new(2, 2));
        assert_eq!(config.snake.first_food, Position::new(3, 2));

        let json = r#"{ "snake": { "grid_size": 6, "start": { "x": 0, "y": 5 } } }"#;
        let config = ArcadeConfig::from_json_str(json).unwrap();
        assert_eq!(config.snake.start, Position::new(0, 5));
        assert_eq!(config.snake.first_food, Position::new(3, 2));
    }

    #[test]
    fn test_roundtrip() {
        let config = ArcadeConfig::default().with_seed(99);
        let json = serde_json::to_string(&config).unwrap();
        let parsed = ArcadeConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed.seed, 99);
    }
}
