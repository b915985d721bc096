//! Minesweeper run: board, difficulty and win/loss tracking.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{GameId, GameRng, RandomSource};
use crate::error::{ArcadeError, Result};
use crate::rules::{ArcadeGame, GameStatus};

use super::board::Board;

/// Standard board presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub const fn params(self) -> BoardParams {
        match self {
            Difficulty::Easy => BoardParams { rows: 9, cols: 9, mines: 10 },
            Difficulty::Medium => BoardParams { rows: 16, cols: 16, mines: 40 },
            Difficulty::Hard => BoardParams { rows: 16, cols: 30, mines: 99 },
        }
    }
}

/// Board dimensions and mine count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardParams {
    pub rows: usize,
    pub cols: usize,
    pub mines: usize,
}

impl Default for BoardParams {
    fn default() -> Self {
        Difficulty::Easy.params()
    }
}

impl BoardParams {
    /// Non-empty board with room for every mine.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ArcadeError::Config("minesweeper board must be non-empty".to_string()));
        }
        if self.mines > self.rows * self.cols {
            return Err(ArcadeError::Config(format!(
                "{} mines do not fit on a {}x{} board",
                self.mines, self.rows, self.cols
            )));
        }
        Ok(())
    }
}

impl From<Difficulty> for BoardParams {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.params()
    }
}

/// Result of a reveal click.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealOutcome {
    /// Newly revealed cells, the clicked one first.
    pub revealed: Vec<(usize, usize)>,
    pub status: GameStatus,
}

/// A Minesweeper run.
#[derive(Clone, Debug)]
pub struct Minesweeper<R: RandomSource = GameRng> {
    params: BoardParams,
    rng: R,
    board: Board,
    status: GameStatus,
}

impl<R: RandomSource> Minesweeper<R> {
    /// Generate a fresh board.
    pub fn new(params: impl Into<BoardParams>, mut rng: R) -> Result<Self> {
        let params = params.into();
        params.validate()?;
        let board = Board::generate(params.rows, params.cols, params.mines, &mut rng)?;
        Ok(Self { params, rng, board, status: GameStatus::Playing })
    }

    /// Play on a prepared board.
    pub fn with_board(board: Board, rng: R) -> Self {
        let params = BoardParams { rows: board.rows(), cols: board.cols(), mines: board.mine_count() };
        Self { params, rng, board, status: GameStatus::Playing }
    }

    /// Reveal a cell. Hitting a mine loses; clearing every safe cell wins.
    ///
    /// No-op once the run is over or on a flagged/revealed cell.
    pub fn reveal(&mut self, row: usize, col: usize) -> Result<RevealOutcome> {
        if self.status.is_over() {
            // Still reject bad coordinates.
            self.board.get(row, col)?;
            return Ok(RevealOutcome { revealed: Vec::new(), status: self.status });
        }

        let revealed = self.board.reveal(row, col)?;
        if revealed.is_empty() {
            return Ok(RevealOutcome { revealed, status: self.status });
        }

        if self.board.get(row, col)?.has_mine {
            self.status = GameStatus::Lost;
            info!(row, col, "minesweeper mine hit");
        } else if self.board.is_cleared() {
            self.status = GameStatus::Won;
            info!(rows = self.params.rows, cols = self.params.cols, "minesweeper board cleared");
        }
        debug!(row, col, opened = revealed.len(), "minesweeper reveal");

        Ok(RevealOutcome { revealed, status: self.status })
    }

    /// Flip a flag. Returns the new flag state; no-op after the run ends.
    pub fn toggle_flag(&mut self, row: usize, col: usize) -> Result<bool> {
        if self.status.is_over() {
            return Ok(self.board.get(row, col)?.flagged);
        }
        self.board.toggle_flag(row, col)
    }

    /// Start over with a different board size.
    pub fn change_difficulty(&mut self, params: impl Into<BoardParams>) -> Result<()> {
        let params = params.into();
        params.validate()?;
        self.params = params;
        self.restart();
        Ok(())
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn params(&self) -> BoardParams {
        self.params
    }

    /// Mines minus flags placed; negative when over-flagged.
    #[must_use]
    pub fn mines_remaining(&self) -> i64 {
        self.board.mine_count() as i64 - self.board.flags_placed() as i64
    }
}

impl<R: RandomSource> ArcadeGame for Minesweeper<R> {
    fn game_id(&self) -> GameId {
        GameId::Minesweeper
    }

    /// Safe cells uncovered so far.
    fn score(&self) -> u32 {
        self.board.safe_revealed() as u32
    }

    fn status(&self) -> GameStatus {
        self.status
    }

    fn restart(&mut self) {
        // Params are validated on every path that sets them.
        match Board::generate(self.params.rows, self.params.cols, self.params.mines, &mut self.rng) {
            Ok(board) => {
                self.board = board;
                self.status = GameStatus::Playing;
                info!(rows = self.params.rows, cols = self.params.cols, mines = self.params.mines, "minesweeper restarted");
            }
            Err(err) => tracing::error!(%err, "minesweeper restart failed"),
        }
    }

    fn is_recordable(&self) -> bool {
        self.status == GameStatus::Won
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(Difficulty::Hard.params(), BoardParams { rows: 16, cols: 30, mines: 99 });
        assert_eq!(BoardParams::default(), Difficulty::Easy.params());
    }

    #[test]
    fn test_loss_on_mine() {
        let board = Board::with_mines(1, 3, &[(0, 1)]).unwrap();
        let mut game = Minesweeper::with_board(board, GameRng::new(1));

        let outcome = game.reveal(0, 1).unwrap();
        assert_eq!(outcome.status, GameStatus::Lost);
        assert_eq!(outcome.revealed, vec![(0, 1)]);

        // Frozen after the loss.
        assert!(game.reveal(0, 0).unwrap().revealed.is_empty());
        assert!(!game.board().get(0, 0).unwrap().revealed);
    }

    #[test]
    fn test_win_without_flags() {
        let board = Board::with_mines(1, 3, &[(0, 1)]).unwrap();
        let mut game = Minesweeper::with_board(board, GameRng::new(1));

        assert_eq!(game.reveal(0, 0).unwrap().status, GameStatus::Playing);
        assert_eq!(game.reveal(0, 2).unwrap().status, GameStatus::Won);
        assert!(game.is_recordable());
        assert_eq!(game.score(), 2);
    }

    #[test]
    fn test_flagged_mine_is_safe_to_click() {
        let board = Board::with_mines(1, 3, &[(0, 1)]).unwrap();
        let mut game = Minesweeper::with_board(board, GameRng::new(1));
        assert!(game.toggle_flag(0, 1).unwrap());
        assert_eq!(game.mines_remaining(), 0);
        assert_eq!(game.reveal(0, 1).unwrap().status, GameStatus::Playing);
    }

    #[test]
    fn test_restart_and_difficulty_change() {
        let mut game = Minesweeper::new(Difficulty::Easy, GameRng::new(4)).unwrap();
        game.reveal(4, 4).unwrap();
        game.change_difficulty(Difficulty::Medium).unwrap();

        assert_eq!(game.board().rows(), 16);
        assert_eq!(game.board().mine_count(), 40);
        assert_eq!(game.board().safe_revealed(), 0);
        assert_eq!(game.status(), GameStatus::Playing);
    }

    #[test]
    fn test_invalid_params() {
        let params = BoardParams { rows: 2, cols: 2, mines: 5 };
        assert!(Minesweeper::new(params, GameRng::new(1)).is_err());
    }
}
