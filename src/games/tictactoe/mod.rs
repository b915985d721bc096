//! Two-player tic-tac-toe on a 3×3 board, indexed 0..9 row-major.
//!
//! Unscored, so it does not take part in score keeping.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ArcadeError, Result};

pub const CELLS: usize = 9;

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Winner(Mark),
    Draw,
}

/// Board and turn state. X always moves first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToe {
    cells: [Option<Mark>; CELLS],
    /// Number of marks placed; the parity gives the side to move.
    placed: usize,
    outcome: Option<Outcome>,
}

impl TicTacToe {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn to_move(&self) -> Mark {
        if self.placed % 2 == 0 {
            Mark::X
        } else {
            Mark::O
        }
    }

    /// Place the current mark at `index`.
    ///
    /// Returns `Ok(false)` on an occupied cell or a finished game.
    pub fn place(&mut self, index: usize) -> Result<bool> {
        let cell = self
            .cells
            .get(index)
            .ok_or(ArcadeError::IndexOutOfRange { index, len: CELLS })?;
        if cell.is_some() || self.outcome.is_some() {
            return Ok(false);
        }

        let mark = self.to_move();
        self.cells[index] = Some(mark);
        self.placed += 1;
        self.outcome = self.evaluate();
        debug!(index, ?mark, outcome = ?self.outcome, "mark placed");
        Ok(true)
    }

    fn evaluate(&self) -> Option<Outcome> {
        let winner = LINES.iter().find_map(|&[a, b, c]| match self.cells[a] {
            Some(m) if self.cells[b] == Some(m) && self.cells[c] == Some(m) => Some(m),
            _ => None,
        });
        match winner {
            Some(mark) => Some(Outcome::Winner(mark)),
            None if self.placed == CELLS => Some(Outcome::Draw),
            None => None,
        }
    }

    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[must_use]
    pub fn cells(&self) -> &[Option<Mark>; CELLS] {
        &self.cells
    }

    pub fn restart(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(moves: &[usize]) -> TicTacToe {
        let mut game = TicTacToe::new();
        for &m in moves {
            assert!(game.place(m).unwrap());
        }
        game
    }

    #[test]
    fn test_x_starts_and_turns_alternate() {
        let mut game = TicTacToe::new();
        assert_eq!(game.to_move(), Mark::X);
        game.place(4).unwrap();
        assert_eq!(game.to_move(), Mark::O);
        assert_eq!(game.cells()[4], Some(Mark::X));
    }

    #[test]
    fn test_diagonal_win() {
        let game = play(&[0, 1, 4, 2, 8]);
        assert_eq!(game.outcome(), Some(Outcome::Winner(Mark::X)));
    }

    #[test]
    fn test_draw() {
        // X O X / X O O / O X X
        let game = play(&[0, 1, 2, 4, 3, 5, 7, 6, 8]);
        assert_eq!(game.outcome(), Some(Outcome::Draw));
    }

    #[test]
    fn test_occupied_and_finished_are_noops() {
        let mut game = play(&[0, 3, 1, 4, 2]);
        assert_eq!(game.outcome(), Some(Outcome::Winner(Mark::X)));
        assert!(!game.place(8).unwrap());

        let mut game = play(&[0]);
        assert!(!game.place(0).unwrap());
        assert_eq!(game.to_move(), Mark::O);
    }

    #[test]
    fn test_out_of_range() {
        let mut game = TicTacToe::new();
        assert!(game.place(9).is_err());
    }

    #[test]
    fn test_restart() {
        let mut game = play(&[0, 3, 1, 4, 2]);
        game.restart();
        assert_eq!(game, TicTacToe::new());
    }
}
