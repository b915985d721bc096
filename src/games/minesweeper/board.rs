//! Mine board: placement, adjacency counts and flood-fill reveal.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::RandomSource;
use crate::error::{ArcadeError, Result};

/// One square of the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub has_mine: bool,
    pub revealed: bool,
    pub flagged: bool,
    /// Mines among the up to 8 neighbours. Zero for mined cells.
    pub adjacent_mines: u8,
}

/// Up to 8 neighbouring coordinates.
pub type Neighbors = SmallVec<[(usize, usize); 8]>;

/// Rectangular mine board, row-major.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    cols: usize,
    mine_count: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Place `mine_count` mines by rejection sampling, then count neighbours.
    pub fn generate<R: RandomSource + ?Sized>(
        rows: usize,
        cols: usize,
        mine_count: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let mut board = Self::empty(rows, cols)?;
        if mine_count > rows * cols {
            return Err(ArcadeError::Config(format!(
                "{mine_count} mines do not fit on a {rows}x{cols} board"
            )));
        }

        let mut placed = 0;
        while placed < mine_count {
            let r = rng.gen_index(rows);
            let c = rng.gen_index(cols);
            let cell = &mut board.cells[r * cols + c];
            if !cell.has_mine {
                cell.has_mine = true;
                placed += 1;
            }
        }
        board.mine_count = mine_count;
        board.count_adjacent();
        Ok(board)
    }

    /// Build a board with mines at exactly the given cells.
    ///
    /// Duplicate coordinates are counted once.
    pub fn with_mines(rows: usize, cols: usize, mines: &[(usize, usize)]) -> Result<Self> {
        let mut board = Self::empty(rows, cols)?;
        for &(r, c) in mines {
            let idx = board.index(r, c)?;
            board.cells[idx].has_mine = true;
        }
        board.mine_count = board.cells.iter().filter(|c| c.has_mine).count();
        board.count_adjacent();
        Ok(board)
    }

    fn empty(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(ArcadeError::Config(format!("board must be non-empty, got {rows}x{cols}")));
        }
        Ok(Self {
            rows,
            cols,
            mine_count: 0,
            cells: vec![Cell::default(); rows * cols],
        })
    }

    fn count_adjacent(&mut self) {
        for r in 0..self.rows {
            for c in 0..self.cols {
                let idx = r * self.cols + c;
                if self.cells[idx].has_mine {
                    self.cells[idx].adjacent_mines = 0;
                    continue;
                }
                let count = self
                    .neighbors(r, c)
                    .into_iter()
                    .filter(|&(nr, nc)| self.cells[nr * self.cols + nc].has_mine)
                    .count();
                self.cells[idx].adjacent_mines = count as u8;
            }
        }
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(ArcadeError::OutOfBounds { row, col, rows: self.rows, cols: self.cols });
        }
        Ok(row * self.cols + col)
    }

    /// In-bounds neighbours of `(row, col)`, clipped at the edges.
    #[must_use]
    pub fn neighbors(&self, row: usize, col: usize) -> Neighbors {
        let mut out = Neighbors::new();
        for dr in -1i64..=1 {
            for dc in -1i64..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let nr = row as i64 + dr;
                let nc = col as i64 + dc;
                if nr >= 0 && nc >= 0 && (nr as usize) < self.rows && (nc as usize) < self.cols {
                    out.push((nr as usize, nc as usize));
                }
            }
        }
        out
    }

    /// Reveal a cell; a zero cell opens its whole connected zero region
    /// plus that region's numbered border.
    ///
    /// No-op on a revealed or flagged cell. Returns every cell newly
    /// revealed, the clicked one first. Uses an explicit stack, so large
    /// boards cannot overflow the call stack.
    pub fn reveal(&mut self, row: usize, col: usize) -> Result<Vec<(usize, usize)>> {
        let idx = self.index(row, col)?;
        let start = self.cells[idx];
        if start.revealed || start.flagged {
            return Ok(Vec::new());
        }

        self.cells[idx].revealed = true;
        let mut opened = vec![(row, col)];
        if start.has_mine || start.adjacent_mines > 0 {
            return Ok(opened);
        }

        let mut stack = vec![(row, col)];
        while let Some((r, c)) = stack.pop() {
            for (nr, nc) in self.neighbors(r, c) {
                let cell = &mut self.cells[nr * self.cols + nc];
                if cell.revealed || cell.flagged || cell.has_mine {
                    continue;
                }
                cell.revealed = true;
                opened.push((nr, nc));
                if cell.adjacent_mines == 0 {
                    stack.push((nr, nc));
                }
            }
        }
        Ok(opened)
    }

    /// Flip the flag on an unrevealed cell. Returns the new flag state.
    pub fn toggle_flag(&mut self, row: usize, col: usize) -> Result<bool> {
        let idx = self.index(row, col)?;
        let cell = &mut self.cells[idx];
        if !cell.revealed {
            cell.flagged = !cell.flagged;
        }
        Ok(cell.flagged)
    }

    /// Every non-mine cell is revealed.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.cells.iter().all(|c| c.revealed || c.has_mine)
    }

    pub fn get(&self, row: usize, col: usize) -> Result<&Cell> {
        let idx = self.index(row, col)?;
        Ok(&self.cells[idx])
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    #[must_use]
    pub fn flags_placed(&self) -> usize {
        self.cells.iter().filter(|c| c.flagged).count()
    }

    /// Revealed cells that are not mines.
    #[must_use]
    pub fn safe_revealed(&self) -> usize {
        self.cells.iter().filter(|c| c.revealed && !c.has_mine).count()
    }

    /// Iterate rows as slices, for rendering.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols)
    }
}
