//! 4×4 tile grid and the slide-and-merge transition.
//!
//! Every direction is reduced to a single "slide left" pass: the grid is
//! rotated clockwise 0/1/2/3 times (left/down/right/up), each row is
//! compacted and merged, and the result is rotated back.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Direction, RandomSource};

/// Side length of the grid.
pub const SIZE: usize = 4;

/// Probability that a spawned tile is a 2 rather than a 4.
pub const TWO_PROBABILITY: f64 = 0.9;

/// A cell coordinate `(row, col)`.
pub type Cell = (usize, usize);

/// Square grid of tile values; `0` is an empty cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    cells: [[u32; SIZE]; SIZE],
}

impl Grid {
    pub const EMPTY: Grid = Grid { cells: [[0; SIZE]; SIZE] };

    #[must_use]
    pub const fn from_rows(cells: [[u32; SIZE]; SIZE]) -> Self {
        Self { cells }
    }

    #[must_use]
    pub fn rows(&self) -> &[[u32; SIZE]; SIZE] {
        &self.cells
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.cells[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: u32) {
        self.cells[row][col] = value;
    }

    /// Empty cells in row-major order.
    #[must_use]
    pub fn empty_cells(&self) -> SmallVec<[Cell; SIZE * SIZE]> {
        let mut out = SmallVec::new();
        for (r, row) in self.cells.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                if v == 0 {
                    out.push((r, c));
                }
            }
        }
        out
    }

    #[must_use]
    pub fn has_empty_cell(&self) -> bool {
        self.cells.iter().flatten().any(|&v| v == 0)
    }

    /// Sum of every tile.
    #[must_use]
    pub fn sum(&self) -> u64 {
        self.cells.iter().flatten().map(|&v| u64::from(v)).sum()
    }

    #[must_use]
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Every non-empty value is a power of two no smaller than 2.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.cells
            .iter()
            .flatten()
            .all(|&v| v == 0 || (v >= 2 && v.is_power_of_two()))
    }
}

/// Result of sliding a grid in one direction, before any tile spawns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveResult {
    pub grid: Grid,
    /// At least one cell differs from the input.
    pub moved: bool,
    /// Sum of every merged value.
    pub score_gained: u32,
    merged: [[bool; SIZE]; SIZE],
}

impl MoveResult {
    /// Did the tile now at `(row, col)` come from a merge?
    #[must_use]
    pub fn was_merged(&self, row: usize, col: usize) -> bool {
        self.merged[row][col]
    }

    /// Cells holding a freshly merged tile, row-major.
    pub fn merged_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..SIZE)
            .flat_map(|r| (0..SIZE).map(move |c| (r, c)))
            .filter(|&(r, c)| self.merged[r][c])
    }
}

fn rotate_cw<T: Copy + Default>(cells: &[[T; SIZE]; SIZE]) -> [[T; SIZE]; SIZE] {
    let mut out = [[T::default(); SIZE]; SIZE];
    for (r, row) in cells.iter().enumerate() {
        for (c, &v) in row.iter().enumerate() {
            out[c][SIZE - 1 - r] = v;
        }
    }
    out
}

fn rotate_times<T: Copy + Default>(cells: [[T; SIZE]; SIZE], turns: usize) -> [[T; SIZE]; SIZE] {
    (0..turns % 4).fold(cells, |acc, _| rotate_cw(&acc))
}

/// Clockwise quarter turns that bring `dir` onto "left".
const fn turns_for(dir: Direction) -> usize {
    match dir {
        Direction::Left => 0,
        Direction::Down => 1,
        Direction::Right => 2,
        Direction::Up => 3,
    }
}

/// Compact one row to the left and merge equal neighbours once.
///
/// A tile produced by a merge is never merged again in the same pass,
/// so `[2, 2, 4, 0]` becomes `[4, 4, 0, 0]`, not `[8, 0, 0, 0]`.
fn slide_row_left(row: [u32; SIZE]) -> ([u32; SIZE], [bool; SIZE], u32) {
    let mut out = [0u32; SIZE];
    let mut merged = [false; SIZE];
    let mut gained = 0u32;
    let mut next = 0usize;
    let mut pending: Option<u32> = None;

    for value in row.into_iter().filter(|&v| v != 0) {
        match pending {
            Some(p) if p == value => {
                let sum = p + value;
                out[next] = sum;
                merged[next] = true;
                gained += sum;
                next += 1;
                pending = None;
            }
            Some(p) => {
                out[next] = p;
                next += 1;
                pending = Some(value);
            }
            None => pending = Some(value),
        }
    }
    if let Some(p) = pending {
        out[next] = p;
    }

    (out, merged, gained)
}

/// Slide every tile in `dir`, merging equal neighbours once.
///
/// Pure: no tile is spawned here.
#[must_use]
pub fn slide(grid: &Grid, dir: Direction) -> MoveResult {
    let turns = turns_for(dir);
    let rotated = rotate_times(grid.cells, turns);

    let mut cells = [[0u32; SIZE]; SIZE];
    let mut merged = [[false; SIZE]; SIZE];
    let mut score_gained = 0u32;
    for (r, row) in rotated.iter().enumerate() {
        let (new_row, row_merged, gained) = slide_row_left(*row);
        cells[r] = new_row;
        merged[r] = row_merged;
        score_gained += gained;
    }

    let back = (4 - turns) % 4;
    let result = Grid::from_rows(rotate_times(cells, back));
    MoveResult {
        moved: result != *grid,
        grid: result,
        score_gained,
        merged: rotate_times(merged, back),
    }
}

/// No empty cell and no direction changes the grid.
#[must_use]
pub fn is_game_over(grid: &Grid) -> bool {
    !grid.has_empty_cell() && Direction::ALL.iter().all(|&dir| !slide(grid, dir).moved)
}

/// Place a 2 (90%) or 4 (10%) on a uniformly chosen empty cell.
///
/// Returns the cell and value, or `None` when the grid is full.
pub fn spawn_random_tile<R: RandomSource + ?Sized>(grid: &mut Grid, rng: &mut R) -> Option<(Cell, u32)> {
    let empties = grid.empty_cells();
    if empties.is_empty() {
        return None;
    }
    let cell = empties[rng.gen_index(empties.len())];
    let value = if rng.gen_bool(TWO_PROBABILITY) { 2 } else { 4 };
    grid.set(cell.0, cell.1, value);
    Some((cell, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SequenceRng;

    #[test]
    fn test_slide_row_single_pass() {
        assert_eq!(slide_row_left([2, 2, 0, 0]).0, [4, 0, 0, 0]);
        assert_eq!(slide_row_left([2, 2, 2, 0]).0, [4, 2, 0, 0]);
        assert_eq!(slide_row_left([2, 2, 2, 2]).0, [4, 4, 0, 0]);
        assert_eq!(slide_row_left([2, 2, 4, 0]).0, [4, 4, 0, 0]);
        assert_eq!(slide_row_left([0, 4, 0, 4]).0, [8, 0, 0, 0]);
        assert_eq!(slide_row_left([2, 4, 8, 16]).0, [2, 4, 8, 16]);
    }

    #[test]
    fn test_slide_row_score_and_flags() {
        let (_, merged, gained) = slide_row_left([4, 4, 8, 8]);
        assert_eq!(gained, 24);
        assert_eq!(merged, [true, true, false, false]);
    }

    #[test]
    fn test_four_rotations_identity() {
        let grid = Grid::from_rows([[2, 4, 0, 8], [0, 0, 16, 0], [32, 0, 0, 2], [0, 64, 0, 0]]);
        assert_eq!(rotate_times(grid.cells, 4), grid.cells);
        assert_eq!(rotate_times(rotate_times(grid.cells, 1), 3), grid.cells);
    }

    #[test]
    fn test_slide_each_direction() {
        let grid = Grid::from_rows([[2, 0, 0, 2], [0, 0, 0, 0], [0, 0, 0, 0], [2, 0, 0, 0]]);

        let left = slide(&grid, Direction::Left);
        assert_eq!(left.grid.rows()[0], [4, 0, 0, 0]);
        assert_eq!(left.grid.rows()[3], [2, 0, 0, 0]);
        assert!(left.moved);

        let right = slide(&grid, Direction::Right);
        assert_eq!(right.grid.rows()[0], [0, 0, 0, 4]);
        assert_eq!(right.grid.rows()[3], [0, 0, 0, 2]);

        let down = slide(&grid, Direction::Down);
        assert_eq!(down.grid.rows()[3], [4, 0, 0, 2]);
        assert_eq!(down.score_gained, 4);
        assert!(down.was_merged(3, 0));

        let up = slide(&grid, Direction::Up);
        assert_eq!(up.grid.rows()[0], [4, 0, 0, 2]);
        assert_eq!(up.merged_cells().collect::<Vec<_>>(), vec![(0, 0)]);
    }

    #[test]
    fn test_blocked_slide_does_not_move() {
        let grid = Grid::from_rows([[2, 4, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        let result = slide(&grid, Direction::Left);
        assert!(!result.moved);
        assert_eq!(result.grid, grid);
        assert_eq!(result.score_gained, 0);
    }

    #[test]
    fn test_game_over_detection() {
        let stuck = Grid::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(is_game_over(&stuck));

        let mergeable = Grid::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 4]]);
        assert!(!is_game_over(&mergeable));

        assert!(!is_game_over(&Grid::EMPTY));
    }

    #[test]
    fn test_spawn_uses_rng() {
        let mut grid = Grid::EMPTY;
        // Index 0.99 * 16 -> last cell; 0.95 >= 0.9 -> a four.
        let mut rng = SequenceRng::new(vec![0.99, 0.95]);
        let spawned = spawn_random_tile(&mut grid, &mut rng);
        assert_eq!(spawned, Some(((3, 3), 4)));
        assert_eq!(grid.get(3, 3), 4);
    }

    #[test]
    fn test_spawn_on_full_grid() {
        let mut grid = Grid::from_rows([[2; SIZE]; SIZE]);
        let mut rng = SequenceRng::constant(0.0);
        assert_eq!(spawn_random_tile(&mut grid, &mut rng), None);
    }

    #[test]
    fn test_well_formed() {
        assert!(Grid::from_rows([[2, 4, 0, 2048], [0; 4], [0; 4], [0; 4]]).is_well_formed());
        assert!(!Grid::from_rows([[3, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).is_well_formed());
        assert!(!Grid::from_rows([[1, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).is_well_formed());
    }
}
