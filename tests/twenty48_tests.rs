//! 2048 move laws and full-game behaviour.

use proptest::prelude::*;

use arcade_engines::core::{Direction, GameRng};
use arcade_engines::games::twenty48::{is_game_over, slide, Game2048, Grid, TileChange};
use arcade_engines::rules::{ArcadeGame, GameStatus};

fn tile() -> impl Strategy<Value = u32> {
    prop_oneof![
        3 => Just(0u32),
        2 => (1u32..=11).prop_map(|exp| 1 << exp),
    ]
}

fn grid() -> impl Strategy<Value = Grid> {
    prop::array::uniform4(prop::array::uniform4(tile())).prop_map(Grid::from_rows)
}

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn tile_count(grid: &Grid) -> usize {
    grid.rows().iter().flatten().filter(|&&v| v != 0).count()
}

// =============================================================================
// Scenarios
// =============================================================================

/// A pair of equal tiles merges once toward the wall.
#[test]
fn test_pair_merges_left() {
    let grid = Grid::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
    let result = slide(&grid, Direction::Left);

    assert_eq!(result.grid.rows()[0], [4, 0, 0, 0]);
    assert_eq!(result.score_gained, 4);
    assert!(result.moved);
}

/// Each column slides on its own when moving vertically.
#[test]
fn test_columns_slide_independently() {
    let grid = Grid::from_rows([[2, 4, 0, 0], [2, 0, 0, 0], [4, 4, 0, 0], [4, 0, 0, 8]]);
    let result = slide(&grid, Direction::Up);

    assert_eq!(result.grid.rows()[0], [4, 8, 0, 8]);
    assert_eq!(result.grid.rows()[1], [8, 0, 0, 0]);
    assert_eq!(result.score_gained, 4 + 8 + 8);
}

/// The same seed and moves give the same game.
#[test]
fn test_seeded_games_repeat() {
    let play = |seed| {
        let mut game = Game2048::new(GameRng::new(seed));
        for dir in [Direction::Left, Direction::Down, Direction::Right, Direction::Up].repeat(20) {
            game.apply_move(dir);
        }
        game.snapshot()
    };
    assert_eq!(play(7), play(7));
}

/// Random play always reaches a finished board.
#[test]
fn test_game_eventually_ends() {
    let mut game = Game2048::new(GameRng::new(11));
    for _ in 0..100_000 {
        if game.status().is_over() {
            break;
        }
        if !Direction::ALL.iter().any(|&d| game.apply_move(d).moved) {
            break;
        }
    }
    assert_eq!(game.status(), GameStatus::Lost);
    assert!(is_game_over(game.grid()));
    assert!(game.max_tile() >= 16);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Merging moves value between cells without creating or destroying it.
    #[test]
    fn prop_slide_conserves_sum(grid in grid(), dir in direction()) {
        let result = slide(&grid, dir);
        prop_assert_eq!(result.grid.sum(), grid.sum());
    }

    /// A full move adds exactly the spawned tile on top of the slide.
    #[test]
    fn prop_move_adds_only_spawned_value(grid in grid(), dir in direction(), seed in any::<u64>()) {
        let mut game = Game2048::with_grid(grid, 0, GameRng::new(seed)).unwrap();
        let outcome = game.apply_move(dir);
        prop_assume!(outcome.moved);

        let spawned: u64 = outcome
            .changes
            .iter()
            .filter_map(|c| match *c {
                TileChange::Spawned { value, .. } => Some(u64::from(value)),
                TileChange::Merged { .. } => None,
            })
            .sum();
        prop_assert!(spawned == 2 || spawned == 4);
        prop_assert_eq!(game.grid().sum(), grid.sum() + spawned);
        prop_assert_eq!(game.score(), outcome.score_gained);
    }

    /// Each merge consumes exactly two tiles.
    #[test]
    fn prop_single_merge(grid in grid(), dir in direction()) {
        let result = slide(&grid, dir);
        let merges = result.merged_cells().count();
        prop_assert_eq!(tile_count(&result.grid), tile_count(&grid) - merges);

        let merged_total: u32 = result.merged_cells().map(|(r, c)| result.grid.get(r, c)).sum();
        prop_assert_eq!(merged_total, result.score_gained);
    }

    /// A blocked move changes nothing and spawns nothing.
    #[test]
    fn prop_blocked_move_is_stable(grid in grid(), dir in direction(), seed in any::<u64>()) {
        // Slide until nothing moves, so `dir` is blocked.
        let mut grid = grid;
        loop {
            let result = slide(&grid, dir);
            if !result.moved {
                break;
            }
            grid = result.grid;
        }
        let mut game = Game2048::with_grid(grid, 17, GameRng::new(seed)).unwrap();

        let outcome = game.apply_move(dir);
        prop_assert!(!outcome.moved);
        prop_assert!(outcome.changes.is_empty());
        prop_assert_eq!(*game.grid(), grid);
        prop_assert_eq!(game.score(), 17);
    }

    /// Tiles stay zero or a power of two no smaller than 2.
    #[test]
    fn prop_tiles_stay_well_formed(grid in grid(), dirs in prop::collection::vec(direction(), 1..40), seed in any::<u64>()) {
        let mut game = Game2048::with_grid(grid, 0, GameRng::new(seed)).unwrap();
        for dir in dirs {
            game.apply_move(dir);
            prop_assert!(game.grid().is_well_formed());
        }
    }

    /// A board is over exactly when it is full with no equal neighbours.
    #[test]
    fn prop_game_over_matches_definition(grid in grid()) {
        let stuck = Direction::ALL.iter().all(|&d| !slide(&grid, d).moved);
        prop_assert_eq!(is_game_over(&grid), stuck && !grid.has_empty_cell());
    }
}
