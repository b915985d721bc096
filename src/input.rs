//! Raw input to engine commands.
//!
//! Front ends translate their own events into [`Key`], [`Pointer`] or a
//! swipe vector, and this module decides what each one means for a game.
//! Anything a game does not use maps to `None`.

use serde::{Deserialize, Serialize};

use crate::core::{Direction, GameId};

/// Minimum swipe length, in pixels, on the dominant axis.
pub const SWIPE_THRESHOLD: f32 = 30.0;

/// A key press, already decoded from the platform's key codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    Char(char),
}

/// Pointer button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pointer {
    Primary,
    Secondary,
}

/// What an input asks the game to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Move(Direction),
    Flap,
    Fire,
    Reveal { row: usize, col: usize },
    ToggleFlag { row: usize, col: usize },
}

/// Arrow keys and WASD, case-insensitive.
fn key_direction(key: Key) -> Option<Direction> {
    match key {
        Key::Up => Some(Direction::Up),
        Key::Down => Some(Direction::Down),
        Key::Left => Some(Direction::Left),
        Key::Right => Some(Direction::Right),
        Key::Char(c) => match c.to_ascii_lowercase() {
            'w' => Some(Direction::Up),
            's' => Some(Direction::Down),
            'a' => Some(Direction::Left),
            'd' => Some(Direction::Right),
            _ => None,
        },
        Key::Space => None,
    }
}

/// Map a key press for `game`.
#[must_use]
pub fn map_key(game: GameId, key: Key) -> Option<Command> {
    match game {
        GameId::Twenty48 | GameId::Snake => key_direction(key).map(Command::Move),
        GameId::Flap => (key == Key::Space).then_some(Command::Flap),
        GameId::Shooter => match key {
            Key::Space => Some(Command::Fire),
            _ => key_direction(key).filter(|d| d.is_horizontal()).map(Command::Move),
        },
        GameId::Minesweeper | GameId::Memory => None,
    }
}

/// Map a pointer press for `game`. `cell` is the board cell under the
/// pointer, when the front end has a board.
#[must_use]
pub fn map_pointer(game: GameId, button: Pointer, cell: Option<(usize, usize)>) -> Option<Command> {
    match (game, button) {
        (GameId::Minesweeper, Pointer::Primary) => cell.map(|(row, col)| Command::Reveal { row, col }),
        (GameId::Minesweeper, Pointer::Secondary) => cell.map(|(row, col)| Command::ToggleFlag { row, col }),
        (GameId::Flap, Pointer::Primary) => Some(Command::Flap),
        (GameId::Shooter, Pointer::Primary) => Some(Command::Fire),
        _ => None,
    }
}

/// Direction of a touch swipe from its start-to-end vector.
///
/// Swipes shorter than [`SWIPE_THRESHOLD`] on both axes are ignored. Ties
/// between the axes resolve vertically.
#[must_use]
pub fn swipe(dx: f32, dy: f32) -> Option<Direction> {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ax < SWIPE_THRESHOLD && ay < SWIPE_THRESHOLD {
        return None;
    }
    Some(match (ax > ay, dx > 0.0, dy > 0.0) {
        (true, true, _) => Direction::Right,
        (true, false, _) => Direction::Left,
        (false, _, true) => Direction::Down,
        (false, _, false) => Direction::Up,
    })
}
