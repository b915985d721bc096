//! Vertical shooter: a ship at the bottom of the field fires upwards at
//! targets falling from the top.
//!
//! Hits are resolved mark-then-sweep. A tick flags every hit projectile and
//! target as consumed; the flagged entities stay in place, cannot score
//! again and are removed at the start of the following tick.

mod game;

pub use game::{HitPolicy, Projectile, ShooterConfig, ShooterGame, Target};
