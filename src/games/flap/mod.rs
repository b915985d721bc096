//! Side-scrolling flap game: one body under gravity threading gaps between
//! pipes.
//!
//! ## Integration
//!
//! Each `tick(dt)` uses semi-implicit Euler: the velocity is updated first
//! and the new velocity moves the body. Obstacles move left at a constant
//! speed, are spawned at the right edge on a timer and discarded from the
//! front once fully off-screen.
//!
//! ```
//! use arcade_engines::core::SequenceRng;
//! use arcade_engines::games::flap::{FlapConfig, FlapGame};
//! use arcade_engines::rules::RealtimeEngine;
//!
//! let config = FlapConfig::default().with_gravity(1600.0);
//! let mut game = FlapGame::in_flight(config, 200.0, 0.0, SequenceRng::constant(0.5)).unwrap();
//! game.tick(0.1);
//! assert!((game.body().y - 216.0).abs() < 1e-3);
//! ```

mod game;

pub use game::{FlapConfig, FlapGame, Obstacle};
