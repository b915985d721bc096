//! Memory: find every pair in a shuffled deck in as few attempts as possible.
//!
//! A mismatched pair locks the table until `conceal` is called. The caller
//! schedules that after `MemoryConfig::conceal_delay`, normally through
//! `Session::run_deferred` so a restarted table is never touched by the old
//! run's timer.

mod game;

pub use game::{Card, FlipOutcome, MemoryConfig, MemoryGame};
