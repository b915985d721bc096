//! Injected randomness for the engines.
//!
//! Every engine takes its randomness through the [`RandomSource`] trait, so a
//! game is fully determined by its seed and the commands it receives.
//!
//! ## Sources
//!
//! - [`GameRng`]: seeded ChaCha8 stream, forkable per game.
//! - [`SequenceRng`]: replays a fixed list of floats. Used to pin exact
//!   spawn positions in scenario tests.
//!
//! ```
//! use arcade_engines::core::{GameRng, RandomSource};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.gen_index(16), b.gen_index(16));
//!
//! // Independent stream for a second game, still deterministic.
//! let mut snake_rng = a.for_context("snake");
//! assert!(snake_rng.next_f64() < 1.0);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// Uniform random numbers for the engines.
///
/// Only [`next_f64`](RandomSource::next_f64) is required; the remaining
/// methods derive from it. Implementations backed by a real generator should
/// override `gen_index` to avoid float rounding bias.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn gen_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "gen_index on an empty range");
        let scaled = (self.next_f64() * len as f64) as usize;
        scaled.min(len.saturating_sub(1))
    }

    /// `true` with the given probability.
    fn gen_bool(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// Uniform float in `[low, high)`, or `low` when the range is empty.
    fn gen_range_f32(&mut self, low: f32, high: f32) -> f32 {
        if high <= low {
            return low;
        }
        let v = f64::from(low) + (f64::from(high) - f64::from(low)) * self.next_f64();
        // Rounding to f32 can land on `high` itself.
        (v as f32).min(just_below(high)).max(low)
    }

    /// Fisher-Yates shuffle.
    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..slice.len()).rev() {
            let j = self.gen_index(i + 1);
            slice.swap(i, j);
        }
    }
}

/// Deterministic ChaCha8 generator.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }

    /// Create an independent stream for a named context (one per game).
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }
}

impl RandomSource for GameRng {
    fn next_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    fn gen_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }
}

/// Replays a fixed sequence of floats, wrapping around at the end.
///
/// Values are clamped into `[0, 1)`.
#[derive(Clone, Debug)]
pub struct SequenceRng {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceRng {
    /// Create a source that yields `values` in order, cyclically.
    ///
    /// An empty list behaves like a source that always yields `0.0`.
    #[must_use]
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Source that always yields the same value.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceRng {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Largest `f32` strictly less than a finite `x`.
fn just_below(x: f32) -> f32 {
    if x == 0.0 {
        -f32::from_bits(1)
    } else if x > 0.0 {
        f32::from_bits(x.to_bits() - 1)
    } else {
        f32::from_bits(x.to_bits() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_index(1000), rng2.gen_index(1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_index(1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_index(1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_fork_is_deterministic_and_distinct() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        let mut forked1 = rng1.fork();
        let forked2 = rng2.fork();
        assert_eq!(forked1.seed(), forked2.seed());

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_index(1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| forked1.gen_index(1000)).collect();
        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_context_streams() {
        let rng = GameRng::new(42);
        let mut a = rng.for_context("snake");
        let mut b = rng.for_context("shooter");
        let mut a2 = GameRng::new(42).for_context("snake");

        let seq_a: Vec<_> = (0..10).map(|_| a.gen_index(1000)).collect();
        let seq_b: Vec<_> = (0..10).map(|_| b.gen_index(1000)).collect();
        let seq_a2: Vec<_> = (0..10).map(|_| a2.gen_index(1000)).collect();

        assert_ne!(seq_a, seq_b);
        assert_eq!(seq_a, seq_a2);
    }

    #[test]
    fn test_floats_in_unit_interval() {
        let mut rng = GameRng::new(7);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
            let f = rng.gen_range_f32(80.0, 410.0);
            assert!((80.0..410.0).contains(&f));
        }
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = GameRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let original = data.clone();

        rng.shuffle(&mut data);
        assert_ne!(data, original);

        data.sort();
        assert_eq!(data, original);
    }

    #[test]
    fn test_sequence_rng_replays_cyclically() {
        let mut rng = SequenceRng::new(vec![0.0, 0.5, 0.99]);
        assert_eq!(rng.gen_index(4), 0);
        assert_eq!(rng.gen_index(4), 2);
        assert_eq!(rng.gen_index(4), 3);
        assert_eq!(rng.gen_index(4), 0);
    }

    #[test]
    fn test_float_range_excludes_high() {
        let mut rng = SequenceRng::constant(1.0);
        assert!(rng.gen_range_f32(0.0, 1.0) < 1.0);
        assert!(rng.gen_range_f32(80.0, 410.0) < 410.0);
        assert!(rng.gen_range_f32(-5.0, 0.0) < 0.0);
        assert_eq!(rng.gen_range_f32(80.0, 80.0), 80.0);
    }

    #[test]
    fn test_sequence_rng_clamps_one() {
        let mut rng = SequenceRng::constant(1.0);
        assert_eq!(rng.gen_index(3), 2);
        assert!(rng.next_f64() < 1.0);
    }
}
