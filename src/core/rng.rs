//! Deterministic random number generation for question generators.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical questions
//! - **Forkable**: Independent streams for separate sessions
//! - **Serializable**: O(1) state capture and restore
//! - **Injectable**: Generators take any `RandomSource`, so tests can
//!   replay a fixed script of draws with `ScriptedRng`
//!
//! ## Usage
//!
//! ```
//! use coin_drill::core::{GameRng, RandomSource};
//!
//! let mut rng = GameRng::new(42);
//! let amounts = [10, 20, 30];
//! let picked = rng.pick(&amounts).copied();
//! assert!(picked.is_some());
//!
//! // Same seed, same draw
//! let mut again = GameRng::new(42);
//! assert_eq!(again.pick(&amounts).copied(), picked);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of uniform draws used by every generator in the crate.
///
/// Implementors only provide `next_index`; everything else is derived
/// from it so that a scripted source controls every decision.
pub trait RandomSource {
    /// Uniform index in `0..len`. Callers guarantee `len > 0`.
    fn next_index(&mut self, len: usize) -> usize;

    /// Uniform integer in `low..=high`.
    fn next_in(&mut self, low: u8, high: u8) -> u8 {
        debug_assert!(low <= high);
        low + self.next_index(usize::from(high - low) + 1) as u8
    }

    /// Fair coin.
    fn coin_flip(&mut self) -> bool {
        self.next_index(2) == 0
    }

    /// Choose a random element from a slice.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.next_index(items.len()))
    }

    /// Fisher-Yates shuffle, walking from the back.
    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_index(i + 1);
            items.swap(i, j);
        }
    }
}

/// Deterministic RNG backed by ChaCha8.
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

    /// Create an RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to create an independent stream.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

impl RandomSource for GameRng {
    fn next_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}

/// Serializable RNG state for checkpointing a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
    /// Fork counter for deterministic branching
    pub fork_counter: u64,
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// Each draw is reduced modulo the requested length, so a script of
/// plain indices reads naturally in tests. An empty script always
/// yields index 0.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    draws: Vec<usize>,
    cursor: usize,
}

impl ScriptedRng {
    /// Create a scripted source from a list of draws.
    pub fn new(draws: impl Into<Vec<usize>>) -> Self {
        Self {
            draws: draws.into(),
            cursor: 0,
        }
    }

    /// Number of draws consumed so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRng {
    fn next_index(&mut self, len: usize) -> usize {
        if self.draws.is_empty() || len == 0 {
            self.cursor += 1;
            return 0;
        }
        let draw = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        draw % len
    }
}
