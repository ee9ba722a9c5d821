//! Deterministic random number generation for dealing decks.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces the same deals
//! - **Forkable**: Each round gets its own independent stream
//! - **Serializable**: O(1) state capture and restore
//!
//! ```
//! use memory_match::core::DeckRng;
//!
//! let mut rng = DeckRng::new(42);
//! let mut round_one = rng.fork();
//!
//! let mut a = vec![1, 2, 3, 4, 5, 6, 7, 8];
//! round_one.shuffle(&mut a);
//!
//! // Same seed, same fork counter: same deal
//! let mut rng2 = DeckRng::new(42);
//! let mut b = vec![1, 2, 3, 4, 5, 6, 7, 8];
//! rng2.fork().shuffle(&mut b);
//! assert_eq!(a, b);
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Golden-ratio increment used to spread fork seeds.
const FORK_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seeded RNG used for shuffling.
///
/// Uses ChaCha8: fast, and the shuffle is uniform (Fisher-Yates over a
/// full-quality stream).
#[derive(Clone, Debug)]
pub struct DeckRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl DeckRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Create an RNG seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork an independent stream.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(FORK_STRIDE));
        Self::new(fork_seed)
    }

    /// Shuffle a slice in place (uniform Fisher-Yates).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> DeckRngState {
        DeckRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &DeckRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// Serializable RNG state, enough to reproduce the next deals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position
    pub word_pos: u128,
    /// Forks taken so far
    pub fork_counter: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shuffled(rng: &mut DeckRng) -> Vec<u32> {
        let mut data: Vec<u32> = (0..16).collect();
        rng.shuffle(&mut data);
        data
    }

    #[test]
    fn test_determinism() {
        let mut rng1 = DeckRng::new(42);
        let mut rng2 = DeckRng::new(42);

        for _ in 0..10 {
            assert_eq!(shuffled(&mut rng1), shuffled(&mut rng2));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = DeckRng::new(1);
        let mut rng2 = DeckRng::new(2);

        assert_ne!(shuffled(&mut rng1), shuffled(&mut rng2));
    }

    #[test]
    fn test_fork_produces_different_sequence() {
        let mut rng = DeckRng::new(42);
        let mut first = rng.fork();
        let mut second = rng.fork();

        assert_ne!(shuffled(&mut first), shuffled(&mut second));
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut rng1 = DeckRng::new(42);
        let mut rng2 = DeckRng::new(42);

        let forked1 = rng1.fork();
        let forked2 = rng2.fork();

        assert_eq!(forked1.seed(), forked2.seed());
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = DeckRng::new(42);
        let mut data = shuffled(&mut rng);

        assert_ne!(data, (0..16).collect::<Vec<_>>());
        data.sort_unstable();
        assert_eq!(data, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn test_state_restore() {
        let mut rng = DeckRng::new(42);
        let _ = shuffled(&mut rng);
        let _ = rng.fork();

        let state = rng.state();
        let expected = shuffled(&mut rng);

        let mut restored = DeckRng::from_state(&state);
        assert_eq!(shuffled(&mut restored), expected);
        assert_eq!(restored.state().fork_counter, 1);
    }

    #[test]
    fn test_state_serde() {
        let state = DeckRngState {
            seed: 42,
            word_pos: 12345,
            fork_counter: 5,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: DeckRngState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }
}
