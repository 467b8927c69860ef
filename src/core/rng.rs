//! Deterministic random number generation for chance events.
//!
//! The engines never touch an ambient global generator: dice redraws go
//! through a `SimRng` owned by the simulator, so a seeded simulator
//! replays the same chance outcomes every run.
//!
//! ## Rollout usage
//!
//! A simulator copy carries an exact copy of its RNG and therefore replays
//! the same dice as its source. Search code that wants divergent rollout
//! branches forks explicitly:
//!
//! ```
//! use adversim::core::SimRng;
//!
//! let mut rng = SimRng::new(42);
//! let mut branch = rng.fork();
//!
//! // Original and fork produce different sequences
//! let a: Vec<u8> = (0..10).map(|_| rng.roll_die()).collect();
//! let b: Vec<u8> = (0..10).map(|_| branch.roll_die()).collect();
//! assert_ne!(a, b);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::agent::AgentId;

/// Number of faces on a die.
pub const DIE_FACES: u8 = 6;

/// Deterministic RNG with forking for rollout branches.
///
/// Uses ChaCha8 for speed while keeping high-quality randomness.
#[derive(Clone, Debug)]
pub struct SimRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl SimRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Create an RNG seeded from OS entropy, for non-reproducible play.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence: the
    /// n-th fork of two RNGs built from the same seed is identical.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Roll a single die: uniform in 1..=DIE_FACES.
    pub fn roll_die(&mut self) -> u8 {
        self.inner.gen_range(1..=DIE_FACES)
    }

    /// Roll both dice for one turn.
    pub fn roll_dice(&mut self) -> [u8; 2] {
        [self.roll_die(), self.roll_die()]
    }

    /// Pick one of the two agents uniformly.
    pub fn coin_flip(&mut self) -> AgentId {
        AgentId::new(self.inner.gen_range(0..2))
    }

    /// Generate a random usize in the given range.
    pub fn gen_range(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> SimRngState {
        SimRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &SimRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// Serializable RNG state.
///
/// Uses the ChaCha8 word position for O(1) capture regardless of how many
/// values have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimRngState {
    /// Original seed.
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter).
    pub word_pos: u128,
    /// Fork counter for deterministic branching.
    pub fork_counter: u64,
}
