//! Deterministic shuffling for pairing.
//!
//! Swiss pairing shuffles each point bracket so that the same standings do
//! not always produce the same (rematch-prone) pairings. The shuffle is
//! injected through `ShuffleSource` so tests can pin the sequence.
//!
//! ```
//! use tcg_tournament::core::{PairingRng, ShuffleSource};
//!
//! let mut a = PairingRng::new(7);
//! let mut b = PairingRng::new(7);
//!
//! let mut x = vec![1, 2, 3, 4, 5, 6];
//! let mut y = x.clone();
//! a.shuffle(&mut x);
//! b.shuffle(&mut y);
//! assert_eq!(x, y);
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of in-place shuffles.
pub trait ShuffleSource {
    /// Shuffle a slice in place.
    fn shuffle<T>(&mut self, items: &mut [T]);
}

/// Seeded ChaCha8 shuffle source.
#[derive(Clone, Debug)]
pub struct PairingRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl PairingRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from OS entropy, for live events where reproducibility is not needed.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Capture the current position for later restoration.
    #[must_use]
    pub fn state(&self) -> PairingRngState {
        PairingRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &PairingRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl ShuffleSource for PairingRng {
    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }
}

/// Serializable RNG position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position
    pub word_pos: u128,
}
