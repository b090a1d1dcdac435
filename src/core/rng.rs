//! Seeded randomness for card draws.
//!
//! Everything random in a session goes through one `GameRng`, so a session
//! built from the same config and fed the same inputs draws the same cards.
//!
//! ```
//! use qdutch::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.roll(-5, 5), b.roll(-5, 5));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// ChaCha8 stream tagged with the seed it started from.
#[derive(Clone, Debug)]
pub struct GameRng {
    stream: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            stream: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform value in `min..=max`. A reversed range yields `min`.
    pub fn roll(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        self.stream.gen_range(min..=max)
    }

    /// Pick an index in proportion to `weights`.
    ///
    /// Zero-weight entries are never picked. `None` when nothing has weight
    /// or the weights overflow to a non-finite total.
    pub fn pick_weighted(&mut self, weights: &[f32]) -> Option<usize> {
        let total: f32 = weights.iter().filter(|w| **w > 0.0).sum();
        if !total.is_finite() || total <= 0.0 {
            return None;
        }

        let mut remaining = self.stream.gen_range(0.0..total);
        let mut last = None;
        for (index, weight) in weights.iter().copied().enumerate() {
            if weight.is_nan() || weight <= 0.0 {
                continue;
            }
            if remaining < weight {
                return Some(index);
            }
            remaining -= weight;
            last = Some(index);
        }

        // Rounding can leave a sliver past the final bucket.
        last
    }

    /// Position in the stream, for resuming draws later.
    #[must_use]
    pub fn checkpoint(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.stream.get_word_pos(),
        }
    }

    /// Continue a stream from a checkpoint.
    #[must_use]
    pub fn resume(checkpoint: &GameRngState) -> Self {
        let mut rng = Self::new(checkpoint.seed);
        rng.stream.set_word_pos(checkpoint.word_pos);
        rng
    }
}

/// Saved position of a `GameRng`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u128,
}
