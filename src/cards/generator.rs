//! Card generation.
//!
//! `CardGenerator` is the seam where an integrator plugs in their own deck
//! logic. `RandomCardGenerator` is the seeded default: it picks a kind by
//! weight and rolls a payload from the configured ranges.

use log::trace;

use super::card::{Card, CardKind};
use crate::core::{CardWeights, GameRng, GameRngState, SessionConfig};

/// Source of cards, two of which are drawn every played turn.
pub trait CardGenerator {
    /// Produce the next card.
    fn generate(&mut self) -> Card;
}

impl<F> CardGenerator for F
where
    F: FnMut() -> Card,
{
    fn generate(&mut self) -> Card {
        self()
    }
}

/// Tag given to cards drawn from the `unknown` weight.
pub const UNKNOWN_TAG: &str = "Unknown";

/// Seeded, weighted card generator.
#[derive(Clone, Debug)]
pub struct RandomCardGenerator {
    rng: GameRng,
    weights: CardWeights,
    operator_range: (i64, i64),
    state_range: (i64, i64),
}

impl RandomCardGenerator {
    /// Create a generator with default weights and ranges.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::from_config(&SessionConfig::new(Vec::<String>::new()).with_seed(seed))
    }

    /// Create a generator from a session config.
    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            rng: GameRng::new(config.seed),
            weights: config.card_weights,
            operator_range: config.operator_range,
            state_range: config.state_range,
        }
    }

    /// Current RNG state, for checkpointing draws.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.checkpoint()
    }

    /// Resume drawing from a captured RNG state.
    pub fn restore(&mut self, state: &GameRngState) {
        self.rng = GameRng::resume(state);
    }

    fn roll(&mut self, (min, max): (i64, i64)) -> i64 {
        self.rng.roll(min, max)
    }
}

impl CardGenerator for RandomCardGenerator {
    fn generate(&mut self) -> Card {
        let card = match self.rng.pick_weighted(&self.weights.as_array()) {
            Some(1) => Card::state(self.roll(self.state_range)),
            Some(2) => Card::measurement(),
            Some(3) => Card::new(CardKind::Unknown(UNKNOWN_TAG.to_string()), &[]),
            // Operator is also the fallback for degenerate weights.
            _ => Card::operator(self.roll(self.operator_range)),
        };
        trace!("generated {}", card);
        card
    }
}
