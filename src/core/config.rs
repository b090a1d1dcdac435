//! Session configuration.
//!
//! A `SessionConfig` carries everything needed to seat a table and drive the
//! default card generator:
//! - Player names, in seat order
//! - RNG seed for card draws
//! - Card kind weights and payload ranges
//!
//! Configs are plain serde values; `from_json` loads one from a JSON document.

use serde::{Deserialize, Serialize};

use super::player::{MAX_PLAYERS, MIN_PLAYERS};
use crate::error::{QDutchError, Result};

/// Relative likelihood of each card kind being generated.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardWeights {
    pub operator: f32,
    pub state: f32,
    pub measurement: f32,
    /// Cards with an unrecognized tag. Zero in normal play.
    #[serde(default)]
    pub unknown: f32,
}

impl CardWeights {
    /// Weights in `CardKind` order: operator, state, measurement, unknown.
    #[must_use]
    pub fn as_array(&self) -> [f32; 4] {
        [self.operator, self.state, self.measurement, self.unknown]
    }
}

impl Default for CardWeights {
    fn default() -> Self {
        Self {
            operator: 1.0,
            state: 1.0,
            measurement: 1.0,
            unknown: 0.0,
        }
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Player names in seat order (2-4).
    pub player_names: Vec<String>,

    /// Seed for the default card generator.
    #[serde(default)]
    pub seed: u64,

    /// Value every slot starts with.
    #[serde(default)]
    pub initial_slot_value: i64,

    /// Card kind weights for the default generator.
    #[serde(default)]
    pub card_weights: CardWeights,

    /// Inclusive range of operator payloads.
    #[serde(default = "default_operator_range")]
    pub operator_range: (i64, i64),

    /// Inclusive range of state payloads.
    #[serde(default = "default_state_range")]
    pub state_range: (i64, i64),
}

fn default_operator_range() -> (i64, i64) {
    (-3, 3)
}

fn default_state_range() -> (i64, i64) {
    (0, 9)
}

impl SessionConfig {
    /// Create a configuration for the given players with default settings.
    pub fn new<I, S>(player_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            player_names: player_names.into_iter().map(Into::into).collect(),
            seed: 0,
            initial_slot_value: 0,
            card_weights: CardWeights::default(),
            operator_range: default_operator_range(),
            state_range: default_state_range(),
        }
    }

    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the starting slot value.
    #[must_use]
    pub fn with_initial_slot_value(mut self, value: i64) -> Self {
        self.initial_slot_value = value;
        self
    }

    /// Set the card kind weights.
    #[must_use]
    pub fn with_card_weights(mut self, weights: CardWeights) -> Self {
        self.card_weights = weights;
        self
    }

    /// Set the operator payload range (inclusive).
    #[must_use]
    pub fn with_operator_range(mut self, min: i64, max: i64) -> Self {
        self.operator_range = (min, max);
        self
    }

    /// Set the state payload range (inclusive).
    #[must_use]
    pub fn with_state_range(mut self, min: i64, max: i64) -> Self {
        self.state_range = (min, max);
        self
    }

    /// Number of seated players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_names.len()
    }

    /// Check the configuration before any turn is played.
    pub fn validate(&self) -> Result<()> {
        let count = self.player_count();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(QDutchError::InvalidPlayerCount(count));
        }

        if let Some(seat) = self.player_names.iter().position(|n| n.trim().is_empty()) {
            return Err(QDutchError::InvalidConfig(format!(
                "seat {} has a blank name",
                seat
            )));
        }

        let weights = self.card_weights.as_array();
        let total: f32 = weights.iter().sum();
        let bad_weight = weights.iter().any(|w| !w.is_finite() || *w < 0.0);
        if bad_weight || !total.is_finite() || total <= 0.0 {
            return Err(QDutchError::InvalidConfig(
                "card weights must be non-negative with a finite, positive total".to_string(),
            ));
        }

        for (name, (min, max)) in [("operator", self.operator_range), ("state", self.state_range)] {
            if min > max {
                return Err(QDutchError::InvalidConfig(format!(
                    "{} range {}..={} is empty",
                    name, min, max
                )));
            }
        }

        Ok(())
    }
}
