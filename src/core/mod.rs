//! Core table types: seats, slots, RNG, configuration.
//!
//! These are the building blocks every other module works with. Nothing in
//! here knows about turns or cards.

pub mod player;
pub mod slot;
pub mod rng;
pub mod config;

pub use player::{Player, PlayerId, Roster, MAX_PLAYERS, MIN_PLAYERS};
pub use slot::{Slot, SlotTarget, SLOTS_PER_HAND};
pub use rng::{GameRng, GameRngState};
pub use config::{CardWeights, SessionConfig};
