//! # qdutch
//!
//! Turn engine and round state machine for QDutch, a turn-based card game
//! for 2-4 players.
//!
//! ## The Game
//!
//! Every player holds four face-down slots. On your turn you either:
//!
//! - **Play**: draw two cards, keep one, and apply it to any slot at the
//!   table (operator, state or measurement), or
//! - **Declare Dutch**: draw nothing; the game ends when play comes back to
//!   you one full rotation later.
//!
//! ## Design Principles
//!
//! 1. **Engine, not physics**: The engine decides whose turn it is, what
//!    input is legal, and which handler a card goes to. What a card does to a
//!    slot belongs to an `EffectHandler`; where cards come from belongs to a
//!    `CardGenerator`.
//!
//! 2. **Resumable turns**: A turn is an explicit state machine. A UI loop can
//!    feed it one input at a time and inspect what it is waiting for.
//!
//! 3. **Deterministic**: Same config, seed and inputs give the same game.
//!
//! ## Modules
//!
//! - `core`: Seats, slots, roster, RNG, configuration
//! - `cards`: Cards and card generation
//! - `effects`: Targeting and effect dispatch
//! - `turn`: Per-turn resolver
//! - `round`: Turn order and Dutch termination
//! - `session`: Top-level driver and controller traits

pub mod core;
pub mod cards;
pub mod effects;
pub mod turn;
pub mod round;
pub mod session;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    CardWeights, GameRng, GameRngState, Player, PlayerId, Roster, SessionConfig, Slot, SlotTarget,
    MAX_PLAYERS, MIN_PLAYERS, SLOTS_PER_HAND,
};

pub use crate::cards::{Card, CardData, CardGenerator, CardKind, RandomCardGenerator};

pub use crate::effects::{
    EffectHandler, EffectOutcome, EffectResolver, StandardEffects, TargetKind, TargetRequest,
};

pub use crate::turn::{CardChoice, TurnDecision, TurnOutcome, TurnPhase, TurnResolver, TurnStatus};

pub use crate::round::{DutchCall, RoundPhase, RoundState, TurnStart};

pub use crate::session::{
    GameSession, GameSummary, PlayerInput, SessionEvent, SessionObserver, SessionStatus,
    SessionView, TurnController, TurnRecord,
};

pub use crate::error::{QDutchError, Result};
