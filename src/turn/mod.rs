//! Turn resolution.
//!
//! A turn is a short, resumable sequence of player inputs:
//!
//! 1. Declare Dutch **or** play
//! 2. (play) Choose one of two drawn cards
//! 3. (play, targeting card) Choose a slot
//!
//! The `TurnResolver` keeps the partial turn between inputs, so a UI loop can
//! feed it one event at a time. Each step returns a `TurnStatus` saying what
//! it needs next.

mod resolver;

pub use resolver::{TurnPhase, TurnResolver};

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::SlotTarget;
use crate::effects::{EffectOutcome, TargetRequest};
use crate::error::{QDutchError, Result};

/// First decision of every turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnDecision {
    /// End the game one rotation from now instead of drawing.
    Declare,
    /// Draw two cards and play one.
    Play,
}

/// A player's pick between the two offered cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardChoice {
    /// Position in the offer (0 or 1).
    Index(usize),
    /// The card itself; must equal one of the offered cards.
    Card(Card),
}

impl CardChoice {
    /// Resolve the choice to a position in `offered`.
    ///
    /// Anything that is not one of the two offered cards is rejected.
    pub fn locate(&self, offered: &[Card; 2]) -> Result<usize> {
        match self {
            CardChoice::Index(i) if *i < offered.len() => Ok(*i),
            CardChoice::Index(_) => Err(QDutchError::CardNotOffered),
            CardChoice::Card(card) => offered
                .iter()
                .position(|c| c == card)
                .ok_or(QDutchError::CardNotOffered),
        }
    }
}

/// How a completed turn went.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// The player declared Dutch; no card was drawn.
    DeclaredDutch,
    /// The player played a card.
    Played { card: Card, effect: EffectOutcome },
}

impl TurnOutcome {
    /// Was this turn a Dutch declaration?
    #[must_use]
    pub fn is_dutch(&self) -> bool {
        matches!(self, TurnOutcome::DeclaredDutch)
    }

    /// The slot this turn changed, if any.
    #[must_use]
    pub fn target(&self) -> Option<SlotTarget> {
        match self {
            TurnOutcome::DeclaredDutch => None,
            TurnOutcome::Played { effect, .. } => effect.target(),
        }
    }
}

/// What the resolver needs next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnStatus {
    /// No turn is running.
    Idle,
    /// Waiting for declare-or-play.
    WaitingForDecision,
    /// Waiting for a card choice.
    WaitingForCardChoice,
    /// Waiting for a slot target.
    WaitingForTarget(TargetRequest),
    /// The turn is over; collect it with `take_completed`.
    Complete,
}
