//! Game session: the top-level driver.
//!
//! A `GameSession` owns the table, the round state machine, the turn
//! resolver and both external collaborators (card generator and effect
//! handler). Integrators drive it one of two ways:
//!
//! - **Event-driven**: call `submit` with each `PlayerInput` as the UI
//!   produces it, and read `status` to know what to ask for next.
//! - **Blocking**: call `play_turn` with a `TurnController`; it asks the
//!   controller for every decision until the turn is over.
//!
//! ## Example
//!
//! ```
//! use qdutch::core::{PlayerId, SessionConfig, SlotTarget};
//! use qdutch::session::{GameSession, PlayerInput, SessionStatus};
//! use qdutch::turn::{CardChoice, TurnDecision};
//!
//! let mut session = GameSession::new(SessionConfig::new(["Ada", "Grace"]).with_seed(7)).unwrap();
//!
//! // Ada declares Dutch straight away
//! session.submit(PlayerInput::Decide(TurnDecision::Declare)).unwrap();
//!
//! // Grace gets one last turn
//! session.submit(PlayerInput::Decide(TurnDecision::Play)).unwrap();
//! let status = session.submit(PlayerInput::ChooseCard(CardChoice::Index(0))).unwrap();
//! if let SessionStatus::AwaitingTarget { .. } = status {
//!     session
//!         .submit(PlayerInput::Target(SlotTarget::new(PlayerId::new(1), 0)))
//!         .unwrap();
//! }
//!
//! assert!(session.is_over());
//! ```

mod controller;
mod game;

pub use controller::{SessionObserver, SessionView, TurnController};
pub use game::GameSession;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::{PlayerId, Roster, SlotTarget};
use crate::effects::TargetRequest;
use crate::turn::{CardChoice, TurnDecision, TurnOutcome};

/// One input from the UI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerInput {
    /// Declare Dutch or play.
    Decide(TurnDecision),
    /// Pick one of the offered cards.
    ChooseCard(CardChoice),
    /// Pick the slot for the chosen card.
    Target(SlotTarget),
}

impl PlayerInput {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            PlayerInput::Decide(_) => "declare-or-play",
            PlayerInput::ChooseCard(_) => "card choice",
            PlayerInput::Target(_) => "slot target",
        }
    }
}

/// What the session is waiting for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// `player` must declare Dutch or play.
    AwaitingDecision { player: PlayerId },
    /// `player` must pick one of `offered`.
    AwaitingCardChoice { player: PlayerId, offered: [Card; 2] },
    /// `player` must pick a slot for the chosen card.
    AwaitingTarget {
        player: PlayerId,
        card: Card,
        request: TargetRequest,
    },
    /// Nothing more will happen.
    GameEnded,
}

impl SessionStatus {
    /// Seat whose input is pending, if any.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            SessionStatus::AwaitingDecision { player }
            | SessionStatus::AwaitingCardChoice { player, .. }
            | SessionStatus::AwaitingTarget { player, .. } => Some(*player),
            SessionStatus::GameEnded => None,
        }
    }
}

/// Notification emitted by the session, in order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Play moved to `player` on rotation `turn_no`.
    TurnAdvanced { player: PlayerId, turn_no: u32 },
    /// The game ended.
    GameEnded,
}

/// A completed turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Seat that played.
    pub player: PlayerId,
    /// Rotation the turn was played on.
    pub turn_no: u32,
    /// What happened.
    pub outcome: TurnOutcome,
}

/// Final state of a finished game, for scoring.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Seat that declared Dutch.
    pub dutch_caller: PlayerId,
    /// Rotation on which the game ended.
    pub ended_on_turn: u32,
    /// Number of turns resolved, declaration included.
    pub turns_played: usize,
    /// Every hand as it stood at the end.
    pub final_table: Roster,
}
