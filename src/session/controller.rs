//! Player controller and observer traits.
//!
//! This is the boundary between the engine and whatever drives it (a UI, a
//! test script). The engine asks a `TurnController` whenever a decision is
//! pending and tells a `SessionObserver` when play moves on.

use crate::cards::Card;
use crate::core::{PlayerId, Roster, SlotTarget};
use crate::effects::TargetRequest;
use crate::error::QDutchError;
use crate::round::RoundState;
use crate::turn::{CardChoice, TurnDecision};

use super::GameSummary;

/// Read-only view of the table for controllers.
pub struct SessionView<'a> {
    roster: &'a Roster,
    round: &'a RoundState,
    acting: PlayerId,
}

impl<'a> SessionView<'a> {
    pub(crate) fn new(roster: &'a Roster, round: &'a RoundState, acting: PlayerId) -> Self {
        SessionView {
            roster,
            round,
            acting,
        }
    }

    /// Seat whose decision is pending.
    pub fn acting_player(&self) -> PlayerId {
        self.acting
    }

    /// The table.
    pub fn roster(&self) -> &Roster {
        self.roster
    }

    /// Completed rotations so far.
    pub fn turn_no(&self) -> u32 {
        self.round.turn_no()
    }

    /// Has anyone declared Dutch yet?
    pub fn dutch_declared(&self) -> bool {
        self.round.dutch_declared()
    }

    /// Number of seats.
    pub fn player_count(&self) -> usize {
        self.roster.player_count()
    }
}

/// Makes decisions on behalf of players.
///
/// Every method must eventually return; the engine waits for as long as it
/// takes. Answers the engine rejects (an invalid slot, a card that was not
/// offered, a second Dutch call) are reported through `on_rejected` and the
/// same question is asked again.
pub trait TurnController {
    /// Declare Dutch or play for `player`. Asked first on every turn.
    fn declare_or_play(&mut self, view: &SessionView, player: PlayerId) -> TurnDecision;

    /// Pick one of the two offered cards.
    fn choose_card(&mut self, view: &SessionView, offered: &[Card; 2]) -> CardChoice;

    /// Pick a slot for the chosen card.
    ///
    /// `request.bias` is the seat the UI should default to, if any.
    fn choose_target(&mut self, view: &SessionView, request: TargetRequest) -> SlotTarget;

    /// Called when an answer was rejected, before asking again.
    fn on_rejected(&mut self, _view: &SessionView, _error: &QDutchError) {}
}

/// Receives engine notifications.
pub trait SessionObserver {
    /// Play moved to `player` on rotation `turn_no`.
    fn on_turn_advanced(&mut self, _player: PlayerId, _turn_no: u32) {}

    /// The game reached its end.
    fn on_game_ended(&mut self, _summary: &GameSummary) {}
}
