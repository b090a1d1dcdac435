//! Round state: whose turn it is and when the game ends.
//!
//! ## Turn numbering
//!
//! `turn_no` starts at 0 and increments each time play wraps back to seat 0,
//! so it counts full rotations. A Dutch call made during rotation `T` records
//! `T + 1`; the game ends when the caller's seat comes up again with
//! `turn_no == T + 1`, which is exactly one rotation later whatever the
//! caller's seat or the table size.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::error::{QDutchError, Result};

/// Where the round is between inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// The current seat's turn has not started yet.
    AwaitingTurn,
    /// The current seat is mid-turn.
    TurnInProgress,
    /// Terminal. Nothing else happens in this session.
    GameEnded,
}

/// A Dutch declaration. Recorded once, never changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutchCall {
    /// Seat that declared.
    pub player: PlayerId,
    /// Rotation on which the game ends (declaration rotation + 1).
    pub ends_on_turn: u32,
}

/// Result of trying to start the current seat's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnStart {
    /// The seat may play.
    Begin(PlayerId),
    /// The game is over; the turn is not resolved.
    GameEnded,
}

/// Round state machine.
///
/// Owns the turn counter, the current seat and the Dutch call. All
/// transitions are total: a call that makes no sense in the current phase
/// leaves the state unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    player_count: usize,
    turn_no: u32,
    current_player: PlayerId,
    dutch: Option<DutchCall>,
    phase: RoundPhase,
}

impl RoundState {
    /// Create a round for `player_count` seats, starting at seat 0, turn 0.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");

        Self {
            player_count,
            turn_no: 0,
            current_player: PlayerId::new(0),
            dutch: None,
            phase: RoundPhase::AwaitingTurn,
        }
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Completed rotations so far.
    #[must_use]
    pub fn turn_no(&self) -> u32 {
        self.turn_no
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Has the game ended?
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == RoundPhase::GameEnded
    }

    /// The Dutch call, if one was made.
    #[must_use]
    pub fn dutch_call(&self) -> Option<DutchCall> {
        self.dutch
    }

    /// Has anyone declared Dutch?
    #[must_use]
    pub fn dutch_declared(&self) -> bool {
        self.dutch.is_some()
    }

    /// Seat that declared Dutch.
    #[must_use]
    pub fn dutch_declaring_player(&self) -> Option<PlayerId> {
        self.dutch.map(|d| d.player)
    }

    /// Rotation recorded at declaration (declaration rotation + 1).
    #[must_use]
    pub fn dutch_declared_on_turn(&self) -> Option<u32> {
        self.dutch.map(|d| d.ends_on_turn)
    }

    /// Would the current seat's turn end the game?
    #[must_use]
    pub fn reached_end(&self) -> bool {
        self.dutch.is_some_and(|d| {
            d.player == self.current_player && d.ends_on_turn == self.turn_no
        })
    }

    /// Start the current seat's turn, or end the game if Dutch has come round.
    ///
    /// Calling this mid-turn just reports the seat already playing.
    pub fn start_turn(&mut self) -> TurnStart {
        match self.phase {
            RoundPhase::GameEnded => TurnStart::GameEnded,
            RoundPhase::TurnInProgress => TurnStart::Begin(self.current_player),
            RoundPhase::AwaitingTurn if self.reached_end() => {
                info!(
                    "game over: play returned to {} on turn {}",
                    self.current_player, self.turn_no
                );
                self.phase = RoundPhase::GameEnded;
                TurnStart::GameEnded
            }
            RoundPhase::AwaitingTurn => {
                debug!("turn {} starts for {}", self.turn_no, self.current_player);
                self.phase = RoundPhase::TurnInProgress;
                TurnStart::Begin(self.current_player)
            }
        }
    }

    /// Record a Dutch call by the seat currently playing.
    pub fn declare_dutch(&mut self) -> Result<DutchCall> {
        if let Some(existing) = self.dutch {
            return Err(QDutchError::DutchAlreadyDeclared(existing.player));
        }
        if self.phase != RoundPhase::TurnInProgress {
            return Err(QDutchError::UnexpectedInput {
                expected: "a turn in progress",
                got: "Dutch declaration",
            });
        }

        let call = DutchCall {
            player: self.current_player,
            ends_on_turn: self.turn_no + 1,
        };
        info!(
            "{} declares Dutch on turn {}; game ends when they come up on turn {}",
            call.player, self.turn_no, call.ends_on_turn
        );
        self.dutch = Some(call);
        Ok(call)
    }

    /// Finish the current turn and pass play to the next seat.
    ///
    /// Returns the new (seat, turn). Does nothing unless a turn is in
    /// progress.
    pub fn complete_turn(&mut self) -> (PlayerId, u32) {
        if self.phase == RoundPhase::TurnInProgress {
            self.current_player = self.current_player.next(self.player_count);
            if self.current_player.index() == 0 {
                self.turn_no += 1;
            }
            self.phase = RoundPhase::AwaitingTurn;
            debug!("play passes to {} (turn {})", self.current_player, self.turn_no);
        }
        (self.current_player, self.turn_no)
    }

    /// Drop the current turn without advancing; the same seat plays again.
    pub fn abandon_turn(&mut self) -> bool {
        if self.phase == RoundPhase::TurnInProgress {
            self.phase = RoundPhase::AwaitingTurn;
            true
        } else {
            false
        }
    }
}
