//! Round state machine.
//!
//! Decides, before each turn, whether the game has ended, and moves play
//! around the table after each turn:
//! - `AwaitingTurn` → `TurnInProgress` → `AwaitingTurn` (next seat)
//! - `GameEnded` once the Dutch caller's seat comes up one rotation later
//!
//! The round never looks at cards or slots.

mod state;

pub use state::{DutchCall, RoundPhase, RoundState, TurnStart};
