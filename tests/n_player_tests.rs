//! N-player verification tests.
//!
//! These tests verify that turn order and Dutch termination have no hidden
//! 2-player assumptions and behave the same for every table size from 2 to 4.

use proptest::prelude::*;

use qdutch::core::{PlayerId, SessionConfig, SlotTarget};
use qdutch::round::{RoundState, TurnStart};
use qdutch::session::{GameSession, PlayerInput, SessionEvent, SessionStatus};
use qdutch::turn::{CardChoice, TurnDecision};

fn names(player_count: usize) -> Vec<String> {
    (0..player_count).map(|i| format!("P{i}")).collect()
}

/// Finish whatever turn is running by playing the first card on the acting
/// seat's slot 0.
fn play_out(session: &mut GameSession) -> SessionStatus {
    let mut status = session
        .submit(PlayerInput::Decide(TurnDecision::Play))
        .unwrap();
    loop {
        status = match status {
            SessionStatus::AwaitingCardChoice { .. } => session
                .submit(PlayerInput::ChooseCard(CardChoice::Index(0)))
                .unwrap(),
            SessionStatus::AwaitingTarget { player, .. } => session
                .submit(PlayerInput::Target(SlotTarget::new(player, 0)))
                .unwrap(),
            done => return done,
        };
    }
}

// =============================================================================
// Seat cycling
// =============================================================================

#[test]
fn test_seats_cycle_in_order() {
    for player_count in [2, 3, 4] {
        let mut session = GameSession::new(SessionConfig::new(names(player_count))).unwrap();

        for turn in 0..(player_count * 3) {
            assert_eq!(session.current_player().index(), turn % player_count);
            assert_eq!(session.turn_no() as usize, turn / player_count);
            play_out(&mut session);
        }
    }
}

#[test]
fn test_turn_number_only_moves_on_wrap() {
    let mut round = RoundState::new(4);
    let mut seen = Vec::new();

    for _ in 0..8 {
        assert!(matches!(round.start_turn(), TurnStart::Begin(_)));
        seen.push(round.complete_turn());
    }

    let turns: Vec<u32> = seen.iter().map(|(_, t)| *t).collect();
    assert_eq!(turns, vec![0, 0, 0, 1, 1, 1, 1, 2]);
    assert_eq!(seen[3].0, PlayerId::new(0));
}

#[test]
fn test_every_seat_may_declare() {
    for player_count in [2, 3, 4] {
        for caller in 0..player_count {
            let mut session = GameSession::new(SessionConfig::new(names(player_count))).unwrap();
            for _ in 0..caller {
                play_out(&mut session);
            }

            session
                .submit(PlayerInput::Decide(TurnDecision::Declare))
                .unwrap();
            assert_eq!(
                session.round().dutch_declaring_player(),
                Some(PlayerId::new(caller as u8))
            );

            // Everyone else gets exactly one more turn
            for _ in 0..(player_count - 1) {
                assert!(!session.is_over());
                play_out(&mut session);
            }
            assert!(session.is_over());
            assert_eq!(session.current_player(), PlayerId::new(caller as u8));
            assert_eq!(session.events().last(), Some(&SessionEvent::GameEnded));
        }
    }
}

/// Last seat of a 4-player table declares: the game ends after a full lap
/// that crosses the rotation boundary.
#[test]
fn test_last_seat_dutch_crosses_rotation() {
    let mut session = GameSession::new(SessionConfig::new(names(4))).unwrap();
    for _ in 0..3 {
        play_out(&mut session);
    }

    session
        .submit(PlayerInput::Decide(TurnDecision::Declare))
        .unwrap();
    assert_eq!(session.round().dutch_declared_on_turn(), Some(1));
    assert_eq!(session.turn_no(), 1);

    for seat in 0..3 {
        assert_eq!(session.current_player(), PlayerId::new(seat));
        play_out(&mut session);
    }

    assert!(session.is_over());
    assert_eq!(session.summary().unwrap().ended_on_turn, 1);
    assert_eq!(session.history().len(), 7);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Wherever and whenever Dutch is declared, the game ends exactly one
    /// rotation later on the caller's seat, with N - 1 turns in between.
    #[test]
    fn prop_dutch_ends_after_one_rotation(
        player_count in 2usize..=4,
        caller_seed in 0usize..4,
        rotation in 0usize..3,
        seed in any::<u64>(),
    ) {
        let caller = caller_seed % player_count;
        let config = SessionConfig::new(names(player_count)).with_seed(seed);
        let mut session = GameSession::new(config).unwrap();

        for _ in 0..(rotation * player_count + caller) {
            play_out(&mut session);
        }
        prop_assert_eq!(session.current_player().index(), caller);

        session.submit(PlayerInput::Decide(TurnDecision::Declare)).unwrap();
        let declared_at = session.history().len();

        while !session.is_over() {
            play_out(&mut session);
        }

        prop_assert_eq!(session.history().len() - declared_at, player_count - 1);
        prop_assert_eq!(session.current_player().index(), caller);
        prop_assert_eq!(session.turn_no() as usize, rotation + 1);
    }

    /// Turn counter equals completed laps for any number of plain turns.
    #[test]
    fn prop_turn_no_counts_laps(player_count in 2usize..=4, turns in 0usize..24) {
        let mut round = RoundState::new(player_count);
        for _ in 0..turns {
            prop_assert!(matches!(round.start_turn(), TurnStart::Begin(_)));
            round.complete_turn();
        }

        prop_assert_eq!(round.current_player().index(), turns % player_count);
        prop_assert_eq!(round.turn_no() as usize, turns / player_count);
    }
}
