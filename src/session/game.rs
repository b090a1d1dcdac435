//! The session driver.

use im::Vector;
use log::{debug, info, warn};

use super::controller::{SessionObserver, SessionView, TurnController};
use super::{GameSummary, PlayerInput, SessionEvent, SessionStatus, TurnRecord};
use crate::cards::{CardGenerator, RandomCardGenerator};
use crate::core::{PlayerId, Roster, SessionConfig};
use crate::effects::{EffectHandler, StandardEffects};
use crate::error::{QDutchError, Result};
use crate::round::{RoundState, TurnStart};
use crate::turn::{TurnDecision, TurnOutcome, TurnPhase, TurnResolver};

/// A QDutch game from setup to the end of the round.
pub struct GameSession {
    roster: Roster,
    round: RoundState,
    resolver: TurnResolver,
    cards: Box<dyn CardGenerator>,
    effects: Box<dyn EffectHandler>,
    observers: Vec<Box<dyn SessionObserver>>,
    history: Vector<TurnRecord>,
    events: Vector<SessionEvent>,
    summary: Option<GameSummary>,
}

impl GameSession {
    /// Seat a table with the default seeded card generator and standard
    /// effects.
    pub fn new(config: SessionConfig) -> Result<Self> {
        let cards = RandomCardGenerator::from_config(&config);
        Self::with_collaborators(config, cards, StandardEffects)
    }

    /// Seat a table with custom card generation and effect handling.
    ///
    /// Fails if the config is invalid (e.g. not 2-4 players). The first
    /// turn is started before returning.
    pub fn with_collaborators(
        config: SessionConfig,
        cards: impl CardGenerator + 'static,
        effects: impl EffectHandler + 'static,
    ) -> Result<Self> {
        config.validate()?;
        let roster = Roster::new(config.player_names.iter().cloned(), config.initial_slot_value)?;

        info!(
            "new QDutch session: {} players, seed {}",
            roster.player_count(),
            config.seed
        );

        let mut session = Self {
            round: RoundState::new(roster.player_count()),
            roster,
            resolver: TurnResolver::new(),
            cards: Box::new(cards),
            effects: Box::new(effects),
            observers: Vec::new(),
            history: Vector::new(),
            events: Vector::new(),
            summary: None,
        };
        session.begin_turn()?;
        Ok(session)
    }

    /// Register an observer for turn and game-end notifications.
    pub fn add_observer(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    // === Inspection ===

    /// The table.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The round state machine.
    #[must_use]
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    /// Partial progress of the running turn.
    #[must_use]
    pub fn turn_phase(&self) -> &TurnPhase {
        self.resolver.phase()
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.round.current_player()
    }

    /// Completed rotations so far.
    #[must_use]
    pub fn turn_no(&self) -> u32 {
        self.round.turn_no()
    }

    /// Has the game ended?
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.round.is_over()
    }

    /// Final state, once the game has ended.
    #[must_use]
    pub fn summary(&self) -> Option<&GameSummary> {
        self.summary.as_ref()
    }

    /// Every completed turn, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<TurnRecord> {
        &self.history
    }

    /// Every notification emitted so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &Vector<SessionEvent> {
        &self.events
    }

    /// What the session is waiting for.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        if self.round.is_over() {
            return SessionStatus::GameEnded;
        }

        match self.resolver.phase() {
            TurnPhase::AwaitingCardChoice { player, offered } => SessionStatus::AwaitingCardChoice {
                player: *player,
                offered: offered.clone(),
            },
            TurnPhase::AwaitingTarget {
                player,
                card,
                request,
            } => SessionStatus::AwaitingTarget {
                player: *player,
                card: card.clone(),
                request: *request,
            },
            // Between inputs the resolver only rests in the three waiting
            // phases; the rest mean a turn is about to (re)start.
            TurnPhase::AwaitingDecision { player } | TurnPhase::Complete { player, .. } => {
                SessionStatus::AwaitingDecision { player: *player }
            }
            TurnPhase::Idle => SessionStatus::AwaitingDecision {
                player: self.round.current_player(),
            },
        }
    }

    /// Decisions the current player may make right now.
    ///
    /// Empty unless a declare-or-play decision is pending. `Declare` is
    /// offered only while nobody has declared Dutch.
    #[must_use]
    pub fn legal_decisions(&self) -> Vec<TurnDecision> {
        match self.status() {
            SessionStatus::AwaitingDecision { .. } if self.round.dutch_declared() => {
                vec![TurnDecision::Play]
            }
            SessionStatus::AwaitingDecision { .. } => {
                vec![TurnDecision::Declare, TurnDecision::Play]
            }
            _ => Vec::new(),
        }
    }

    // === Driving ===

    /// Feed one UI input into the running turn.
    ///
    /// Rejected inputs leave the session exactly as it was, so the UI can
    /// simply ask again.
    pub fn submit(&mut self, input: PlayerInput) -> Result<SessionStatus> {
        if self.round.is_over() {
            return Err(QDutchError::GameOver);
        }
        if matches!(self.resolver.phase(), TurnPhase::Idle) {
            self.begin_turn()?;
        }

        let kind = input.name();
        let result = match input {
            PlayerInput::Decide(decision) => self.resolver.decide(
                decision,
                self.round.dutch_declaring_player(),
                self.cards.as_mut(),
            ),
            PlayerInput::ChooseCard(choice) => {
                self.resolver
                    .choose_card(choice, &mut self.roster, self.effects.as_mut())
            }
            PlayerInput::Target(target) => {
                self.resolver
                    .choose_target(target, &mut self.roster, self.effects.as_mut())
            }
        };

        if let Err(err) = result {
            warn!("rejected {} from {}: {}", kind, self.round.current_player(), err);
            return Err(err);
        }

        if let Some((player, outcome)) = self.resolver.take_completed() {
            self.finish_turn(player, outcome)?;
        }

        Ok(self.status())
    }

    /// Play the current turn to completion, asking `controller` for every
    /// decision.
    ///
    /// Picks up from wherever the turn is (a partially submitted turn is
    /// finished, not restarted). Rejected answers are reported to the
    /// controller and asked again.
    pub fn play_turn(&mut self, controller: &mut dyn TurnController) -> Result<SessionStatus> {
        if self.round.is_over() {
            return Err(QDutchError::GameOver);
        }
        let turns_before = self.history.len();

        while self.history.len() == turns_before {
            let status = self.status();
            let acting = status.player().unwrap_or_else(|| self.round.current_player());
            let view = SessionView::new(&self.roster, &self.round, acting);

            let input = match status {
                SessionStatus::AwaitingDecision { player } => {
                    PlayerInput::Decide(controller.declare_or_play(&view, player))
                }
                SessionStatus::AwaitingCardChoice { offered, .. } => {
                    PlayerInput::ChooseCard(controller.choose_card(&view, &offered))
                }
                SessionStatus::AwaitingTarget { request, .. } => {
                    PlayerInput::Target(controller.choose_target(&view, request))
                }
                SessionStatus::GameEnded => break,
            };

            match self.submit(input) {
                Ok(_) => {}
                Err(err) if err.is_rejected_input() => {
                    let view = SessionView::new(&self.roster, &self.round, acting);
                    controller.on_rejected(&view, &err);
                }
                Err(err) => return Err(err),
            }
        }

        Ok(self.status())
    }

    /// Play whole turns until the game ends or `max_turns` turns have been
    /// played.
    pub fn play_until_end(
        &mut self,
        controller: &mut dyn TurnController,
        max_turns: usize,
    ) -> Result<Option<&GameSummary>> {
        for _ in 0..max_turns {
            if self.round.is_over() {
                break;
            }
            self.play_turn(controller)?;
        }
        Ok(self.summary.as_ref())
    }

    /// Abandon the running turn. The same seat starts over; any drawn cards
    /// are discarded and nothing on the table changes.
    pub fn abandon_turn(&mut self) -> Result<()> {
        if self.round.is_over() {
            return Err(QDutchError::GameOver);
        }
        if let Some(player) = self.resolver.abandon() {
            info!("{} abandons their turn", player);
        }
        self.round.abandon_turn();
        self.begin_turn()
    }

    // === Internals ===

    fn begin_turn(&mut self) -> Result<()> {
        match self.round.start_turn() {
            TurnStart::Begin(player) => {
                if self.resolver.acting_player() != Some(player) {
                    self.resolver.begin(player)?;
                }
                Ok(())
            }
            TurnStart::GameEnded => {
                self.end_game();
                Ok(())
            }
        }
    }

    fn finish_turn(&mut self, player: PlayerId, outcome: TurnOutcome) -> Result<()> {
        if outcome.is_dutch() {
            self.round.declare_dutch()?;
        }
        let turn_no = self.round.turn_no();
        match outcome.target() {
            Some(target) => debug!("{} finished turn {}, changed {}", player, turn_no, target),
            None => debug!("{} finished turn {}: {:?}", player, turn_no, outcome),
        }
        self.history.push_back(TurnRecord {
            player,
            turn_no,
            outcome,
        });

        let (next, turn_no) = self.round.complete_turn();
        self.events.push_back(SessionEvent::TurnAdvanced {
            player: next,
            turn_no,
        });
        for observer in &mut self.observers {
            observer.on_turn_advanced(next, turn_no);
        }

        self.begin_turn()
    }

    fn end_game(&mut self) {
        if self.summary.is_some() {
            return;
        }
        let Some(call) = self.round.dutch_call() else {
            return;
        };

        let summary = GameSummary {
            dutch_caller: call.player,
            ended_on_turn: self.round.turn_no(),
            turns_played: self.history.len(),
            final_table: self.roster.clone(),
        };
        info!(
            "game ended on turn {} after {} turns",
            summary.ended_on_turn, summary.turns_played
        );

        self.events.push_back(SessionEvent::GameEnded);
        for observer in &mut self.observers {
            observer.on_game_ended(&summary);
        }
        self.summary = Some(summary);
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("roster", &self.roster)
            .field("round", &self.round)
            .field("phase", self.resolver.phase())
            .field("turns", &self.history.len())
            .finish_non_exhaustive()
    }
}
