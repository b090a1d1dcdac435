//! The per-turn state machine.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::{CardChoice, TurnDecision, TurnOutcome, TurnStatus};
use crate::cards::{Card, CardGenerator};
use crate::core::{PlayerId, Roster, SlotTarget};
use crate::effects::{EffectHandler, EffectResolver, TargetRequest};
use crate::error::{QDutchError, Result};

/// Partial progress of the current turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// No turn running.
    #[default]
    Idle,
    /// Turn started; waiting for declare-or-play.
    AwaitingDecision { player: PlayerId },
    /// Two cards drawn; waiting for the pick.
    AwaitingCardChoice { player: PlayerId, offered: [Card; 2] },
    /// Card picked; waiting for a slot.
    AwaitingTarget {
        player: PlayerId,
        card: Card,
        request: TargetRequest,
    },
    /// Turn done, not yet collected.
    Complete { player: PlayerId, outcome: TurnOutcome },
}

impl TurnPhase {
    fn name(&self) -> &'static str {
        match self {
            TurnPhase::Idle => "no turn",
            TurnPhase::AwaitingDecision { .. } => "declare-or-play",
            TurnPhase::AwaitingCardChoice { .. } => "card choice",
            TurnPhase::AwaitingTarget { .. } => "slot target",
            TurnPhase::Complete { .. } => "completed turn",
        }
    }
}

/// Resolves one turn at a time.
///
/// Each input method checks it matches the current phase, so inputs arriving
/// out of order are rejected instead of corrupting the turn. A rejected
/// input never changes the phase.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TurnResolver {
    phase: TurnPhase,
}

impl TurnResolver {
    /// Create an idle resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current partial turn.
    #[must_use]
    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    /// Seat whose turn is running, if any.
    #[must_use]
    pub fn acting_player(&self) -> Option<PlayerId> {
        match &self.phase {
            TurnPhase::Idle => None,
            TurnPhase::AwaitingDecision { player }
            | TurnPhase::AwaitingCardChoice { player, .. }
            | TurnPhase::AwaitingTarget { player, .. }
            | TurnPhase::Complete { player, .. } => Some(*player),
        }
    }

    /// What the resolver needs next.
    #[must_use]
    pub fn status(&self) -> TurnStatus {
        match &self.phase {
            TurnPhase::Idle => TurnStatus::Idle,
            TurnPhase::AwaitingDecision { .. } => TurnStatus::WaitingForDecision,
            TurnPhase::AwaitingCardChoice { .. } => TurnStatus::WaitingForCardChoice,
            TurnPhase::AwaitingTarget { request, .. } => TurnStatus::WaitingForTarget(*request),
            TurnPhase::Complete { .. } => TurnStatus::Complete,
        }
    }

    /// Start a turn for `player`.
    pub fn begin(&mut self, player: PlayerId) -> Result<TurnStatus> {
        self.expect(matches!(self.phase, TurnPhase::Idle), "turn start")?;
        self.phase = TurnPhase::AwaitingDecision { player };
        Ok(self.status())
    }

    /// Apply the declare-or-play decision.
    ///
    /// `dutch_caller` is whoever already declared Dutch this session; a
    /// second declaration is rejected. Playing draws two cards from `cards`.
    pub fn decide(
        &mut self,
        decision: TurnDecision,
        dutch_caller: Option<PlayerId>,
        cards: &mut dyn CardGenerator,
    ) -> Result<TurnStatus> {
        let TurnPhase::AwaitingDecision { player } = self.phase else {
            return Err(self.unexpected("declare-or-play"));
        };

        match decision {
            TurnDecision::Declare => {
                if let Some(caller) = dutch_caller {
                    return Err(QDutchError::DutchAlreadyDeclared(caller));
                }
                self.phase = TurnPhase::Complete {
                    player,
                    outcome: TurnOutcome::DeclaredDutch,
                };
            }
            TurnDecision::Play => {
                let offered = [cards.generate(), cards.generate()];
                debug!("{} draws {} and {}", player, offered[0], offered[1]);
                self.phase = TurnPhase::AwaitingCardChoice { player, offered };
            }
        }

        Ok(self.status())
    }

    /// Pick one of the two offered cards.
    ///
    /// A card with no target resolves immediately as a null effect.
    pub fn choose_card(
        &mut self,
        choice: CardChoice,
        roster: &mut Roster,
        effects: &mut dyn EffectHandler,
    ) -> Result<TurnStatus> {
        let TurnPhase::AwaitingCardChoice { player, offered } = &self.phase else {
            return Err(self.unexpected("card choice"));
        };
        let player = *player;
        let card = offered[choice.locate(offered)?].clone();
        debug!("{} keeps {}", player, card);

        self.phase = match TargetRequest::for_card(&card.kind, player) {
            Some(request) => TurnPhase::AwaitingTarget {
                player,
                card,
                request,
            },
            None => {
                let effect = EffectResolver::resolve(roster, effects, &card, None)?;
                TurnPhase::Complete {
                    player,
                    outcome: TurnOutcome::Played { card, effect },
                }
            }
        };

        Ok(self.status())
    }

    /// Pick the slot for the chosen card and apply its effect.
    ///
    /// An out-of-range target is rejected and the turn keeps waiting.
    pub fn choose_target(
        &mut self,
        target: SlotTarget,
        roster: &mut Roster,
        effects: &mut dyn EffectHandler,
    ) -> Result<TurnStatus> {
        let TurnPhase::AwaitingTarget {
            player,
            card,
            request,
        } = &self.phase
        else {
            return Err(self.unexpected("slot target"));
        };

        if let Err(err) = request.validate(roster, target) {
            warn!("{} picked invalid target {}: {}", player, target, err);
            return Err(err);
        }

        let player = *player;
        let card = card.clone();
        let effect = EffectResolver::resolve(roster, effects, &card, Some(target))?;
        self.phase = TurnPhase::Complete {
            player,
            outcome: TurnOutcome::Played { card, effect },
        };

        Ok(self.status())
    }

    /// Collect a finished turn, returning the resolver to idle.
    pub fn take_completed(&mut self) -> Option<(PlayerId, TurnOutcome)> {
        match std::mem::take(&mut self.phase) {
            TurnPhase::Complete { player, outcome } => Some((player, outcome)),
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// Throw away the running turn. Drawn cards are discarded.
    pub fn abandon(&mut self) -> Option<PlayerId> {
        let player = self.acting_player();
        self.phase = TurnPhase::Idle;
        player
    }

    fn expect(&self, ok: bool, got: &'static str) -> Result<()> {
        if ok {
            Ok(())
        } else {
            Err(self.unexpected(got))
        }
    }

    fn unexpected(&self, got: &'static str) -> QDutchError {
        QDutchError::UnexpectedInput {
            expected: self.phase.name(),
            got,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardKind;
    use crate::effects::{EffectOutcome, StandardEffects, TargetKind};

    fn scripted(cards: Vec<Card>) -> impl FnMut() -> Card {
        let mut cards = cards.into_iter();
        move || cards.next().expect("script ran out of cards")
    }

    fn setup() -> (TurnResolver, Roster) {
        (TurnResolver::new(), Roster::new(["Ada", "Grace"], 0).unwrap())
    }

    #[test]
    fn test_begin_waits_for_decision() {
        let (mut resolver, _) = setup();
        assert_eq!(resolver.status(), TurnStatus::Idle);

        let status = resolver.begin(PlayerId::new(1)).unwrap();

        assert_eq!(status, TurnStatus::WaitingForDecision);
        assert_eq!(resolver.acting_player(), Some(PlayerId::new(1)));
    }

    #[test]
    fn test_begin_twice_rejected() {
        let (mut resolver, _) = setup();
        resolver.begin(PlayerId::new(0)).unwrap();
        assert!(matches!(
            resolver.begin(PlayerId::new(0)),
            Err(QDutchError::UnexpectedInput { .. })
        ));
    }

    #[test]
    fn test_declare_draws_nothing() {
        let (mut resolver, roster) = setup();
        let mut draws = 0;
        let mut cards = || {
            draws += 1;
            Card::measurement()
        };

        resolver.begin(PlayerId::new(0)).unwrap();
        let status = resolver.decide(TurnDecision::Declare, None, &mut cards).unwrap();

        assert_eq!(status, TurnStatus::Complete);
        assert_eq!(
            resolver.take_completed(),
            Some((PlayerId::new(0), TurnOutcome::DeclaredDutch))
        );
        assert_eq!(resolver.status(), TurnStatus::Idle);
        assert_eq!(roster.total_mutations(), 0);
        drop(cards);
        assert_eq!(draws, 0);
    }

    #[test]
    fn test_second_declaration_rejected() {
        let (mut resolver, _) = setup();
        resolver.begin(PlayerId::new(1)).unwrap();

        let err = resolver
            .decide(TurnDecision::Declare, Some(PlayerId::new(0)), &mut scripted(vec![]))
            .unwrap_err();

        assert_eq!(err, QDutchError::DutchAlreadyDeclared(PlayerId::new(0)));
        assert_eq!(resolver.status(), TurnStatus::WaitingForDecision);
    }

    #[test]
    fn test_state_card_requests_biased_target() {
        let (mut resolver, mut roster) = setup();
        let mut cards = scripted(vec![Card::operator(1), Card::state(7)]);

        resolver.begin(PlayerId::new(1)).unwrap();
        resolver.decide(TurnDecision::Play, None, &mut cards).unwrap();
        let status = resolver
            .choose_card(CardChoice::Index(1), &mut roster, &mut StandardEffects)
            .unwrap();

        assert_eq!(
            status,
            TurnStatus::WaitingForTarget(TargetRequest {
                kind: TargetKind::State,
                bias: Some(PlayerId::new(1)),
            })
        );

        let target = SlotTarget::new(PlayerId::new(0), 2);
        resolver
            .choose_target(target, &mut roster, &mut StandardEffects)
            .unwrap();

        assert_eq!(roster.slot(target).unwrap().value(), 7);
        assert_eq!(roster.total_mutations(), 1);

        let (player, outcome) = resolver.take_completed().unwrap();
        assert_eq!(player, PlayerId::new(1));
        assert_eq!(
            outcome,
            TurnOutcome::Played {
                card: Card::state(7),
                effect: EffectOutcome::Applied(target),
            }
        );
    }

    #[test]
    fn test_unknown_card_completes_without_target() {
        let (mut resolver, mut roster) = setup();
        let mut cards = scripted(vec![Card::from_tag("Joker", &[]), Card::operator(1)]);

        resolver.begin(PlayerId::new(0)).unwrap();
        resolver.decide(TurnDecision::Play, None, &mut cards).unwrap();
        let status = resolver
            .choose_card(CardChoice::Index(0), &mut roster, &mut StandardEffects)
            .unwrap();

        assert_eq!(status, TurnStatus::Complete);
        assert_eq!(roster.total_mutations(), 0);
        let (_, outcome) = resolver.take_completed().unwrap();
        assert!(matches!(
            outcome,
            TurnOutcome::Played { card, effect: EffectOutcome::NoEffect }
                if card.kind == CardKind::Unknown("Joker".to_string())
        ));
    }

    #[test]
    fn test_invalid_target_keeps_waiting() {
        let (mut resolver, mut roster) = setup();
        let mut cards = scripted(vec![Card::operator(2), Card::operator(3)]);

        resolver.begin(PlayerId::new(0)).unwrap();
        resolver.decide(TurnDecision::Play, None, &mut cards).unwrap();
        resolver
            .choose_card(CardChoice::Card(Card::operator(3)), &mut roster, &mut StandardEffects)
            .unwrap();

        let err = resolver
            .choose_target(SlotTarget::new(PlayerId::new(5), 0), &mut roster, &mut StandardEffects)
            .unwrap_err();
        assert_eq!(err, QDutchError::InvalidTarget { seat: 5, slot: 0 });
        assert!(matches!(resolver.status(), TurnStatus::WaitingForTarget(_)));
        assert_eq!(roster.total_mutations(), 0);

        // Retry with a valid slot
        resolver
            .choose_target(SlotTarget::new(PlayerId::new(1), 0), &mut roster, &mut StandardEffects)
            .unwrap();
        assert_eq!(roster.slot(SlotTarget::new(PlayerId::new(1), 0)).unwrap().value(), 3);
    }

    #[test]
    fn test_card_not_offered_keeps_offer() {
        let (mut resolver, mut roster) = setup();
        let mut cards = scripted(vec![Card::operator(2), Card::state(3)]);

        resolver.begin(PlayerId::new(0)).unwrap();
        resolver.decide(TurnDecision::Play, None, &mut cards).unwrap();

        let err = resolver
            .choose_card(CardChoice::Card(Card::measurement()), &mut roster, &mut StandardEffects)
            .unwrap_err();

        assert_eq!(err, QDutchError::CardNotOffered);
        assert!(matches!(
            resolver.phase(),
            TurnPhase::AwaitingCardChoice { offered, .. } if offered[1] == Card::state(3)
        ));
    }

    #[test]
    fn test_out_of_order_input_rejected() {
        let (mut resolver, mut roster) = setup();
        resolver.begin(PlayerId::new(0)).unwrap();

        let err = resolver
            .choose_target(SlotTarget::new(PlayerId::new(0), 0), &mut roster, &mut StandardEffects)
            .unwrap_err();

        assert_eq!(
            err,
            QDutchError::UnexpectedInput {
                expected: "declare-or-play",
                got: "slot target",
            }
        );
    }

    #[test]
    fn test_take_completed_before_done() {
        let (mut resolver, _) = setup();
        resolver.begin(PlayerId::new(0)).unwrap();

        assert_eq!(resolver.take_completed(), None);
        assert_eq!(resolver.status(), TurnStatus::WaitingForDecision);
    }

    #[test]
    fn test_abandon_discards_partial_turn() {
        let (mut resolver, _) = setup();
        let mut cards = scripted(vec![Card::operator(2), Card::state(3)]);

        resolver.begin(PlayerId::new(1)).unwrap();
        resolver.decide(TurnDecision::Play, None, &mut cards).unwrap();

        assert_eq!(resolver.abandon(), Some(PlayerId::new(1)));
        assert_eq!(resolver.phase(), &TurnPhase::Idle);
        assert_eq!(resolver.abandon(), None);
    }
}
