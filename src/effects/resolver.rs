//! Effect resolution: routing a chosen card to its handler.
//!
//! The `EffectResolver` is the only place in the crate that hands a slot to
//! an `EffectHandler`. It validates the target first, so an out-of-range
//! target never touches the table.

use log::debug;
use serde::{Deserialize, Serialize};

use super::handler::EffectHandler;
use crate::cards::{Card, CardKind};
use crate::core::{Roster, SlotTarget};
use crate::error::{QDutchError, Result};

/// What a resolved card did to the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectOutcome {
    /// The card's handler ran on this slot.
    Applied(SlotTarget),
    /// The card had no effect (unrecognized kind).
    NoEffect,
}

impl EffectOutcome {
    /// The mutated slot, if any.
    #[must_use]
    pub fn target(&self) -> Option<SlotTarget> {
        match self {
            EffectOutcome::Applied(target) => Some(*target),
            EffectOutcome::NoEffect => None,
        }
    }
}

/// Dispatches cards to effect handlers.
pub struct EffectResolver;

impl EffectResolver {
    /// Resolve a card against a target slot.
    ///
    /// Unknown cards are a no-op and ignore `target`. Every other kind needs
    /// a target that exists, or an error is returned and nothing is mutated.
    pub fn resolve(
        roster: &mut Roster,
        handler: &mut dyn EffectHandler,
        card: &Card,
        target: Option<SlotTarget>,
    ) -> Result<EffectOutcome> {
        match (&card.kind, target) {
            (CardKind::Unknown(tag), _) => {
                debug!("card tag {:?} has no effect", tag);
                Ok(EffectOutcome::NoEffect)
            }
            (_, None) => Err(QDutchError::UnexpectedInput {
                expected: "slot target",
                got: "no target",
            }),
            (kind, Some(target)) => {
                let slot = roster.slot_mut(target)?;
                match kind {
                    CardKind::Operator => handler.apply_operator(&card.data, slot),
                    CardKind::State => handler.set_state(&card.data, slot),
                    CardKind::Measurement => handler.measure(&card.data, slot),
                    CardKind::Unknown(_) => {}
                }
                debug!("{} applied to {}", card, target);
                Ok(EffectOutcome::Applied(target))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::effects::StandardEffects;

    fn roster() -> Roster {
        Roster::new(["Ada", "Grace", "Linus"], 1).unwrap()
    }

    fn resolve_standard(
        roster: &mut Roster,
        card: &Card,
        target: Option<SlotTarget>,
    ) -> Result<EffectOutcome> {
        EffectResolver::resolve(roster, &mut StandardEffects, card, target)
    }

    #[test]
    fn test_operator_mutates_only_target() {
        let mut roster = roster();
        let before = roster.snapshot();
        let target = SlotTarget::new(PlayerId::new(2), 3);

        let outcome = resolve_standard(&mut roster, &Card::operator(4), Some(target)).unwrap();

        assert_eq!(outcome, EffectOutcome::Applied(target));
        assert_eq!(roster.slot(target).unwrap().value(), 5);
        assert_eq!(roster.total_mutations(), 1);

        let after = roster.snapshot();
        let changed: usize = before
            .iter()
            .zip(after.iter())
            .map(|(b, a)| b.iter().zip(a.iter()).filter(|(x, y)| x != y).count())
            .sum();
        assert_eq!(changed, 1);
    }

    #[test]
    fn test_state_and_measurement_dispatch() {
        let mut roster = roster();
        let target = SlotTarget::new(PlayerId::new(0), 0);

        resolve_standard(&mut roster, &Card::state(9), Some(target)).unwrap();
        assert_eq!(roster.slot(target).unwrap().value(), 9);

        resolve_standard(&mut roster, &Card::measurement(), Some(target)).unwrap();
        assert!(roster.slot(target).unwrap().is_revealed());
    }

    #[test]
    fn test_unknown_is_null_effect() {
        let mut roster = roster();
        let card = Card::from_tag("Teleport", &[1]);

        let outcome = EffectResolver::resolve(
            &mut roster,
            &mut StandardEffects,
            &card,
            Some(SlotTarget::new(PlayerId::new(0), 0)),
        )
        .unwrap();

        assert_eq!(outcome, EffectOutcome::NoEffect);
        assert_eq!(roster.total_mutations(), 0);
    }

    #[test]
    fn test_invalid_target_is_rejected() {
        let mut roster = roster();

        let err = EffectResolver::resolve(
            &mut roster,
            &mut StandardEffects,
            &Card::operator(1),
            Some(SlotTarget::new(PlayerId::new(0), 4)),
        )
        .unwrap_err();

        assert_eq!(err, QDutchError::InvalidTarget { seat: 0, slot: 4 });
        assert_eq!(roster.total_mutations(), 0);
    }

    #[test]
    fn test_missing_target_is_rejected() {
        let mut roster = roster();
        let result = resolve_standard(&mut roster, &Card::state(2), None);

        assert!(matches!(result, Err(QDutchError::UnexpectedInput { .. })));
        assert_eq!(roster.total_mutations(), 0);
    }
}
