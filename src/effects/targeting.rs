//! Effect targeting.
//!
//! Every targeting card asks the UI for one slot anywhere at the table:
//! - `TargetRequest`: What is being targeted and who the UI should default to
//! - `TargetKind`: The card kind the target is for
//!
//! State cards carry the acting seat as a bias ("prefer your own hand");
//! the bias is a hint to the UI, not a restriction.

use serde::{Deserialize, Serialize};

use crate::cards::CardKind;
use crate::core::{PlayerId, Roster, SlotTarget};
use crate::error::Result;

/// Card kinds that need a slot target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    Operator,
    State,
    Measurement,
}

impl TargetKind {
    /// The target kind for a card kind, or `None` for the null effect.
    #[must_use]
    pub fn for_card(kind: &CardKind) -> Option<Self> {
        match kind {
            CardKind::Operator => Some(TargetKind::Operator),
            CardKind::State => Some(TargetKind::State),
            CardKind::Measurement => Some(TargetKind::Measurement),
            CardKind::Unknown(_) => None,
        }
    }
}

/// A pending request for a slot target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetRequest {
    /// Which card kind is being played.
    pub kind: TargetKind,
    /// Seat the UI should default to, if any.
    pub bias: Option<PlayerId>,
}

impl TargetRequest {
    /// Build the request for a card played by `acting`.
    ///
    /// Returns `None` for cards with no target.
    #[must_use]
    pub fn for_card(kind: &CardKind, acting: PlayerId) -> Option<Self> {
        let kind = TargetKind::for_card(kind)?;
        let bias = match kind {
            TargetKind::State => Some(acting),
            TargetKind::Operator | TargetKind::Measurement => None,
        };
        Some(Self { kind, bias })
    }

    /// Check a proposed target against the table.
    ///
    /// Any existing slot is acceptable, whatever the bias.
    pub fn validate(&self, roster: &Roster, target: SlotTarget) -> Result<()> {
        roster.validate(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QDutchError;

    #[test]
    fn test_operator_request_is_unbiased() {
        let req = TargetRequest::for_card(&CardKind::Operator, PlayerId::new(1)).unwrap();
        assert_eq!(req.kind, TargetKind::Operator);
        assert_eq!(req.bias, None);
    }

    #[test]
    fn test_state_request_biased_to_actor() {
        let req = TargetRequest::for_card(&CardKind::State, PlayerId::new(2)).unwrap();
        assert_eq!(req.kind, TargetKind::State);
        assert_eq!(req.bias, Some(PlayerId::new(2)));
    }

    #[test]
    fn test_measurement_request_is_unbiased() {
        let req = TargetRequest::for_card(&CardKind::Measurement, PlayerId::new(0)).unwrap();
        assert_eq!(req.bias, None);
    }

    #[test]
    fn test_unknown_has_no_request() {
        let unknown = CardKind::Unknown("x".into());
        assert!(TargetRequest::for_card(&unknown, PlayerId::new(0)).is_none());
    }

    #[test]
    fn test_validate_ignores_bias() {
        let roster = Roster::new(["Ada", "Grace"], 0).unwrap();
        let req = TargetRequest::for_card(&CardKind::State, PlayerId::new(0)).unwrap();

        // Opponents are still fair game for a state card
        assert!(req.validate(&roster, SlotTarget::new(PlayerId::new(1), 0)).is_ok());
        assert_eq!(
            req.validate(&roster, SlotTarget::new(PlayerId::new(3), 0)),
            Err(QDutchError::InvalidTarget { seat: 3, slot: 0 })
        );
    }
}
