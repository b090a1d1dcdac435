//! Cards: a kind tag plus an opaque payload.
//!
//! The engine only looks at the kind to route a card to the right effect
//! handler. The payload is read by the handler alone.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// The kind of a drawn card.
///
/// Tags outside the three known kinds are kept as `Unknown` and resolve to
/// a null effect.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Applies an operator to a slot's value.
    Operator,
    /// Overwrites a slot's value.
    State,
    /// Reveals a slot.
    Measurement,
    /// Any other tag.
    Unknown(String),
}

impl CardKind {
    /// Parse a type tag.
    ///
    /// ```
    /// use qdutch::cards::CardKind;
    ///
    /// assert_eq!(CardKind::from_tag("State"), CardKind::State);
    /// assert_eq!(CardKind::from_tag("Joker"), CardKind::Unknown("Joker".into()));
    /// ```
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Operator" => CardKind::Operator,
            "State" => CardKind::State,
            "Measurement" => CardKind::Measurement,
            other => CardKind::Unknown(other.to_string()),
        }
    }

    /// The type tag for this kind.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            CardKind::Operator => "Operator",
            CardKind::State => "State",
            CardKind::Measurement => "Measurement",
            CardKind::Unknown(tag) => tag,
        }
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Opaque card payload.
///
/// SmallVec keeps the common one- or two-value payload inline.
pub type CardData = SmallVec<[i64; 2]>;

/// A generated card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub kind: CardKind,
    pub data: CardData,
}

impl Card {
    /// Create a card from a kind and payload.
    #[must_use]
    pub fn new(kind: CardKind, data: &[i64]) -> Self {
        Self {
            kind,
            data: SmallVec::from_slice(data),
        }
    }

    /// Create a card from a raw type tag.
    #[must_use]
    pub fn from_tag(tag: &str, data: &[i64]) -> Self {
        Self::new(CardKind::from_tag(tag), data)
    }

    /// Operator card adding `delta` to a slot.
    #[must_use]
    pub fn operator(delta: i64) -> Self {
        Self::new(CardKind::Operator, &[delta])
    }

    /// State card setting a slot to `value`.
    #[must_use]
    pub fn state(value: i64) -> Self {
        Self::new(CardKind::State, &[value])
    }

    /// Measurement card.
    #[must_use]
    pub fn measurement() -> Self {
        Self::new(CardKind::Measurement, &[])
    }

    /// First payload value, if any.
    #[must_use]
    pub fn primary(&self) -> Option<i64> {
        self.data.first().copied()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{:?}", self.kind, self.data.as_slice())
    }
}
