//! Hand slots and slot addressing.
//!
//! Every player holds exactly four face-down slots. A slot is only ever
//! changed by an effect handler acting on it; the engine itself just routes
//! the handler to the right slot.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Number of slots in every hand.
pub const SLOTS_PER_HAND: usize = 4;

/// One concealed value cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    value: i64,
    revealed: bool,
    mutations: u32,
}

impl Slot {
    /// Create a face-down slot.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self {
            value,
            revealed: false,
            mutations: 0,
        }
    }

    /// The concealed value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.value
    }

    /// Has a measurement revealed this slot?
    #[must_use]
    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// How many times an effect has touched this slot.
    #[must_use]
    pub const fn mutations(&self) -> u32 {
        self.mutations
    }

    /// Overwrite the concealed value.
    pub fn set_value(&mut self, value: i64) {
        self.value = value;
        self.mutations += 1;
    }

    /// Turn the slot face up, optionally collapsing it to a new value.
    pub fn reveal(&mut self, collapsed: Option<i64>) {
        if let Some(value) = collapsed {
            self.value = value;
        }
        self.revealed = true;
        self.mutations += 1;
    }
}

/// Address of one slot at the table: (seat, slot index).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotTarget {
    /// Seat owning the slot.
    pub player: PlayerId,
    /// Slot index within the hand (0..4).
    pub slot: usize,
}

impl SlotTarget {
    /// Create a new slot address.
    #[must_use]
    pub const fn new(player: PlayerId, slot: usize) -> Self {
        Self { player, slot }
    }
}

impl std::fmt::Display for SlotTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} slot {}", self.player, self.slot)
    }
}
