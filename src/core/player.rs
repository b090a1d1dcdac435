//! Player identification and the seated roster.
//!
//! ## PlayerId
//!
//! Type-safe seat index. Seats are 0-based and stable for the whole session.
//!
//! ## Roster
//!
//! The fixed set of players, indexable by `PlayerId`. Built once from the
//! configured names; nobody joins or leaves mid-game.

use serde::{Deserialize, Serialize};
use std::ops::Index;

use super::slot::{Slot, SlotTarget, SLOTS_PER_HAND};
use crate::error::{QDutchError, Result};

/// Smallest table QDutch is played at.
pub const MIN_PLAYERS: usize = 2;

/// Largest table QDutch is played at.
pub const MAX_PLAYERS: usize = 4;

/// Seat identifier.
///
/// Seat indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat that plays after this one at a table of `player_count`.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }

    /// Iterate over all seats for a table of `player_count` players.
    ///
    /// ```
    /// use qdutch::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(seats, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A seated player: identity plus a hand of four concealed slots.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    /// Stable seat index.
    pub id: PlayerId,

    /// Display name.
    pub name: String,

    slots: [Slot; SLOTS_PER_HAND],
}

impl Player {
    /// Create a player with every slot holding `initial_value`.
    pub fn new(id: PlayerId, name: impl Into<String>, initial_value: i64) -> Self {
        Self {
            id,
            name: name.into(),
            slots: [Slot::new(initial_value); SLOTS_PER_HAND],
        }
    }

    /// All four slots, in order.
    #[must_use]
    pub fn slots(&self) -> &[Slot; SLOTS_PER_HAND] {
        &self.slots
    }

    /// Get a slot by index.
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> Option<&mut Slot> {
        self.slots.get_mut(index)
    }
}

/// The players at the table, indexed by seat.
///
/// ## Example
///
/// ```
/// use qdutch::core::{PlayerId, Roster};
///
/// let roster = Roster::new(["Ada", "Grace"], 0).unwrap();
/// assert_eq!(roster.player_count(), 2);
/// assert_eq!(roster[PlayerId::new(1)].name, "Grace");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Seat one player per name, in order.
    ///
    /// Fails unless there are 2 to 4 non-blank names.
    pub fn new<I, S>(names: I, initial_value: i64) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&names.len()) {
            return Err(QDutchError::InvalidPlayerCount(names.len()));
        }

        let mut players = Vec::with_capacity(names.len());
        for (seat, name) in PlayerId::all(names.len()).zip(names) {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(QDutchError::InvalidConfig(format!(
                    "seat {} has a blank name",
                    seat.0
                )));
            }
            players.push(Player::new(seat, name, initial_value));
        }

        Ok(Self { players })
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Get a player by seat, if seated.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&Player> {
        self.players.get(player.index())
    }

    /// Iterate over players in seat order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Check that a target names an existing (seat, slot) pair.
    pub fn validate(&self, target: SlotTarget) -> Result<()> {
        self.get(target.player)
            .and_then(|p| p.slot(target.slot))
            .map(|_| ())
            .ok_or(QDutchError::InvalidTarget {
                seat: target.player.0,
                slot: target.slot,
            })
    }

    /// Get a slot by target.
    #[must_use]
    pub fn slot(&self, target: SlotTarget) -> Option<&Slot> {
        self.get(target.player)?.slot(target.slot)
    }

    /// Get a mutable slot by target, rejecting out-of-range targets.
    pub(crate) fn slot_mut(&mut self, target: SlotTarget) -> Result<&mut Slot> {
        self.players
            .get_mut(target.player.index())
            .and_then(|p| p.slot_mut(target.slot))
            .ok_or(QDutchError::InvalidTarget {
                seat: target.player.0,
                slot: target.slot,
            })
    }

    /// Copy out every hand, in seat order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<[Slot; SLOTS_PER_HAND]> {
        self.players.iter().map(|p| *p.slots()).collect()
    }

    /// Total slot mutations across the whole table.
    #[must_use]
    pub fn total_mutations(&self) -> u64 {
        self.players
            .iter()
            .flat_map(|p| p.slots().iter())
            .map(|s| u64::from(s.mutations()))
            .sum()
    }
}

impl Index<PlayerId> for Roster {
    type Output = Player;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.players[player.index()]
    }
}
