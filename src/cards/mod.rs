//! Cards and card generation.
//!
//! - `Card`: A kind tag (`CardKind`) plus an opaque payload
//! - `CardGenerator`: Where cards come from
//! - `RandomCardGenerator`: Seeded default generator
//!
//! Cards are ephemeral: two are generated per played turn, one is chosen,
//! and both are dropped once the turn resolves.

mod card;
mod generator;

pub use card::{Card, CardData, CardKind};
pub use generator::{CardGenerator, RandomCardGenerator, UNKNOWN_TAG};
