//! Effect system: what a chosen card does to the table.
//!
//! - `TargetRequest`: Which slot the UI must pick for a card
//! - `EffectHandler`: Mutates one slot according to a card's payload
//! - `EffectResolver`: Routes a card to the matching handler method
//!
//! ## Design Philosophy
//!
//! The engine owns routing, never slot semantics. Operator, state and
//! measurement cards each map to one handler method; an unrecognized card
//! maps to nothing and leaves the table untouched.

mod handler;
mod targeting;
mod resolver;

pub use handler::{EffectHandler, StandardEffects};
pub use targeting::{TargetKind, TargetRequest};
pub use resolver::{EffectOutcome, EffectResolver};
