//! Effect handlers: the code that actually changes a slot.
//!
//! The engine decides *which* handler runs and *which* slot it gets; the
//! handler decides what the payload means. Integrators with their own slot
//! physics implement `EffectHandler`.

use crate::core::Slot;

/// Applies card payloads to slots.
///
/// Each method receives exactly one slot and must leave every other slot
/// alone (it has no access to them).
pub trait EffectHandler {
    /// Apply an operator card to a slot.
    fn apply_operator(&mut self, data: &[i64], slot: &mut Slot);

    /// Set a slot's state from a state card.
    fn set_state(&mut self, data: &[i64], slot: &mut Slot);

    /// Measure a slot.
    fn measure(&mut self, data: &[i64], slot: &mut Slot);
}

/// Default arithmetic effects.
///
/// - Operator: adds `data[0]` (0 if absent) to the value
/// - State: replaces the value with `data[0]` (keeps it if absent)
/// - Measurement: reveals the slot, collapsing to `data[0]` if present
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardEffects;

impl EffectHandler for StandardEffects {
    fn apply_operator(&mut self, data: &[i64], slot: &mut Slot) {
        let delta = data.first().copied().unwrap_or(0);
        slot.set_value(slot.value().saturating_add(delta));
    }

    fn set_state(&mut self, data: &[i64], slot: &mut Slot) {
        let value = data.first().copied().unwrap_or(slot.value());
        slot.set_value(value);
    }

    fn measure(&mut self, data: &[i64], slot: &mut Slot) {
        slot.reveal(data.first().copied());
    }
}
