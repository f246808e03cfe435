//! Checked delta rules and the [`QuantityStore`] trait.
//!
//! The free functions here implement the delta contract for a single
//! unsigned field. Every ledger routes its mutators through them, so the
//! rules live in exactly one place.

use colony_types::Resource;

use crate::resource::ResourceLedger;
use crate::{LedgerError, LedgerField};

/// Convert a signed initial value into a stored quantity.
///
/// # Errors
///
/// Returns [`LedgerError::InvalidArgument`] for negative values and
/// [`LedgerError::ArithmeticOverflow`] for values above `u32::MAX`.
pub fn initial_quantity(field: LedgerField, value: i64) -> Result<u32, LedgerError> {
    if value < 0 {
        return Err(LedgerError::InvalidArgument { field, value });
    }
    u32::try_from(value)
        .ok()
        .ok_or(LedgerError::ArithmeticOverflow { field })
}

/// Compute `current + delta` under the increase contract.
///
/// A zero delta is a successful no-op.
///
/// # Errors
///
/// Returns [`LedgerError::InvalidArgument`] if `delta` is negative and
/// [`LedgerError::ArithmeticOverflow`] if the sum does not fit.
pub fn checked_increase(field: LedgerField, current: u32, delta: i64) -> Result<u32, LedgerError> {
    if delta < 0 {
        return Err(LedgerError::InvalidArgument {
            field,
            value: delta,
        });
    }
    u32::try_from(delta)
        .ok()
        .and_then(|delta| current.checked_add(delta))
        .ok_or(LedgerError::ArithmeticOverflow { field })
}

/// Compute `current - delta` under the decrease contract.
///
/// # Errors
///
/// Returns [`LedgerError::InvalidArgument`] if `delta` is negative and
/// [`LedgerError::InsufficientStock`] if `delta` exceeds `current`.
pub fn checked_decrease(field: LedgerField, current: u32, delta: i64) -> Result<u32, LedgerError> {
    if delta < 0 {
        return Err(LedgerError::InvalidArgument {
            field,
            value: delta,
        });
    }
    u32::try_from(delta)
        .ok()
        .and_then(|delta| current.checked_sub(delta))
        .ok_or(LedgerError::InsufficientStock {
            field,
            requested: delta,
            available: current,
        })
}

/// Shared ore/energy accessors for every ledger that embeds a
/// [`ResourceLedger`].
///
/// Implementors only provide access to the embedded store; the validated
/// mutators come for free.
pub trait QuantityStore {
    /// The embedded resource store.
    fn resources(&self) -> &ResourceLedger;

    /// The embedded resource store, mutably.
    fn resources_mut(&mut self) -> &mut ResourceLedger;

    /// Quantity of the given resource held.
    fn quantity(&self, resource: Resource) -> u32 {
        self.resources().get(resource)
    }

    /// Add `delta` units of `resource`.
    ///
    /// # Errors
    ///
    /// See [`checked_increase`].
    fn increase(&mut self, resource: Resource, delta: i64) -> Result<(), LedgerError> {
        self.resources_mut().apply_increase(resource, delta)
    }

    /// Remove `delta` units of `resource`.
    ///
    /// # Errors
    ///
    /// See [`checked_decrease`].
    fn decrease(&mut self, resource: Resource, delta: i64) -> Result<(), LedgerError> {
        self.resources_mut().apply_decrease(resource, delta)
    }

    /// Ore held.
    fn ore(&self) -> u32 {
        self.quantity(Resource::Ore)
    }

    /// Energy held.
    fn energy(&self) -> u32 {
        self.quantity(Resource::Energy)
    }

    /// Add ore.
    ///
    /// # Errors
    ///
    /// See [`checked_increase`].
    fn increase_ore(&mut self, delta: i64) -> Result<(), LedgerError> {
        self.increase(Resource::Ore, delta)
    }

    /// Remove ore.
    ///
    /// # Errors
    ///
    /// See [`checked_decrease`].
    fn decrease_ore(&mut self, delta: i64) -> Result<(), LedgerError> {
        self.decrease(Resource::Ore, delta)
    }

    /// Add energy.
    ///
    /// # Errors
    ///
    /// See [`checked_increase`].
    fn increase_energy(&mut self, delta: i64) -> Result<(), LedgerError> {
        self.increase(Resource::Energy, delta)
    }

    /// Remove energy.
    ///
    /// # Errors
    ///
    /// See [`checked_decrease`].
    fn decrease_energy(&mut self, delta: i64) -> Result<(), LedgerError> {
        self.decrease(Resource::Energy, delta)
    }
}
