//! The base `{ore, energy}` store embedded by every other ledger.

use serde::{Deserialize, Serialize};

use colony_types::Resource;

use crate::quantity::{self, QuantityStore};
use crate::{LedgerError, LedgerField};

/// Ore and energy quantities, never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLedger {
    /// Ore held.
    ore: u32,
    /// Energy held.
    energy: u32,
}

impl ResourceLedger {
    /// Create a ledger holding the given quantities.
    pub const fn new(ore: u32, energy: u32) -> Self {
        Self { ore, energy }
    }

    /// Create a ledger from signed seed values.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidArgument`] if either value is negative.
    pub fn from_signed(ore: i64, energy: i64) -> Result<Self, LedgerError> {
        Ok(Self {
            ore: quantity::initial_quantity(LedgerField::Resource(Resource::Ore), ore)?,
            energy: quantity::initial_quantity(LedgerField::Resource(Resource::Energy), energy)?,
        })
    }

    /// Quantity of the given resource.
    pub const fn get(self, resource: Resource) -> u32 {
        match resource {
            Resource::Ore => self.ore,
            Resource::Energy => self.energy,
        }
    }

    /// Whether both quantities are zero.
    pub const fn is_empty(self) -> bool {
        self.ore == 0 && self.energy == 0
    }

    const fn slot_mut(&mut self, resource: Resource) -> &mut u32 {
        match resource {
            Resource::Ore => &mut self.ore,
            Resource::Energy => &mut self.energy,
        }
    }

    pub(crate) fn apply_increase(&mut self, resource: Resource, delta: i64) -> Result<(), LedgerError> {
        let slot = self.slot_mut(resource);
        *slot = quantity::checked_increase(LedgerField::Resource(resource), *slot, delta)?;
        Ok(())
    }

    pub(crate) fn apply_decrease(&mut self, resource: Resource, delta: i64) -> Result<(), LedgerError> {
        let slot = self.slot_mut(resource);
        *slot = quantity::checked_decrease(LedgerField::Resource(resource), *slot, delta)?;
        Ok(())
    }
}

impl QuantityStore for ResourceLedger {
    fn resources(&self) -> &ResourceLedger {
        self
    }

    fn resources_mut(&mut self) -> &mut ResourceLedger {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ledger_holds_seed_values() {
        let ledger = ResourceLedger::new(3, 8);
        assert_eq!(ledger.ore(), 3);
        assert_eq!(ledger.energy(), 8);
        assert!(!ledger.is_empty());
        assert!(ResourceLedger::default().is_empty());
    }

    #[test]
    fn negative_seed_rejected() {
        assert!(matches!(
            ResourceLedger::from_signed(-1, 0),
            Err(LedgerError::InvalidArgument { .. })
        ));
        assert!(matches!(
            ResourceLedger::from_signed(0, -4),
            Err(LedgerError::InvalidArgument { .. })
        ));
        assert_eq!(
            ResourceLedger::from_signed(2, 5).ok(),
            Some(ResourceLedger::new(2, 5))
        );
    }

    #[test]
    fn increase_then_decrease_restores_each_resource() {
        for resource in Resource::ALL {
            for delta in [0_i64, 1, 12] {
                let mut ledger = ResourceLedger::new(4, 4);
                assert!(ledger.increase(resource, delta).is_ok());
                assert!(ledger.decrease(resource, delta).is_ok());
                assert_eq!(ledger, ResourceLedger::new(4, 4));
            }
        }
    }

    #[test]
    fn overdraw_leaves_ledger_unchanged() {
        let mut ledger = ResourceLedger::new(5, 2);
        let result = ledger.decrease_energy(3);
        assert!(matches!(result, Err(LedgerError::InsufficientStock { .. })));
        assert_eq!(ledger, ResourceLedger::new(5, 2));
    }

    #[test]
    fn negative_delta_leaves_ledger_unchanged() {
        let mut ledger = ResourceLedger::new(5, 2);
        assert!(ledger.increase_ore(-1).is_err());
        assert!(ledger.decrease_ore(-1).is_err());
        assert_eq!(ledger, ResourceLedger::new(5, 2));
    }

    #[test]
    fn resources_are_independent() {
        let mut ledger = ResourceLedger::new(0, 0);
        assert!(ledger.increase_ore(6).is_ok());
        assert_eq!(ledger.energy(), 0);
        assert!(ledger.increase_energy(2).is_ok());
        assert!(ledger.decrease_ore(6).is_ok());
        assert_eq!(ledger.get(Resource::Ore), 0);
        assert_eq!(ledger.get(Resource::Energy), 2);
    }
}
