//! A player's wallet: resources, money and held roboticons.
//!
//! Roboticon counts are kept in a fixed array indexed by [`Customisation`],
//! so a count can never be "missing" -- every customisation reads as a
//! real number, zero by default.

use serde::{Deserialize, Serialize};
use tracing::debug;

use colony_types::{Customisation, LedgerSnapshot};

use crate::quantity::{self, QuantityStore};
use crate::resource::ResourceLedger;
use crate::{LedgerError, LedgerField};

/// Everything a player holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerLedger {
    /// Ore and energy.
    resources: ResourceLedger,
    /// Money available for market transactions.
    money: u32,
    /// Held, unplaced roboticons per customisation.
    roboticons: [u32; Customisation::COUNT],
}

impl PlayerLedger {
    /// Create a ledger with starting money and resources and no roboticons.
    pub const fn new(money: u32, resources: ResourceLedger) -> Self {
        Self {
            resources,
            money,
            roboticons: [0; Customisation::COUNT],
        }
    }

    /// Create a ledger from signed seed values.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidArgument`] if any value is negative.
    pub fn from_signed(money: i64, ore: i64, energy: i64) -> Result<Self, LedgerError> {
        Ok(Self::new(
            quantity::initial_quantity(LedgerField::Money, money)?,
            ResourceLedger::from_signed(ore, energy)?,
        ))
    }

    /// Money held.
    pub const fn money(&self) -> u32 {
        self.money
    }

    /// Add money.
    ///
    /// # Errors
    ///
    /// See [`quantity::checked_increase`].
    pub fn increase_money(&mut self, delta: i64) -> Result<(), LedgerError> {
        self.money = quantity::checked_increase(LedgerField::Money, self.money, delta)?;
        Ok(())
    }

    /// Remove money.
    ///
    /// # Errors
    ///
    /// See [`quantity::checked_decrease`].
    pub fn decrease_money(&mut self, delta: i64) -> Result<(), LedgerError> {
        self.money = quantity::checked_decrease(LedgerField::Money, self.money, delta)?;
        Ok(())
    }

    /// Held roboticons of the given customisation.
    pub const fn roboticons(&self, customisation: Customisation) -> u32 {
        let [uncustomised, ore, energy] = self.roboticons;
        match customisation {
            Customisation::Uncustomised => uncustomised,
            Customisation::Ore => ore,
            Customisation::Energy => energy,
        }
    }

    /// Held roboticons of every customisation combined.
    ///
    /// Saturates at `u32::MAX`.
    pub fn total_roboticons(&self) -> u32 {
        Customisation::ALL
            .into_iter()
            .fold(0, |total, customisation| {
                total.saturating_add(self.roboticons(customisation))
            })
    }

    const fn roboticon_slot_mut(&mut self, customisation: Customisation) -> &mut u32 {
        let [uncustomised, ore, energy] = &mut self.roboticons;
        match customisation {
            Customisation::Uncustomised => uncustomised,
            Customisation::Ore => ore,
            Customisation::Energy => energy,
        }
    }

    /// Add held roboticons of the given customisation.
    ///
    /// # Errors
    ///
    /// See [`quantity::checked_increase`].
    pub fn increase_roboticons(
        &mut self,
        customisation: Customisation,
        delta: i64,
    ) -> Result<(), LedgerError> {
        let slot = self.roboticon_slot_mut(customisation);
        *slot = quantity::checked_increase(LedgerField::Roboticons(customisation), *slot, delta)?;
        Ok(())
    }

    /// Remove held roboticons of the given customisation.
    ///
    /// # Errors
    ///
    /// See [`quantity::checked_decrease`].
    pub fn decrease_roboticons(
        &mut self,
        customisation: Customisation,
        delta: i64,
    ) -> Result<(), LedgerError> {
        let slot = self.roboticon_slot_mut(customisation);
        *slot = quantity::checked_decrease(LedgerField::Roboticons(customisation), *slot, delta)?;
        Ok(())
    }

    /// Convert one uncustomised roboticon into `target`.
    ///
    /// Both counts are computed before either is written, so a failure
    /// leaves the ledger untouched. Payment for the customisation is the
    /// caller's concern.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidCustomisation`] when `target` is
    /// [`Customisation::Uncustomised`], and [`LedgerError::InsufficientStock`]
    /// when no uncustomised roboticon is held.
    pub fn customise(&mut self, target: Customisation) -> Result<(), LedgerError> {
        if target == Customisation::Uncustomised {
            return Err(LedgerError::InvalidCustomisation(target));
        }
        let remaining = quantity::checked_decrease(
            LedgerField::Roboticons(Customisation::Uncustomised),
            self.roboticons(Customisation::Uncustomised),
            1,
        )?;
        let converted = quantity::checked_increase(
            LedgerField::Roboticons(target),
            self.roboticons(target),
            1,
        )?;
        *self.roboticon_slot_mut(Customisation::Uncustomised) = remaining;
        *self.roboticon_slot_mut(target) = converted;
        debug!(customisation = target.as_str(), "Roboticon customised");
        Ok(())
    }

    /// Read-only copy for UI notification.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            money: self.money,
            ore: self.ore(),
            energy: self.energy(),
            uncustomised_roboticons: self.roboticons(Customisation::Uncustomised),
            ore_roboticons: self.roboticons(Customisation::Ore),
            energy_roboticons: self.roboticons(Customisation::Energy),
        }
    }
}

impl QuantityStore for PlayerLedger {
    fn resources(&self) -> &ResourceLedger {
        &self.resources
    }

    fn resources_mut(&mut self) -> &mut ResourceLedger {
        &mut self.resources
    }
}

#[cfg(test)]
mod tests {
    use colony_types::Resource;

    use super::*;

    fn wallet() -> PlayerLedger {
        PlayerLedger::new(50, ResourceLedger::new(2, 3))
    }

    #[test]
    fn new_ledger_has_no_roboticons() {
        let ledger = wallet();
        for customisation in Customisation::ALL {
            assert_eq!(ledger.roboticons(customisation), 0);
        }
        assert_eq!(ledger.total_roboticons(), 0);
        assert_eq!(ledger.money(), 50);
        assert_eq!(ledger.quantity(Resource::Energy), 3);
    }

    #[test]
    fn total_counts_every_customisation() {
        let mut ledger = wallet();
        assert!(ledger.increase_roboticons(Customisation::Uncustomised, 2).is_ok());
        assert!(ledger.increase_roboticons(Customisation::Ore, 1).is_ok());
        assert!(ledger.increase_roboticons(Customisation::Energy, 4).is_ok());
        assert_eq!(ledger.total_roboticons(), 7);
    }

    #[test]
    fn negative_seed_rejected() {
        assert!(matches!(
            PlayerLedger::from_signed(-10, 0, 0),
            Err(LedgerError::InvalidArgument {
                field: LedgerField::Money,
                ..
            })
        ));
        assert!(PlayerLedger::from_signed(10, 0, -1).is_err());
        assert_eq!(PlayerLedger::from_signed(10, 1, 2).ok(), Some(PlayerLedger::new(10, ResourceLedger::new(1, 2))));
    }

    #[test]
    fn money_round_trip_and_overdraw() {
        let mut ledger = wallet();
        assert!(ledger.increase_money(25).is_ok());
        assert!(ledger.decrease_money(25).is_ok());
        assert_eq!(ledger.money(), 50);

        let result = ledger.decrease_money(51);
        assert!(matches!(result, Err(LedgerError::InsufficientStock { .. })));
        assert_eq!(ledger.money(), 50);
    }

    #[test]
    fn roboticon_counts_are_independent() {
        let mut ledger = wallet();
        assert!(ledger.increase_roboticons(Customisation::Ore, 2).is_ok());
        assert!(ledger.increase_roboticons(Customisation::Energy, 1).is_ok());
        assert_eq!(ledger.roboticons(Customisation::Uncustomised), 0);
        assert_eq!(ledger.roboticons(Customisation::Ore), 2);
        assert_eq!(ledger.roboticons(Customisation::Energy), 1);
        assert_eq!(ledger.total_roboticons(), 3);

        let result = ledger.decrease_roboticons(Customisation::Energy, 2);
        assert!(result.is_err());
        assert_eq!(ledger.roboticons(Customisation::Energy), 1);
    }

    #[test]
    fn negative_roboticon_delta_rejected() {
        let mut ledger = wallet();
        for customisation in Customisation::ALL {
            assert!(ledger.increase_roboticons(customisation, -1).is_err());
            assert!(ledger.decrease_roboticons(customisation, -1).is_err());
        }
        assert_eq!(ledger, wallet());
    }

    #[test]
    fn customise_moves_one_roboticon() {
        let mut ledger = wallet();
        assert!(ledger.increase_roboticons(Customisation::Uncustomised, 2).is_ok());
        assert!(ledger.customise(Customisation::Energy).is_ok());
        assert_eq!(ledger.roboticons(Customisation::Uncustomised), 1);
        assert_eq!(ledger.roboticons(Customisation::Energy), 1);
        assert_eq!(ledger.total_roboticons(), 2);
    }

    #[test]
    fn customise_without_stock_fails_cleanly() {
        let mut ledger = wallet();
        let result = ledger.customise(Customisation::Ore);
        assert!(matches!(result, Err(LedgerError::InsufficientStock { .. })));
        assert_eq!(ledger, wallet());
    }

    #[test]
    fn customise_to_uncustomised_rejected() {
        let mut ledger = wallet();
        assert!(ledger.increase_roboticons(Customisation::Uncustomised, 1).is_ok());
        assert_eq!(
            ledger.customise(Customisation::Uncustomised),
            Err(LedgerError::InvalidCustomisation(Customisation::Uncustomised))
        );
        assert_eq!(ledger.roboticons(Customisation::Uncustomised), 1);
    }

    #[test]
    fn snapshot_mirrors_ledger() {
        let mut ledger = wallet();
        assert!(ledger.increase_roboticons(Customisation::Ore, 4).is_ok());
        let snapshot = ledger.snapshot();
        assert_eq!(snapshot.money, 50);
        assert_eq!(snapshot.ore, 2);
        assert_eq!(snapshot.energy, 3);
        assert_eq!(snapshot.ore_roboticons, 4);
        assert_eq!(snapshot.uncustomised_roboticons, 0);
    }

    #[test]
    fn ledger_serializes_to_json() {
        let json = serde_json::to_value(wallet()).ok();
        assert_eq!(
            json.as_ref().and_then(|v| v.get("money")).and_then(serde_json::Value::as_u64),
            Some(50)
        );
    }
}
