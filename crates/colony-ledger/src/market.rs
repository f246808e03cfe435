//! The market's stock: resources plus uncommitted roboticons.

use serde::{Deserialize, Serialize};

use colony_types::MarketSnapshot;

use crate::quantity::{self, QuantityStore};
use crate::resource::ResourceLedger;
use crate::{LedgerError, LedgerField};

/// Stock held by the market.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketLedger {
    /// Ore and energy in stock.
    resources: ResourceLedger,
    /// Roboticons produced but not yet sold.
    roboticon_stock: u32,
}

impl MarketLedger {
    /// Create a market ledger with the given stock.
    pub const fn new(resources: ResourceLedger, roboticon_stock: u32) -> Self {
        Self {
            resources,
            roboticon_stock,
        }
    }

    /// Create a market ledger from signed seed values.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidArgument`] if any value is negative.
    pub fn from_signed(ore: i64, energy: i64, roboticon_stock: i64) -> Result<Self, LedgerError> {
        Ok(Self::new(
            ResourceLedger::from_signed(ore, energy)?,
            quantity::initial_quantity(LedgerField::RoboticonStock, roboticon_stock)?,
        ))
    }

    /// Uncommitted roboticons in stock.
    pub const fn roboticon_stock(&self) -> u32 {
        self.roboticon_stock
    }

    /// Add roboticons to the stock.
    ///
    /// # Errors
    ///
    /// See [`quantity::checked_increase`].
    pub fn increase_roboticon_stock(&mut self, delta: i64) -> Result<(), LedgerError> {
        self.roboticon_stock =
            quantity::checked_increase(LedgerField::RoboticonStock, self.roboticon_stock, delta)?;
        Ok(())
    }

    /// Remove roboticons from the stock.
    ///
    /// # Errors
    ///
    /// See [`quantity::checked_decrease`].
    pub fn decrease_roboticon_stock(&mut self, delta: i64) -> Result<(), LedgerError> {
        self.roboticon_stock =
            quantity::checked_decrease(LedgerField::RoboticonStock, self.roboticon_stock, delta)?;
        Ok(())
    }

    /// Read-only copy for UI notification.
    pub fn snapshot(&self) -> MarketSnapshot {
        MarketSnapshot {
            ore: self.ore(),
            energy: self.energy(),
            roboticon_stock: self.roboticon_stock,
        }
    }
}

impl QuantityStore for MarketLedger {
    fn resources(&self) -> &ResourceLedger {
        &self.resources
    }

    fn resources_mut(&mut self) -> &mut ResourceLedger {
        &mut self.resources
    }
}
