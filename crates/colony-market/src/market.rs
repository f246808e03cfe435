//! The market engine: pricing, stock movements and roboticon production.
//!
//! The market only ever touches its own [`MarketLedger`]. Moving goods or
//! money into a buyer's ledger is the caller's job, done back-to-back with
//! the market call inside one transaction (see `colony-agents`).

use tracing::debug;

use colony_ledger::{MarketLedger, QuantityStore};
use colony_types::{Customisation, MarketSnapshot, Resource};

use crate::MarketError;
use crate::config::MarketConfig;

/// The single trading and production venue of a game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Market {
    /// Immutable prices and conversion rate.
    config: MarketConfig,
    /// Current stock.
    inventory: MarketLedger,
}

impl Market {
    /// Open a market with the given prices and starting stock.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::ZeroConversionRate`] if the configuration is
    /// invalid.
    pub fn new(config: MarketConfig, inventory: MarketLedger) -> Result<Self, MarketError> {
        config.validate()?;
        Ok(Self { config, inventory })
    }

    /// The market's pricing configuration.
    pub const fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// The market's current stock.
    pub const fn inventory(&self) -> &MarketLedger {
        &self.inventory
    }

    /// Replace the market's stock wholesale (reseeding between games or in
    /// tests).
    pub fn set_inventory(&mut self, inventory: MarketLedger) {
        debug!(
            ore = inventory.ore(),
            energy = inventory.energy(),
            roboticons = inventory.roboticon_stock(),
            "Market inventory replaced"
        );
        self.inventory = inventory;
    }

    /// Read-only copy of the stock for UI notification.
    pub fn snapshot(&self) -> MarketSnapshot {
        self.inventory.snapshot()
    }

    // -------------------------------------------------------------------
    // Pricing
    // -------------------------------------------------------------------

    /// Unit price of a resource.
    pub const fn unit_price(&self, resource: Resource) -> u32 {
        self.config.unit_price(resource)
    }

    /// Price of `quantity` units of `resource`.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::PriceOverflow`] if the total does not fit.
    pub const fn price_of(&self, resource: Resource, quantity: u32) -> Result<u32, MarketError> {
        total_price(self.config.unit_price(resource), quantity)
    }

    /// Price of `quantity` uncustomised roboticons.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::PriceOverflow`] if the total does not fit.
    pub const fn price_of_roboticons(&self, quantity: u32) -> Result<u32, MarketError> {
        total_price(self.config.roboticon_price, quantity)
    }

    /// Flat fee for customising one roboticon into `target`.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::InvalidCustomisation`] for
    /// [`Customisation::Uncustomised`].
    pub const fn price_of_customisation(&self, target: Customisation) -> Result<u32, MarketError> {
        match self.config.customisation_fee(target) {
            Some(fee) => Ok(fee),
            None => Err(MarketError::InvalidCustomisation(target)),
        }
    }

    /// The lowest fee over every customisation target.
    pub const fn cheapest_customisation_fee(&self) -> u32 {
        let ore = self.config.ore_customisation_fee;
        let energy = self.config.energy_customisation_fee;
        if ore < energy { ore } else { energy }
    }

    // -------------------------------------------------------------------
    // Stock movements
    // -------------------------------------------------------------------

    /// Take `quantity` of `resource` out of stock for a buyer.
    ///
    /// The buyer's ledger is not touched.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Ledger`] wrapping `InsufficientStock` if the
    /// market holds less than `quantity`; stock is unchanged.
    pub fn buy(&mut self, resource: Resource, quantity: u32) -> Result<(), MarketError> {
        self.inventory.decrease(resource, i64::from(quantity))?;
        debug!(
            resource = resource.as_str(),
            quantity,
            remaining = self.inventory.quantity(resource),
            "Market sold stock"
        );
        Ok(())
    }

    /// Put `quantity` of `resource` into stock from a seller.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Ledger`] only if the stock would overflow.
    pub fn sell(&mut self, resource: Resource, quantity: u32) -> Result<(), MarketError> {
        self.inventory.increase(resource, i64::from(quantity))?;
        debug!(
            resource = resource.as_str(),
            quantity,
            stock = self.inventory.quantity(resource),
            "Market bought stock"
        );
        Ok(())
    }

    /// Take `quantity` roboticons out of stock for a buyer.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Ledger`] wrapping `InsufficientStock` if fewer
    /// roboticons are in stock; stock is unchanged.
    pub fn buy_roboticons(&mut self, quantity: u32) -> Result<(), MarketError> {
        self.inventory.decrease_roboticon_stock(i64::from(quantity))?;
        debug!(
            quantity,
            remaining = self.inventory.roboticon_stock(),
            "Market sold roboticons"
        );
        Ok(())
    }

    // -------------------------------------------------------------------
    // Production
    // -------------------------------------------------------------------

    /// Turn `ore_to_roboticon_rate` units of market ore into one roboticon.
    ///
    /// Returns `false` and leaves the stock untouched when there is not
    /// enough ore. Scarcity is an expected outcome, so this never errors.
    pub fn attempt_to_produce_roboticon(&mut self) -> bool {
        let rate = i64::from(self.config.ore_to_roboticon_rate);
        let mut next = self.inventory;
        if next.decrease_ore(rate).is_err() || next.increase_roboticon_stock(1).is_err() {
            debug!(
                ore = self.inventory.ore(),
                rate, "Not enough ore to produce a roboticon"
            );
            return false;
        }
        self.inventory = next;
        debug!(
            ore = self.inventory.ore(),
            roboticons = self.inventory.roboticon_stock(),
            "Roboticon produced"
        );
        true
    }

    /// Convert as much market ore into roboticons as possible.
    ///
    /// Returns the number of roboticons produced.
    pub fn produce_roboticons_from_stock(&mut self) -> u32 {
        let mut produced: u32 = 0;
        while self.attempt_to_produce_roboticon() {
            produced = produced.saturating_add(1);
        }
        produced
    }
}

/// `unit_price * quantity` with overflow reported as an error.
const fn total_price(unit_price: u32, quantity: u32) -> Result<u32, MarketError> {
    match unit_price.checked_mul(quantity) {
        Some(total) => Ok(total),
        None => Err(MarketError::PriceOverflow {
            quantity,
            unit_price,
        }),
    }
}
