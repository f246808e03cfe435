//! Market pricing configuration.
//!
//! Loaded as the `market` section of the game configuration. Every field
//! has a default matching the standard game rules.

use serde::Deserialize;

use colony_types::{Customisation, Resource};

use crate::MarketError;

/// Fixed prices and conversion rate for a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MarketConfig {
    /// Price of one unit of ore.
    #[serde(default = "default_ore_price")]
    pub ore_price: u32,

    /// Price of one unit of energy.
    #[serde(default = "default_energy_price")]
    pub energy_price: u32,

    /// Price of one uncustomised roboticon.
    #[serde(default = "default_roboticon_price")]
    pub roboticon_price: u32,

    /// Flat fee for customising a roboticon into an ore miner.
    #[serde(default = "default_customisation_fee")]
    pub ore_customisation_fee: u32,

    /// Flat fee for customising a roboticon into an energy generator.
    #[serde(default = "default_customisation_fee")]
    pub energy_customisation_fee: u32,

    /// Units of market ore consumed to build one roboticon.
    #[serde(default = "default_ore_to_roboticon_rate")]
    pub ore_to_roboticon_rate: u32,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            ore_price: default_ore_price(),
            energy_price: default_energy_price(),
            roboticon_price: default_roboticon_price(),
            ore_customisation_fee: default_customisation_fee(),
            energy_customisation_fee: default_customisation_fee(),
            ore_to_roboticon_rate: default_ore_to_roboticon_rate(),
        }
    }
}

impl MarketConfig {
    /// Reject configurations the market cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::ZeroConversionRate`] if the ore-to-roboticon
    /// rate is zero.
    pub const fn validate(&self) -> Result<(), MarketError> {
        if self.ore_to_roboticon_rate == 0 {
            return Err(MarketError::ZeroConversionRate);
        }
        Ok(())
    }

    /// Unit price of a resource.
    pub const fn unit_price(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Ore => self.ore_price,
            Resource::Energy => self.energy_price,
        }
    }

    /// Customisation fee for a target, or `None` for `Uncustomised`.
    pub const fn customisation_fee(&self, target: Customisation) -> Option<u32> {
        match target {
            Customisation::Uncustomised => None,
            Customisation::Ore => Some(self.ore_customisation_fee),
            Customisation::Energy => Some(self.energy_customisation_fee),
        }
    }
}

const fn default_ore_price() -> u32 {
    10
}

const fn default_energy_price() -> u32 {
    10
}

const fn default_roboticon_price() -> u32 {
    15
}

const fn default_customisation_fee() -> u32 {
    10
}

const fn default_ore_to_roboticon_rate() -> u32 {
    5
}
