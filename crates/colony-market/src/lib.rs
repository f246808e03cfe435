//! The shared marketplace for the Roboticon Colony economy engine.
//!
//! One [`Market`] exists per game session. It is owned by the turn
//! controller and handed to whoever acts this turn as an explicit
//! `&mut Market`; there is no global instance.
//!
//! # Modules
//!
//! - [`config`] -- [`MarketConfig`]: unit prices, customisation fees and the
//!   ore-to-roboticon conversion rate.
//! - [`market`] -- [`Market`]: pricing, stock movements and roboticon
//!   production against a [`MarketLedger`](colony_ledger::MarketLedger).
//!
//! # Failure semantics
//!
//! Buying more than the market holds is a contract violation and surfaces
//! as [`MarketError::Ledger`] wrapping `InsufficientStock`. Running out of
//! ore for roboticon production is a normal outcome and is reported through
//! the `bool` returned by [`Market::attempt_to_produce_roboticon`].

pub mod config;
pub mod market;

pub use config::MarketConfig;
pub use market::Market;

use colony_ledger::LedgerError;
use colony_types::{Customisation, FailureKind};

/// Errors that can occur during market operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarketError {
    /// The market ledger rejected a stock movement.
    #[error("market ledger error: {source}")]
    Ledger {
        /// The underlying ledger error.
        #[from]
        source: LedgerError,
    },

    /// A price computation overflowed.
    #[error("price overflow: {quantity} units at {unit_price} each")]
    PriceOverflow {
        /// Quantity being priced.
        quantity: u32,
        /// Unit price applied.
        unit_price: u32,
    },

    /// There is no fee for customising into [`Customisation::Uncustomised`].
    #[error("no customisation fee for {0:?}")]
    InvalidCustomisation(Customisation),

    /// The conversion rate must consume at least one ore per roboticon.
    #[error("ore-to-roboticon rate must be positive")]
    ZeroConversionRate,
}

impl MarketError {
    /// Classify the failure. Market failures are always contract violations.
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Ledger { source } => source.kind(),
            Self::PriceOverflow { .. }
            | Self::InvalidCustomisation(_)
            | Self::ZeroConversionRate => FailureKind::ContractViolation,
        }
    }
}
