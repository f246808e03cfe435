//! Error types for the colony-agents crate.
//!
//! [`TradeError`] covers a single market transaction. [`AgentError`] covers
//! whole player actions and AI turns, which also touch the plot grid.
//!
//! Running short of money, market stock or holdings is a business outcome:
//! the player simply cannot afford the trade and nothing has changed.
//! Everything else is a contract violation.

use colony_ledger::{LedgerError, LedgerField};
use colony_market::MarketError;
use colony_types::{FailureKind, PlayerId};
use colony_world::{Position, WorldError};

/// Errors from a single buy, sell or customise transaction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TradeError {
    /// The player cannot pay the price.
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds {
        /// Total price of the trade.
        needed: u32,
        /// Money the player holds.
        available: u32,
    },

    /// The market holds less than the requested quantity.
    #[error("market out of {field}: requested {requested}, in stock {available}")]
    MarketOutOfStock {
        /// What was requested.
        field: LedgerField,
        /// Quantity requested.
        requested: u32,
        /// Quantity the market holds.
        available: u32,
    },

    /// The player holds less than they tried to sell or convert.
    #[error("insufficient {field}: requested {requested}, held {available}")]
    InsufficientHoldings {
        /// What the player tried to give up.
        field: LedgerField,
        /// Quantity requested.
        requested: u32,
        /// Quantity the player holds.
        available: u32,
    },

    /// A ledger mutation was rejected.
    #[error("ledger error: {source}")]
    Ledger {
        /// The underlying ledger error.
        #[from]
        source: LedgerError,
    },

    /// The market rejected the operation.
    #[error("market error: {source}")]
    Market {
        /// The underlying market error.
        #[from]
        source: MarketError,
    },
}

impl TradeError {
    /// Classify the failure.
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::InsufficientFunds { .. }
            | Self::MarketOutOfStock { .. }
            | Self::InsufficientHoldings { .. } => FailureKind::BusinessOutcome,
            Self::Ledger { source } => source.kind(),
            Self::Market { source } => source.kind(),
        }
    }
}

/// Errors from player actions and AI turns.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    /// A transaction failed.
    #[error("trade failed: {source}")]
    Trade {
        /// The underlying trade error.
        #[from]
        source: TradeError,
    },

    /// A plot or grid operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// A ledger mutation outside a transaction failed.
    #[error("ledger error: {source}")]
    Ledger {
        /// The underlying ledger error.
        #[from]
        source: LedgerError,
    },

    /// The market rejected the operation.
    #[error("market error: {source}")]
    Market {
        /// The underlying market error.
        #[from]
        source: MarketError,
    },

    /// A player tried to act on a plot they do not own.
    #[error("player {player} does not own plot ({}, {})", .position.row, .position.col)]
    NotPlotOwner {
        /// The acting player.
        player: PlayerId,
        /// The plot.
        position: Position,
    },
}

impl AgentError {
    /// Classify the failure.
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Trade { source } => source.kind(),
            Self::World { source } => source.kind(),
            Self::Ledger { source } => source.kind(),
            Self::Market { source } => source.kind(),
            Self::NotPlotOwner { .. } => FailureKind::ContractViolation,
        }
    }
}
