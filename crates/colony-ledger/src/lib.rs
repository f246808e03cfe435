//! Validated non-negative ledgers for the Roboticon Colony economy engine.
//!
//! Every quantity in the game -- ore, energy, money, held roboticons and the
//! market's roboticon stock -- lives in one of the ledgers defined here.
//! A ledger never goes negative and never silently clamps: every mutator
//! either applies the whole change or returns a [`LedgerError`] and leaves
//! the ledger untouched.
//!
//! # Architecture
//!
//! - [`quantity`] -- The [`QuantityStore`] trait and the checked delta rules
//!   shared by every ledger.
//! - [`resource`] -- [`ResourceLedger`]: the `{ore, energy}` base store.
//! - [`player`] -- [`PlayerLedger`]: a resource ledger plus money and a
//!   per-customisation roboticon count.
//! - [`market`] -- [`MarketLedger`]: a resource ledger plus the market's
//!   uncommitted roboticon stock.
//!
//! # Delta contract
//!
//! | Call | Negative delta | Delta exceeds held | Otherwise |
//! |------|----------------|--------------------|-----------|
//! | `increase` | `InvalidArgument` | n/a | `q += delta` |
//! | `decrease` | `InvalidArgument` | `InsufficientStock` | `q -= delta` |
//!
//! Deltas are signed so a negative request can be rejected as a contract
//! violation; stored quantities are unsigned.
//!
//! # Usage
//!
//! ```
//! use colony_ledger::{PlayerLedger, QuantityStore, ResourceLedger};
//! use colony_types::Resource;
//!
//! let mut ledger = PlayerLedger::new(100, ResourceLedger::new(0, 0));
//! ledger.increase(Resource::Ore, 4).ok();
//! assert_eq!(ledger.ore(), 4);
//! assert!(ledger.decrease(Resource::Ore, 5).is_err());
//! assert_eq!(ledger.ore(), 4);
//! ```

pub mod market;
pub mod player;
pub mod quantity;
pub mod resource;

// Re-export primary types at crate root.
pub use market::MarketLedger;
pub use player::PlayerLedger;
pub use quantity::QuantityStore;
pub use resource::ResourceLedger;

use colony_types::{Customisation, FailureKind, Resource};

// ---------------------------------------------------------------------------
// Field names
// ---------------------------------------------------------------------------

/// Identifies the ledger field a failed mutation targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerField {
    /// A raw resource quantity.
    Resource(Resource),
    /// A player's money.
    Money,
    /// A player's count of roboticons with the given customisation.
    Roboticons(Customisation),
    /// The market's uncommitted roboticon stock.
    RoboticonStock,
}

impl core::fmt::Display for LedgerField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Resource(resource) => write!(f, "{}", resource.as_str()),
            Self::Money => write!(f, "money"),
            Self::Roboticons(customisation) => {
                write!(f, "{} roboticons", customisation.as_str())
            }
            Self::RoboticonStock => write!(f, "roboticon stock"),
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when mutating a ledger.
///
/// Every variant is a contract violation: the caller asked for something the
/// ledger can never do. Callers that treat scarcity as a normal outcome must
/// check holdings before calling `decrease`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// A delta or initial quantity was negative.
    #[error("invalid argument for {field}: quantity must not be negative, got {value}")]
    InvalidArgument {
        /// The field being mutated or initialised.
        field: LedgerField,
        /// The rejected value.
        value: i64,
    },

    /// A decrease asked for more than the ledger holds.
    #[error("insufficient stock of {field}: wanted {requested} but only have {available}")]
    InsufficientStock {
        /// The field being decreased.
        field: LedgerField,
        /// The quantity the caller attempted to remove.
        requested: i64,
        /// The quantity actually held.
        available: u32,
    },

    /// A roboticon cannot be customised into [`Customisation::Uncustomised`].
    #[error("invalid customisation target: {0:?}")]
    InvalidCustomisation(Customisation),

    /// An increase would push the field past its maximum representable value.
    #[error("arithmetic overflow on {field}")]
    ArithmeticOverflow {
        /// The field being increased.
        field: LedgerField,
    },
}

impl LedgerError {
    /// Classify the failure. Ledger failures are always contract violations.
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidArgument { .. }
            | Self::InsufficientStock { .. }
            | Self::InvalidCustomisation(_)
            | Self::ArithmeticOverflow { .. } => FailureKind::ContractViolation,
        }
    }
}
