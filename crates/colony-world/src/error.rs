//! Error types for the `colony-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`]. Every
//! variant is a contract violation: plots are one-shot state machines and a
//! second acquisition or placement means the caller skipped a check.

use colony_ledger::LedgerError;
use colony_types::{Customisation, FailureKind, PlayerId};

/// Errors that can occur during plot and grid operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// A grid dimension was zero or above the supported maximum.
    #[error("invalid grid dimensions {rows}x{cols}")]
    InvalidDimensions {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        cols: usize,
    },

    /// The plot already has an owner.
    #[error("plot already owned by {owner}")]
    AlreadyOwned {
        /// The existing owner.
        owner: PlayerId,
    },

    /// The plot already carries a roboticon.
    #[error("plot already has a {existing:?} roboticon")]
    RoboticonAlreadyPlaced {
        /// The roboticon already on the plot.
        existing: Customisation,
    },

    /// Uncustomised roboticons cannot be placed.
    #[error("uncustomised roboticons cannot be placed")]
    UncustomisedPlacement,

    /// Every plot in the grid already has an owner.
    #[error("no unowned plot left to acquire")]
    NoUnownedPlot,

    /// A coordinate outside the grid.
    #[error("plot ({row}, {col}) is outside the grid")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// A plot owner has no ledger in the directory handed to the
    /// production pass.
    #[error("no ledger for plot owner {0}")]
    UnknownOwner(PlayerId),

    /// Crediting production to an owner's ledger failed.
    #[error("ledger error: {source}")]
    Ledger {
        /// The underlying ledger error.
        #[from]
        source: LedgerError,
    },

    /// Arithmetic overflow while summing production.
    #[error("arithmetic overflow in world calculation")]
    ArithmeticOverflow,
}

impl WorldError {
    /// Classify the failure. World failures are always contract violations.
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Ledger { source } => source.kind(),
            Self::InvalidDimensions { .. }
            | Self::AlreadyOwned { .. }
            | Self::RoboticonAlreadyPlaced { .. }
            | Self::UncustomisedPlacement
            | Self::NoUnownedPlot
            | Self::OutOfBounds { .. }
            | Self::UnknownOwner(_)
            | Self::ArithmeticOverflow => FailureKind::ContractViolation,
        }
    }
}
