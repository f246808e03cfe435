//! Enumeration types for the colony economy.
//!
//! Every branch on a resource, customisation or specialism in the workspace
//! is an exhaustive `match` over one of these enums. Per-customisation counts
//! are fixed-size arrays of [`Customisation::COUNT`] entries in
//! [`Customisation::ALL`] order, so all three counts always exist.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Resource
// ---------------------------------------------------------------------------

/// A raw resource held in ledgers and traded through the market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Resource {
    /// Ore mined by ore roboticons; also the market's roboticon feedstock.
    Ore,
    /// Energy generated by energy roboticons.
    Energy,
}

impl Resource {
    /// Every resource, in ledger order.
    pub const ALL: [Self; 2] = [Self::Ore, Self::Energy];

    /// Human-readable label for logging.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ore => "ore",
            Self::Energy => "energy",
        }
    }
}

// ---------------------------------------------------------------------------
// Customisation
// ---------------------------------------------------------------------------

/// The production type assigned to a roboticon.
///
/// Roboticons leave the market [`Uncustomised`](Customisation::Uncustomised)
/// and must be customised to [`Ore`](Customisation::Ore) or
/// [`Energy`](Customisation::Energy) before they can be placed on a plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Customisation {
    /// Fresh from the market; cannot produce anything.
    Uncustomised,
    /// Mines ore.
    Ore,
    /// Generates energy.
    Energy,
}

impl Customisation {
    /// Number of customisation variants (length of per-customisation arrays).
    pub const COUNT: usize = 3;

    /// Every customisation, in array-index order.
    pub const ALL: [Self; Self::COUNT] = [Self::Uncustomised, Self::Ore, Self::Energy];

    /// The resource a roboticon of this customisation produces, if any.
    pub const fn resource(self) -> Option<Resource> {
        match self {
            Self::Uncustomised => None,
            Self::Ore => Some(Resource::Ore),
            Self::Energy => Some(Resource::Energy),
        }
    }

    /// Human-readable label for logging.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uncustomised => "uncustomised",
            Self::Ore => "ore",
            Self::Energy => "energy",
        }
    }
}

impl From<Specialism> for Customisation {
    fn from(specialism: Specialism) -> Self {
        match specialism {
            Specialism::Ore => Self::Ore,
            Specialism::Energy => Self::Energy,
        }
    }
}

// ---------------------------------------------------------------------------
// Specialism
// ---------------------------------------------------------------------------

/// A plot's fixed resource bias. A roboticon whose customisation matches the
/// specialism doubles the plot's yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Specialism {
    /// Rich in ore.
    Ore,
    /// Rich in energy.
    Energy,
}

impl Specialism {
    /// Whether a roboticon of the given customisation matches this plot.
    pub const fn matches(self, customisation: Customisation) -> bool {
        matches!(
            (self, customisation),
            (Self::Ore, Customisation::Ore) | (Self::Energy, Customisation::Energy)
        )
    }
}

// ---------------------------------------------------------------------------
// FailureKind
// ---------------------------------------------------------------------------

/// Classification of every error in the workspace.
///
/// Contract violations indicate a caller bug and must abort the current
/// action; business outcomes are expected and the caller decides how to
/// degrade (skip the action, move to the next phase).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum FailureKind {
    /// Negative quantity, double acquisition, occupied plot, overdrawn stock.
    ContractViolation,
    /// Insufficient money, insufficient market stock, production scarcity.
    BusinessOutcome,
}

impl FailureKind {
    /// Whether the failure is an expected business outcome.
    pub const fn is_recoverable(self) -> bool {
        matches!(self, Self::BusinessOutcome)
    }
}
