//! Value structs shared between the engine crates and the rendering layer.
//!
//! Covers per-plot production yields and the read-only snapshots handed to
//! the UI through the notification sink. None of these carry behaviour that
//! mutates game state.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Customisation, Resource, Specialism};
use crate::ids::PlayerId;

// ---------------------------------------------------------------------------
// Production
// ---------------------------------------------------------------------------

/// Resources yielded by one plot (or summed over many) in a production pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Production {
    /// Ore produced.
    pub ore: u32,
    /// Energy produced.
    pub energy: u32,
}

impl Production {
    /// Nothing produced.
    pub const NONE: Self = Self { ore: 0, energy: 0 };

    /// A yield of `amount` units of a single resource.
    pub const fn of(resource: Resource, amount: u32) -> Self {
        match resource {
            Resource::Ore => Self {
                ore: amount,
                energy: 0,
            },
            Resource::Energy => Self {
                ore: 0,
                energy: amount,
            },
        }
    }

    /// Whether nothing was produced.
    pub const fn is_empty(self) -> bool {
        self.ore == 0 && self.energy == 0
    }

    /// Sum two yields, returning `None` on overflow.
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        let Some(ore) = self.ore.checked_add(other.ore) else {
            return None;
        };
        let Some(energy) = self.energy.checked_add(other.energy) else {
            return None;
        };
        Some(Self { ore, energy })
    }
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// Read-only copy of a player's ledger, sent to the UI when it changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LedgerSnapshot {
    /// Money held.
    pub money: u32,
    /// Ore held.
    pub ore: u32,
    /// Energy held.
    pub energy: u32,
    /// Roboticons bought but not yet customised.
    pub uncustomised_roboticons: u32,
    /// Ore-customised roboticons waiting to be placed.
    pub ore_roboticons: u32,
    /// Energy-customised roboticons waiting to be placed.
    pub energy_roboticons: u32,
}

/// Read-only copy of the market's stock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MarketSnapshot {
    /// Ore in stock.
    pub ore: u32,
    /// Energy in stock.
    pub energy: u32,
    /// Uncommitted roboticons in stock.
    pub roboticon_stock: u32,
}

/// What the renderer needs to draw one plot cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlotView {
    /// Zero-based row.
    pub row: u32,
    /// Zero-based column.
    pub col: u32,
    /// Owning player, if the plot has been acquired.
    pub owner: Option<PlayerId>,
    /// The plot's fixed specialism.
    pub specialism: Specialism,
    /// The placed roboticon, if any.
    pub roboticon: Option<Customisation>,
}
