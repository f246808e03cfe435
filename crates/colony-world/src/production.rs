//! Where the production pass finds each owner's ledger.
//!
//! The grid knows plot owners only by [`PlayerId`]. The turn controller
//! owns the player ledgers and exposes them through [`LedgerDirectory`].

use std::collections::BTreeMap;

use colony_ledger::PlayerLedger;
use colony_types::PlayerId;

/// Lookup from a player to their ledger.
pub trait LedgerDirectory {
    /// Whether `player` has a ledger.
    fn contains(&self, player: PlayerId) -> bool;

    /// Mutable access to `player`'s ledger.
    fn ledger_mut(&mut self, player: PlayerId) -> Option<&mut PlayerLedger>;
}

impl LedgerDirectory for BTreeMap<PlayerId, PlayerLedger> {
    fn contains(&self, player: PlayerId) -> bool {
        self.contains_key(&player)
    }

    fn ledger_mut(&mut self, player: PlayerId) -> Option<&mut PlayerLedger> {
        self.get_mut(&player)
    }
}
