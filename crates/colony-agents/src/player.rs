//! Player seats and the actions every seat can take on the plot grid.
//!
//! Humans and the AI share the same [`Player`] trait: an identity and a
//! ledger, plus plot actions built on top. Market trades go through the
//! free functions in [`transaction`](crate::transaction).

use serde::{Deserialize, Serialize};
use tracing::debug;

use colony_ledger::{LedgerField, PlayerLedger};
use colony_types::{Customisation, PlayerId};
use colony_world::{PlotGrid, Position};

use crate::error::{AgentError, TradeError};

/// A seat at the table.
pub trait Player {
    /// The seat's identity.
    fn id(&self) -> PlayerId;

    /// The seat's holdings.
    fn ledger(&self) -> &PlayerLedger;

    /// Mutable holdings.
    fn ledger_mut(&mut self) -> &mut PlayerLedger;

    /// Acquire the plot at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::World`] if the plot is off the grid or already
    /// owned.
    fn acquire_plot(&self, grid: &mut PlotGrid, position: Position) -> Result<(), AgentError> {
        grid.acquire(position, self.id())?;
        Ok(())
    }

    /// Place one held roboticon of `customisation` on an owned plot.
    ///
    /// # Errors
    ///
    /// - [`AgentError::NotPlotOwner`] if the player does not own the plot.
    /// - [`TradeError::InsufficientHoldings`] (wrapped) if no such
    ///   roboticon is held.
    /// - [`AgentError::World`] if the plot is occupied or
    ///   `customisation` is `Uncustomised`.
    fn place_roboticon(
        &mut self,
        grid: &mut PlotGrid,
        position: Position,
        customisation: Customisation,
    ) -> Result<(), AgentError> {
        let player = self.id();
        let plot = grid.plot_mut(position)?;
        if !plot.is_owned_by(player) {
            return Err(AgentError::NotPlotOwner { player, position });
        }
        let held = self.ledger().roboticons(customisation);
        if held == 0 {
            return Err(TradeError::InsufficientHoldings {
                field: LedgerField::Roboticons(customisation),
                requested: 1,
                available: 0,
            }
            .into());
        }
        let mut next = *self.ledger();
        next.decrease_roboticons(customisation, 1)?;
        plot.place_roboticon(customisation)?;
        *self.ledger_mut() = next;
        debug!(
            %player,
            row = position.row,
            col = position.col,
            customisation = customisation.as_str(),
            "Player placed roboticon"
        );
        Ok(())
    }
}

/// A seat driven by UI input.
///
/// Carries no policy; the turn controller applies the human's chosen
/// actions through [`Player`] and the transaction functions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HumanPlayer {
    /// Seat identity.
    id: PlayerId,
    /// Holdings.
    ledger: PlayerLedger,
}

impl HumanPlayer {
    /// Seat a human with a starting ledger.
    pub fn new(ledger: PlayerLedger) -> Self {
        Self {
            id: PlayerId::new(),
            ledger,
        }
    }
}

impl Player for HumanPlayer {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn ledger(&self) -> &PlayerLedger {
        &self.ledger
    }

    fn ledger_mut(&mut self) -> &mut PlayerLedger {
        &mut self.ledger
    }
}
